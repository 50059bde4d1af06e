//! Demo configuration: `smarthome.toml` plus environment overrides.
//!
//! Looks for `smarthome.toml` in the working directory. Every field has a
//! default so the file is optional, and the defaults reproduce the canonical
//! transcript. Environment variables take precedence over file values.

use chrono::NaiveTime;
use serde::Deserialize;
use smarthome_domain::error::ValidationError;
use smarthome_domain::time::parse_time_of_day;

/// Everything `smarthome-demo` reads at startup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[logging]` section.
    pub logging: LoggingConfig,
    /// `[scenario]` section.
    pub scenario: ScenarioConfig,
}

/// Where diagnostics go is fixed (stderr); only their verbosity is configurable.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `smarthome_app=debug`.
    pub filter: String,
}

/// Inputs of the scripted run.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Wall-clock time fed to time-based strategies, `HH:MM`.
    pub clock: String,
}

impl Config {
    /// Read `smarthome.toml` from the working directory when it exists,
    /// then let `SMARTHOME_LOG`, `RUST_LOG` and `SMARTHOME_CLOCK` win.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthome.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SMARTHOME_CLOCK") {
            self.scenario.clock = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.scenario.clock()?;
        Ok(())
    }
}

impl ScenarioConfig {
    /// Parsed [`clock`](Self::clock).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the clock is not `HH:MM`.
    pub fn clock(&self) -> Result<NaiveTime, ConfigError> {
        Ok(parse_time_of_day(&self.clock)?)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthome_demo=info,smarthome_app=warn".to_string(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            clock: "19:00".to_string(),
        }
    }
}

/// Why the configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("smarthome.toml is not valid TOML")]
    Parse(#[from] toml::de::Error),
    #[error("could not read smarthome.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration value")]
    Validation(#[from] ValidationError),
}
