//! Alert: a security or presence event escalated through the handler chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity / category of an alert.
///
/// Serialized as the same plain string [`fmt::Display`] prints, and read
/// back through [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertLevel {
    Motion,
    Alarm,
    Police,
    /// Any level no stock handler knows about.
    Other(String),
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion => f.write_str("motion"),
            Self::Alarm => f.write_str("alarm"),
            Self::Police => f.write_str("police"),
            Self::Other(level) => f.write_str(level),
        }
    }
}

impl FromStr for AlertLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s.trim().to_ascii_lowercase();
        Ok(match level.as_str() {
            "motion" => Self::Motion,
            "alarm" => Self::Alarm,
            "police" => Self::Police,
            _ => Self::Other(level),
        })
    }
}

impl From<String> for AlertLevel {
    fn from(level: String) -> Self {
        let Ok(level) = level.parse::<Self>();
        level
    }
}

impl From<AlertLevel> for String {
    fn from(level: AlertLevel) -> Self {
        level.to_string()
    }
}

impl AlertLevel {
    /// The level as parsing its own text would produce it, so that
    /// `Other("Motion")` and `Motion` compare equal.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self::from(self.to_string())
    }
}

/// An alert raised by a sensor or the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Result of offering an alert to a handler or a whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AlertOutcome {
    /// A handler consumed the alert; propagation stops.
    Handled {
        handler: String,
        response: String,
    },
    /// Nobody took the alert.
    Unhandled,
}

impl AlertOutcome {
    #[must_use]
    pub fn handled(handler: impl Into<String>, response: impl Into<String>) -> Self {
        Self::Handled {
            handler: handler.into(),
            response: response.into(),
        }
    }

    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }
}
