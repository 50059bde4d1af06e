//! Device state: the discrete operational state a device can be in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Every state any device kind can report.
///
/// Which of these a given device accepts depends on its
/// [`DeviceKind`](super::DeviceKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceState {
    On,
    Off,
    Dim,
    Low,
    Medium,
    High,
    Heat,
    Cool,
    Eco,
    Clear,
    Detected,
}

impl DeviceState {
    /// Upper-case name used in notifications.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Dim => "DIM",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
            Self::Eco => "ECO",
            Self::Clear => "CLEAR",
            Self::Detected => "DETECTED",
        }
    }

    /// Next step of the fan button cycle: `OFF → LOW → MEDIUM → HIGH → OFF`.
    ///
    /// Returns `None` for states that are not fan speeds.
    #[must_use]
    pub const fn next_fan_speed(self) -> Option<Self> {
        match self {
            Self::Off => Some(Self::Low),
            Self::Low => Some(Self::Medium),
            Self::Medium => Some(Self::High),
            Self::High => Some(Self::Off),
            _ => None,
        }
    }

    /// Whether the state draws power (anything but `OFF` and `CLEAR`).
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Off | Self::Clear)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            "DIM" => Ok(Self::Dim),
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "HEAT" => Ok(Self::Heat),
            "COOL" => Ok(Self::Cool),
            "ECO" => Ok(Self::Eco),
            "CLEAR" => Ok(Self::Clear),
            "DETECTED" => Ok(Self::Detected),
            _ => Err(ValidationError::UnknownState(s.to_string())),
        }
    }
}
