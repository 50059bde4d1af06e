//! Service: a named operation the hub can run against a device.
//!
//! Examples: `turn_on`, `turn_off`, `toggle`, `press_button`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind, DeviceState};
use crate::error::{InvalidStateError, UnknownServiceError};

/// A device operation addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    TurnOn,
    TurnOff,
    Toggle,
    /// Advance a fan to its next speed.
    PressButton,
}

impl Service {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::Toggle => "toggle",
            Self::PressButton => "press_button",
        }
    }

    /// State `device` ends up in when this service runs against it.
    ///
    /// `toggle` flips any active state to `OFF` and `OFF` to `ON`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] when the resulting state is not allowed
    /// for the device (e.g. pressing the button of a light).
    pub fn target_state(self, device: &Device) -> Result<DeviceState, InvalidStateError> {
        let current = device.state();
        let target = match self {
            Self::TurnOn => DeviceState::On,
            Self::TurnOff => DeviceState::Off,
            Self::Toggle if current.is_active() => DeviceState::Off,
            Self::Toggle => DeviceState::On,
            Self::PressButton if device.kind == DeviceKind::Fan => {
                current.next_fan_speed().unwrap_or(DeviceState::Off)
            }
            Self::PressButton => {
                return Err(InvalidStateError {
                    device: device.name.clone(),
                    kind: device.kind,
                    state: current,
                });
            }
        };
        device.check_state(target)?;
        Ok(target)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = UnknownServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "turn_on" => Ok(Self::TurnOn),
            "turn_off" => Ok(Self::TurnOff),
            "toggle" => Ok(Self::Toggle),
            "press_button" => Ok(Self::PressButton),
            other => Err(UnknownServiceError {
                service: other.to_string(),
            }),
        }
    }
}
