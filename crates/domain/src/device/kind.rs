//! Device kind: what sort of appliance a device is, and which states it accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DeviceState;

/// The appliance family of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Light,
    Fan,
    Thermostat,
    MotionSensor,
}

impl DeviceKind {
    /// States a device of this kind may be in, in declaration order.
    #[must_use]
    pub const fn allowed_states(self) -> &'static [DeviceState] {
        match self {
            Self::Light => &[DeviceState::Off, DeviceState::On, DeviceState::Dim],
            Self::Fan => &[
                DeviceState::Off,
                DeviceState::Low,
                DeviceState::Medium,
                DeviceState::High,
            ],
            Self::Thermostat => &[
                DeviceState::Off,
                DeviceState::Heat,
                DeviceState::Cool,
                DeviceState::Eco,
            ],
            Self::MotionSensor => &[DeviceState::Clear, DeviceState::Detected],
        }
    }

    /// Whether `state` is one of [`allowed_states`](Self::allowed_states).
    #[must_use]
    pub fn allows(self, state: DeviceState) -> bool {
        self.allowed_states().contains(&state)
    }

    /// State a freshly built device starts in.
    #[must_use]
    pub const fn initial_state(self) -> DeviceState {
        match self {
            Self::MotionSensor => DeviceState::Clear,
            Self::Light | Self::Fan | Self::Thermostat => DeviceState::Off,
        }
    }

    /// The lowest-consumption state that still counts as "running".
    ///
    /// Sensors have no such state and return `None`.
    #[must_use]
    pub const fn energy_saving_state(self) -> Option<DeviceState> {
        match self {
            Self::Light => Some(DeviceState::Dim),
            Self::Fan => Some(DeviceState::Low),
            Self::Thermostat => Some(DeviceState::Eco),
            Self::MotionSensor => None,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Fan => f.write_str("fan"),
            Self::Thermostat => f.write_str("thermostat"),
            Self::MotionSensor => f.write_str("motion_sensor"),
        }
    }
}
