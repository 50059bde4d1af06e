//! Control strategies: interchangeable policies that pick a device's target state.
//!
//! A strategy never mutates anything: it looks at the device and the
//! [`StrategyContext`] and answers with the state the device should move to.
//! Applying that answer is the hub's job.

mod schedule;

pub use schedule::{Schedule, ScheduleEntry};

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind, DeviceState};
use crate::error::InvalidStateError;

/// Inputs a strategy may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyContext {
    /// Wall-clock time of the decision.
    pub time: NaiveTime,
    /// Whether a motion sensor reported presence.
    pub motion_detected: bool,
    /// State the user asked for, if any.
    pub requested: Option<DeviceState>,
}

impl StrategyContext {
    #[must_use]
    pub fn at(time: NaiveTime) -> Self {
        Self {
            time,
            motion_detected: false,
            requested: None,
        }
    }

    #[must_use]
    pub fn with_motion(mut self, detected: bool) -> Self {
        self.motion_detected = detected;
        self
    }

    #[must_use]
    pub fn with_request(mut self, state: DeviceState) -> Self {
        self.requested = Some(state);
        self
    }
}

/// Policy used to decide a target state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlStrategy {
    /// Use exactly the state given by the caller.
    Manual { target: DeviceState },
    /// Follow a time-of-day table.
    Scheduled { schedule: Schedule },
    /// Prefer the energy-saving variant of whatever is requested.
    Eco,
    /// Switch on when motion is detected, otherwise leave the device alone.
    MotionActivated,
}

impl ControlStrategy {
    /// Decide the state `device` should move to.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] when the decided state is not allowed
    /// for the device's kind.
    pub fn decide(
        &self,
        device: &Device,
        context: &StrategyContext,
    ) -> Result<DeviceState, InvalidStateError> {
        let target = match self {
            Self::Manual { target } => *target,
            Self::Scheduled { schedule } => schedule
                .state_at(context.time)
                .unwrap_or_else(|| device.state()),
            Self::Eco => {
                let requested = match context.requested {
                    Some(requested) => {
                        device.check_state(requested)?;
                        requested
                    }
                    None => device
                        .kind
                        .energy_saving_state()
                        .unwrap_or_else(|| device.state()),
                };
                eco_bias(device.kind, requested)
            }
            Self::MotionActivated => {
                if context.motion_detected {
                    DeviceState::On
                } else {
                    device.state()
                }
            }
        };
        device.check_state(target)?;
        Ok(target)
    }
}

fn eco_bias(kind: DeviceKind, requested: DeviceState) -> DeviceState {
    if !requested.is_active() {
        return requested;
    }
    kind.energy_saving_state().unwrap_or(requested)
}

impl fmt::Display for ControlStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual { target } => write!(f, "manual({target})"),
            Self::Scheduled { .. } => f.write_str("scheduled"),
            Self::Eco => f.write_str("eco"),
            Self::MotionActivated => f.write_str("motion_activated"),
        }
    }
}
