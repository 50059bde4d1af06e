//! Schedule: a fixed time-of-day table used by the scheduled strategy.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::device::DeviceState;

/// "From `at` onwards, the device should be in `state`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub at: NaiveTime,
    pub state: DeviceState,
}

/// Daily table of target states, kept sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Build a schedule from unordered entries.
    #[must_use]
    pub fn new(mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by_key(|entry| entry.at);
        Self { entries }
    }

    /// Lights off in the morning, on at 7 PM, dimmed late at night.
    #[must_use]
    pub fn evening_lighting() -> Self {
        Self::new(vec![
            entry(7, DeviceState::Off),
            entry(19, DeviceState::On),
            entry(23, DeviceState::Dim),
        ])
    }

    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Target state at `time`.
    ///
    /// The latest entry at or before `time` wins; before the first entry of
    /// the day the last entry (from the previous evening) still applies.
    /// Returns `None` for an empty schedule.
    #[must_use]
    pub fn state_at(&self, time: NaiveTime) -> Option<DeviceState> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.at <= time)
            .or_else(|| self.entries.last())
            .map(|entry| entry.state)
    }
}

fn entry(hour: u32, state: DeviceState) -> ScheduleEntry {
    ScheduleEntry {
        at: NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN),
        state,
    }
}
