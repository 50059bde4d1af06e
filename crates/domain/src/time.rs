//! Time and timestamp helpers.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for snapshot times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a wall-clock time written as `HH:MM` in 24-hour format.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] when `text` is not a valid time.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(text.to_string()))
}
