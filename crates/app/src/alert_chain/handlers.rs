//! Stock alert handlers.

use smarthome_domain::alert::{Alert, AlertLevel, AlertOutcome};

use crate::ports::AlertHandler;

/// Handles exactly one [`AlertLevel`] and answers with `"<prefix> <message>"`.
#[derive(Debug, Clone)]
pub struct LevelHandler {
    name: String,
    level: AlertLevel,
    prefix: String,
}

impl LevelHandler {
    #[must_use]
    pub fn new(name: impl Into<String>, level: AlertLevel, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            prefix: prefix.into(),
        }
    }

    /// First link: the sensor deals with plain motion.
    #[must_use]
    pub fn sensor() -> Self {
        Self::new("sensor", AlertLevel::Motion, "Motion detected!")
    }

    /// Second link: the hub sounds the alarm.
    #[must_use]
    pub fn hub() -> Self {
        Self::new("hub", AlertLevel::Alarm, "Alarm triggered!")
    }

    /// Last link: the user calls the police.
    #[must_use]
    pub fn user() -> Self {
        Self::new("user", AlertLevel::Police, "Police notified!")
    }
}

impl AlertHandler for LevelHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, alert: &Alert) -> AlertOutcome {
        if alert.level.canonical() == self.level.canonical() {
            AlertOutcome::handled(&self.name, format!("{} {}", self.prefix, alert.message))
        } else {
            AlertOutcome::Unhandled
        }
    }
}
