//! State change: the structured record handed to observers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::DeviceState;

/// What caused a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrigin {
    /// A direct request (service call, strategy, hub reaction, …).
    #[default]
    Direct,
    /// Rolled back by the command history.
    Undo,
    /// Replayed by the command history.
    Redo,
    /// Re-applied from a saved snapshot.
    Restore,
}

impl ChangeOrigin {
    /// Annotation appended to the notification line, if any.
    ///
    /// A redo replays an entry from the undo branch and carries the same marker.
    #[must_use]
    pub const fn annotation(self) -> Option<&'static str> {
        match self {
            Self::Direct => None,
            Self::Undo | Self::Redo => Some("after undo"),
            Self::Restore => Some("restored"),
        }
    }
}

/// A device moved from one state to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub device: String,
    pub from: DeviceState,
    pub to: DeviceState,
    #[serde(default)]
    pub origin: ChangeOrigin,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.device, self.to)?;
        if let Some(note) = self.origin.annotation() {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(origin: ChangeOrigin) -> StateChange {
        StateChange {
            device: "Living Room Light".to_string(),
            from: DeviceState::On,
            to: DeviceState::Off,
            origin,
        }
    }

    #[test]
    fn should_display_plain_line_for_direct_change() {
        assert_eq!(
            change(ChangeOrigin::Direct).to_string(),
            "Living Room Light -> OFF"
        );
    }

    #[test]
    fn should_annotate_undo_and_redo_identically() {
        assert_eq!(
            change(ChangeOrigin::Undo).to_string(),
            "Living Room Light -> OFF (after undo)"
        );
        assert_eq!(
            change(ChangeOrigin::Redo).to_string(),
            "Living Room Light -> OFF (after undo)"
        );
    }

    #[test]
    fn should_annotate_restore() {
        assert_eq!(
            change(ChangeOrigin::Restore).to_string(),
            "Living Room Light -> OFF (restored)"
        );
    }

    #[test]
    fn should_default_origin_to_direct_when_missing_from_json() {
        let json = r#"{"device":"Fan","from":"OFF","to":"LOW"}"#;
        let parsed: StateChange = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.origin, ChangeOrigin::Direct);
    }
}
