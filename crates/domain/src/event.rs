//! Hub events: things components report to the hub, and the reactions
//! the hub runs in response.
//!
//! Components never talk to each other directly: a motion sensor does not
//! know the hallway light exists. It raises a [`HubEvent`], and the hub runs
//! whatever [`Reaction`]s were registered for that event kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alert::{AlertLevel, AlertOutcome};
use crate::change::StateChange;
use crate::device::DeviceState;
use crate::snapshot::Snapshot;

/// Something that happened, addressed to the hub by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubEvent {
    /// Routing key, e.g. `"motion"` or `"leaving_home"`.
    pub kind: String,
    /// Free-form detail, forwarded to escalated alerts.
    #[serde(default)]
    pub message: String,
}

impl HubEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// An operation the hub runs when an event of a registered kind arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reaction {
    SetState { device: String, state: DeviceState },
    Save { device: String },
    Restore { device: String },
    /// Forward the event message through the alert chain at `level`.
    Escalate { level: AlertLevel },
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetState { device, state } => write!(f, "set_state({device}, {state})"),
            Self::Save { device } => write!(f, "save({device})"),
            Self::Restore { device } => write!(f, "restore({device})"),
            Self::Escalate { level } => write!(f, "escalate({level})"),
        }
    }
}

/// What a single reaction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// A device changed state (`None` when it was already there).
    StateSet(Option<StateChange>),
    Saved(Snapshot),
    Restored(Option<StateChange>),
    Escalated(AlertOutcome),
}
