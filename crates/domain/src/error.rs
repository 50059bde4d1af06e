//! Common error types used across the workspace.
//!
//! Each failure kind is its own typed error so callers can match on it,
//! and all of them convert into [`SmartHomeError`] through `#[from]`.

use crate::device::{DeviceKind, DeviceState};

/// Top-level error returned by domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    #[error(transparent)]
    NothingToUndo(#[from] NothingToUndoError),

    #[error(transparent)]
    NothingToRedo(#[from] NothingToRedoError),

    #[error(transparent)]
    NoSnapshot(#[from] NoSnapshotError),

    #[error(transparent)]
    UnknownEvent(#[from] UnknownEventError),

    #[error(transparent)]
    UnknownService(#[from] UnknownServiceError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("validation error")]
    Validation(#[from] ValidationError),
}

/// A device was asked to enter a state its kind does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device} ({kind}) cannot enter state {state}")]
pub struct InvalidStateError {
    pub device: String,
    pub kind: DeviceKind,
    pub state: DeviceState,
}

/// The command history has no executed command left to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("nothing to undo")]
pub struct NothingToUndoError;

/// The command history has no undone command left to redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("nothing to redo")]
pub struct NothingToRedoError;

/// A restore was requested for a device that was never saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no snapshot saved for {device}")]
pub struct NoSnapshotError {
    pub device: String,
}

/// The hub received an event type nobody registered for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no reaction registered for event {event}")]
pub struct UnknownEventError {
    pub event: String,
}

/// A service name that does not map to any device operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service {service}")]
pub struct UnknownServiceError {
    pub service: String,
}

/// A lookup by name did not find anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Domain invariant violations detected while building values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("a device named {0} is already registered")]
    DuplicateDevice(String),

    #[error("invalid time of day {0}, expected HH:MM")]
    InvalidTime(String),

    #[error("unknown device state {0}")]
    UnknownState(String),
}
