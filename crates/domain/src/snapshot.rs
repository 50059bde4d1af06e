//! Snapshot: an immutable saved copy of a device's state.

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceState};
use crate::id::SnapshotId;
use crate::time::Timestamp;

/// A device's state at the moment it was saved.
///
/// `ordinal` increases with every save made by the same caretaker, so two
/// snapshots can be ordered even when their timestamps collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub device: String,
    pub state: DeviceState,
    pub ordinal: u64,
    pub taken_at: Timestamp,
}

impl Snapshot {
    /// Capture the current state of `device`.
    #[must_use]
    pub fn capture(device: &Device, ordinal: u64, taken_at: Timestamp) -> Self {
        Self {
            id: SnapshotId::new(),
            device: device.name.clone(),
            state: device.state(),
            ordinal,
            taken_at,
        }
    }
}
