//! Typed identifiers backed by UUIDs.
//!
//! `Id<T>` carries the type it identifies as a phantom parameter, so a
//! [`SnapshotId`] can never be passed where a [`DeviceId`] is expected.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::snapshot::Snapshot;

/// Random UUID v4 identifier for values of type `T`.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    uuid: uuid::Uuid,
    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

/// Identifier of a [`Device`].
pub type DeviceId = Id<Device>;

/// Identifier of a [`Snapshot`].
pub type SnapshotId = Id<Snapshot>;

impl<T> Id<T> {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(uuid::Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self {
            uuid,
            marker: PhantomData,
        }
    }

    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.uuid
    }
}

// Manual impls: deriving would require `T` itself to implement each trait.

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.uuid).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.uuid.fmt(f)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self::from_uuid)
    }
}
