//! Observer port: subscribers to a device's state changes.

use smarthome_domain::change::StateChange;

/// Something that wants to hear about a device's state changes.
///
/// Observers are identified by their [`label`](Self::label): a device keeps
/// at most one subscription per label, and unsubscribing is done by label.
pub trait Observer: Send + Sync {
    /// Identity of this observer.
    fn label(&self) -> &str;

    /// Called once per state change, after the device has moved.
    fn notify(&self, change: &StateChange);
}
