//! Observed device: a device together with its ordered list of observers.

use std::sync::Arc;

use smarthome_domain::change::{ChangeOrigin, StateChange};
use smarthome_domain::device::{Device, DeviceState};
use smarthome_domain::error::InvalidStateError;

use crate::ports::{NotificationSink, Observer};

/// A [`Device`] that fans out its state changes to subscribed observers.
///
/// Observers are notified synchronously, in subscription order, after the
/// device has moved to its new state.
pub struct ObservedDevice {
    device: Device,
    observers: Vec<Arc<dyn Observer>>,
}

impl ObservedDevice {
    #[must_use]
    pub fn new(device: Device) -> Self {
        Self {
            device,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.device.name
    }

    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.device.state()
    }

    /// Add an observer at the end of the list.
    ///
    /// Subscribing a label that is already present keeps the original
    /// subscription and its position.
    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) {
        if self.is_subscribed(observer.label()) {
            return;
        }
        self.observers.push(observer);
    }

    /// Remove the observer with `label`. Returns whether one was removed;
    /// unknown labels are ignored.
    pub fn unsubscribe(&mut self, label: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.label() != label);
        self.observers.len() != before
    }

    #[must_use]
    pub fn is_subscribed(&self, label: &str) -> bool {
        self.observers.iter().any(|observer| observer.label() == label)
    }

    /// Labels of the current observers, in notification order.
    #[must_use]
    pub fn observer_labels(&self) -> Vec<&str> {
        self.observers.iter().map(|observer| observer.label()).collect()
    }

    /// Move the device to `state` and notify every observer.
    ///
    /// Nobody is notified when the device is already in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] when the device kind does not accept
    /// `state`; the device is unchanged and no observer runs.
    pub fn set_state(
        &mut self,
        state: DeviceState,
        origin: ChangeOrigin,
    ) -> Result<Option<StateChange>, InvalidStateError> {
        let change = self.device.apply_state(state, origin)?;
        if let Some(change) = &change {
            for observer in &self.observers {
                tracing::debug!(
                    device = %change.device,
                    observer = observer.label(),
                    from = %change.from,
                    to = %change.to,
                    "notifying observer"
                );
                observer.notify(change);
            }
        }
        Ok(change)
    }
}

/// Stock observer standing for the household's phone app: it forwards
/// every change to a [`NotificationSink`].
pub struct UserApp<S> {
    label: String,
    sink: S,
}

impl<S: NotificationSink> UserApp<S> {
    /// Create a user app labelled `"User App"`.
    pub fn new(sink: S) -> Self {
        Self::with_label("User App", sink)
    }

    pub fn with_label(label: impl Into<String>, sink: S) -> Self {
        Self {
            label: label.into(),
            sink,
        }
    }
}

impl<S: NotificationSink> Observer for UserApp<S> {
    fn label(&self) -> &str {
        &self.label
    }

    fn notify(&self, change: &StateChange) {
        self.sink.deliver(change);
    }
}
