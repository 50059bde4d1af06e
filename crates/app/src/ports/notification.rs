//! Output ports: where notifications and narration go.

use std::sync::Arc;

use smarthome_domain::change::StateChange;

/// Receives user-facing notifications about device state changes.
///
/// The console adapter formats them as `[Notification] <Device> -> <STATE>`;
/// tests plug in a recording implementation.
pub trait NotificationSink: Send + Sync {
    /// Deliver a single notification.
    fn deliver(&self, change: &StateChange);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn deliver(&self, change: &StateChange) {
        (**self).deliver(change);
    }
}

/// Receives free-form narration lines of a scripted run (section titles,
/// strategy decisions, alert responses, …).
pub trait Transcript: Send + Sync {
    /// Emit one line of text.
    fn line(&self, text: &str);

    /// Emit an empty separator line.
    fn blank(&self) {
        self.line("");
    }
}

impl<T: Transcript + ?Sized> Transcript for Arc<T> {
    fn line(&self, text: &str) {
        (**self).line(text);
    }
}
