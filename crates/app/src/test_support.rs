//! In-memory port implementations shared by the unit tests.

use std::sync::{Arc, Mutex};

use smarthome_domain::change::StateChange;
use smarthome_domain::device::{Device, DeviceKind};

use crate::ports::{NotificationSink, Observer};

/// Notification log shared by several observers, one `"<label>: <change>"`
/// line per `notify` call.
pub type SharedLog = Arc<Mutex<Vec<String>>>;

/// Observer that records every change it is told about.
pub struct RecordingObserver {
    label: String,
    seen: Mutex<Vec<StateChange>>,
    log: Option<SharedLog>,
}

impl RecordingObserver {
    pub fn new(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            seen: Mutex::new(Vec::new()),
            log: None,
        })
    }

    /// Observer that also appends to `log`, to check ordering across observers.
    pub fn logging_to(label: &str, log: &SharedLog) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            seen: Mutex::new(Vec::new()),
            log: Some(Arc::clone(log)),
        })
    }

    pub fn seen(&self) -> Vec<StateChange> {
        self.seen.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.seen().iter().map(ToString::to_string).collect()
    }
}

impl Observer for RecordingObserver {
    fn label(&self) -> &str {
        &self.label
    }

    fn notify(&self, change: &StateChange) {
        self.seen.lock().unwrap().push(change.clone());
        if let Some(log) = &self.log {
            log.lock().unwrap().push(format!("{}: {change}", self.label));
        }
    }
}

/// Sink shared between several observers, to check global ordering.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, change: &StateChange) {
        self.delivered.lock().unwrap().push(change.to_string());
    }
}

pub fn device(name: &str, kind: DeviceKind) -> Device {
    Device::builder().name(name).kind(kind).build().unwrap()
}
