//! Caretaker: keeps the latest snapshot of each device.

use std::collections::HashMap;

use smarthome_domain::change::{ChangeOrigin, StateChange};
use smarthome_domain::error::{NoSnapshotError, SmartHomeError};
use smarthome_domain::snapshot::Snapshot;
use smarthome_domain::time::now;

use crate::observed_device::ObservedDevice;

/// Single-slot snapshot store keyed by device name.
///
/// Saving a device again overwrites its previous snapshot; there is no
/// snapshot history.
#[derive(Debug, Default)]
pub struct Caretaker {
    snapshots: HashMap<String, Snapshot>,
    next_ordinal: u64,
}

impl Caretaker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current state of `target`, replacing any earlier one.
    pub fn save(&mut self, target: &ObservedDevice) -> Snapshot {
        self.next_ordinal += 1;
        let snapshot = Snapshot::capture(target.device(), self.next_ordinal, now());
        tracing::debug!(
            device = %snapshot.device,
            state = %snapshot.state,
            ordinal = snapshot.ordinal,
            "snapshot saved"
        );
        self.snapshots
            .insert(snapshot.device.clone(), snapshot.clone());
        snapshot
    }

    /// Latest snapshot for `device`.
    ///
    /// # Errors
    ///
    /// Returns [`NoSnapshotError`] when the device was never saved.
    pub fn snapshot(&self, device: &str) -> Result<&Snapshot, NoSnapshotError> {
        self.snapshots.get(device).ok_or_else(|| NoSnapshotError {
            device: device.to_string(),
        })
    }

    /// Put `target` back into its saved state, notifying its observers.
    ///
    /// The snapshot stays in place, so the same state can be restored again.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NoSnapshot`] when the device was never
    /// saved, or [`SmartHomeError::InvalidState`] if the saved state no
    /// longer fits the device.
    pub fn restore(
        &self,
        target: &mut ObservedDevice,
    ) -> Result<Option<StateChange>, SmartHomeError> {
        let state = self.snapshot(target.name())?.state;
        Ok(target.set_state(state, ChangeOrigin::Restore)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ports::Observer;
    use crate::test_support::{RecordingObserver, device};
    use smarthome_domain::device::{DeviceKind, DeviceState};

    fn thermostat() -> ObservedDevice {
        ObservedDevice::new(device("Thermostat", DeviceKind::Thermostat))
    }

    #[test]
    fn should_fail_restore_when_nothing_saved() {
        let caretaker = Caretaker::new();
        let mut target = thermostat();
        let err = caretaker.restore(&mut target).unwrap_err();
        assert!(matches!(
            err,
            SmartHomeError::NoSnapshot(NoSnapshotError { device }) if device == "Thermostat"
        ));
    }

    #[test]
    fn should_restore_saved_state_and_notify() {
        let observer = RecordingObserver::new("app");
        let mut caretaker = Caretaker::new();
        let mut target = thermostat();
        target.subscribe(Arc::clone(&observer) as Arc<dyn Observer>);
        target.set_state(DeviceState::Heat, ChangeOrigin::Direct).unwrap();

        caretaker.save(&target);
        target.set_state(DeviceState::Off, ChangeOrigin::Direct).unwrap();
        let change = caretaker.restore(&mut target).unwrap();

        assert_eq!(target.state(), DeviceState::Heat);
        assert_eq!(change.unwrap().origin, ChangeOrigin::Restore);
        assert_eq!(
            observer.lines(),
            vec![
                "Thermostat -> HEAT",
                "Thermostat -> OFF",
                "Thermostat -> HEAT (restored)"
            ]
        );
    }

    #[test]
    fn should_keep_only_latest_snapshot_when_saved_twice() {
        let mut caretaker = Caretaker::new();
        let mut target = thermostat();

        target.set_state(DeviceState::Heat, ChangeOrigin::Direct).unwrap();
        let first = caretaker.save(&target);
        target.set_state(DeviceState::Cool, ChangeOrigin::Direct).unwrap();
        let second = caretaker.save(&target);
        target.set_state(DeviceState::Off, ChangeOrigin::Direct).unwrap();

        assert_eq!(caretaker.len(), 1);
        assert!(second.ordinal > first.ordinal);
        assert_eq!(caretaker.snapshot("Thermostat").unwrap(), &second);

        caretaker.restore(&mut target).unwrap();
        assert_eq!(target.state(), DeviceState::Cool);
    }

    #[test]
    fn should_allow_restoring_same_snapshot_twice() {
        let mut caretaker = Caretaker::new();
        let mut target = thermostat();
        target.set_state(DeviceState::Eco, ChangeOrigin::Direct).unwrap();
        caretaker.save(&target);

        for _ in 0..2 {
            target.set_state(DeviceState::Off, ChangeOrigin::Direct).unwrap();
            caretaker.restore(&mut target).unwrap();
            assert_eq!(target.state(), DeviceState::Eco);
        }
    }
}
