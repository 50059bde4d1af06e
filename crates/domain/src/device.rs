//! Device: a named appliance with a single discrete state.

mod kind;
mod state;

pub use kind::DeviceKind;
pub use state::DeviceState;

use serde::{Deserialize, Serialize};

use crate::change::{ChangeOrigin, StateChange};
use crate::error::{InvalidStateError, SmartHomeError, ValidationError};
use crate::id::DeviceId;

/// A smart-home appliance.
///
/// `state` is private so that every transition goes through
/// [`apply_state`](Self::apply_state), which enforces that the state is one
/// the device's [`DeviceKind`] allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeviceRecord")]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    state: DeviceState,
}

/// Wire form of a [`Device`], validated before it becomes one.
#[derive(Deserialize)]
struct DeviceRecord {
    id: DeviceId,
    name: String,
    kind: DeviceKind,
    state: DeviceState,
}

impl TryFrom<DeviceRecord> for Device {
    type Error = SmartHomeError;

    fn try_from(record: DeviceRecord) -> Result<Self, Self::Error> {
        let device = Self {
            id: record.id,
            name: record.name,
            kind: record.kind,
            state: record.state,
        };
        device.validate()?;
        Ok(device)
    }
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Check that `state` is allowed for this device.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] when the kind does not accept `state`.
    pub fn check_state(&self, state: DeviceState) -> Result<(), InvalidStateError> {
        if self.kind.allows(state) {
            Ok(())
        } else {
            Err(InvalidStateError {
                device: self.name.clone(),
                kind: self.kind,
                state,
            })
        }
    }

    /// Move the device to `state`, returning the transition that happened.
    ///
    /// Returns `Ok(None)` when the device is already in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] when the kind does not accept `state`;
    /// the device is left untouched.
    pub fn apply_state(
        &mut self,
        state: DeviceState,
        origin: ChangeOrigin,
    ) -> Result<Option<StateChange>, InvalidStateError> {
        self.check_state(state)?;
        if self.state == state {
            return Ok(None);
        }
        let change = StateChange {
            device: self.name.clone(),
            from: self.state,
            to: state,
            origin,
        };
        self.state = state;
        Ok(Some(change))
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when `name` is empty, or
    /// [`SmartHomeError::InvalidState`] when the state does not fit the kind.
    pub fn validate(&self) -> Result<(), SmartHomeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.check_state(self.state)?;
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    kind: Option<DeviceKind>,
    state: Option<DeviceState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Override the initial state (defaults to the kind's initial state).
    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// The kind defaults to [`DeviceKind::Light`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if `name` is missing or empty,
    /// or [`SmartHomeError::InvalidState`] if the initial state does not fit
    /// the kind.
    pub fn build(self) -> Result<Device, SmartHomeError> {
        let kind = self.kind.unwrap_or(DeviceKind::Light);
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind,
            state: self.state.unwrap_or(kind.initial_state()),
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> Device {
        Device::builder()
            .name("Living Room Light")
            .kind(DeviceKind::Light)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_light_starting_off() {
        let device = light();
        assert_eq!(device.name, "Living Room Light");
        assert_eq!(device.state(), DeviceState::Off);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Device::builder().kind(DeviceKind::Fan).build();
        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_initial_state_outside_kind() {
        let result = Device::builder()
            .name("Ceiling Fan")
            .kind(DeviceKind::Fan)
            .state(DeviceState::Dim)
            .build();
        assert!(matches!(result, Err(SmartHomeError::InvalidState(_))));
    }

    #[test]
    fn should_report_transition_when_state_changes() {
        let mut device = light();
        let change = device
            .apply_state(DeviceState::On, ChangeOrigin::Direct)
            .unwrap()
            .unwrap();
        assert_eq!(change.from, DeviceState::Off);
        assert_eq!(change.to, DeviceState::On);
        assert_eq!(device.state(), DeviceState::On);
    }

    #[test]
    fn should_report_nothing_when_state_is_unchanged() {
        let mut device = light();
        let change = device
            .apply_state(DeviceState::Off, ChangeOrigin::Direct)
            .unwrap();
        assert!(change.is_none());
    }

    #[test]
    fn should_leave_state_untouched_when_transition_is_invalid() {
        let mut device = light();
        let err = device
            .apply_state(DeviceState::Heat, ChangeOrigin::Direct)
            .unwrap_err();
        assert_eq!(err.state, DeviceState::Heat);
        assert_eq!(device.state(), DeviceState::Off);
    }

    #[test]
    fn should_reject_deserialized_state_outside_kind() {
        let json = format!(
            r#"{{"id":"{}","name":"Living Room Light","kind":"light","state":"HIGH"}}"#,
            DeviceId::new()
        );
        let err = serde_json::from_str::<Device>(&json).unwrap_err();
        assert!(err.to_string().contains("cannot enter state HIGH"), "{err}");
    }

    #[test]
    fn should_reject_deserialized_device_without_name() {
        let json = format!(
            r#"{{"id":"{}","name":"","kind":"fan","state":"LOW"}}"#,
            DeviceId::new()
        );
        assert!(serde_json::from_str::<Device>(&json).is_err());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let device = light();
        let json = serde_json::to_string(&device).unwrap();
        let parsed: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, device);
    }
}
