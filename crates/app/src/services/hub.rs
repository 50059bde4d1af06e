//! Smart hub: the mediator every cross-device interaction goes through.
//!
//! The hub owns the device registry, the caretaker holding snapshots, the
//! alert chain and the event routing table. Devices, sensors and handlers
//! never hold references to each other; they ask the hub instead.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use smarthome_domain::alert::{Alert, AlertOutcome};
use smarthome_domain::change::{ChangeOrigin, StateChange};
use smarthome_domain::device::{Device, DeviceState};
use smarthome_domain::error::{NotFoundError, SmartHomeError, UnknownEventError, ValidationError};
use smarthome_domain::event::{HubEvent, Reaction, ReactionOutcome};
use smarthome_domain::service::Service;
use smarthome_domain::snapshot::Snapshot;
use smarthome_domain::strategy::{ControlStrategy, StrategyContext};

use crate::alert_chain::AlertChain;
use crate::observed_device::ObservedDevice;
use crate::ports::Observer;
use crate::services::caretaker::Caretaker;

/// Central coordinator and owner of all devices.
pub struct SmartHub {
    devices: HashMap<String, ObservedDevice>,
    order: Vec<String>,
    caretaker: Caretaker,
    chain: AlertChain,
    routes: HashMap<String, Vec<Reaction>>,
}

impl Default for SmartHub {
    fn default() -> Self {
        Self::new(AlertChain::standard())
    }
}

impl SmartHub {
    /// Create an empty hub escalating alerts through `chain`.
    #[must_use]
    pub fn new(chain: AlertChain) -> Self {
        Self {
            devices: HashMap::new(),
            order: Vec::new(),
            caretaker: Caretaker::new(),
            chain,
            routes: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    /// Take ownership of `device`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateDevice`] when a device with the
    /// same name is already registered.
    #[tracing::instrument(skip(self, device), fields(device = %device.name, kind = %device.kind))]
    pub fn register(&mut self, device: Device) -> Result<(), SmartHomeError> {
        match self.devices.entry(device.name.clone()) {
            Entry::Occupied(_) => Err(ValidationError::DuplicateDevice(device.name).into()),
            Entry::Vacant(slot) => {
                self.order.push(device.name.clone());
                slot.insert(ObservedDevice::new(device));
                tracing::info!("device registered");
                Ok(())
            }
        }
    }

    /// Look up a registered device.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no device is registered under `name`.
    pub fn device(&self, name: &str) -> Result<&ObservedDevice, NotFoundError> {
        self.devices.get(name).ok_or_else(|| not_found(name))
    }

    fn device_mut(&mut self, name: &str) -> Result<&mut ObservedDevice, NotFoundError> {
        self.devices.get_mut(name).ok_or_else(|| not_found(name))
    }

    /// Registered device names, in registration order.
    #[must_use]
    pub fn device_names(&self) -> &[String] {
        &self.order
    }

    /// Current state of device `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for unknown devices.
    pub fn state_of(&self, name: &str) -> Result<DeviceState, NotFoundError> {
        self.device(name).map(ObservedDevice::state)
    }

    /// Subscribe `observer` to device `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for unknown devices.
    pub fn subscribe(&mut self, name: &str, observer: Arc<dyn Observer>) -> Result<(), NotFoundError> {
        self.device_mut(name)?.subscribe(observer);
        Ok(())
    }

    /// Unsubscribe the observer labelled `label` from device `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for unknown devices.
    pub fn unsubscribe(&mut self, name: &str, label: &str) -> Result<bool, NotFoundError> {
        Ok(self.device_mut(name)?.unsubscribe(label))
    }

    // -----------------------------------------------------------------------
    // Device operations
    // -----------------------------------------------------------------------

    /// Move device `name` to `state`, notifying its observers.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown devices and
    /// [`SmartHomeError::InvalidState`] when the kind rejects `state`.
    #[tracing::instrument(skip(self))]
    pub fn set_state(
        &mut self,
        name: &str,
        state: DeviceState,
        origin: ChangeOrigin,
    ) -> Result<Option<StateChange>, SmartHomeError> {
        Ok(self.device_mut(name)?.set_state(state, origin)?)
    }

    /// Run a service given by name (`turn_on`, `turn_off`, `toggle`,
    /// `press_button`) against device `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::UnknownService`] for unknown service names,
    /// plus the errors of [`run_service`](Self::run_service).
    pub fn send_command(
        &mut self,
        name: &str,
        service: &str,
    ) -> Result<Option<StateChange>, SmartHomeError> {
        let service: Service = service.parse()?;
        self.run_service(name, service)
    }

    /// Run `service` against device `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown devices and
    /// [`SmartHomeError::InvalidState`] when the service does not apply to
    /// the device.
    #[tracing::instrument(skip(self))]
    pub fn run_service(
        &mut self,
        name: &str,
        service: Service,
    ) -> Result<Option<StateChange>, SmartHomeError> {
        let target = service.target_state(self.device(name)?.device())?;
        self.set_state(name, target, ChangeOrigin::Direct)
    }

    /// Let `strategy` pick a target state for device `name` and apply it.
    ///
    /// Returns the decided state together with the resulting change.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown devices and
    /// [`SmartHomeError::InvalidState`] when the decision does not fit the
    /// device.
    #[tracing::instrument(skip(self, strategy, context), fields(strategy = %strategy))]
    pub fn apply_strategy(
        &mut self,
        name: &str,
        strategy: &ControlStrategy,
        context: &StrategyContext,
    ) -> Result<(DeviceState, Option<StateChange>), SmartHomeError> {
        let target = strategy.decide(self.device(name)?.device(), context)?;
        tracing::debug!(%target, "strategy decided");
        let change = self.set_state(name, target, ChangeOrigin::Direct)?;
        Ok((target, change))
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Snapshot device `name`, replacing its previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for unknown devices.
    pub fn save(&mut self, name: &str) -> Result<Snapshot, NotFoundError> {
        let target = self.devices.get(name).ok_or_else(|| not_found(name))?;
        Ok(self.caretaker.save(target))
    }

    /// Restore device `name` from its latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown devices and
    /// [`SmartHomeError::NoSnapshot`] when the device was never saved.
    pub fn restore(&mut self, name: &str) -> Result<Option<StateChange>, SmartHomeError> {
        let target = self.devices.get_mut(name).ok_or_else(|| not_found(name))?;
        self.caretaker.restore(target)
    }

    #[must_use]
    pub fn caretaker(&self) -> &Caretaker {
        &self.caretaker
    }

    // -----------------------------------------------------------------------
    // Alerts
    // -----------------------------------------------------------------------

    /// Escalate `alert` through the chain.
    pub fn raise(&self, alert: &Alert) -> AlertOutcome {
        self.chain.handle(alert)
    }

    #[must_use]
    pub fn chain(&self) -> &AlertChain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut AlertChain {
        &mut self.chain
    }

    // -----------------------------------------------------------------------
    // Event routing
    // -----------------------------------------------------------------------

    /// Register `reaction` to run whenever an event of `kind` is dispatched.
    ///
    /// Reactions for the same kind run in registration order.
    pub fn route(&mut self, kind: impl Into<String>, reaction: Reaction) {
        let kind = kind.into();
        tracing::debug!(%kind, %reaction, "route registered");
        self.routes.entry(kind).or_default().push(reaction);
    }

    /// Run every reaction registered for `event.kind`.
    ///
    /// Reactions run in order and stop at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::UnknownEvent`] when nothing is registered
    /// for the event kind, or the first error raised by a reaction.
    #[tracing::instrument(skip(self, event), fields(kind = %event.kind))]
    pub fn dispatch(&mut self, event: &HubEvent) -> Result<Vec<ReactionOutcome>, SmartHomeError> {
        let reactions = self
            .routes
            .get(&event.kind)
            .filter(|reactions| !reactions.is_empty())
            .cloned()
            .ok_or_else(|| UnknownEventError {
                event: event.kind.clone(),
            })?;

        let mut outcomes = Vec::with_capacity(reactions.len());
        for reaction in reactions {
            let outcome = match reaction {
                Reaction::SetState { device, state } => {
                    ReactionOutcome::StateSet(self.set_state(&device, state, ChangeOrigin::Direct)?)
                }
                Reaction::Save { device } => ReactionOutcome::Saved(self.save(&device)?),
                Reaction::Restore { device } => ReactionOutcome::Restored(self.restore(&device)?),
                Reaction::Escalate { level } => {
                    ReactionOutcome::Escalated(self.raise(&Alert::new(level, event.message.clone())))
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

fn not_found(name: &str) -> NotFoundError {
    NotFoundError {
        entity: "Device",
        id: name.to_string(),
    }
}
