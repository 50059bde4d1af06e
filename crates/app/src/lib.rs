//! # smarthome-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters and scenario code plug in:
//!   - `Observer`: receives every state change of a device it subscribed to
//!   - `NotificationSink`: where user-facing notifications end up
//!   - `Transcript`: narration lines of a scripted run
//!   - `AlertHandler`: one link of the alert escalation chain
//! - Provide the use-cases:
//!   - `ObservedDevice`: a device plus its ordered observer list
//!   - `SmartHub`: device registry and mediator for every cross-device interaction
//!   - `CommandHistory`: undo/redo over device commands
//!   - `Caretaker`: single-slot snapshot store per device
//!   - `AlertChain`: ordered escalation of alerts
//!   - `PhraseInterpreter`: turns short phrases into service calls
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod alert_chain;
pub mod observed_device;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
