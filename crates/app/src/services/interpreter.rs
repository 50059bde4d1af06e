//! Interpreter: turns short spoken-style phrases into service calls.
//!
//! [`Interpreter::interpret`] is a fixed sequence of steps: normalise the
//! phrase, parse it into a [`Service`], run it through the hub and report
//! what happened. Implementations only override the steps they need,
//! usually [`parse`](Interpreter::parse).

use std::fmt;

use smarthome_domain::device::DeviceState;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::service::Service;

use crate::services::hub::SmartHub;

/// Result of interpreting one phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// The phrase mapped to `service`, which left `device` in `state`.
    Applied {
        device: String,
        service: Service,
        state: DeviceState,
    },
    /// No rule matched the phrase; nothing was changed.
    NotRecognized,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied {
                device,
                service: Service::Toggle,
                state,
            } => write!(f, "Toggling {device} to {state}"),
            Self::Applied {
                device,
                service: Service::PressButton,
                state,
            } => write!(f, "Pressing {device} button, now {state}"),
            Self::Applied { device, state, .. } => write!(f, "Turning {device} {state}"),
            Self::NotRecognized => f.write_str("Command not recognized"),
        }
    }
}

/// Phrase → service pipeline with overridable steps.
pub trait Interpreter {
    /// Step 1: canonical form of the raw phrase.
    fn normalize(&self, text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Step 2: map a normalised phrase to a service.
    fn parse(&self, phrase: &str) -> Option<Service>;

    /// Step 3: run the service against `device`.
    ///
    /// # Errors
    ///
    /// Propagates hub errors (unknown device, invalid state).
    fn apply(
        &self,
        hub: &mut SmartHub,
        device: &str,
        service: Service,
    ) -> Result<DeviceState, SmartHomeError> {
        hub.run_service(device, service)?;
        Ok(hub.state_of(device)?)
    }

    /// Run the whole pipeline for `text` against `device`.
    ///
    /// An unrecognised phrase is reported as
    /// [`Interpretation::NotRecognized`], not as an error.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`apply`](Self::apply).
    fn interpret(
        &self,
        hub: &mut SmartHub,
        device: &str,
        text: &str,
    ) -> Result<Interpretation, SmartHomeError> {
        let phrase = self.normalize(text);
        let Some(service) = self.parse(&phrase) else {
            tracing::debug!(%phrase, "phrase not recognized");
            return Ok(Interpretation::NotRecognized);
        };
        let state = self.apply(hub, device, service)?;
        Ok(Interpretation::Applied {
            device: device.to_string(),
            service,
            state,
        })
    }
}

/// Recognises `turn on` / `switch on`, `turn off` / `switch off` and `toggle`
/// anywhere in the phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseInterpreter;

impl Interpreter for PhraseInterpreter {
    fn parse(&self, phrase: &str) -> Option<Service> {
        if phrase.contains("turn on") || phrase.contains("switch on") {
            Some(Service::TurnOn)
        } else if phrase.contains("turn off") || phrase.contains("switch off") {
            Some(Service::TurnOff)
        } else if phrase.contains("toggle") {
            Some(Service::Toggle)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::device;
    use smarthome_domain::device::DeviceKind;

    const LIGHT: &str = "Living Room Light";

    fn hub() -> SmartHub {
        let mut hub = SmartHub::default();
        hub.register(device(LIGHT, DeviceKind::Light)).unwrap();
        hub
    }

    #[test]
    fn should_turn_on_for_turn_on_phrase() {
        let mut hub = hub();
        let result = PhraseInterpreter
            .interpret(&mut hub, LIGHT, "turn on light")
            .unwrap();
        assert_eq!(result.to_string(), "Turning Living Room Light ON");
        assert_eq!(hub.state_of(LIGHT).unwrap(), DeviceState::On);
    }

    #[test]
    fn should_accept_switch_off_in_any_case() {
        let mut hub = hub();
        hub.run_service(LIGHT, Service::TurnOn).unwrap();
        let result = PhraseInterpreter
            .interpret(&mut hub, LIGHT, "  Please SWITCH OFF the lamp ")
            .unwrap();
        assert_eq!(result.to_string(), "Turning Living Room Light OFF");
    }

    #[test]
    fn should_toggle_off_light_on() {
        let mut hub = hub();
        let result = PhraseInterpreter
            .interpret(&mut hub, LIGHT, "toggle light")
            .unwrap();
        assert_eq!(result.to_string(), "Toggling Living Room Light to ON");
    }

    #[test]
    fn should_report_not_recognized_without_touching_device() {
        let mut hub = hub();
        let result = PhraseInterpreter
            .interpret(&mut hub, LIGHT, "make coffee")
            .unwrap();
        assert_eq!(result, Interpretation::NotRecognized);
        assert_eq!(result.to_string(), "Command not recognized");
        assert_eq!(hub.state_of(LIGHT).unwrap(), DeviceState::Off);
    }

    #[test]
    fn should_fail_for_unknown_device() {
        let mut hub = hub();
        let err = PhraseInterpreter
            .interpret(&mut hub, "Garage", "turn on")
            .unwrap_err();
        assert!(matches!(err, SmartHomeError::NotFound(_)));
    }

    #[test]
    fn should_use_overridden_parse_step() {
        struct FanSpeak;

        impl Interpreter for FanSpeak {
            fn parse(&self, phrase: &str) -> Option<Service> {
                (phrase == "faster").then_some(Service::PressButton)
            }
        }

        let mut hub = SmartHub::default();
        hub.register(device("Ceiling Fan", DeviceKind::Fan)).unwrap();
        let result = FanSpeak.interpret(&mut hub, "Ceiling Fan", "Faster").unwrap();
        assert_eq!(result.to_string(), "Pressing Ceiling Fan button, now LOW");
    }
}
