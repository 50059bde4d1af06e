//! The scripted demonstration.
//!
//! Builds a fixed household, then walks through one section per behaviour
//! (observer, command, state, strategy, mediator, memento, interpreter,
//! chain of responsibility). Every line goes to the same output so
//! notifications and narration interleave in call order.

use std::sync::Arc;

use chrono::NaiveTime;
use smarthome_app::observed_device::UserApp;
use smarthome_app::ports::{NotificationSink, Observer, Transcript};
use smarthome_app::services::command_history::{Command, CommandHistory};
use smarthome_app::services::hub::SmartHub;
use smarthome_app::services::interpreter::{Interpreter, PhraseInterpreter};
use smarthome_domain::alert::{Alert, AlertLevel, AlertOutcome};
use smarthome_domain::change::ChangeOrigin;
use smarthome_domain::device::{Device, DeviceKind, DeviceState};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::event::{HubEvent, Reaction, ReactionOutcome};
use smarthome_domain::service::Service;
use smarthome_domain::strategy::{ControlStrategy, Schedule, StrategyContext};

pub const LIVING_ROOM_LIGHT: &str = "Living Room Light";
pub const HALLWAY_LIGHT: &str = "Hallway Light";
pub const CEILING_FAN: &str = "Ceiling Fan";
pub const THERMOSTAT: &str = "Thermostat";
pub const MOTION_SENSOR: &str = "Motion Sensor";

const HOUSEHOLD: [(&str, DeviceKind); 5] = [
    (LIVING_ROOM_LIGHT, DeviceKind::Light),
    (HALLWAY_LIGHT, DeviceKind::Light),
    (CEILING_FAN, DeviceKind::Fan),
    (THERMOSTAT, DeviceKind::Thermostat),
    (MOTION_SENSOR, DeviceKind::MotionSensor),
];

/// Run the whole scenario, writing notifications and narration to `out`.
///
/// `clock` is the wall-clock time handed to time-based strategies.
///
/// # Errors
///
/// Any domain error aborts the run; the scripted path does not expect one.
pub fn run<O>(clock: NaiveTime, out: &Arc<O>) -> Result<SmartHub, SmartHomeError>
where
    O: NotificationSink + Transcript + 'static,
{
    let app: Arc<dyn Observer> = Arc::new(UserApp::new(Arc::clone(out)));
    let mut demo = Demo {
        hub: SmartHub::default(),
        history: CommandHistory::new(),
        out: out.as_ref(),
        clock,
    };

    demo.out.line("===== SMART HOME AUTOMATION SYSTEM =====");
    demo.out.blank();
    demo.setup(&app)?;
    demo.observer()?;
    demo.command()?;
    demo.fan_speeds()?;
    demo.strategy()?;
    demo.mediator()?;
    demo.memento()?;
    demo.interpreter()?;
    demo.chain();
    demo.out.line("===== DEMONSTRATION COMPLETE =====");

    tracing::info!("scenario complete");
    Ok(demo.hub)
}

struct Demo<'a, O> {
    hub: SmartHub,
    history: CommandHistory,
    out: &'a O,
    clock: NaiveTime,
}

impl<O: Transcript> Demo<'_, O> {
    fn section(&self, title: &str) {
        self.out.line(&format!("{title}:"));
    }

    fn setup(&mut self, app: &Arc<dyn Observer>) -> Result<(), SmartHomeError> {
        for (name, kind) in HOUSEHOLD {
            self.hub
                .register(Device::builder().name(name).kind(kind).build()?)?;
            self.hub.subscribe(name, Arc::clone(app))?;
            self.out.line(&format!("Registered {name}"));
        }

        self.hub.route(
            "motion",
            Reaction::SetState {
                device: MOTION_SENSOR.to_string(),
                state: DeviceState::Detected,
            },
        );
        self.hub.route(
            "motion",
            Reaction::SetState {
                device: HALLWAY_LIGHT.to_string(),
                state: DeviceState::On,
            },
        );
        self.hub.route(
            "motion",
            Reaction::Escalate {
                level: AlertLevel::Motion,
            },
        );
        self.out.blank();
        Ok(())
    }

    fn observer(&mut self) -> Result<(), SmartHomeError> {
        self.section("Observer Pattern");
        self.hub
            .set_state(THERMOSTAT, DeviceState::Heat, ChangeOrigin::Direct)?;
        self.out.blank();
        Ok(())
    }

    fn command(&mut self) -> Result<(), SmartHomeError> {
        self.section("Command Pattern");
        self.history.execute(
            &mut self.hub,
            Command::new(LIVING_ROOM_LIGHT, DeviceState::On),
        )?;
        self.history.undo(&mut self.hub)?;
        self.history.redo(&mut self.hub)?;
        self.out.blank();
        Ok(())
    }

    fn fan_speeds(&mut self) -> Result<(), SmartHomeError> {
        self.section("State Pattern");
        for _ in 0..5 {
            self.hub.run_service(CEILING_FAN, Service::PressButton)?;
        }
        self.out.blank();
        Ok(())
    }

    fn strategy(&mut self) -> Result<(), SmartHomeError> {
        self.section("Strategy Pattern");
        let context = StrategyContext::at(self.clock);
        let plan = [
            (
                LIVING_ROOM_LIGHT,
                ControlStrategy::Eco,
                context.with_request(DeviceState::On),
            ),
            (
                LIVING_ROOM_LIGHT,
                ControlStrategy::Scheduled {
                    schedule: Schedule::evening_lighting(),
                },
                context,
            ),
            (HALLWAY_LIGHT, ControlStrategy::MotionActivated, context),
            (
                CEILING_FAN,
                ControlStrategy::Manual {
                    target: DeviceState::Off,
                },
                context,
            ),
        ];
        for (device, strategy, context) in plan {
            self.out
                .line(&format!("Applying {strategy} strategy to {device}"));
            let (target, change) = self.hub.apply_strategy(device, &strategy, &context)?;
            if change.is_none() {
                self.out.line(&format!("{device} stays {target}"));
            }
        }
        self.out.blank();
        Ok(())
    }

    fn mediator(&mut self) -> Result<(), SmartHomeError> {
        self.section("Mediator Pattern");
        self.out
            .line(&format!("Hub: turn_off {LIVING_ROOM_LIGHT}"));
        self.hub.send_command(LIVING_ROOM_LIGHT, "turn_off")?;

        self.out.line(&format!("{MOTION_SENSOR} -> hub: motion"));
        let outcomes = self
            .hub
            .dispatch(&HubEvent::new("motion", "Movement in hallway"))?;
        for outcome in outcomes {
            if let ReactionOutcome::Escalated(alert) = outcome {
                self.report_alert(&alert, "Movement in hallway");
            }
        }
        self.out.blank();
        Ok(())
    }

    fn memento(&mut self) -> Result<(), SmartHomeError> {
        self.section("Memento Pattern");
        let snapshot = self.hub.save(THERMOSTAT)?;
        self.out
            .line(&format!("Config saved: {} {}", snapshot.device, snapshot.state));
        self.hub
            .set_state(THERMOSTAT, DeviceState::Off, ChangeOrigin::Direct)?;
        self.hub.restore(THERMOSTAT)?;
        self.out.line(&format!(
            "Config restored -> {}",
            self.hub.state_of(THERMOSTAT)?
        ));
        self.out.blank();
        Ok(())
    }

    fn interpreter(&mut self) -> Result<(), SmartHomeError> {
        self.section("Interpreter Pattern");
        for phrase in [
            "turn on light",
            "turn off light",
            "toggle light",
            "open the garage",
        ] {
            let result = PhraseInterpreter.interpret(&mut self.hub, LIVING_ROOM_LIGHT, phrase)?;
            self.out.line(&format!("'{phrase}' -> {result}"));
        }
        self.out.blank();
        Ok(())
    }

    fn chain(&mut self) {
        self.section("Chain of Responsibility Pattern");
        let alerts = [
            ("motion", "Movement in living room"),
            ("alarm", "Intrusion detected"),
            ("police", "Emergency situation"),
            ("unknown", "Test message"),
        ];
        for (level, message) in alerts {
            self.out.line(&format!("Alert level: {level}"));
            let Ok(level) = level.parse::<AlertLevel>();
            let outcome = self.hub.raise(&Alert::new(level, message));
            self.report_alert(&outcome, message);
            self.out.blank();
        }
    }

    fn report_alert(&self, outcome: &AlertOutcome, message: &str) {
        match outcome {
            AlertOutcome::Handled { response, .. } => self.out.line(response),
            AlertOutcome::Unhandled => self.out.line(&format!("No handler for: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use smarthome_domain::change::StateChange;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl NotificationSink for Lines {
        fn deliver(&self, change: &StateChange) {
            self.0.lock().unwrap().push(format!("[Notification] {change}"));
        }
    }

    impl Transcript for Lines {
        fn line(&self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    fn at(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn should_leave_every_device_in_its_final_state() {
        let out = Arc::new(Lines::default());
        let hub = run(at(19), &out).unwrap();

        assert_eq!(hub.state_of(LIVING_ROOM_LIGHT).unwrap(), DeviceState::On);
        assert_eq!(hub.state_of(HALLWAY_LIGHT).unwrap(), DeviceState::On);
        assert_eq!(hub.state_of(CEILING_FAN).unwrap(), DeviceState::Off);
        assert_eq!(hub.state_of(THERMOSTAT).unwrap(), DeviceState::Heat);
        assert_eq!(hub.state_of(MOTION_SENSOR).unwrap(), DeviceState::Detected);
    }

    #[test]
    fn should_follow_the_clock_in_scheduled_strategy() {
        let out = Arc::new(Lines::default());
        run(at(12), &out).unwrap();

        let lines = out.0.lock().unwrap().clone();
        let start = lines
            .iter()
            .position(|l| l == "Applying scheduled strategy to Living Room Light")
            .unwrap();
        assert_eq!(lines[start + 1], "[Notification] Living Room Light -> OFF");
    }
}
