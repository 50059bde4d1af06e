//! Command history: undoable device commands with an undo/redo stack pair.

use smarthome_domain::change::{ChangeOrigin, StateChange};
use smarthome_domain::device::DeviceState;
use smarthome_domain::error::{NothingToRedoError, NothingToUndoError, SmartHomeError};

use crate::services::hub::SmartHub;

/// "Put device `device` into `new_state`", remembering what it was before.
///
/// The command refers to its device by name; the hub resolves it on every
/// call, so a command never owns or borrows a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    device: String,
    new_state: DeviceState,
    prior_state: Option<DeviceState>,
}

impl Command {
    #[must_use]
    pub fn new(device: impl Into<String>, new_state: DeviceState) -> Self {
        Self {
            device: device.into(),
            new_state,
            prior_state: None,
        }
    }

    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    #[must_use]
    pub fn new_state(&self) -> DeviceState {
        self.new_state
    }

    /// State captured by the last [`execute`](Self::execute), if any.
    #[must_use]
    pub fn prior_state(&self) -> Option<DeviceState> {
        self.prior_state
    }

    /// Capture the device's current state, then apply `new_state`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown devices and
    /// [`SmartHomeError::InvalidState`] when the device rejects `new_state`.
    /// On error the captured state is left as it was.
    pub fn execute(&mut self, hub: &mut SmartHub) -> Result<Option<StateChange>, SmartHomeError> {
        let prior = hub.state_of(&self.device)?;
        let change = hub.set_state(&self.device, self.new_state, ChangeOrigin::Direct)?;
        self.prior_state = Some(prior);
        Ok(change)
    }

    /// Put the device back into the state captured by `execute`.
    ///
    /// # Errors
    ///
    /// Returns [`NothingToUndoError`] if the command was never executed, plus
    /// the hub errors of [`SmartHub::set_state`].
    pub fn undo(&self, hub: &mut SmartHub) -> Result<Option<StateChange>, SmartHomeError> {
        let prior = self.prior_state.ok_or(NothingToUndoError)?;
        hub.set_state(&self.device, prior, ChangeOrigin::Undo)
    }

    fn replay(&self, hub: &mut SmartHub) -> Result<Option<StateChange>, SmartHomeError> {
        hub.set_state(&self.device, self.new_state, ChangeOrigin::Redo)
    }
}

/// Executed commands plus the branch of undone ones that can still be redone.
///
/// Executing a new command discards the redo branch.
#[derive(Debug, Default)]
pub struct CommandHistory {
    done: Vec<Command>,
    undone: Vec<Command>,
}

impl CommandHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `command` and record it.
    ///
    /// Nothing is recorded when the command fails.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Command::execute`].
    #[tracing::instrument(skip(self, hub), fields(device = command.device(), state = %command.new_state()))]
    pub fn execute(
        &mut self,
        hub: &mut SmartHub,
        mut command: Command,
    ) -> Result<Option<StateChange>, SmartHomeError> {
        let change = command.execute(hub)?;
        self.done.push(command);
        self.undone.clear();
        Ok(change)
    }

    /// Undo the most recently executed command.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NothingToUndo`] when no executed command is
    /// left. If the hub rejects the rollback the history is unchanged.
    #[tracing::instrument(skip_all)]
    pub fn undo(&mut self, hub: &mut SmartHub) -> Result<Option<StateChange>, SmartHomeError> {
        let command = self.done.last().ok_or(NothingToUndoError)?;
        let change = command.undo(hub)?;
        if let Some(command) = self.done.pop() {
            self.undone.push(command);
        }
        Ok(change)
    }

    /// Re-apply the most recently undone command.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NothingToRedo`] when nothing was undone
    /// since the last execute. If the hub rejects the replay the history is
    /// unchanged.
    #[tracing::instrument(skip_all)]
    pub fn redo(&mut self, hub: &mut SmartHub) -> Result<Option<StateChange>, SmartHomeError> {
        let command = self.undone.last().ok_or(NothingToRedoError)?;
        let change = command.replay(hub)?;
        if let Some(command) = self.undone.pop() {
            self.done.push(command);
        }
        Ok(change)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Number of executed (not undone) commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.done.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ports::Observer;
    use crate::test_support::{RecordingObserver, device};
    use smarthome_domain::device::DeviceKind;

    const LIGHT: &str = "Living Room Light";

    fn hub() -> (SmartHub, Arc<RecordingObserver>) {
        let observer = RecordingObserver::new("app");
        let mut hub = SmartHub::default();
        hub.register(device(LIGHT, DeviceKind::Light)).unwrap();
        hub.register(device("Ceiling Fan", DeviceKind::Fan)).unwrap();
        hub.subscribe(LIGHT, Arc::clone(&observer) as Arc<dyn Observer>)
            .unwrap();
        (hub, observer)
    }

    #[test]
    fn should_print_undo_and_redo_annotations() {
        let (mut hub, observer) = hub();
        let mut history = CommandHistory::new();

        history
            .execute(&mut hub, Command::new(LIGHT, DeviceState::On))
            .unwrap();
        history.undo(&mut hub).unwrap();
        history.redo(&mut hub).unwrap();

        assert_eq!(
            observer.lines(),
            vec![
                "Living Room Light -> ON",
                "Living Room Light -> OFF (after undo)",
                "Living Room Light -> ON (after undo)"
            ]
        );
    }

    #[test]
    fn should_restore_prior_state_on_undo_for_every_start_state() {
        for start in [DeviceState::Off, DeviceState::On, DeviceState::Dim] {
            for target in [DeviceState::Off, DeviceState::On, DeviceState::Dim] {
                let (mut hub, _) = hub();
                hub.set_state(LIGHT, start, ChangeOrigin::Direct).unwrap();
                let mut history = CommandHistory::new();

                history
                    .execute(&mut hub, Command::new(LIGHT, target))
                    .unwrap();
                history.undo(&mut hub).unwrap();

                assert_eq!(hub.state_of(LIGHT).unwrap(), start, "{start} -> {target}");
            }
        }
    }

    #[test]
    fn should_restore_post_execute_state_on_redo() {
        let (mut hub, _) = hub();
        let mut history = CommandHistory::new();

        history
            .execute(&mut hub, Command::new(LIGHT, DeviceState::Dim))
            .unwrap();
        let after_execute = hub.state_of(LIGHT).unwrap();
        history.undo(&mut hub).unwrap();
        history.redo(&mut hub).unwrap();

        assert_eq!(hub.state_of(LIGHT).unwrap(), after_execute);
    }

    #[test]
    fn should_unwind_several_commands_in_reverse_order() {
        let (mut hub, _) = hub();
        let mut history = CommandHistory::new();
        for state in [DeviceState::On, DeviceState::Dim, DeviceState::Off] {
            history.execute(&mut hub, Command::new(LIGHT, state)).unwrap();
        }

        history.undo(&mut hub).unwrap();
        assert_eq!(hub.state_of(LIGHT).unwrap(), DeviceState::Dim);
        history.undo(&mut hub).unwrap();
        assert_eq!(hub.state_of(LIGHT).unwrap(), DeviceState::On);
        history.undo(&mut hub).unwrap();
        assert_eq!(hub.state_of(LIGHT).unwrap(), DeviceState::Off);
        assert!(!history.can_undo());
    }

    #[test]
    fn should_fail_undo_when_history_is_empty() {
        let (mut hub, _) = hub();
        let mut history = CommandHistory::new();
        let err = history.undo(&mut hub).unwrap_err();
        assert!(matches!(err, SmartHomeError::NothingToUndo(_)));
    }

    #[test]
    fn should_fail_redo_when_nothing_was_undone() {
        let (mut hub, _) = hub();
        let mut history = CommandHistory::new();
        history
            .execute(&mut hub, Command::new(LIGHT, DeviceState::On))
            .unwrap();
        let err = history.redo(&mut hub).unwrap_err();
        assert!(matches!(err, SmartHomeError::NothingToRedo(_)));
    }

    #[test]
    fn should_discard_redo_branch_when_new_command_executes() {
        let (mut hub, _) = hub();
        let mut history = CommandHistory::new();
        history
            .execute(&mut hub, Command::new(LIGHT, DeviceState::On))
            .unwrap();
        history.undo(&mut hub).unwrap();
        assert!(history.can_redo());

        history
            .execute(&mut hub, Command::new(LIGHT, DeviceState::Dim))
            .unwrap();

        assert!(!history.can_redo());
        assert!(matches!(
            history.redo(&mut hub),
            Err(SmartHomeError::NothingToRedo(_))
        ));
    }

    #[test]
    fn should_not_record_command_that_fails() {
        let (mut hub, _) = hub();
        let mut history = CommandHistory::new();

        let err = history
            .execute(&mut hub, Command::new("Ceiling Fan", DeviceState::Dim))
            .unwrap_err();

        assert!(matches!(err, SmartHomeError::InvalidState(_)));
        assert!(history.is_empty());
    }

    #[test]
    fn should_refuse_to_undo_command_never_executed() {
        let (mut hub, _) = hub();
        let command = Command::new(LIGHT, DeviceState::On);
        assert!(command.prior_state().is_none());
        assert!(matches!(
            command.undo(&mut hub),
            Err(SmartHomeError::NothingToUndo(_))
        ));
    }
}
