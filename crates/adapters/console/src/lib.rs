//! # smarthome-adapter-console
//!
//! Console output adapter. Implements the [`NotificationSink`] and
//! [`Transcript`] ports on top of any [`std::io::Write`].
//!
//! ## Output format
//!
//! | Port | Line |
//! |------|------|
//! | `NotificationSink` | `[Notification] <Device> -> <STATE>[ (<annotation>)]` |
//! | `Transcript` | the text, verbatim |
//!
//! The ports cannot fail, so a write error is logged and remembered; call
//! [`ConsoleSink::finish`] at the end of a run to surface it.
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` (port traits) and `smarthome-domain` only.

mod error;

pub use error::ConsoleError;

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use smarthome_app::ports::{NotificationSink, Transcript};
use smarthome_domain::change::StateChange;

/// Prefix of every notification line.
pub const NOTIFICATION_PREFIX: &str = "[Notification]";

/// Line-oriented writer shared by every observer and the scenario narration.
pub struct ConsoleSink<W> {
    state: Mutex<SinkState<W>>,
}

struct SinkState<W> {
    out: W,
    failure: Option<io::Error>,
}

impl ConsoleSink<Stdout> {
    /// Sink writing to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(SinkState { out, failure: None }),
        }
    }

    /// Flush the writer and report the first write failure of the run.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Write`] if any line failed to be written or
    /// if the final flush fails.
    pub fn finish(&self) -> Result<(), ConsoleError> {
        let mut state = self.lock();
        if let Some(err) = state.failure.take() {
            return Err(ConsoleError::Write(err));
        }
        state.out.flush().map_err(ConsoleError::Write)
    }

    /// Consume the sink and hand back the writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn write_line(&self, text: &str) {
        let mut state = self.lock();
        if state.failure.is_some() {
            return;
        }
        if let Err(err) = writeln!(state.out, "{text}") {
            tracing::error!(error = %err, "console write failed");
            state.failure = Some(err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Format a change the way it appears on the console.
#[must_use]
pub fn format_notification(change: &StateChange) -> String {
    format!("{NOTIFICATION_PREFIX} {change}")
}

impl<W: Write + Send> NotificationSink for ConsoleSink<W> {
    fn deliver(&self, change: &StateChange) {
        self.write_line(&format_notification(change));
    }
}

impl<W: Write + Send> Transcript for ConsoleSink<W> {
    fn line(&self, text: &str) {
        self.write_line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::change::ChangeOrigin;
    use smarthome_domain::device::DeviceState;

    fn change(origin: ChangeOrigin) -> StateChange {
        StateChange {
            device: "Living Room Light".to_string(),
            from: DeviceState::Off,
            to: DeviceState::On,
            origin,
        }
    }

    fn output(sink: ConsoleSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    /// Writer that rejects every write.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn should_prefix_notifications() {
        let sink = ConsoleSink::new(Vec::new());
        sink.deliver(&change(ChangeOrigin::Direct));
        assert_eq!(output(sink), "[Notification] Living Room Light -> ON\n");
    }

    #[test]
    fn should_keep_annotation_after_state() {
        let sink = ConsoleSink::new(Vec::new());
        sink.deliver(&change(ChangeOrigin::Redo));
        assert_eq!(
            output(sink),
            "[Notification] Living Room Light -> ON (after undo)\n"
        );
    }

    #[test]
    fn should_interleave_transcript_and_notifications_in_call_order() {
        let sink = ConsoleSink::new(Vec::new());
        sink.line("Observer Pattern:");
        sink.deliver(&change(ChangeOrigin::Direct));
        sink.blank();
        assert_eq!(
            output(sink),
            "Observer Pattern:\n[Notification] Living Room Light -> ON\n\n"
        );
    }

    #[test]
    fn should_report_write_failure_on_finish() {
        let sink = ConsoleSink::new(Broken);
        sink.line("hello");
        sink.line("again");
        assert!(matches!(sink.finish(), Err(ConsoleError::Write(_))));
    }

    #[test]
    fn should_finish_cleanly_after_successful_writes() {
        let sink = ConsoleSink::new(Vec::new());
        sink.line("done");
        assert!(sink.finish().is_ok());
    }
}
