// shutdown.rs — Interrupt policy and the top-level outcome of a run.
//
// Ctrl-C:
//   first press, loop running     → set the stop flag; the loop exits at
//                                   the next frame and releases the camera
//   second press, or any press    → exit the process now
//   while waiting at the prompt
//
// The second rule keeps Ctrl-C working when the loop is not polling the
// flag: a blocked camera read, or the "Press Enter" prompt (the signal
// handler restarts the interrupted read, so the prompt never sees it).
//
// `run_guarded` turns a session's result, or its panic, into an
// `Outcome` that `main` reports.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::app::SessionSummary;
use crate::error::AppError;

/// Lines printed when no camera could be opened.
pub const NO_CAMERA_LINES: [&str; 2] = ["Couldn't open camera", "Check if another app is using it"];

/// What the signal handler should do for one Ctrl-C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptResponse {
    /// Let the loop stop at the next frame boundary.
    StopAtNextFrame,
    /// Nothing is polling the flag; exit the process.
    ExitNow,
}

/// Shared between the signal handler and the main thread.
#[derive(Debug, Default)]
pub struct InterruptState {
    stop: AtomicBool,
    prompting: AtomicBool,
}

impl InterruptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flag the main loop polls.
    pub fn stop_flag(&self) -> &AtomicBool {
        &self.stop
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Record one Ctrl-C and decide what to do about it.
    pub fn on_interrupt(&self) -> InterruptResponse {
        let already_stopping = self.stop.swap(true, Ordering::SeqCst);
        if already_stopping || self.prompting.load(Ordering::SeqCst) {
            InterruptResponse::ExitNow
        } else {
            InterruptResponse::StopAtNextFrame
        }
    }

    /// Mark the start of a blocking wait for the operator. Returns false
    /// if Ctrl-C already arrived, in which case the wait is skipped.
    pub fn begin_prompt(&self) -> bool {
        self.prompting.store(true, Ordering::SeqCst);
        !self.is_stopped()
    }
}

/// Whether to wait for Enter before exiting.
pub fn should_prompt(outcome: &Outcome, exit_prompt: bool, interactive: bool) -> bool {
    matches!(outcome, Outcome::NoCamera { .. }) && exit_prompt && interactive
}

/// How a run ended, as seen from the process entry point.
#[derive(Debug)]
pub enum Outcome {
    Finished(SessionSummary),
    NoCamera { tried: Vec<u32> },
    Failed(AppError),
    /// A panic escaped the session. The payload message, if any.
    Crashed(String),
}

impl Outcome {
    pub fn from_result(result: Result<SessionSummary, AppError>) -> Self {
        match result {
            Ok(summary) => Outcome::Finished(summary),
            Err(AppError::DeviceUnavailable { tried }) => Outcome::NoCamera { tried },
            Err(e) => Outcome::Failed(e),
        }
    }

    /// Plain lines for the operator, beyond the log.
    pub fn user_lines(&self) -> &'static [&'static str] {
        match self {
            Outcome::NoCamera { .. } => &NO_CAMERA_LINES,
            _ => &[],
        }
    }
}

/// Run `session`, catching a panic. Everything the session owns is
/// dropped during unwinding, so the camera is released either way.
pub fn run_guarded<F>(session: F) -> Outcome
where
    F: FnOnce() -> Result<SessionSummary, AppError>,
{
    match panic::catch_unwind(AssertUnwindSafe(session)) {
        Ok(result) => Outcome::from_result(result),
        Err(payload) => Outcome::Crashed(panic_message(&*payload).to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DisplayError;

    #[test]
    fn test_first_interrupt_stops_second_exits() {
        let s = InterruptState::new();
        assert_eq!(s.on_interrupt(), InterruptResponse::StopAtNextFrame);
        assert!(s.stop_flag().load(Ordering::SeqCst));
        assert_eq!(s.on_interrupt(), InterruptResponse::ExitNow);
    }

    #[test]
    fn test_interrupt_at_prompt_exits() {
        let s = InterruptState::new();
        assert!(s.begin_prompt());
        assert_eq!(s.on_interrupt(), InterruptResponse::ExitNow);
    }

    #[test]
    fn test_prompt_skipped_once_stopped() {
        let s = InterruptState::new();
        s.on_interrupt();
        assert!(!s.begin_prompt());
    }

    #[test]
    fn test_prompt_only_for_missing_camera() {
        let no_cam = Outcome::NoCamera { tried: vec![0, 1, 2] };
        assert!(should_prompt(&no_cam, true, true));
        assert!(!should_prompt(&no_cam, false, true));
        assert!(!should_prompt(&no_cam, true, false));
        assert!(!should_prompt(&Outcome::Crashed("x".into()), true, true));
    }

    #[test]
    fn test_outcome_mapping() {
        let o = Outcome::from_result(Err(AppError::DeviceUnavailable { tried: vec![0, 1, 2] }));
        assert!(matches!(&o, Outcome::NoCamera { tried } if tried == &vec![0, 1, 2]));
        assert_eq!(o.user_lines(), &["Couldn't open camera", "Check if another app is using it"]);

        let o = Outcome::from_result(Err(DisplayError::Create("no X".into()).into()));
        assert!(matches!(o, Outcome::Failed(AppError::Display(_))));
        assert!(o.user_lines().is_empty());
    }

    #[test]
    fn test_panic_becomes_crashed() {
        let o = run_guarded(|| panic!("boom"));
        assert!(matches!(&o, Outcome::Crashed(msg) if msg == "boom"));

        let o = run_guarded(|| panic!("frame {}", 7));
        assert!(matches!(&o, Outcome::Crashed(msg) if msg == "frame 7"));
    }
}
