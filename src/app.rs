// app.rs — The main loop.
//
// States: Running → Quitting. One iteration while Running:
//
//   1. read a frame                      (failure → Quitting)
//   2. decimation check                  (skipped frame → next iteration)
//   3. record frame time, update FPS average
//   4. dispatch to the active mode, timed
//   5. draw the overlay
//   6. show the frame, poll one key      (window closed → Quitting)
//   7. apply the key's action            ('q' → Quitting)
//
// Quitting just returns; the caller owns the device and the surface and
// drops them, which releases both on every path.
//
// NEW RUST CONCEPTS:
//   - `std::ops::ControlFlow` — a Continue/Break return value for "keep
//     going or stop", instead of a bare bool.
//   - `FnOnce` factory for the display — the window is only built after a
//     camera has been acquired, so a failed acquisition never opens one.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{error, info, warn};

use crate::capture::{acquire, Acquired, CameraBackend, FrameSource};
use crate::display::DisplaySurface;
use crate::error::{AppError, DisplayError};
use crate::input::{action_for_key, controls_help, Action};
use crate::mode::{Mode, ModeDispatcher};
use crate::overlay::{render_overlay, OverlayInfo};
use crate::rate::{timed, FrameSkip, RateController};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The operator pressed 'q'.
    Quit,
    /// The window was closed.
    WindowClosed,
    /// The device stopped yielding frames.
    FrameReadFailed,
    /// Ctrl-C.
    Interrupted,
    /// The window could not present a frame.
    DisplayFailed,
}

/// All mutable state the loop carries between iterations.
pub struct LoopState {
    dispatcher: ModeDispatcher,
    rate: RateController,
}

impl LoopState {
    /// Mode Original, no previous frame, empty FPS history.
    pub fn new(frame_skip: FrameSkip, start: Instant) -> Self {
        LoopState {
            dispatcher: ModeDispatcher::new(Mode::Original),
            rate: RateController::new(frame_skip, start),
        }
    }

    pub fn mode(&self) -> Mode {
        self.dispatcher.mode()
    }

    pub fn frame_skip(&self) -> FrameSkip {
        self.rate.frame_skip()
    }

    pub fn dispatcher(&self) -> &ModeDispatcher {
        &self.dispatcher
    }

    pub fn rate(&self) -> &RateController {
        &self.rate
    }
}

/// Apply one operator action. `Break` means stop the loop.
pub fn apply_action(state: &mut LoopState, action: Action) -> ControlFlow<()> {
    match action {
        Action::Quit => return ControlFlow::Break(()),
        Action::SetMode(mode) => {
            state.dispatcher.set_mode(mode);
            info!("Mode: {mode}");
        }
        Action::IncreaseSkip => {
            let skip = state.rate.increment_skip();
            info!("Skip: {skip}");
        }
        Action::DecreaseSkip => {
            let skip = state.rate.decrement_skip();
            info!("Skip: {skip}");
        }
    }
    ControlFlow::Continue(())
}

/// Run the loop until something stops it.
///
/// `stop` is polled once per iteration; setting it (from a signal
/// handler) ends the loop at the next frame boundary.
pub fn run_loop<S, D>(source: &mut S, surface: &mut D, state: &mut LoopState, stop: &AtomicBool) -> StopReason
where
    S: FrameSource + ?Sized,
    D: DisplaySurface + ?Sized,
{
    loop {
        if stop.load(Ordering::Relaxed) {
            info!("Stopped");
            return StopReason::Interrupted;
        }

        let frame = match source.read() {
            Ok(f) => f,
            Err(e) => {
                info!("Failed to get frame");
                warn!(error = %e, "frame source ended");
                return StopReason::FrameReadFailed;
            }
        };

        if !state.rate.should_process() {
            continue;
        }

        let avg_fps = state.rate.record_frame_time(Instant::now());
        let (mut out, process_time) = timed(|| state.dispatcher.process(&frame));

        let info = OverlayInfo {
            label: out.label,
            avg_fps,
            process_time,
            frame_skip: state.rate.frame_skip(),
        };
        render_overlay(&mut out.display, &info);

        if let Err(e) = surface.show(&out.display) {
            error!(error = %e, "display failed");
            return StopReason::DisplayFailed;
        }
        if !surface.is_open() {
            info!("Window closed");
            return StopReason::WindowClosed;
        }

        if let Some(action) = surface.poll_key().and_then(action_for_key) {
            if apply_action(state, action).is_break() {
                return StopReason::Quit;
            }
        }
    }
}

/// What happened in one session, for the exit report.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub camera_index: u32,
    pub stop: StopReason,
    pub frames_captured: u64,
    pub frames_processed: u64,
    /// Mean over the final FPS window; `None` if no sample was recorded.
    pub average_fps: Option<f64>,
    pub final_mode: Mode,
    pub final_skip: FrameSkip,
}

/// Acquire a camera, open the display for it, and run the loop.
///
/// `open_surface` gets the first frame's width and height and is only
/// called once a device has produced a frame. The device and the surface
/// are dropped before this returns, whatever the outcome.
pub fn run_session<B, D, F>(
    backend: &mut B,
    candidates: &[u32],
    frame_skip: FrameSkip,
    open_surface: F,
    stop: &AtomicBool,
) -> Result<SessionSummary, AppError>
where
    B: CameraBackend,
    D: DisplaySurface,
    F: FnOnce(usize, usize) -> Result<D, DisplayError>,
{
    let Acquired { index, mut device, first_frame } = acquire(backend, candidates)?;
    let mut surface = open_surface(first_frame.width(), first_frame.height())?;
    drop(first_frame);

    println!("{}", controls_help());

    let mut state = LoopState::new(frame_skip, Instant::now());
    let stop_reason = run_loop(&mut device, &mut surface, &mut state, stop);

    drop(device);
    drop(surface);

    Ok(SessionSummary {
        camera_index: index,
        stop: stop_reason,
        frames_captured: state.rate.frames_captured(),
        frames_processed: state.rate.frames_processed(),
        average_fps: state.rate.average_fps(),
        final_mode: state.mode(),
        final_skip: state.frame_skip(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let s = LoopState::new(FrameSkip::default(), Instant::now());
        assert_eq!(s.mode(), Mode::Original);
        assert_eq!(s.frame_skip().get(), 2);
        assert!(s.dispatcher().previous_frame().is_none());
        assert!(s.rate().fps_history().is_empty());
    }

    #[test]
    fn test_apply_action() {
        let mut s = LoopState::new(FrameSkip::new(10), Instant::now());
        assert!(apply_action(&mut s, Action::IncreaseSkip).is_continue());
        assert_eq!(s.frame_skip().get(), 10);
        assert!(apply_action(&mut s, Action::DecreaseSkip).is_continue());
        assert_eq!(s.frame_skip().get(), 9);
        assert!(apply_action(&mut s, Action::SetMode(Mode::EdgeDetection)).is_continue());
        assert_eq!(s.mode(), Mode::EdgeDetection);
        assert!(apply_action(&mut s, Action::Quit).is_break());
    }
}
