// main.rs — Process entry point.
//
// Usage:
//   frugal-cam                      try cameras 0, 1, 2
//   frugal-cam cam.toml             with a config file
//   frugal-cam --synthetic          moving test pattern, no camera needed
//
// Real camera capture is behind the `webcam` cargo feature (nokhwa needs
// the platform's capture headers to build):
//   cargo run --release --features webcam
// Without it only --synthetic produces frames.
//
// Controls are printed once a camera is open. Every outcome (quit,
// closed window, lost camera, Ctrl-C, error, panic) ends here and the
// process exits with status 0. A second Ctrl-C exits immediately.

use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use frugal_cam::app::{run_session, SessionSummary};
use frugal_cam::config::{AppConfig, CameraSource};
use frugal_cam::capture::SyntheticBackend;
use frugal_cam::display::WindowDisplay;
use frugal_cam::error::AppError;
use frugal_cam::shutdown::{run_guarded, should_prompt, InterruptResponse, InterruptState, Outcome};

fn main() {
    let config = AppConfig::from_args(std::env::args().skip(1));

    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .init();

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            log_error_chain(&e);
            return;
        }
    };

    let interrupts = Arc::new(InterruptState::new());
    {
        let interrupts = Arc::clone(&interrupts);
        let installed = ctrlc::set_handler(move || {
            if interrupts.on_interrupt() == InterruptResponse::ExitNow {
                std::process::exit(0);
            }
        });
        if let Err(e) = installed {
            warn!(error = %e, "could not install Ctrl-C handler");
        }
    }

    info!(
        source = ?config.camera.source,
        candidates = ?config.camera.candidates,
        frame_skip = %config.processing.frame_skip(),
        "starting camera demo"
    );

    let outcome = run_guarded(|| run(&config, interrupts.stop_flag()));
    match &outcome {
        Outcome::Finished(summary) => report(summary),
        Outcome::NoCamera { tried } => error!(?tried, "no camera available"),
        Outcome::Failed(e) => log_error_chain(e),
        Outcome::Crashed(msg) => error!(panic = %msg, "camera demo crashed"),
    }
    for line in outcome.user_lines() {
        println!("{line}");
    }

    if should_prompt(&outcome, config.display.exit_prompt, io::stdin().is_terminal())
        && interrupts.begin_prompt()
    {
        wait_for_enter();
    }
}

fn run(config: &AppConfig, stop: &AtomicBool) -> Result<SessionSummary, AppError> {
    let skip = config.processing.frame_skip();
    let candidates = &config.camera.candidates;
    let display = &config.display;
    let open_window =
        |w: usize, h: usize| WindowDisplay::new(&display.title, w, h, display.target_fps);

    match config.camera.source {
        CameraSource::Synthetic => {
            let mut backend = SyntheticBackend::new(config.camera.width, config.camera.height);
            run_session(&mut backend, candidates, skip, open_window, stop)
        }
        CameraSource::Camera => {
            let mut backend = camera_backend();
            run_session(&mut backend, candidates, skip, open_window, stop)
        }
    }
}

#[cfg(feature = "webcam")]
fn camera_backend() -> frugal_cam::capture::WebcamBackend {
    frugal_cam::capture::WebcamBackend
}

#[cfg(not(feature = "webcam"))]
fn camera_backend() -> frugal_cam::capture::NoCameraBackend {
    warn!("built without the `webcam` feature; use --synthetic for the test pattern");
    frugal_cam::capture::NoCameraBackend
}

fn report(summary: &SessionSummary) {
    info!(
        camera = summary.camera_index,
        stop = ?summary.stop,
        captured = summary.frames_captured,
        processed = summary.frames_processed,
        mode = %summary.final_mode,
        skip = %summary.final_skip,
        "session finished"
    );
    if let Some(fps) = summary.average_fps {
        info!("Avg FPS: {fps:.1}");
    }
}

fn log_error_chain(e: &dyn Error) {
    error!(error = %e, "camera demo failed");
    let mut source = e.source();
    while let Some(cause) = source {
        error!(cause = %cause, "caused by");
        source = cause.source();
    }
}

fn wait_for_enter() {
    print!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
