// error.rs — Error types.
//
// Each layer has its own enum; `AppError` is what reaches the process
// entry point. A malformed timing sample is not an error at all (the
// rate controller drops it), so it has no variant here.

use std::io;

use thiserror::Error;

/// Failures from a camera backend or an open device.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera {index} could not be opened: {reason}")]
    Open { index: u32, reason: String },
    #[error("failed to read frame: {0}")]
    Read(String),
    #[error("camera stream ended")]
    EndOfStream,
    #[error("camera capture is not available in this build (enable the `webcam` feature)")]
    BackendUnavailable,
}

/// Failures from the display window.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to create window: {0}")]
    Create(String),
    #[error("failed to present frame: {0}")]
    Update(String),
}

/// Failures loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, #[source] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("unexpected argument {0:?} (usage: frugal-cam [CONFIG.toml] [--synthetic])")]
    UnknownArgument(String),
}

/// Top-level error surfaced to `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no camera available (tried indices {tried:?})")]
    DeviceUnavailable { tried: Vec<u32> },
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_device_unavailable_message() {
        let e = AppError::DeviceUnavailable { tried: vec![0, 1, 2] };
        assert_eq!(e.to_string(), "no camera available (tried indices [0, 1, 2])");
    }

    #[test]
    fn test_config_read_error_has_source() {
        let io = io::Error::new(io::ErrorKind::NotFound, "missing");
        let e = ConfigError::ReadFile("cam.toml".into(), io);
        assert!(e.source().is_some());
        assert!(e.to_string().contains("cam.toml"));
    }

    #[test]
    fn test_backend_unavailable_names_the_feature() {
        assert!(CaptureError::BackendUnavailable.to_string().contains("`webcam` feature"));
    }

    #[test]
    fn test_transparent_wrapping() {
        let e: AppError = DisplayError::Create("no X server".into()).into();
        assert_eq!(e.to_string(), "failed to create window: no X server");
    }
}
