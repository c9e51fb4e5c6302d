// config.rs — Runtime configuration.
//
// Everything has a default, so an absent file, an empty file, and a file
// with only some tables all work. Algorithm constants (Canny thresholds,
// motion threshold, FPS history length, skip range) are not here.
//
// Command line:  frugal-cam [CONFIG.toml] [--synthetic]

use std::path::Path;

use serde::Deserialize;

use crate::capture::DEFAULT_CANDIDATES;
use crate::error::ConfigError;
use crate::rate::{FrameSkip, DEFAULT_FRAME_SKIP};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub processing: ProcessingConfig,
    pub logging: LoggingConfig,
}

/// Where frames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    /// A system camera (needs the `webcam` feature).
    #[default]
    Camera,
    /// The built-in moving test pattern.
    Synthetic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    /// Indices tried in order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<u32>,
    #[serde(default)]
    pub source: CameraSource,
    /// Synthetic frame size.
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// 0 leaves the window's update rate unlimited.
    #[serde(default)]
    pub target_fps: usize,
    /// Wait for Enter before exiting when no camera could be opened.
    #[serde(default = "default_exit_prompt")]
    pub exit_prompt: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default = "default_frame_skip")]
    pub initial_frame_skip: u32,
}

impl ProcessingConfig {
    /// The configured skip, clamped into range.
    pub fn frame_skip(&self) -> FrameSkip {
        FrameSkip::new(self.initial_frame_skip)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            source: CameraSource::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            target_fps: 0,
            exit_prompt: default_exit_prompt(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            initial_frame_skip: default_frame_skip(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build the configuration from command-line arguments (program name
    /// already stripped): an optional config path, then flag overrides.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut path: Option<String> = None;
        let mut synthetic = false;
        for arg in args {
            let arg: String = arg.into();
            match arg.as_str() {
                "--synthetic" => synthetic = true,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument(arg));
                }
                _ if path.is_none() => path = Some(arg),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        let mut config = match path {
            Some(p) => Self::load(Path::new(&p))?,
            None => Self::default(),
        };
        if synthetic {
            config.camera.source = CameraSource::Synthetic;
        }
        Ok(config)
    }
}

fn default_candidates() -> Vec<u32> {
    DEFAULT_CANDIDATES.to_vec()
}
fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_title() -> String {
    "Camera Demo".into()
}
fn default_exit_prompt() -> bool {
    true
}
fn default_frame_skip() -> u32 {
    DEFAULT_FRAME_SKIP
}
fn default_log_level() -> String {
    "info".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AppConfig::default();
        assert_eq!(c.camera.candidates, vec![0, 1, 2]);
        assert_eq!(c.camera.source, CameraSource::Camera);
        assert_eq!((c.camera.width, c.camera.height), (640, 480));
        assert_eq!(c.display.title, "Camera Demo");
        assert_eq!(c.display.target_fps, 0);
        assert!(c.display.exit_prompt);
        assert_eq!(c.processing.frame_skip().get(), 2);
        assert_eq!(c.logging.level, "info");
    }

    #[test]
    fn test_empty_file_is_default() {
        let c = AppConfig::parse("").unwrap();
        assert_eq!(c.camera.candidates, vec![0, 1, 2]);
        assert_eq!(c.display.title, "Camera Demo");
    }

    #[test]
    fn test_partial_tables() {
        let c = AppConfig::parse(
            r#"
            [camera]
            candidates = [3]
            source = "synthetic"

            [processing]
            initial_frame_skip = 40
            "#,
        )
        .unwrap();
        assert_eq!(c.camera.candidates, vec![3]);
        assert_eq!(c.camera.source, CameraSource::Synthetic);
        assert_eq!(c.camera.width, 640);
        assert_eq!(c.processing.frame_skip().get(), 10);
        assert!(c.display.exit_prompt);
    }

    #[test]
    fn test_bad_source_is_parse_error() {
        let err = AppConfig::parse("[camera]\nsource = \"ip\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_args() {
        let c = AppConfig::from_args(["--synthetic"]).unwrap();
        assert_eq!(c.camera.source, CameraSource::Synthetic);

        let c = AppConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(c.camera.source, CameraSource::Camera);

        assert!(matches!(
            AppConfig::from_args(["--fast"]),
            Err(ConfigError::UnknownArgument(_))
        ));
        assert!(matches!(
            AppConfig::from_args(["/nonexistent/frugal-cam.toml"]),
            Err(ConfigError::ReadFile(..))
        ));
    }
}
