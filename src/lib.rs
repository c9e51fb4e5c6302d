// frugal-cam: live camera view with switchable CPU filters
//
// Captures frames, runs one of four per-frame transforms (passthrough,
// Canny edges, frame-difference motion, centered ROI), overlays FPS and
// the frame-skip ratio, and lets the operator trade smoothness for CPU
// time by processing only every Nth frame.

pub mod image;
pub mod convert;
pub mod convolution;
pub mod gradient;
pub mod edges;
pub mod motion;
pub mod roi;
pub mod draw;

pub mod mode;
pub mod rate;
pub mod input;
pub mod overlay;

pub mod capture;
pub mod display;
pub mod app;
pub mod shutdown;
pub mod config;
pub mod error;
