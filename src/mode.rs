// mode.rs — Processing modes and the per-frame dispatcher.
//
// Exactly one Mode is active. `dispatch` is a pure function of
// (mode, frame, previous frame); `ModeDispatcher` wraps it with the one
// piece of mode-local state, the frame motion detection compares against.

use std::fmt;

use crate::convert::gray_to_rgb;
use crate::draw::draw_text;
use crate::edges::edge_detection;
use crate::image::{Image, Rgb};
use crate::motion::{motion_detection, MotionResult};
use crate::roi::{roi_processing, Roi};

/// Top-left of the "Motion: X%" annotation; glyph bottoms land on y = 60.
const MOTION_TEXT_POS: (isize, isize) = (10, 46);
const MOTION_TEXT_COLOR: Rgb = Rgb::GREEN;
const MOTION_TEXT_SCALE: usize = 2;

/// The active per-frame transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Original,
    EdgeDetection,
    MotionDetection,
    RegionOfInterest,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Original,
        Mode::EdgeDetection,
        Mode::MotionDetection,
        Mode::RegionOfInterest,
    ];

    /// Human-readable name shown in the overlay and the log.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Original => "Original",
            Mode::EdgeDetection => "Edge Detection",
            Mode::MotionDetection => "Motion Detection",
            Mode::RegionOfInterest => "ROI Processing",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What one dispatch produced.
pub struct DispatchOutput {
    /// 3-channel frame to annotate and show.
    pub display: Image<Rgb>,
    pub label: &'static str,
    /// Set in motion mode only.
    pub motion: Option<MotionResult>,
    /// Set in ROI mode only.
    pub roi: Option<Roi>,
}

/// Run the transform for `mode` on `frame`.
///
/// Returns the display output and the previous frame to keep for the
/// next call: motion mode always replaces it with a copy of `frame`,
/// other modes hand back what they were given.
pub fn dispatch(
    mode: Mode,
    frame: &Image<Rgb>,
    previous: Option<Image<Rgb>>,
) -> (DispatchOutput, Option<Image<Rgb>>) {
    let label = mode.label();
    match mode {
        Mode::Original => (
            DispatchOutput { display: frame.clone(), label, motion: None, roi: None },
            previous,
        ),
        Mode::EdgeDetection => {
            let edges = edge_detection(frame);
            (
                DispatchOutput { display: gray_to_rgb(&edges), label, motion: None, roi: None },
                previous,
            )
        }
        Mode::MotionDetection => {
            let result = motion_detection(frame, previous.as_ref());
            let display = match &result.mask {
                Some(mask) => {
                    let mut display = gray_to_rgb(mask);
                    let (x, y) = MOTION_TEXT_POS;
                    draw_text(
                        &mut display,
                        &format!("Motion: {:.1}%", result.percent),
                        x,
                        y,
                        MOTION_TEXT_SCALE,
                        MOTION_TEXT_COLOR,
                    );
                    display
                }
                // Nothing to compare yet: show the live frame.
                None => frame.clone(),
            };
            (
                DispatchOutput { display, label, motion: Some(result), roi: None },
                Some(frame.clone()),
            )
        }
        Mode::RegionOfInterest => {
            let out = roi_processing(frame);
            (
                DispatchOutput { display: out.display, label, motion: None, roi: Some(out.roi) },
                previous,
            )
        }
    }
}

/// Active mode plus the retained previous frame.
///
/// The previous frame exists only while in motion mode, and is `None`
/// on the first processed frame after entering it.
#[derive(Default)]
pub struct ModeDispatcher {
    mode: Mode,
    previous: Option<Image<Rgb>>,
}

impl ModeDispatcher {
    pub fn new(mode: Mode) -> Self {
        ModeDispatcher { mode, previous: None }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn previous_frame(&self) -> Option<&Image<Rgb>> {
        self.previous.as_ref()
    }

    /// Switch modes. Any mode switch drops the retained frame, so
    /// selecting motion detection (even again) starts from scratch.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.previous = None;
    }

    /// Process one frame in the active mode.
    pub fn process(&mut self, frame: &Image<Rgb>) -> DispatchOutput {
        let (out, previous) = dispatch(self.mode, frame, self.previous.take());
        self.previous = previous;
        out
    }
}
