// overlay.rs — HUD text drawn onto each displayed frame.
//
//   top-left       "Mode: <label>"              yellow
//   bottom-left    "FPS: <avg> | <ms>ms"        green
//   below it       "Skip: 1/N"                  cyan
//
// Drawing only touches the display copy, never the captured frame the
// transforms read.

use std::time::Duration;

use crate::draw::{draw_text, GLYPH_H};
use crate::image::{Image, Rgb};
use crate::rate::FrameSkip;

const TEXT_SCALE: usize = 2;
const TEXT_H: isize = (GLYPH_H * TEXT_SCALE) as isize;
const MARGIN_X: isize = 10;

/// Baselines (bottom of the glyph cell). The FPS and skip lines are
/// measured up from the bottom edge.
const LABEL_BASELINE: isize = 30;
const FPS_BASELINE_FROM_BOTTOM: isize = 60;
const SKIP_BASELINE_FROM_BOTTOM: isize = 30;

pub const LABEL_COLOR: Rgb = Rgb::YELLOW;
pub const FPS_COLOR: Rgb = Rgb::GREEN;
pub const SKIP_COLOR: Rgb = Rgb::CYAN;

/// Numbers shown in the HUD for one frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayInfo<'a> {
    pub label: &'a str,
    pub avg_fps: f64,
    pub process_time: Duration,
    pub frame_skip: FrameSkip,
}

impl OverlayInfo<'_> {
    pub fn mode_line(&self) -> String {
        format!("Mode: {}", self.label)
    }

    pub fn fps_line(&self) -> String {
        format!(
            "FPS: {:.1} | {:.1}ms",
            self.avg_fps,
            self.process_time.as_secs_f64() * 1000.0
        )
    }

    pub fn skip_line(&self) -> String {
        format!("Skip: {}", self.frame_skip)
    }
}

/// Draw all three HUD lines onto `display`.
pub fn render_overlay(display: &mut Image<Rgb>, info: &OverlayInfo<'_>) {
    let h = display.height() as isize;

    draw_text(
        display,
        &info.mode_line(),
        MARGIN_X,
        LABEL_BASELINE - TEXT_H,
        TEXT_SCALE,
        LABEL_COLOR,
    );
    draw_text(
        display,
        &info.fps_line(),
        MARGIN_X,
        h - FPS_BASELINE_FROM_BOTTOM - TEXT_H,
        TEXT_SCALE,
        FPS_COLOR,
    );
    draw_text(
        display,
        &info.skip_line(),
        MARGIN_X,
        h - SKIP_BASELINE_FROM_BOTTOM - TEXT_H,
        TEXT_SCALE,
        SKIP_COLOR,
    );
}
