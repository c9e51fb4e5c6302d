// motion.rs — Frame-differencing motion detector.
//
//   diff    = |current - previous|          (per channel)
//   gray    = luma(diff)
//   mask    = gray >= MOTION_THRESHOLD ? 255 : 0
//   percent = nonzero(mask) / pixel_count * 100
//
// The detector is stateless; whoever calls it owns the previous frame.

use crate::convert::rgb_to_gray;
use crate::image::{Image, Rgb};

/// Minimum luma of the per-pixel difference for a pixel to count as moving.
pub const MOTION_THRESHOLD: u8 = 30;

/// Value written for moving pixels in the mask.
pub const MOTION: u8 = 255;

/// Result of comparing two frames.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionResult {
    /// Binary mask, `None` when there was nothing to compare against.
    pub mask: Option<Image<u8>>,
    /// Share of moving pixels in [0, 100].
    pub percent: f64,
}

impl MotionResult {
    /// The neutral result for the first frame after entering motion mode.
    pub fn none() -> Self {
        MotionResult { mask: None, percent: 0.0 }
    }
}

/// Per-pixel, per-channel absolute difference.
///
/// # Panics
/// Panics if the frames differ in size.
pub fn abs_diff(a: &Image<Rgb>, b: &Image<Rgb>) -> Image<Rgb> {
    a.zip_map(b, Rgb::abs_diff)
}

/// Binary threshold: `max_value` where `v >= thresh`, 0 elsewhere.
pub fn threshold_binary(src: &Image<u8>, thresh: u8, max_value: u8) -> Image<u8> {
    src.map(|v| if v >= thresh { max_value } else { 0 })
}

/// Number of non-zero pixels.
pub fn count_nonzero(src: &Image<u8>) -> usize {
    src.as_slice().iter().filter(|&&v| v != 0).count()
}

/// Compare `frame` against `previous`.
///
/// With no previous frame the result is empty and 0%. A previous frame
/// of a different size (camera renegotiated resolution) is treated the
/// same way rather than compared.
pub fn motion_detection(frame: &Image<Rgb>, previous: Option<&Image<Rgb>>) -> MotionResult {
    let Some(prev) = previous else {
        return MotionResult::none();
    };
    if prev.width() != frame.width() || prev.height() != frame.height() || frame.is_empty() {
        return MotionResult::none();
    }

    let gray = rgb_to_gray(&abs_diff(frame, prev));
    let mask = threshold_binary(&gray, MOTION_THRESHOLD, MOTION);
    let percent = count_nonzero(&mask) as f64 / mask.len() as f64 * 100.0;
    MotionResult { mask: Some(mask), percent }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_previous_frame() {
        let frame = Image::filled(8, 8, Rgb::gray(10));
        let r = motion_detection(&frame, None);
        assert!(r.mask.is_none());
        assert_eq!(r.percent, 0.0);
    }

    #[test]
    fn test_identical_frames() {
        let frame = Image::filled(8, 8, Rgb::new(10, 20, 30));
        let r = motion_detection(&frame, Some(&frame.clone()));
        let mask = r.mask.unwrap();
        assert_eq!(count_nonzero(&mask), 0);
        assert_eq!(r.percent, 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let prev = Image::filled(2, 1, Rgb::gray(100));
        let mut frame = prev.clone();
        frame.set(0, 0, Rgb::gray(130)); // diff 30: counts
        frame.set(1, 0, Rgb::gray(129)); // diff 29: does not
        let r = motion_detection(&frame, Some(&prev));
        assert_eq!(r.mask.unwrap().as_slice(), &[MOTION, 0]);
        assert!((r.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_of_changed_pixels() {
        let prev = Image::filled(10, 10, Rgb::gray(0));
        let mut frame = prev.clone();
        for i in 0..7 {
            frame.set(i, i, Rgb::gray(200));
        }
        let r = motion_detection(&frame, Some(&prev));
        assert!((r.percent - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_size_mismatch_is_neutral() {
        let prev = Image::filled(4, 4, Rgb::BLACK);
        let frame = Image::filled(8, 8, Rgb::WHITE);
        assert_eq!(motion_detection(&frame, Some(&prev)), MotionResult::none());
    }

    #[test]
    fn test_threshold_binary() {
        let img = Image::from_vec(4, 1, vec![0u8, 29, 30, 255]);
        let t = threshold_binary(&img, 30, 255);
        assert_eq!(t.as_slice(), &[0, 0, 255, 255]);
    }
}
