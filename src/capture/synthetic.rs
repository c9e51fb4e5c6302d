// capture/synthetic.rs — Test-pattern camera.
//
// Renders a diagonal gradient with a bright square that moves a few
// pixels per frame, so all four modes have something to show: gradients
// and square borders for edges, the moving square for motion.

use crate::error::CaptureError;
use crate::image::{Image, Rgb};

use super::{CameraBackend, FrameSource};

/// Square side length as a fraction of the shorter image side.
const SQUARE_FRACTION: usize = 5;
/// Pixels the square moves per frame.
const SPEED: usize = 4;

/// A camera that draws its own frames.
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    width: usize,
    height: usize,
    frame_index: u64,
    /// End the stream after this many frames.
    frame_limit: Option<u64>,
}

impl SyntheticCamera {
    pub fn new(width: usize, height: usize) -> Self {
        SyntheticCamera {
            width,
            height,
            frame_index: 0,
            frame_limit: None,
        }
    }

    /// Report end-of-stream after `n` frames.
    pub fn with_frame_limit(mut self, n: u64) -> Self {
        self.frame_limit = Some(n);
        self
    }

    pub fn frames_read(&self) -> u64 {
        self.frame_index
    }

    /// Render frame number `n` without advancing the stream.
    pub fn render(&self, n: u64) -> Image<Rgb> {
        let (w, h) = (self.width, self.height);
        let side = (w.min(h) / SQUARE_FRACTION).max(1);
        let travel_x = w.saturating_sub(side).max(1);
        let travel_y = h.saturating_sub(side).max(1);
        let step = n as usize * SPEED;
        let sq_x = step % travel_x;
        let sq_y = (step / 2) % travel_y;

        Image::from_fn(w, h, |x, y| {
            if x >= sq_x && x < sq_x + side && y >= sq_y && y < sq_y + side {
                Rgb::new(240, 240, 240)
            } else {
                let r = (x * 160 / w.max(1)) as u8;
                let g = (y * 160 / h.max(1)) as u8;
                Rgb::new(r, g, 60)
            }
        })
    }
}

impl FrameSource for SyntheticCamera {
    fn read(&mut self) -> Result<Image<Rgb>, CaptureError> {
        if self.frame_limit.is_some_and(|limit| self.frame_index >= limit) {
            return Err(CaptureError::EndOfStream);
        }
        let frame = self.render(self.frame_index);
        self.frame_index += 1;
        Ok(frame)
    }
}

/// Backend handing out synthetic cameras for a configurable set of indices.
#[derive(Debug, Clone)]
pub struct SyntheticBackend {
    width: usize,
    height: usize,
    available: Vec<u32>,
    frame_limit: Option<u64>,
}

impl SyntheticBackend {
    /// A backend where only index 0 exists.
    pub fn new(width: usize, height: usize) -> Self {
        SyntheticBackend {
            width,
            height,
            available: vec![0],
            frame_limit: None,
        }
    }

    pub fn with_available(mut self, indices: Vec<u32>) -> Self {
        self.available = indices;
        self
    }

    pub fn with_frame_limit(mut self, n: u64) -> Self {
        self.frame_limit = Some(n);
        self
    }
}

impl CameraBackend for SyntheticBackend {
    type Device = SyntheticCamera;

    fn open(&mut self, index: u32) -> Result<SyntheticCamera, CaptureError> {
        if !self.available.contains(&index) {
            return Err(CaptureError::Open {
                index,
                reason: "no such synthetic device".into(),
            });
        }
        let cam = SyntheticCamera::new(self.width, self.height);
        Ok(match self.frame_limit {
            Some(n) => cam.with_frame_limit(n),
            None => cam,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_have_requested_size() {
        let mut cam = SyntheticCamera::new(64, 48);
        let f = cam.read().unwrap();
        assert_eq!((f.width(), f.height()), (64, 48));
    }

    #[test]
    fn test_consecutive_frames_differ() {
        let cam = SyntheticCamera::new(64, 48);
        assert!(cam.render(0) != cam.render(1));
    }

    #[test]
    fn test_frame_limit_ends_stream() {
        let mut cam = SyntheticCamera::new(8, 8).with_frame_limit(2);
        assert!(cam.read().is_ok());
        assert!(cam.read().is_ok());
        assert!(matches!(cam.read(), Err(CaptureError::EndOfStream)));
        assert_eq!(cam.frames_read(), 2);
    }

    #[test]
    fn test_backend_rejects_unknown_index() {
        let mut backend = SyntheticBackend::new(8, 8);
        assert!(backend.open(0).is_ok());
        assert!(matches!(backend.open(1), Err(CaptureError::Open { index: 1, .. })));
    }
}
