// rate.rs — Frame decimation and FPS bookkeeping.
//
// Capture runs every iteration; only one frame in `frame_skip` is handed
// on to processing and display. The counter includes every captured
// frame, so skipping saves filter and display work but not camera
// bandwidth.
//
// FPS is measured between *processed* frames and smoothed over the last
// FPS_HISTORY_LEN samples.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Number of instantaneous FPS samples kept for the rolling average.
pub const FPS_HISTORY_LEN: usize = 30;
pub const MIN_FRAME_SKIP: u32 = 1;
pub const MAX_FRAME_SKIP: u32 = 10;
pub const DEFAULT_FRAME_SKIP: u32 = 2;

/// Frame-skip divisor, always within [MIN_FRAME_SKIP, MAX_FRAME_SKIP].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameSkip(u32);

impl FrameSkip {
    /// Clamp `n` into range.
    pub fn new(n: u32) -> Self {
        FrameSkip(n.clamp(MIN_FRAME_SKIP, MAX_FRAME_SKIP))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) -> u32 {
        self.0 = (self.0 + 1).min(MAX_FRAME_SKIP);
        self.0
    }

    pub fn decrement(&mut self) -> u32 {
        self.0 = self.0.saturating_sub(1).max(MIN_FRAME_SKIP);
        self.0
    }
}

impl Default for FrameSkip {
    fn default() -> Self {
        FrameSkip(DEFAULT_FRAME_SKIP)
    }
}

impl fmt::Display for FrameSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.0)
    }
}

/// Bounded FIFO of FPS samples. Pushing onto a full history evicts the
/// oldest sample.
#[derive(Debug, Clone)]
pub struct FpsHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl FpsHistory {
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be > 0");
        FpsHistory {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, fps: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
    }

    /// Arithmetic mean of the retained samples, 0 when empty.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

impl Default for FpsHistory {
    fn default() -> Self {
        Self::with_capacity(FPS_HISTORY_LEN)
    }
}

/// Timing / rate controller for the main loop.
#[derive(Debug, Clone)]
pub struct RateController {
    last_timestamp: Instant,
    fps_history: FpsHistory,
    frame_skip: FrameSkip,
    /// Every captured frame, processed or not.
    frame_counter: u64,
    /// Frames that passed the decimation check.
    processed: u64,
}

impl RateController {
    /// `start` seeds the timestamp the first FPS sample is measured from.
    pub fn new(frame_skip: FrameSkip, start: Instant) -> Self {
        RateController {
            last_timestamp: start,
            fps_history: FpsHistory::default(),
            frame_skip,
            frame_counter: 0,
            processed: 0,
        }
    }

    /// Count one captured frame and decide whether it gets processed.
    /// True on every `frame_skip`-th frame (1-indexed).
    pub fn should_process(&mut self) -> bool {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        let take = self.frame_counter % self.frame_skip.get() as u64 == 0;
        if take {
            self.processed += 1;
        }
        take
    }

    /// Record a processed frame at `now` and return the smoothed FPS.
    ///
    /// A non-positive interval (clock did not advance, or went backwards)
    /// contributes no sample; the timestamp still moves to `now`.
    pub fn record_frame_time(&mut self, now: Instant) -> f64 {
        match now.checked_duration_since(self.last_timestamp) {
            Some(elapsed) if elapsed > Duration::ZERO => {
                self.fps_history.push(1.0 / elapsed.as_secs_f64());
            }
            _ => {}
        }
        self.last_timestamp = now;
        self.fps_history.average()
    }

    pub fn increment_skip(&mut self) -> FrameSkip {
        self.frame_skip.increment();
        self.frame_skip
    }

    pub fn decrement_skip(&mut self) -> FrameSkip {
        self.frame_skip.decrement();
        self.frame_skip
    }

    pub fn frame_skip(&self) -> FrameSkip {
        self.frame_skip
    }

    /// Smoothed FPS, or `None` before the first sample.
    pub fn average_fps(&self) -> Option<f64> {
        (!self.fps_history.is_empty()).then(|| self.fps_history.average())
    }

    pub fn fps_history(&self) -> &FpsHistory {
        &self.fps_history
    }

    pub fn frames_captured(&self) -> u64 {
        self.frame_counter
    }

    pub fn frames_processed(&self) -> u64 {
        self.processed
    }
}

/// Run `f` and measure how long it took.
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_skip_clamps_on_construction() {
        assert_eq!(FrameSkip::new(0).get(), 1);
        assert_eq!(FrameSkip::new(42).get(), 10);
        assert_eq!(FrameSkip::default().get(), 2);
    }

    #[test]
    fn test_increment_saturates_at_ten() {
        let mut s = FrameSkip::new(10);
        for _ in 0..5 {
            s.increment();
        }
        assert_eq!(s.get(), 10);
    }

    #[test]
    fn test_decrement_saturates_at_one() {
        let mut s = FrameSkip::new(1);
        for _ in 0..5 {
            s.decrement();
        }
        assert_eq!(s.get(), 1);
    }

    #[test]
    fn test_skip_display() {
        assert_eq!(FrameSkip::new(3).to_string(), "1/3");
    }

    #[test]
    fn test_decimation_counts() {
        for n in 1..=10u32 {
            let mut rc = RateController::new(FrameSkip::new(n), Instant::now());
            let taken = (0..97).filter(|_| rc.should_process()).count();
            assert_eq!(taken, 97 / n as usize, "skip {n}");
            assert_eq!(rc.frames_captured(), 97);
            assert_eq!(rc.frames_processed(), taken as u64);
        }
    }

    #[test]
    fn test_first_processed_frame_is_nth() {
        let mut rc = RateController::new(FrameSkip::new(3), Instant::now());
        let pattern: Vec<bool> = (0..6).map(|_| rc.should_process()).collect();
        assert_eq!(pattern, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_history_bounded() {
        let mut h = FpsHistory::default();
        for i in 0..35 {
            h.push(i as f64);
        }
        assert_eq!(h.len(), 30);
        assert_eq!(h.iter().next(), Some(5.0));
        // Mean of 5..=34.
        assert!((h.average() - 19.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_average_is_zero() {
        assert_eq!(FpsHistory::default().average(), 0.0);
    }

    #[test]
    fn test_record_frame_time() {
        let t0 = Instant::now();
        let mut rc = RateController::new(FrameSkip::default(), t0);
        let avg = rc.record_frame_time(t0 + Duration::from_millis(100));
        assert!((avg - 10.0).abs() < 1e-6);
        let avg = rc.record_frame_time(t0 + Duration::from_millis(150));
        // Samples 10 and 20.
        assert!((avg - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_fps_absent_until_first_sample() {
        let t0 = Instant::now();
        let mut rc = RateController::new(FrameSkip::default(), t0);
        assert_eq!(rc.average_fps(), None);
        rc.record_frame_time(t0 + Duration::from_millis(40));
        let fps = rc.average_fps().unwrap();
        assert!((fps - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_interval_skipped() {
        let t0 = Instant::now();
        let mut rc = RateController::new(FrameSkip::default(), t0);
        let avg = rc.record_frame_time(t0);
        assert_eq!(avg, 0.0);
        assert!(rc.fps_history().is_empty());
    }

    #[test]
    fn test_backwards_clock_skipped() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(50);
        let mut rc = RateController::new(FrameSkip::default(), later);
        rc.record_frame_time(t0);
        assert!(rc.fps_history().is_empty());
        // Timestamp moved back to t0, so the next sample measures from t0.
        let avg = rc.record_frame_time(t0 + Duration::from_millis(200));
        assert!((avg - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_skip_change_through_controller() {
        let mut rc = RateController::new(FrameSkip::new(9), Instant::now());
        assert_eq!(rc.increment_skip().get(), 10);
        assert_eq!(rc.increment_skip().get(), 10);
        assert_eq!(rc.decrement_skip().get(), 9);
    }

    #[test]
    fn test_timed() {
        let (v, d) = timed(|| 7);
        assert_eq!(v, 7);
        assert!(d < Duration::from_secs(1));
    }
}
