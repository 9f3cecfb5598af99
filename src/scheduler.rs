//! Fixed-step clock driven by display refresh callbacks
//!
//! Frames arrive at whatever rate the display runs. Elapsed time is banked in
//! an accumulator and spent in whole logic ticks; the remainder becomes the
//! render interpolation progress.

use crate::consts::MAX_FRAME_DT_MS;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Banked time not yet spent on ticks (ms)
    accumulator: f64,
    /// Timestamp of the previous frame, None until the first frame after a resync
    last_frame: Option<f64>,
    /// Last computed interpolation progress
    progress: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget banked time. The next frame becomes the new time origin.
    pub fn resync(&mut self) {
        self.accumulator = 0.0;
        self.last_frame = None;
        self.progress = 0.0;
    }

    /// Elapsed time since the previous frame, clamped to `MAX_FRAME_DT_MS`
    pub fn frame_delta(&mut self, now_ms: f64) -> f64 {
        let last = self.last_frame.unwrap_or(now_ms);
        self.last_frame = Some(now_ms);
        (now_ms - last).clamp(0.0, MAX_FRAME_DT_MS)
    }

    pub fn accumulate(&mut self, dt_ms: f64) {
        self.accumulator += dt_ms;
    }

    /// Spend one tick worth of banked time if available
    pub fn consume(&mut self, interval_ms: f64) -> bool {
        if interval_ms > 0.0 && self.accumulator >= interval_ms {
            self.accumulator -= interval_ms;
            true
        } else {
            false
        }
    }

    /// Recompute progress toward the next tick, in [0, 1]
    pub fn update_progress(&mut self, interval_ms: f64) -> f32 {
        self.progress = if interval_ms > 0.0 {
            (self.accumulator / interval_ms).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        self.progress
    }

    /// Progress as of the last update (frozen while paused)
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}
