//! Time management utilities

use std::time::Instant;

/// Per-frame clock consumed by the main loop
pub trait TimeSource {
    /// Advance the clock; call exactly once per frame
    fn update(&mut self);

    /// Seconds elapsed between the two most recent updates
    fn delta_time(&self) -> f32;

    /// Seconds elapsed since the clock was created
    fn total_time(&self) -> f64;

    /// Number of updates performed so far
    fn frame_count(&self) -> u64;
}

/// Wall-clock frame timer
pub struct Timer {
    start: Instant,
    last_frame: Instant,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}

impl TimeSource for Timer {
    fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time = now.duration_since(self.start).as_secs_f64();
        self.last_frame = now;
        self.frame_count += 1;
    }

    fn delta_time(&self) -> f32 {
        self.delta_time
    }

    fn total_time(&self) -> f64 {
        self.total_time
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Deterministic clock that advances by a fixed step every frame.
///
/// Used for headless runs and tests where wall-clock jitter is unwanted.
#[derive(Debug, Clone)]
pub struct FixedTimer {
    step: f32,
    total_time: f64,
    frame_count: u64,
}

impl FixedTimer {
    /// Create a clock that advances `step` seconds per update
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
            total_time: 0.0,
            frame_count: 0,
        }
    }
}

impl TimeSource for FixedTimer {
    fn update(&mut self) {
        self.total_time += f64::from(self.step);
        self.frame_count += 1;
    }

    fn delta_time(&self) -> f32 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.step
        }
    }

    fn total_time(&self) -> f64 {
        self.total_time
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
