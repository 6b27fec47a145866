//! Time management utilities

use std::time::{Duration, Instant};

/// Per-frame time snapshot handed to components and awaiters
///
/// `unscaled_delta` is real elapsed time; `delta` is the same interval
/// multiplied by the time scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    delta: f32,
    unscaled_delta: f32,
    time_scale: f32,
    total: f32,
    unscaled_total: f32,
    frame: u64,
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FrameTime {
    /// Create a frame clock at frame zero with the given time scale
    pub fn new(time_scale: f32) -> Self {
        Self {
            delta: 0.0,
            unscaled_delta: 0.0,
            time_scale: time_scale.max(0.0),
            total: 0.0,
            unscaled_total: 0.0,
            frame: 0,
        }
    }

    /// Advance by one frame of real (unscaled) elapsed time
    pub fn advance(&mut self, unscaled_delta: f32) {
        self.unscaled_delta = unscaled_delta;
        self.delta = unscaled_delta * self.time_scale;
        self.unscaled_total += self.unscaled_delta;
        self.total += self.delta;
        self.frame += 1;
    }

    /// Scaled time since the previous frame in seconds
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Real time since the previous frame in seconds
    pub fn unscaled_delta(&self) -> f32 {
        self.unscaled_delta
    }

    /// Current time scale factor
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale; negative values are clamped to zero
    ///
    /// Takes effect from the next [`advance`](Self::advance).
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale.max(0.0);
    }

    /// Total scaled time in seconds
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Total real time in seconds
    pub fn unscaled_total(&self) -> f32 {
        self.unscaled_total
    }

    /// Number of frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
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
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Restart measuring from now without touching the totals
    pub fn reset_frame(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Restart the stopwatch and return the time measured up to now
    pub fn lap(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.elapsed = Duration::ZERO;
        self.start();
        elapsed
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}
