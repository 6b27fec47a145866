//! Suspension descriptors yielded by coroutines

use crate::foundation::time::FrameTime;

/// What an [`Awaiter`] waits for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AwaiterKind {
    /// The next frame-advance
    NextFrame,
    /// A number of frame-advances
    Frames(u32),
    /// Elapsed time in seconds, scaled or real
    Seconds {
        /// Duration to wait
        seconds: f32,
        /// Count scaled delta time (false = real time)
        scaled: bool,
    },
}

/// A coroutine's suspension token
///
/// Completed once both the remaining frame count and the remaining time
/// have reached zero. The scheduler advances it once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Awaiter {
    kind: AwaiterKind,
    frames_remaining: i64,
    seconds_remaining: f32,
}

impl Awaiter {
    /// Wait until the next frame-advance
    pub fn next_frame() -> Self {
        Self {
            kind: AwaiterKind::NextFrame,
            frames_remaining: 1,
            seconds_remaining: 0.0,
        }
    }

    /// Wait for `frames` frame-advances
    pub fn frames(frames: u32) -> Self {
        Self {
            kind: AwaiterKind::Frames(frames),
            frames_remaining: i64::from(frames),
            seconds_remaining: 0.0,
        }
    }

    /// Wait for `seconds` of scaled time
    pub fn seconds(seconds: f32) -> Self {
        Self::timed(seconds, true)
    }

    /// Wait for `seconds` of real time, ignoring the time scale
    pub fn seconds_unscaled(seconds: f32) -> Self {
        Self::timed(seconds, false)
    }

    fn timed(seconds: f32, scaled: bool) -> Self {
        // NaN would never compare as elapsed
        let seconds = if seconds.is_nan() { 0.0 } else { seconds };
        Self {
            kind: AwaiterKind::Seconds { seconds, scaled },
            frames_remaining: 0,
            seconds_remaining: seconds,
        }
    }

    /// Kind this awaiter was built as
    pub fn kind(&self) -> AwaiterKind {
        self.kind
    }

    /// Whether this awaiter counts scaled time
    pub fn is_scaled(&self) -> bool {
        matches!(self.kind, AwaiterKind::Seconds { scaled: true, .. })
    }

    /// Frame-advances still required
    pub fn frames_remaining(&self) -> i64 {
        self.frames_remaining
    }

    /// Seconds still required
    pub fn seconds_remaining(&self) -> f32 {
        self.seconds_remaining
    }

    /// Whether the wait is over
    pub fn is_completed(&self) -> bool {
        self.frames_remaining <= 0 && self.seconds_remaining <= 0.0
    }

    /// Consume one frame
    pub fn advance(&mut self, time: &FrameTime) {
        let delta = if self.is_scaled() {
            time.delta()
        } else {
            time.unscaled_delta()
        };
        self.frames_remaining -= 1;
        self.seconds_remaining -= delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(unscaled: f32, scale: f32) -> FrameTime {
        let mut time = FrameTime::new(scale);
        time.advance(unscaled);
        time
    }

    #[test]
    fn test_wait_for_frames_needs_exact_count() {
        let time = frame(0.016, 1.0);
        let mut awaiter = Awaiter::frames(3);
        for _ in 0..2 {
            awaiter.advance(&time);
            assert!(!awaiter.is_completed());
        }
        awaiter.advance(&time);
        assert!(awaiter.is_completed());
    }

    #[test]
    fn test_next_frame_completes_after_one_advance() {
        let mut awaiter = Awaiter::next_frame();
        assert!(!awaiter.is_completed());
        awaiter.advance(&frame(0.0, 1.0));
        assert!(awaiter.is_completed());
    }

    #[test]
    fn test_scaled_seconds_ignore_frame_count() {
        // Time scale 2: each 0.25s frame counts as 0.5s
        let time = frame(0.25, 2.0);
        let mut awaiter = Awaiter::seconds(1.0);
        awaiter.advance(&time);
        assert!(!awaiter.is_completed());
        awaiter.advance(&time);
        assert!(awaiter.is_completed());
    }

    #[test]
    fn test_unscaled_seconds_ignore_time_scale() {
        let paused = frame(0.5, 0.0);
        let mut scaled = Awaiter::seconds(1.0);
        let mut real = Awaiter::seconds_unscaled(1.0);
        for _ in 0..2 {
            scaled.advance(&paused);
            real.advance(&paused);
        }
        assert!(!scaled.is_completed());
        assert!(real.is_completed());
        assert!(!real.is_scaled());
    }

    #[test]
    fn test_zero_waits_are_already_complete() {
        assert!(Awaiter::frames(0).is_completed());
        assert!(Awaiter::seconds(0.0).is_completed());
        assert!(Awaiter::seconds(f32::NAN).is_completed());
    }
}
