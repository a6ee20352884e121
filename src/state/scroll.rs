/// Smooth scroll animation for the page viewport
use std::time::{Duration, Instant};

/// Length of a smooth anchor scroll
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: f32, to: f32, started: Instant) -> Self {
        Self {
            from,
            to,
            started,
            duration: SMOOTH_SCROLL_DURATION,
        }
    }

    /// Position at `now` and whether the animation has finished
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration || self.duration.is_zero() {
            return (self.to, true);
        }

        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        // ease-out cubic
        let eased = 1.0 - (1.0 - t).powi(3);
        (self.from + (self.to - self.from) * eased, false)
    }
}
