#![forbid(unsafe_code)]

//! Step clock: elapsed time of the one step a flap is animating.
//!
//! # Invariants
//!
//! 1. `progress()` is in `[0.0, 1.0]`.
//! 2. `advance()` never loses time: whatever exceeds the step duration is
//!    returned as overflow so the next step can consume it.
//! 3. A zero-duration step is complete immediately.

use web_time::Duration;

/// Elapsed/total time of a single animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepClock {
    elapsed: Duration,
    duration: Duration,
}

impl StepClock {
    /// Start a step of the given length.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Fraction of the step that has run.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Advance by `dt`; returns the time left over past the end of the step.
    pub fn advance(&mut self, dt: Duration) -> Duration {
        let remaining = self.duration.saturating_sub(self.elapsed);
        if dt >= remaining {
            self.elapsed = self.duration;
            dt - remaining
        } else {
            self.elapsed += dt;
            Duration::ZERO
        }
    }

    /// Restart with a new step length.
    pub fn restart(&mut self, duration: Duration) {
        *self = Self::new(duration);
    }
}
