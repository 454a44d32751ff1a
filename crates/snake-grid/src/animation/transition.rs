//! A single timed change of an animated value.
//!
//! Transitions are measured against event-loop time (a [`Duration`] since the
//! loop clock's epoch), never against wall time directly, so a virtual clock
//! drives them deterministically.

use std::time::Duration;

use super::easing::{Easing, ease};
use super::value::Interpolate;

/// A transition from one value to another over a fixed window of loop time.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Interpolate> Transition<T> {
    /// Create a transition starting at loop time `start`.
    pub fn new(from: T, to: T, start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// The value the transition starts from.
    #[inline]
    pub fn from(&self) -> &T {
        &self.from
    }

    /// The value the transition ends at.
    #[inline]
    pub fn to(&self) -> &T {
        &self.to
    }

    /// Loop time the transition started at.
    #[inline]
    pub fn start(&self) -> Duration {
        self.start
    }

    /// Length of the transition.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Loop time the transition ends at.
    #[inline]
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// The easing curve.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress in `[0, 1]` at loop time `now`.
    ///
    /// Zero-length transitions are complete immediately.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// The interpolated value at loop time `now`.
    pub fn value_at(&self, now: Duration) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, ease(self.easing, t))
    }

    /// Whether the transition has reached its end value at `now`.
    #[inline]
    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}
