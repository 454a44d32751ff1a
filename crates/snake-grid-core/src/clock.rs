//! Time sources for the event loop.
//!
//! The loop measures time as a [`Duration`] since its clock's epoch. A
//! [`SystemClock`] follows wall time; a [`ManualClock`] only moves when told
//! to, which makes animation timing fully deterministic in tests and headless
//! runs.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;

    /// Jump forward to `deadline` without waiting.
    ///
    /// Returns `false` for clocks that follow real time; the caller then has
    /// to wait instead.
    fn advance_to(&self, _deadline: Duration) -> bool {
        false
    }
}

/// A clock that follows [`Instant::now`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is the current instant.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A virtual clock advanced explicitly.
///
/// Clones share the same time, so a test can keep one handle while the event
/// loop owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a manual clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get().saturating_add(delta));
    }

    /// Set the clock to `time`. Moving backwards is ignored.
    pub fn set(&self, time: Duration) {
        if time > self.now.get() {
            self.now.set(time);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn advance_to(&self, deadline: Duration) -> bool {
        self.set(deadline);
        true
    }
}
