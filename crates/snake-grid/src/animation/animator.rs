//! The animation capability consumed by the sequencer.

use std::time::Duration;

use snake_grid_core::EventLoop;

use super::easing::Easing;
use super::transaction::{self, Transaction};

/// A block of value changes to animate.
pub type AnimationBlock = Box<dyn FnOnce() + 'static>;

/// Invoked exactly once when an animation has finished.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// Runs animation blocks and reports their completion.
///
/// Implementations must eventually call `completion` exactly once. An
/// animator that never completes stalls every queue built on top of it.
pub trait Animator {
    /// Animate the changes made by `mutate` over `duration`, then call
    /// `completion`.
    fn animate(&self, duration: Duration, mutate: AnimationBlock, completion: Completion);
}

/// Animator backed by an [`EventLoop`].
///
/// `mutate` runs synchronously inside a [`Transaction`] starting at the
/// loop's current time, so every [`Animated`](super::Animated) value it writes
/// begins a transition. A one-shot timer of `duration` then fires the
/// completion. With a zero duration the changes apply instantly and the
/// completion still fires on a later turn.
#[derive(Debug, Clone)]
pub struct LoopAnimator {
    event_loop: EventLoop,
    easing: Easing,
}

impl LoopAnimator {
    /// Create an animator using the default easing curve.
    pub fn new(event_loop: EventLoop) -> Self {
        Self::with_easing(event_loop, Easing::default())
    }

    /// Create an animator with a specific easing curve.
    pub fn with_easing(event_loop: EventLoop, easing: Easing) -> Self {
        Self { event_loop, easing }
    }

    /// The easing curve applied to every transition.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// The loop this animator schedules completions on.
    pub fn event_loop(&self) -> &EventLoop {
        &self.event_loop
    }
}

impl Animator for LoopAnimator {
    fn animate(&self, duration: Duration, mutate: AnimationBlock, completion: Completion) {
        let tx = Transaction::new(self.event_loop.now(), duration, self.easing);
        transaction::with_transaction(tx, mutate);
        self.event_loop.start_timer(duration, completion);
    }
}
