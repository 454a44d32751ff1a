//! Sequential animation queue.
//!
//! The [`AnimationSequencer`] turns independently submitted animations into a
//! single chain: each one starts only after the previous one completed, in
//! submission order, without a gap between them.
//!
//! # State machine
//!
//! ```text
//!            enqueue (posts drain step)
//!   Idle ─────────────────────────────▶ Draining
//!    ▲                                     │ drain step: pop head,
//!    │        queue empty on drain step    │ setup(), animate(mutate)
//!    └─────────────────────────────────────┘ completion ─▶ drain step
//! ```
//!
//! The first drain step is posted to the [`EventLoop`], so nothing ever runs
//! inside the caller's `enqueue`. An animation whose completion never fires
//! stalls the queue for good; this is not detected.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use snake_grid_core::EventLoop;
use snake_grid_core::logging::targets;

use super::animator::{AnimationBlock, Animator, LoopAnimator};
use super::easing::Easing;

const TARGET: &str = targets::SEQUENCER;

/// Identifier of an enqueued animation, unique per sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Whether the sequencer is working through its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerPhase {
    /// Nothing queued and nothing animating.
    #[default]
    Idle,
    /// A drain step is scheduled or an animation is in flight.
    Draining,
}

struct AnimationTask {
    id: AnimationId,
    duration: Duration,
    setup: AnimationBlock,
    mutate: AnimationBlock,
}

#[derive(Default)]
struct SequencerState {
    queue: VecDeque<AnimationTask>,
    phase: SequencerPhase,
    active: Option<AnimationId>,
    next_id: u64,
    enqueued: u64,
    completed: u64,
    drain_cycles: u64,
}

struct SequencerInner {
    event_loop: EventLoop,
    animator: Box<dyn Animator>,
    state: RefCell<SequencerState>,
    /// Set while `Animator::animate` is on the stack.
    animating: Cell<bool>,
}

/// Plays animations one at a time in FIFO order.
///
/// The sequencer is a cheap handle; clones share the same queue. Completion
/// callbacks only hold a weak reference, so dropping every handle drops the
/// queue even with an animation in flight.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use snake_grid::animation::AnimationSequencer;
/// use snake_grid_core::{EventLoop, ManualClock};
///
/// let event_loop = EventLoop::with_clock(ManualClock::new());
/// let sequencer = AnimationSequencer::with_loop_animator(event_loop.clone());
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// for name in ["a", "b"] {
///     let log = log.clone();
///     sequencer.enqueue(Duration::from_millis(500), || {}, move || log.borrow_mut().push(name));
/// }
/// assert!(log.borrow().is_empty());
///
/// event_loop.run_until_idle().unwrap();
/// assert_eq!(*log.borrow(), vec!["a", "b"]);
/// assert_eq!(event_loop.now(), Duration::from_secs(1));
/// ```
#[derive(Clone)]
pub struct AnimationSequencer {
    inner: Rc<SequencerInner>,
}

impl AnimationSequencer {
    /// Create a sequencer that animates through `animator` and schedules its
    /// drain steps on `event_loop`.
    pub fn new(event_loop: EventLoop, animator: impl Animator + 'static) -> Self {
        Self {
            inner: Rc::new(SequencerInner {
                event_loop,
                animator: Box::new(animator),
                state: RefCell::new(SequencerState::default()),
                animating: Cell::new(false),
            }),
        }
    }

    /// Create a sequencer backed by a [`LoopAnimator`] with the default easing.
    pub fn with_loop_animator(event_loop: EventLoop) -> Self {
        Self::with_easing(event_loop, Easing::default())
    }

    /// Create a sequencer backed by a [`LoopAnimator`] with `easing`.
    pub fn with_easing(event_loop: EventLoop, easing: Easing) -> Self {
        let animator = LoopAnimator::with_easing(event_loop.clone(), easing);
        Self::new(event_loop, animator)
    }

    /// Queue an animation.
    ///
    /// `setup` runs right before the animation starts and establishes its
    /// initial state without animating. `mutate` makes the animated changes.
    /// A zero `duration` applies them instantly; the chain still advances.
    pub fn enqueue<S, M>(&self, duration: Duration, setup: S, mutate: M) -> AnimationId
    where
        S: FnOnce() + 'static,
        M: FnOnce() + 'static,
    {
        let (id, start_draining) = {
            let mut state = self.inner.state.borrow_mut();
            state.next_id += 1;
            let id = AnimationId(state.next_id);
            state.queue.push_back(AnimationTask {
                id,
                duration,
                setup: Box::new(setup),
                mutate: Box::new(mutate),
            });
            state.enqueued += 1;

            let start_draining = state.phase == SequencerPhase::Idle;
            if start_draining {
                state.phase = SequencerPhase::Draining;
                state.drain_cycles += 1;
            }
            (id, start_draining)
        };

        tracing::debug!(
            target: TARGET,
            id = id.as_u64(),
            ?duration,
            start_draining,
            "animation enqueued"
        );

        if start_draining {
            self.post_drain_step();
        }
        id
    }

    /// Queue an animation with a duration in seconds.
    ///
    /// Negative and NaN durations are treated as zero.
    pub fn enqueue_secs<S, M>(&self, seconds: f64, setup: S, mutate: M) -> AnimationId
    where
        S: FnOnce() + 'static,
        M: FnOnce() + 'static,
    {
        self.enqueue(clamp_secs(seconds), setup, mutate)
    }

    /// Whether the sequencer is draining its queue.
    pub fn is_running(&self) -> bool {
        self.phase() == SequencerPhase::Draining
    }

    /// Current phase.
    pub fn phase(&self) -> SequencerPhase {
        self.inner.state.borrow().phase
    }

    /// The animation currently in flight.
    pub fn active(&self) -> Option<AnimationId> {
        self.inner.state.borrow().active
    }

    /// Number of animations waiting behind the active one.
    pub fn pending_count(&self) -> usize {
        self.inner.state.borrow().queue.len()
    }

    /// Total number of animations ever enqueued.
    pub fn enqueued_count(&self) -> u64 {
        self.inner.state.borrow().enqueued
    }

    /// Total number of animations that completed.
    pub fn completed_count(&self) -> u64 {
        self.inner.state.borrow().completed
    }

    /// Number of times the sequencer went from idle to draining.
    pub fn drain_cycles(&self) -> u64 {
        self.inner.state.borrow().drain_cycles
    }

    fn post_drain_step(&self) {
        post_drain_step(&self.inner);
    }
}

fn clamp_secs(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

fn post_drain_step(inner: &Rc<SequencerInner>) {
    let weak = Rc::downgrade(inner);
    inner.event_loop.post_task(move || {
        if let Some(inner) = weak.upgrade() {
            drain_step(&inner);
        }
    });
}

fn drain_step(inner: &Rc<SequencerInner>) {
    let next = {
        let mut state = inner.state.borrow_mut();
        let next = state.queue.pop_front();
        match &next {
            Some(task) => state.active = Some(task.id),
            None => {
                state.active = None;
                state.phase = SequencerPhase::Idle;
            }
        }
        next
    };

    let Some(task) = next else {
        tracing::debug!(target: TARGET, "queue drained");
        return;
    };

    tracing::trace!(
        target: TARGET,
        id = task.id.as_u64(),
        duration = ?task.duration,
        "starting animation"
    );

    (task.setup)();

    let completion = completion_for(Rc::downgrade(inner), task.id);
    inner.animating.set(true);
    inner.animator.animate(task.duration, task.mutate, completion);
    inner.animating.set(false);
}

fn completion_for(weak: Weak<SequencerInner>, id: AnimationId) -> Box<dyn FnOnce()> {
    Box::new(move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.state.borrow_mut().completed += 1;
        tracing::trace!(target: TARGET, id = id.as_u64(), "animation completed");

        // An animator that completes synchronously would otherwise recurse
        // once per queued animation.
        if inner.animating.get() {
            post_drain_step(&inner);
        } else {
            drain_step(&inner);
        }
    })
}

impl fmt::Debug for AnimationSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("AnimationSequencer")
            .field("phase", &state.phase)
            .field("active", &state.active)
            .field("pending", &state.queue.len())
            .field("enqueued", &state.enqueued)
            .field("completed", &state.completed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use snake_grid_core::{Clock, ManualClock};

    use super::*;
    use crate::animation::animator::Completion;

    fn setup() -> (EventLoop, ManualClock, AnimationSequencer) {
        let clock = ManualClock::new();
        let event_loop = EventLoop::with_clock(clock.clone());
        let sequencer = AnimationSequencer::with_loop_animator(event_loop.clone());
        (event_loop, clock, sequencer)
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn record(log: &Log, entry: impl Into<String>) -> impl FnOnce() + 'static {
        let log = log.clone();
        let entry = entry.into();
        move || log.borrow_mut().push(entry)
    }

    #[test]
    fn test_enqueue_runs_nothing_synchronously() {
        let (event_loop, _clock, sequencer) = setup();
        let log: Log = Rc::default();

        sequencer.enqueue(Duration::from_millis(500), record(&log, "setup"), record(&log, "mutate"));
        assert!(log.borrow().is_empty());
        assert!(sequencer.is_running());
        assert_eq!(sequencer.pending_count(), 1);
        assert_eq!(event_loop.pending_task_count(), 1);

        event_loop.run_turn();
        assert_eq!(*log.borrow(), vec!["setup", "mutate"]);
    }

    #[test]
    fn test_fifo_without_overlap() {
        let (event_loop, _clock, sequencer) = setup();
        let log: Log = Rc::default();

        for name in ["a", "b", "c"] {
            let start_log = log.clone();
            let handle = event_loop.clone();
            sequencer.enqueue(
                Duration::from_millis(500),
                move || {
                    let at = handle.now().as_millis();
                    start_log.borrow_mut().push(format!("{name}@{at}"));
                },
                || {},
            );
        }

        event_loop.run_until_idle().unwrap();
        assert_eq!(*log.borrow(), vec!["a@0", "b@500", "c@1000"]);
        assert_eq!(sequencer.completed_count(), 3);
        assert_eq!(sequencer.phase(), SequencerPhase::Idle);
    }

    #[test]
    fn test_at_most_one_active() {
        let (event_loop, _clock, sequencer) = setup();
        let first = sequencer.enqueue(Duration::from_millis(500), || {}, || {});
        let second = sequencer.enqueue(Duration::from_millis(500), || {}, || {});

        event_loop.run_until(Duration::from_millis(250)).unwrap();
        assert_eq!(sequencer.active(), Some(first));
        assert_eq!(sequencer.pending_count(), 1);

        event_loop.run_until(Duration::from_millis(750)).unwrap();
        assert_eq!(sequencer.active(), Some(second));
        assert_eq!(sequencer.pending_count(), 0);

        event_loop.run_until_idle().unwrap();
        assert_eq!(sequencer.active(), None);
    }

    #[test]
    fn test_restarts_after_idle() {
        let (event_loop, _clock, sequencer) = setup();
        let log: Log = Rc::default();

        sequencer.enqueue(Duration::from_millis(100), || {}, record(&log, "first"));
        event_loop.run_until_idle().unwrap();
        assert!(!sequencer.is_running());

        sequencer.enqueue(Duration::from_millis(100), || {}, record(&log, "second"));
        assert!(sequencer.is_running());
        event_loop.run_until_idle().unwrap();

        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(sequencer.drain_cycles(), 2);
    }

    #[test]
    fn test_enqueue_while_draining_only_queues() {
        let (event_loop, _clock, sequencer) = setup();
        sequencer.enqueue(Duration::from_millis(500), || {}, || {});
        event_loop.run_turn();

        sequencer.enqueue(Duration::from_millis(500), || {}, || {});
        assert_eq!(event_loop.pending_task_count(), 0);
        assert_eq!(sequencer.drain_cycles(), 1);
    }

    #[test]
    fn test_zero_and_negative_durations_still_chain() {
        let (event_loop, clock, sequencer) = setup();
        let log: Log = Rc::default();

        sequencer.enqueue_secs(0.0, || {}, record(&log, "zero"));
        sequencer.enqueue_secs(-1.0, || {}, record(&log, "negative"));
        sequencer.enqueue_secs(f64::NAN, || {}, record(&log, "nan"));

        event_loop.run_until_idle().unwrap();
        assert_eq!(*log.borrow(), vec!["zero", "negative", "nan"]);
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(sequencer.completed_count(), 3);
    }

    #[test]
    fn test_reentrant_enqueue_from_mutate() {
        let (event_loop, _clock, sequencer) = setup();
        let log: Log = Rc::default();

        let handle = sequencer.clone();
        let inner_log = log.clone();
        sequencer.enqueue(Duration::from_millis(100), || {}, move || {
            inner_log.borrow_mut().push("outer".into());
            handle.enqueue(Duration::from_millis(100), || {}, record(&inner_log, "nested"));
        });
        sequencer.enqueue(Duration::from_millis(100), || {}, record(&log, "queued"));

        event_loop.run_until_idle().unwrap();
        assert_eq!(*log.borrow(), vec!["outer", "queued", "nested"]);
    }

    #[test]
    fn test_clamp_secs() {
        assert_eq!(clamp_secs(0.5), Duration::from_millis(500));
        assert_eq!(clamp_secs(-0.5), Duration::ZERO);
        assert_eq!(clamp_secs(f64::NAN), Duration::ZERO);
        assert_eq!(clamp_secs(f64::INFINITY), Duration::MAX);
    }

    struct ImmediateAnimator;

    impl Animator for ImmediateAnimator {
        fn animate(&self, _duration: Duration, mutate: AnimationBlock, completion: Completion) {
            mutate();
            completion();
        }
    }

    #[test]
    fn test_synchronous_animator_does_not_recurse() {
        let event_loop = EventLoop::with_clock(ManualClock::new());
        let sequencer = AnimationSequencer::new(event_loop.clone(), ImmediateAnimator);
        let count = Rc::new(Cell::new(0));

        for _ in 0..1000 {
            let count = count.clone();
            sequencer.enqueue(Duration::ZERO, || {}, move || count.set(count.get() + 1));
        }

        event_loop.run_until_idle().unwrap();
        assert_eq!(count.get(), 1000);
        assert_eq!(sequencer.completed_count(), 1000);
        assert!(!sequencer.is_running());
    }

    struct NeverCompletes;

    impl Animator for NeverCompletes {
        fn animate(&self, _duration: Duration, mutate: AnimationBlock, _completion: Completion) {
            mutate();
        }
    }

    #[test]
    fn test_missing_completion_stalls_queue() {
        let event_loop = EventLoop::with_clock(ManualClock::new());
        let sequencer = AnimationSequencer::new(event_loop.clone(), NeverCompletes);
        sequencer.enqueue(Duration::ZERO, || {}, || {});
        sequencer.enqueue(Duration::ZERO, || {}, || {});

        event_loop.run_until_idle().unwrap();
        assert!(sequencer.is_running());
        assert_eq!(sequencer.pending_count(), 1);
    }

    #[test]
    fn test_dropping_sequencer_releases_queue() {
        let (event_loop, _clock, sequencer) = setup();
        let log: Log = Rc::default();
        sequencer.enqueue(Duration::from_millis(100), || {}, || {});
        sequencer.enqueue(Duration::from_millis(100), || {}, record(&log, "never"));
        event_loop.run_turn();

        drop(sequencer);
        event_loop.run_until_idle().unwrap();
        assert!(log.borrow().is_empty());
    }
}
