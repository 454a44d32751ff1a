//! The single-threaded cooperative event loop.
//!
//! An [`EventLoop`] is owned by one presentation surface and lives as long as
//! that surface does. It is a cheap, clonable handle (`Rc`-based, not `Send`):
//! every clone drives the same queue of deferred tasks and one-shot timers.
//!
//! Work is processed in *turns*. A turn first fires every expired timer, then
//! runs the tasks that were already pending when the turn began. Tasks posted
//! while a turn is running are picked up by the next turn, so
//! [`post_task`](EventLoop::post_task) never runs anything inside the caller's
//! own turn.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use snake_grid_core::{Clock, EventLoop, ManualClock};
//!
//! let clock = ManualClock::new();
//! let event_loop = EventLoop::with_clock(clock.clone());
//!
//! event_loop.start_timer(Duration::from_millis(500), || println!("timer fired"));
//! event_loop.post_task(|| println!("deferred task"));
//!
//! // Runs the task, then jumps the virtual clock to the timer deadline.
//! event_loop.run_until_idle().unwrap();
//! assert_eq!(clock.now(), Duration::from_millis(500));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::logging::targets;
use crate::task::{TaskId, TaskQueue};
use crate::timer::{TimerId, TimerManager};

/// Tuning knobs for an [`EventLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Upper bound on turns for a single `run_until_idle` / `run_until` call.
    pub max_turns: u64,
    /// Maximum number of tasks run per turn. `None` runs every task that was
    /// pending when the turn began.
    pub task_batch_size: Option<usize>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_turns: 100_000,
            task_batch_size: None,
        }
    }
}

/// What a single turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnStats {
    /// Number of timers whose callbacks ran.
    pub timers_fired: usize,
    /// Number of deferred tasks that ran.
    pub tasks_run: usize,
}

impl TurnStats {
    /// Whether the turn did any work at all.
    pub fn is_empty(&self) -> bool {
        self.timers_fired == 0 && self.tasks_run == 0
    }
}

struct LoopInner {
    clock: Box<dyn Clock>,
    tasks: RefCell<TaskQueue>,
    timers: RefCell<TimerManager>,
    config: LoopConfig,
    turns: Cell<u64>,
}

/// Handle to a cooperative event loop.
#[derive(Clone)]
pub struct EventLoop {
    inner: Rc<LoopInner>,
}

impl EventLoop {
    /// Create an event loop driven by the system clock.
    pub fn new() -> Self {
        Self::with_config(SystemClock::new(), LoopConfig::default())
    }

    /// Create an event loop driven by the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::with_config(clock, LoopConfig::default())
    }

    /// Create an event loop with a clock and explicit configuration.
    pub fn with_config(clock: impl Clock + 'static, config: LoopConfig) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                clock: Box::new(clock),
                tasks: RefCell::new(TaskQueue::new()),
                timers: RefCell::new(TimerManager::new()),
                config,
                turns: Cell::new(0),
            }),
        }
    }

    /// The loop configuration.
    pub fn config(&self) -> LoopConfig {
        self.inner.config
    }

    /// Current loop time (elapsed since the clock's epoch).
    pub fn now(&self) -> Duration {
        self.inner.clock.now()
    }

    /// Total number of turns executed so far.
    pub fn turn_count(&self) -> u64 {
        self.inner.turns.get()
    }

    // -------------------------------------------------------------------------
    // Task Queue API
    // -------------------------------------------------------------------------

    /// Post a task to run on a later turn.
    ///
    /// Returns a `TaskId` that can be used to cancel the task.
    pub fn post_task<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        let id = self.inner.tasks.borrow_mut().post(task);
        tracing::trace!(target: targets::TASK, id = id.as_u64(), "task posted");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel_task(&self, id: TaskId) -> bool {
        self.inner.tasks.borrow_mut().cancel(id)
    }

    /// Number of tasks waiting to run.
    pub fn pending_task_count(&self) -> usize {
        self.inner.tasks.borrow().pending_count()
    }

    // -------------------------------------------------------------------------
    // Timer API
    // -------------------------------------------------------------------------

    /// Arm a one-shot timer that runs `callback` once `delay` has elapsed.
    ///
    /// A zero delay fires on the next turn.
    pub fn start_timer<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let now = self.now();
        let id = self
            .inner
            .timers
            .borrow_mut()
            .start_one_shot(now, delay, callback);
        tracing::trace!(target: targets::TIMER, ?id, ?delay, "timer started");
        id
    }

    /// Stop a timer before it fires.
    pub fn stop_timer(&self, id: TimerId) -> Result<()> {
        self.inner.timers.borrow_mut().stop(id)
    }

    /// Check if a timer is still armed.
    pub fn is_timer_active(&self, id: TimerId) -> bool {
        self.inner.timers.borrow().is_active(id)
    }

    /// Number of armed timers.
    pub fn active_timer_count(&self) -> usize {
        self.inner.timers.borrow().active_count()
    }

    /// Time until the next timer is due, `Duration::ZERO` if one is overdue.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        let now = self.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Whether the loop has neither pending tasks nor armed timers.
    pub fn is_idle(&self) -> bool {
        self.pending_task_count() == 0 && self.active_timer_count() == 0
    }

    // -------------------------------------------------------------------------
    // Driving the loop
    // -------------------------------------------------------------------------

    /// Run a single turn: expired timers first, then the tasks that were
    /// pending when the turn began.
    #[tracing::instrument(skip(self), target = "snake_grid_core::event_loop", level = "trace")]
    pub fn run_turn(&self) -> TurnStats {
        let pending = self.pending_task_count();
        let budget = match self.inner.config.task_batch_size {
            Some(batch) => pending.min(batch),
            None => pending,
        };

        let now = self.now();
        let expired = self.inner.timers.borrow_mut().take_expired(now);
        let timers_fired = expired.len();
        for (_, callback) in expired {
            callback();
        }

        let mut tasks_run = 0;
        while tasks_run < budget {
            // The borrow must end before the task runs: tasks may post more tasks.
            let next = self.inner.tasks.borrow_mut().pop();
            let Some(pending) = next else {
                break;
            };
            tracing::trace!(target: targets::TASK, id = pending.id.as_u64(), "running task");
            (pending.task)();
            tasks_run += 1;
        }

        self.inner.turns.set(self.inner.turns.get() + 1);
        TurnStats {
            timers_fired,
            tasks_run,
        }
    }

    /// Run turns until no tasks or timers remain.
    ///
    /// When only future timers are left, a virtual clock jumps straight to the
    /// next deadline; a real clock is waited on. Returns the number of turns
    /// executed.
    pub fn run_until_idle(&self) -> Result<u64> {
        self.drive(None)
    }

    /// Run turns until the clock reaches `deadline` (or the loop goes idle
    /// first, in which case the clock is still moved to `deadline`).
    pub fn run_until(&self, deadline: Duration) -> Result<u64> {
        self.drive(Some(deadline))
    }

    /// Run turns for `duration` of loop time starting now.
    pub fn run_for(&self, duration: Duration) -> Result<u64> {
        self.run_until(self.now().saturating_add(duration))
    }

    fn drive(&self, stop_at: Option<Duration>) -> Result<u64> {
        let max_turns = self.inner.config.max_turns;
        let mut turns = 0u64;

        loop {
            let now = self.now();
            let has_due_timer = self.inner.timers.borrow_mut().has_expired(now);
            if self.pending_task_count() > 0 || has_due_timer {
                if turns >= max_turns {
                    tracing::warn!(target: targets::EVENT_LOOP, turns, "turn limit exceeded");
                    return Err(CoreError::TurnLimitExceeded { turns });
                }
                self.run_turn();
                turns += 1;
                continue;
            }

            let next = match (self.next_deadline(), stop_at) {
                (Some(deadline), Some(stop)) if deadline > stop => Some(stop),
                (Some(deadline), _) => Some(deadline),
                (None, Some(stop)) => Some(stop),
                (None, None) => None,
            };
            let Some(target) = next else {
                tracing::trace!(target: targets::EVENT_LOOP, turns, "loop idle");
                return Ok(turns);
            };

            if stop_at.is_some_and(|stop| now >= stop) {
                return Ok(turns);
            }
            self.wait_until(target);
        }
    }

    fn wait_until(&self, target: Duration) {
        if !self.inner.clock.advance_to(target) {
            let wait = target.saturating_sub(self.now());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.inner.timers.borrow_mut().next_deadline()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("now", &self.now())
            .field("turns", &self.turn_count())
            .field("tasks", &*self.inner.tasks.borrow())
            .field("timers", &*self.inner.timers.borrow())
            .finish()
    }
}
