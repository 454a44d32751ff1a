//! One-shot timers for the event loop.
//!
//! Deadlines are expressed as offsets from the loop's clock epoch, so the same
//! manager works with the system clock and with a virtual test clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// A boxed timer callback.
pub(crate) type TimerCallback = Box<dyn FnOnce() + 'static>;

/// Internal timer data.
struct TimerData {
    /// When this timer fires.
    deadline: Duration,
    /// The callback, taken when the timer fires.
    callback: TimerCallback,
}

/// An entry in the timer queue (min-heap by deadline, then arming order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Duration,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages all pending one-shot timers of an event loop.
#[derive(Default)]
pub(crate) struct TimerManager {
    /// All armed timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending fires. May contain stale entries for stopped timers.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Arming counter, breaks ties between equal deadlines.
    sequence: u64,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer that fires once at `now + delay`.
    pub fn start_one_shot<F>(&mut self, now: Duration, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let deadline = now.saturating_add(delay);
        let id = self.timers.insert(TimerData {
            deadline,
            callback: Box::new(callback),
        });
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            deadline,
            sequence: self.sequence,
        });
        id
    }

    /// Stop and remove a timer before it fires.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is still armed.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the earliest pending deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        // Clean up any stopped timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
        self.queue.peek().map(|entry| entry.deadline)
    }

    /// Check if at least one timer is due at `now`.
    pub fn has_expired(&mut self, now: Duration) -> bool {
        self.next_deadline().is_some_and(|deadline| deadline <= now)
    }

    /// Remove every timer due at `now` and hand back their callbacks.
    ///
    /// Callbacks are returned in deadline order; timers with equal deadlines
    /// keep the order in which they were armed.
    pub(crate) fn take_expired(&mut self, now: Duration) -> Vec<(TimerId, TimerCallback)> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.deadline > now {
                break;
            }
            let id = entry.id;
            self.queue.pop();

            let Some(timer) = self.timers.remove(id) else {
                continue;
            };
            tracing::trace!(target: targets::TIMER, ?id, deadline = ?timer.deadline, "timer fired");
            fired.push((id, timer.callback));
        }

        fired
    }

    /// Get the number of armed timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl std::fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerManager")
            .field("active", &self.timers.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}
