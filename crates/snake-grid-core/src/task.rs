//! Deferred task queue.
//!
//! Tasks posted to the queue run on a later turn of the event loop, in the
//! order they were posted. The queue itself never runs anything: the loop pops
//! one task at a time so that no borrow is held while user code executes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
pub(crate) type BoxedTask = Box<dyn FnOnce() + 'static>;

/// A task waiting in the queue.
pub(crate) struct PendingTask {
    pub id: TaskId,
    pub task: BoxedTask,
}

/// FIFO queue of deferred tasks.
#[derive(Default)]
pub(crate) struct TaskQueue {
    tasks: VecDeque<PendingTask>,
}

impl TaskQueue {
    /// Create a new, empty task queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the back of the queue.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        let id = next_task_id();
        self.tasks.push_back(PendingTask {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Remove the task at the front of the queue.
    pub(crate) fn pop(&mut self) -> Option<PendingTask> {
        self.tasks.pop_front()
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_task_queue_fifo() {
        let mut queue = TaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let log = log.clone();
            queue.post(move || log.borrow_mut().push(n));
        }
        assert_eq!(queue.pending_count(), 3);

        while let Some(pending) = queue.pop() {
            (pending.task)();
        }

        assert_eq!(queue.pending_count(), 0);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_task_cancellation() {
        let mut queue = TaskQueue::new();

        let first = queue.post(|| {});
        let second = queue.post(|| {});
        assert!(queue.cancel(first));
        assert_eq!(queue.pending_count(), 1);

        // Cancelling again should return false.
        assert!(!queue.cancel(first));
        assert_eq!(queue.pop().map(|t| t.id), Some(second));
    }

    #[test]
    fn test_task_ids_are_unique() {
        let mut queue = TaskQueue::new();
        let a = queue.post(|| {});
        let b = queue.post(|| {});
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
