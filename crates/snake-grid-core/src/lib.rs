//! Core runtime for snake-grid.
//!
//! This crate provides the single-threaded cooperative runtime that the
//! presentation surface and its animation sequencer run on:
//!
//! - **Event Loop**: per-surface loop processing work in turns
//! - **Task Queue**: deferred tasks that run on a later turn, in FIFO order
//! - **Timers**: one-shot timers ordered by deadline
//! - **Clocks**: wall-clock or virtual time
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use snake_grid_core::{EventLoop, ManualClock};
//!
//! let event_loop = EventLoop::with_clock(ManualClock::new());
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let timer_log = log.clone();
//! event_loop.start_timer(Duration::from_millis(100), move || timer_log.borrow_mut().push("timer"));
//! let task_log = log.clone();
//! event_loop.post_task(move || task_log.borrow_mut().push("task"));
//!
//! event_loop.run_until_idle().unwrap();
//! assert_eq!(*log.borrow(), vec!["task", "timer"]);
//! ```

mod clock;
mod error;
mod event_loop;
pub mod logging;
mod task;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, TimerError};
pub use event_loop::{EventLoop, LoopConfig, TurnStats};
pub use logging::PerfSpan;
pub use task::TaskId;
pub use timer::TimerId;
