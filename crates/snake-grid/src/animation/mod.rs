//! Animation support.
//!
//! - [`Easing`] curves and [`Transition`]s measured in loop time
//! - [`Animated`] values that transition when written inside a [`Transaction`]
//! - the [`Animator`] capability and its event-loop backed [`LoopAnimator`]
//! - the [`AnimationSequencer`], which plays animations strictly one after
//!   another
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use snake_grid::animation::{Animated, AnimationSequencer};
//! use snake_grid_core::{EventLoop, ManualClock};
//!
//! let event_loop = EventLoop::with_clock(ManualClock::new());
//! let sequencer = AnimationSequencer::with_loop_animator(event_loop.clone());
//! let opacity = Rc::new(RefCell::new(Animated::new(0.0_f32)));
//!
//! let target = opacity.clone();
//! sequencer.enqueue(Duration::from_millis(500), || {}, move || target.borrow_mut().set(1.0));
//!
//! event_loop.run_until(Duration::from_millis(250)).unwrap();
//! assert!(opacity.borrow().is_animating(event_loop.now()));
//! event_loop.run_until_idle().unwrap();
//! assert_eq!(opacity.borrow().presentation(event_loop.now()), 1.0);
//! ```

mod animator;
mod easing;
mod sequencer;
mod transaction;
mod transition;
mod value;

pub use animator::{AnimationBlock, Animator, Completion, LoopAnimator};
pub use easing::{Easing, ease};
pub use sequencer::{AnimationId, AnimationSequencer, SequencerPhase};
pub use transaction::{Transaction, current as current_transaction, with_transaction};
pub use transition::Transition;
pub use value::{Animated, Interpolate};
