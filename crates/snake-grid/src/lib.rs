//! Serpentine grid layout with a sequential entrance-animation queue.
//!
//! Cards flow row-major through a fixed number of columns, and alternate rows
//! are mirrored so the reading order snakes back and forth down the grid.
//! Each card plays a short entrance the first time it scrolls into view; the
//! entrances are queued so that only one ever runs at a time.
//!
//! The crate is headless and single-threaded. Everything time-based runs on a
//! [`snake_grid_core::EventLoop`], which can be driven by a virtual clock.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use snake_grid::prelude::*;
//!
//! let clock = ManualClock::new();
//! let event_loop = EventLoop::with_clock(clock.clone());
//! let mut view = SnakeGridView::new(SurfaceConfig::default(), event_loop.clone())?;
//! view.set_container_size(Size::new(300.0, 500.0))?;
//! view.layout_pass()?;
//!
//! // Halfway through the first entrance, the second card is still waiting.
//! event_loop.run_until(Duration::from_millis(250))?;
//! assert!(view.cell(0).unwrap().animating);
//! assert_eq!(view.cell(1).unwrap().opacity, 0.0);
//! # Ok::<(), snake_grid::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`layout`]: geometry, the default row-major grid and the serpentine transform
//! - [`animation`]: easing, animated values, the animator and the sequencer
//! - [`config`]: TOML-backed surface configuration

pub mod animation;
pub mod cell;
pub mod config;
mod error;
pub mod layout;
pub mod prelude;
pub mod surface;
pub mod visited;

pub use cell::{CellSnapshot, GridCell};
pub use config::{EntranceConfig, GridConfig, SurfaceConfig};
pub use error::{ConfigError, Error, LayoutError, Result};
pub use surface::{LayoutPass, SnakeGridView};
pub use visited::VisitedSet;
