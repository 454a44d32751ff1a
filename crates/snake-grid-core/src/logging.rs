//! Logging facilities for snake-grid.
//!
//! snake-grid uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("snake_grid=debug,snake_grid_core=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "snake_grid_core";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "snake_grid_core::event_loop";
    /// Timer system target.
    pub const TIMER: &str = "snake_grid_core::timer";
    /// Deferred task queue target.
    pub const TASK: &str = "snake_grid_core::task";
    /// Animation sequencer target.
    pub const SEQUENCER: &str = "snake_grid::sequencer";
    /// Grid layout target.
    pub const LAYOUT: &str = "snake_grid::layout";
    /// Presentation surface target.
    pub const SURFACE: &str = "snake_grid::surface";
    /// Timing spans opened by [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "snake_grid::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long a layout pass or drain step takes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
