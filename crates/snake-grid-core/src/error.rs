//! Error types for the snake-grid runtime.

use thiserror::Error;

/// The main error type for event loop operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Timer-related error.
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),

    /// A bounded run did not reach idle within the configured number of turns.
    ///
    /// This usually means some callback keeps re-posting work to the loop.
    #[error("event loop did not become idle after {turns} turns")]
    TurnLimitExceeded {
        /// Number of turns that were executed before giving up.
        turns: u64,
    },
}

/// Timer-specific errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid, already fired, or has already been stopped.
    #[error("invalid or expired timer ID")]
    InvalidTimerId,
}

/// A specialized Result type for runtime operations.
pub type Result<T> = std::result::Result<T, CoreError>;
