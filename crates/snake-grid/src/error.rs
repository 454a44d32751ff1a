//! Error types for snake-grid.

use std::path::PathBuf;

use snake_grid_core::CoreError;

/// Errors from grid layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The item index is past the end of the data source.
    #[error("item index {index} out of range (item count {item_count})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of items laid out.
        item_count: usize,
    },

    /// The geometry violates an invariant.
    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),
}

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration parsed but its values are unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Any error produced by snake-grid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Runtime error from the event loop.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Layout error.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for snake-grid operations.
pub type Result<T> = std::result::Result<T, Error>;
