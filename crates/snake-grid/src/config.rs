//! Surface configuration.
//!
//! Every field has a default matching the demo grid: 20 items in 3 columns,
//! 99 point tall cards with 1 point gaps, a 50 point bottom inset, and a half
//! second ease-in-out entrance from white to red.
//!
//! ```
//! use snake_grid::config::SurfaceConfig;
//!
//! let config = SurfaceConfig::from_toml_str(r#"
//! item_count = 40
//!
//! [grid]
//! column_count = 4
//!
//! [grid.serpentine]
//! mode = "banded"
//! rows_per_band = 2
//!
//! [entrance]
//! duration_secs = 0.25
//! easing = "ease-out"
//! "#).unwrap();
//!
//! assert_eq!(config.item_count, 40);
//! assert_eq!(config.grid.column_count, Some(4));
//! assert_eq!(config.grid.item_height, 99.0);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use snake_grid_core::logging::targets;
use snake_grid_render::Color;

use crate::animation::Easing;
use crate::error::ConfigError;
use crate::layout::SerpentineMode;

/// Configuration of a [`SnakeGridView`](crate::SnakeGridView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Number of items in the grid.
    pub item_count: usize,
    /// Grid measurements.
    pub grid: GridConfig,
    /// Entrance animation.
    pub entrance: EntranceConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            item_count: 20,
            grid: GridConfig::default(),
            entrance: EntranceConfig::default(),
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::SURFACE, path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values that parse but cannot be laid out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()
    }
}

/// Grid measurements.
///
/// Give either a `column_count` (item width then follows from the container
/// width) or an `item_width` (the column count then follows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed number of columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<usize>,
    /// Fixed item width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_width: Option<f32>,
    /// Item height.
    pub item_height: f32,
    /// Gap between rows.
    pub row_spacing: f32,
    /// Gap between columns.
    pub column_spacing: f32,
    /// Extra scrollable space below the last row.
    pub content_inset_bottom: f32,
    /// Row grouping for mirroring.
    pub serpentine: SerpentineMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_count: Some(3),
            item_width: None,
            item_height: 99.0,
            row_spacing: 1.0,
            column_spacing: 1.0,
            content_inset_bottom: 50.0,
            serpentine: SerpentineMode::PerRow,
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.column_count, self.item_width) {
            (Some(0), _) => return Err(invalid("grid.column_count must be at least 1")),
            (None, None) => {
                return Err(invalid(
                    "grid needs either column_count or item_width",
                ));
            }
            _ => {}
        }
        if let Some(width) = self.item_width
            && !(width > 0.0 && width.is_finite())
        {
            return Err(invalid(format!("grid.item_width must be positive, got {width}")));
        }
        if !(self.item_height > 0.0 && self.item_height.is_finite()) {
            return Err(invalid(format!(
                "grid.item_height must be positive, got {}",
                self.item_height
            )));
        }
        for (name, value) in [
            ("grid.row_spacing", self.row_spacing),
            ("grid.column_spacing", self.column_spacing),
            ("grid.content_inset_bottom", self.content_inset_bottom),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }
}

/// Entrance animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Length of one card's entrance. Negative values mean no animation.
    pub duration_secs: f64,
    /// Easing curve.
    pub easing: Easing,
    /// Background of a card before it is revealed.
    pub resting_color: Color,
    /// Background of a revealed card.
    pub revealed_color: Color,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            easing: Easing::EaseInOut,
            resting_color: Color::WHITE,
            revealed_color: Color::RED,
        }
    }
}

impl EntranceConfig {
    /// The entrance duration, with negative and NaN values treated as zero.
    pub fn duration(&self) -> Duration {
        if self.duration_secs.is_nan() || self.duration_secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or(Duration::MAX)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SurfaceConfig::default();
        assert_eq!(config.item_count, 20);
        assert_eq!(config.grid.column_count, Some(3));
        assert_eq!(config.grid.item_height, 99.0);
        assert_eq!(config.grid.row_spacing, 1.0);
        assert_eq!(config.grid.column_spacing, 1.0);
        assert_eq!(config.grid.content_inset_bottom, 50.0);
        assert_eq!(config.entrance.duration(), Duration::from_millis(500));
        assert_eq!(config.entrance.easing, Easing::EaseInOut);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(SurfaceConfig::from_toml_str("").unwrap(), SurfaceConfig::default());
    }

    #[test]
    fn test_parse_partial_document() {
        let config = SurfaceConfig::from_toml_str(
            r#"
            [grid]
            item_width = 120.0
            row_spacing = 4.0

            [entrance]
            revealed_color = { r = 0.0, g = 0.5, b = 1.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.item_width, Some(120.0));
        assert_eq!(config.grid.column_count, Some(3));
        assert_eq!(config.grid.row_spacing, 4.0);
        assert_eq!(config.entrance.revealed_color, Color::new(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = SurfaceConfig::default();
        config.grid.serpentine = SerpentineMode::Banded { rows_per_band: 3 };
        config.entrance.easing = Easing::EaseOutCubic;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("ease-out-cubic"));
        assert_eq!(SurfaceConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_parse_error() {
        let err = SurfaceConfig::from_toml_str("item_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let zero_columns = "[grid]\ncolumn_count = 0";
        assert!(matches!(
            SurfaceConfig::from_toml_str(zero_columns),
            Err(ConfigError::Invalid(_))
        ));

        let mut config = SurfaceConfig::default();
        config.grid.item_height = 0.0;
        assert!(config.validate().is_err());

        let mut config = SurfaceConfig::default();
        config.grid.column_count = None;
        assert!(config.validate().is_err());

        let mut config = SurfaceConfig::default();
        config.grid.row_spacing = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let config = EntranceConfig {
            duration_secs: -2.0,
            ..EntranceConfig::default()
        };
        assert_eq!(config.duration(), Duration::ZERO);
    }

    #[test]
    fn test_missing_file() {
        let err = SurfaceConfig::from_path("/nonexistent/snake-grid.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
