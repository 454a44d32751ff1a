//! Grid geometry.

use snake_grid_render::{Rect, Size};

use crate::config::GridConfig;
use crate::error::LayoutError;

/// The measurements every placement is derived from.
///
/// Invariants, checked by [`GridGeometry::new`]: at least one column, a
/// positive item size, non-negative spacings and a positive container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    column_count: usize,
    item_size: Size,
    row_spacing: f32,
    column_spacing: f32,
    container_width: f32,
}

impl GridGeometry {
    /// Create a validated geometry.
    pub fn new(
        column_count: usize,
        item_size: Size,
        row_spacing: f32,
        column_spacing: f32,
        container_width: f32,
    ) -> Result<Self, LayoutError> {
        if column_count == 0 {
            return Err(LayoutError::InvalidGeometry(
                "column count must be at least 1".into(),
            ));
        }
        if !(item_size.width > 0.0 && item_size.height > 0.0)
            || !item_size.width.is_finite()
            || !item_size.height.is_finite()
        {
            return Err(LayoutError::InvalidGeometry(format!(
                "item size must be positive, got {}x{}",
                item_size.width, item_size.height
            )));
        }
        if !(row_spacing >= 0.0 && column_spacing >= 0.0) {
            return Err(LayoutError::InvalidGeometry(format!(
                "spacing must be non-negative, got row {row_spacing} column {column_spacing}"
            )));
        }
        if !(container_width > 0.0) || !container_width.is_finite() {
            return Err(LayoutError::InvalidGeometry(format!(
                "container width must be positive, got {container_width}"
            )));
        }

        Ok(Self {
            column_count,
            item_size,
            row_spacing,
            column_spacing,
            container_width,
        })
    }

    /// Derive the geometry for a container width from configuration.
    ///
    /// With a column count, items share the width evenly:
    /// `item_width = container_width / columns - column_spacing`. With only
    /// an item width, the column count is however many items fit.
    pub fn from_config(config: &GridConfig, container_width: f32) -> Result<Self, LayoutError> {
        let (column_count, item_width) = match (config.column_count, config.item_width) {
            (Some(columns), item_width) => {
                let shared = container_width / columns.max(1) as f32 - config.column_spacing;
                (columns, item_width.unwrap_or(shared))
            }
            (None, Some(item_width)) => (
                fit_columns(container_width, item_width, config.column_spacing),
                item_width,
            ),
            (None, None) => {
                return Err(LayoutError::InvalidGeometry(
                    "either a column count or an item width is required".into(),
                ));
            }
        };

        Self::new(
            column_count,
            Size::new(item_width, config.item_height),
            config.row_spacing,
            config.column_spacing,
            container_width,
        )
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Size of every item.
    #[inline]
    pub fn item_size(&self) -> Size {
        self.item_size
    }

    /// Vertical gap between rows.
    #[inline]
    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    /// Horizontal gap between columns.
    #[inline]
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Width of the container the grid is laid out in.
    #[inline]
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Horizontal distance between the origins of adjacent columns.
    #[inline]
    pub fn pitch_x(&self) -> f32 {
        self.item_size.width + self.column_spacing
    }

    /// Vertical distance between the origins of adjacent rows.
    #[inline]
    pub fn pitch_y(&self) -> f32 {
        self.item_size.height + self.row_spacing
    }

    /// Row of item `index` in row-major order.
    #[inline]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.column_count
    }

    /// Column of item `index` in row-major order.
    #[inline]
    pub fn column_of(&self, index: usize) -> usize {
        index % self.column_count
    }

    /// Number of rows needed for `item_count` items.
    #[inline]
    pub fn row_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.column_count)
    }

    /// Height of the laid out items, without any content inset.
    pub fn content_height(&self, item_count: usize) -> f32 {
        let rows = self.row_count(item_count);
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.pitch_y() - self.row_spacing
    }

    /// Row-major frame of item `index`, before any mirroring.
    pub fn base_frame(&self, index: usize) -> Rect {
        let column = self.column_of(index);
        let row = self.row_of(index);
        Rect::new(
            column as f32 * self.pitch_x(),
            row as f32 * self.pitch_y(),
            self.item_size.width,
            self.item_size.height,
        )
    }
}

/// Number of `item_width` wide columns that fit in `container_width`,
/// at least one.
pub fn fit_columns(container_width: f32, item_width: f32, column_spacing: f32) -> usize {
    let pitch = item_width + column_spacing;
    if !(pitch > 0.0) || !(container_width > 0.0) {
        return 1;
    }
    ((container_width + column_spacing) / pitch).floor().max(1.0) as usize
}
