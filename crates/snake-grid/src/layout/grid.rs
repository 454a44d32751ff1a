//! The default row-major grid.
//!
//! [`FlowGrid`] lays items out left to right, top to bottom, one row per
//! `column_count` items. It is the placement source the serpentine layout
//! mirrors.

use snake_grid_render::Rect;

use super::geometry::GridGeometry;
use super::placement::ItemPlacement;
use crate::error::LayoutError;

/// A source of default (unmirrored) placements.
pub trait GridProvider {
    /// Number of items laid out.
    fn item_count(&self) -> usize;

    /// The default placement of item `index`.
    fn base_placement(
        &self,
        index: usize,
        geometry: &GridGeometry,
    ) -> Result<ItemPlacement, LayoutError>;

    /// Indices whose default frame intersects `rect`, in ascending order.
    fn indices_in_rect(&self, rect: &Rect, geometry: &GridGeometry) -> Vec<usize>;
}

/// Row-major flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowGrid {
    item_count: usize,
}

impl FlowGrid {
    /// Create a grid of `item_count` items.
    pub fn new(item_count: usize) -> Self {
        Self { item_count }
    }

    fn check_index(&self, index: usize) -> Result<(), LayoutError> {
        if index >= self.item_count {
            return Err(LayoutError::IndexOutOfRange {
                index,
                item_count: self.item_count,
            });
        }
        Ok(())
    }
}

impl GridProvider for FlowGrid {
    fn item_count(&self) -> usize {
        self.item_count
    }

    fn base_placement(
        &self,
        index: usize,
        geometry: &GridGeometry,
    ) -> Result<ItemPlacement, LayoutError> {
        self.check_index(index)?;
        Ok(ItemPlacement::new(index, geometry.base_frame(index)))
    }

    fn indices_in_rect(&self, rect: &Rect, geometry: &GridGeometry) -> Vec<usize> {
        if self.item_count == 0 || rect.is_empty() || rect.bottom() <= 0.0 {
            return Vec::new();
        }

        let pitch_y = geometry.pitch_y();
        let row_count = geometry.row_count(self.item_count);
        let first_row = (rect.top().max(0.0) / pitch_y).floor() as usize;
        let last_row = ((rect.bottom() / pitch_y).ceil() as usize).min(row_count);
        if first_row >= last_row {
            return Vec::new();
        }

        let columns = geometry.column_count();
        let start = first_row * columns;
        let end = (last_row * columns).min(self.item_count);

        // Row bounds are a coarse filter; the frame test settles spacing gaps.
        (start..end)
            .filter(|&index| geometry.base_frame(index).intersects(rect))
            .collect()
    }
}
