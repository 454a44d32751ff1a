//! Item placements.

use snake_grid_render::Rect;

/// Where one item sits in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Item index in the data source.
    pub index: usize,
    /// Frame in content coordinates (origin at the top-left of the content).
    pub frame: Rect,
}

impl ItemPlacement {
    /// Create a placement.
    #[inline]
    pub fn new(index: usize, frame: Rect) -> Self {
        Self { index, frame }
    }

    /// The same placement moved to a different x coordinate.
    #[inline]
    pub fn with_x(self, x: f32) -> Self {
        Self {
            index: self.index,
            frame: self.frame.with_x(x),
        }
    }
}
