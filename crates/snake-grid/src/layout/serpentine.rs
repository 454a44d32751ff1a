//! Serpentine (boustrophedon) grid layout.
//!
//! Items are first placed row-major by a [`GridProvider`]; rows are then
//! grouped and every even group is mirrored horizontally, so the reading
//! order snakes back and forth down the grid:
//!
//! ```text
//!  row 0   [2] [1] [0]    mirrored
//!  row 1   [3] [4] [5]
//!  row 2   [8] [7] [6]    mirrored
//! ```

use serde::{Deserialize, Serialize};
use snake_grid_render::Rect;

use super::geometry::GridGeometry;
use super::grid::GridProvider;
use super::placement::ItemPlacement;
use crate::error::LayoutError;

/// How rows are grouped before mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum SerpentineMode {
    /// Every row is its own group: even rows are mirrored.
    #[default]
    PerRow,
    /// Rows are grouped in bands of `rows_per_band`; even bands are mirrored.
    Banded {
        /// Rows per band, treated as 1 when zero.
        rows_per_band: usize,
    },
}

impl SerpentineMode {
    /// The mirroring group of `row`.
    #[inline]
    pub fn row_group(self, row: usize) -> usize {
        match self {
            SerpentineMode::PerRow => row,
            SerpentineMode::Banded { rows_per_band } => row / rows_per_band.max(1),
        }
    }

    /// Whether `row` is mirrored.
    #[inline]
    pub fn is_mirrored(self, row: usize) -> bool {
        self.row_group(row) % 2 == 0
    }
}

/// Turn a default row-major placement into its serpentine placement.
///
/// The row is taken from the item index, so any provider that places items
/// row-major with `geometry.column_count()` columns can be transformed.
pub fn serpentine_placement(
    default: ItemPlacement,
    geometry: &GridGeometry,
    mode: SerpentineMode,
) -> ItemPlacement {
    let row = geometry.row_of(default.index);
    if !mode.is_mirrored(row) {
        return default;
    }
    let frame = default.frame;
    default.with_x(geometry.container_width() - (frame.left() + frame.width()))
}

/// Serpentine layout over a default grid provider.
///
/// ```
/// use snake_grid::layout::{FlowGrid, GridGeometry, SerpentineGridLayout};
/// use snake_grid_render::Size;
///
/// let geometry = GridGeometry::new(3, Size::new(99.0, 99.0), 1.0, 1.0, 300.0).unwrap();
/// let layout = SerpentineGridLayout::new(FlowGrid::new(20));
///
/// assert_eq!(layout.placement(0, &geometry).unwrap().frame.left(), 201.0);
/// assert_eq!(layout.placement(3, &geometry).unwrap().frame.left(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SerpentineGridLayout<P> {
    provider: P,
    mode: SerpentineMode,
}

impl<P: GridProvider> SerpentineGridLayout<P> {
    /// Create a per-row serpentine layout over `provider`.
    pub fn new(provider: P) -> Self {
        Self::with_mode(provider, SerpentineMode::PerRow)
    }

    /// Create a layout with an explicit grouping mode.
    pub fn with_mode(provider: P, mode: SerpentineMode) -> Self {
        Self { provider, mode }
    }

    /// The grouping mode.
    pub fn mode(&self) -> SerpentineMode {
        self.mode
    }

    /// The underlying default provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Number of items laid out.
    pub fn item_count(&self) -> usize {
        self.provider.item_count()
    }

    /// Placement of item `index`.
    pub fn placement(
        &self,
        index: usize,
        geometry: &GridGeometry,
    ) -> Result<ItemPlacement, LayoutError> {
        let default = self.provider.base_placement(index, geometry)?;
        Ok(serpentine_placement(default, geometry, self.mode))
    }

    /// Placements of the items the default provider reports for `rect`.
    ///
    /// Membership and order follow the provider; only frames change. An
    /// index the provider reports but cannot place fails the whole query.
    #[tracing::instrument(skip(self, geometry), target = "snake_grid::layout", level = "trace")]
    pub fn placements(
        &self,
        rect: Rect,
        geometry: &GridGeometry,
    ) -> Result<Vec<ItemPlacement>, LayoutError> {
        self.provider
            .indices_in_rect(&rect, geometry)
            .into_iter()
            .map(|index| self.placement(index, geometry))
            .collect()
    }

    /// Whether a container bounds change requires a new layout. Always true:
    /// mirrored frames depend on the container width.
    pub fn should_invalidate_for_bounds_change(&self, _new_bounds: Rect) -> bool {
        true
    }
}
