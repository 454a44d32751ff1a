//! Grid layout.
//!
//! A [`GridGeometry`] holds the measurements, a [`GridProvider`] such as
//! [`FlowGrid`] produces default row-major placements, and
//! [`SerpentineGridLayout`] mirrors alternate rows of those placements with
//! the pure [`serpentine_placement`] transform.

mod geometry;
mod grid;
mod placement;
mod serpentine;

pub use geometry::{GridGeometry, fit_columns};
pub use grid::{FlowGrid, GridProvider};
pub use placement::ItemPlacement;
pub use serpentine::{SerpentineGridLayout, SerpentineMode, serpentine_placement};
