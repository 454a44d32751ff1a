//! Commonly used types.
//!
//! ```
//! use snake_grid::prelude::*;
//! ```

pub use crate::animation::{
    Animated, AnimationId, AnimationSequencer, Animator, Easing, LoopAnimator, SequencerPhase,
};
pub use crate::cell::{CellSnapshot, GridCell};
pub use crate::config::{EntranceConfig, GridConfig, SurfaceConfig};
pub use crate::error::{ConfigError, Error, LayoutError, Result};
pub use crate::layout::{
    FlowGrid, GridGeometry, GridProvider, ItemPlacement, SerpentineGridLayout, SerpentineMode,
};
pub use crate::surface::{LayoutPass, SnakeGridView};
pub use crate::visited::VisitedSet;

pub use snake_grid_core::{Clock, EventLoop, LoopConfig, ManualClock, SystemClock};
pub use snake_grid_render::{Color, Point, Rect, Size, Transform2D};
