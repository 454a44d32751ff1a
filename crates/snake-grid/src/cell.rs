//! Grid cells and their animated appearance.

use std::time::Duration;

use snake_grid_render::{Color, Rect, Transform2D};

use crate::animation::Animated;

/// Inset of the title label from the cell edges.
pub const TITLE_INSET: f32 = 10.0;

/// One card in the grid.
///
/// The frame comes from the layout; transform, opacity and background are
/// animated values driven by the entrance animation.
#[derive(Debug, Clone)]
pub struct GridCell {
    index: usize,
    frame: Rect,
    transform: Animated<Transform2D>,
    opacity: Animated<f32>,
    background: Animated<Color>,
    revealed: bool,
}

impl GridCell {
    /// Create a transparent cell for item `index`.
    pub fn new(index: usize, frame: Rect, background: Color) -> Self {
        Self {
            index,
            frame,
            transform: Animated::new(Transform2D::IDENTITY),
            opacity: Animated::new(0.0),
            background: Animated::new(background),
            revealed: false,
        }
    }

    /// The item index this cell shows.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The item index rendered as text.
    pub fn title(&self) -> String {
        self.index.to_string()
    }

    /// Frame in content coordinates.
    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Move the cell to a new frame.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Frame of the title label inside the cell.
    pub fn title_frame(&self) -> Rect {
        Rect::new(
            TITLE_INSET,
            TITLE_INSET,
            (self.frame.width() - 2.0 * TITLE_INSET).max(0.0),
            (self.frame.height() - 2.0 * TITLE_INSET).max(0.0),
        )
    }

    /// Content transform.
    pub fn transform(&self) -> &Animated<Transform2D> {
        &self.transform
    }

    /// Content transform, for writing.
    pub fn transform_mut(&mut self) -> &mut Animated<Transform2D> {
        &mut self.transform
    }

    /// Opacity.
    pub fn opacity(&self) -> &Animated<f32> {
        &self.opacity
    }

    /// Opacity, for writing.
    pub fn opacity_mut(&mut self) -> &mut Animated<f32> {
        &mut self.opacity
    }

    /// Background color.
    pub fn background(&self) -> &Animated<Color> {
        &self.background
    }

    /// Background color, for writing.
    pub fn background_mut(&mut self) -> &mut Animated<Color> {
        &mut self.background
    }

    /// Whether the cell already reached its revealed state.
    ///
    /// A pending entrance leaves a revealed cell alone.
    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Jump to the revealed state without a transition.
    pub fn reveal(&mut self, background: Color) {
        self.opacity.set_immediate(1.0);
        self.background.set_immediate(background);
        self.transform.set_immediate(Transform2D::IDENTITY);
        self.revealed = true;
    }

    /// Whether any property is transitioning at loop time `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.transform.is_animating(now)
            || self.opacity.is_animating(now)
            || self.background.is_animating(now)
    }

    /// The presented state at loop time `now`.
    pub fn snapshot(&self, now: Duration) -> CellSnapshot {
        let transform = self.transform.presentation(now);
        CellSnapshot {
            index: self.index,
            title: self.title(),
            frame: self.frame,
            presented_frame: transform.transform_rect(&self.frame),
            transform,
            opacity: self.opacity.presentation(now),
            background: self.background.presentation(now),
            animating: self.is_animating(now),
        }
    }
}

/// What a cell looks like at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSnapshot {
    /// Item index.
    pub index: usize,
    /// Title text.
    pub title: String,
    /// Layout frame.
    pub frame: Rect,
    /// Layout frame with the presented transform applied.
    pub presented_frame: Rect,
    /// Presented transform.
    pub transform: Transform2D,
    /// Presented opacity.
    pub opacity: f32,
    /// Presented background color.
    pub background: Color,
    /// Whether a transition was running.
    pub animating: bool,
}
