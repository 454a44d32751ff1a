//! The presentation surface.
//!
//! [`SnakeGridView`] is the headless equivalent of a scrolling collection
//! view: it tracks the container size and scroll offset, lays out the visible
//! items with a [`SerpentineGridLayout`], and plays each card's entrance
//! animation exactly once, one card at a time, through its own
//! [`AnimationSequencer`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use snake_grid::{SnakeGridView, SurfaceConfig};
//! use snake_grid_core::{EventLoop, ManualClock};
//! use snake_grid_render::Size;
//!
//! let event_loop = EventLoop::with_clock(ManualClock::new());
//! let mut view = SnakeGridView::new(SurfaceConfig::default(), event_loop.clone()).unwrap();
//! view.set_container_size(Size::new(300.0, 500.0)).unwrap();
//!
//! let pass = view.layout_pass().unwrap();
//! assert_eq!(pass.entrances_queued, 15);
//!
//! event_loop.run_until_idle().unwrap();
//! assert_eq!(event_loop.now(), Duration::from_millis(7500));
//! assert_eq!(view.cell(0).unwrap().opacity, 1.0);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use snake_grid_core::logging::targets;
use snake_grid_core::{EventLoop, PerfSpan};
use snake_grid_render::{Point, Rect, Size, Transform2D};

use crate::animation::{AnimationSequencer, Animator};
use crate::cell::{CellSnapshot, GridCell};
use crate::config::SurfaceConfig;
use crate::error::{LayoutError, Result};
use crate::layout::{FlowGrid, GridGeometry, ItemPlacement, SerpentineGridLayout};
use crate::visited::VisitedSet;

const TARGET: &str = targets::SURFACE;

type CellHandle = Rc<RefCell<GridCell>>;

/// What a [`SnakeGridView::layout_pass`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPass {
    /// Number of items visible after the pass.
    pub visible: usize,
    /// Items that became visible, in layout order.
    pub newly_visible: Vec<usize>,
    /// Items that scrolled out of view.
    pub hidden: Vec<usize>,
    /// Entrance animations queued by this pass.
    pub entrances_queued: usize,
}

/// A scrolling serpentine grid of cards with sequential entrance animations.
#[derive(Debug)]
pub struct SnakeGridView {
    config: SurfaceConfig,
    event_loop: EventLoop,
    layout: SerpentineGridLayout<FlowGrid>,
    geometry: Option<GridGeometry>,
    container_size: Size,
    scroll_offset: f32,
    sequencer: AnimationSequencer,
    visited: VisitedSet,
    cells: BTreeMap<usize, CellHandle>,
    displayed: BTreeSet<usize>,
}

impl SnakeGridView {
    /// Create a surface whose entrance animations run on `event_loop`.
    pub fn new(config: SurfaceConfig, event_loop: EventLoop) -> Result<Self> {
        let sequencer = AnimationSequencer::with_easing(event_loop.clone(), config.entrance.easing);
        Self::with_sequencer(config, event_loop, sequencer)
    }

    /// Create a surface that animates through a custom [`Animator`].
    pub fn with_animator(
        config: SurfaceConfig,
        event_loop: EventLoop,
        animator: impl Animator + 'static,
    ) -> Result<Self> {
        let sequencer = AnimationSequencer::new(event_loop.clone(), animator);
        Self::with_sequencer(config, event_loop, sequencer)
    }

    fn with_sequencer(
        config: SurfaceConfig,
        event_loop: EventLoop,
        sequencer: AnimationSequencer,
    ) -> Result<Self> {
        config.validate()?;
        let layout =
            SerpentineGridLayout::with_mode(FlowGrid::new(config.item_count), config.grid.serpentine);

        tracing::debug!(
            target: TARGET,
            item_count = config.item_count,
            mode = ?config.grid.serpentine,
            "surface created"
        );

        Ok(Self {
            config,
            event_loop,
            layout,
            geometry: None,
            container_size: Size::ZERO,
            scroll_offset: 0.0,
            sequencer,
            visited: VisitedSet::new(),
            cells: BTreeMap::new(),
            displayed: BTreeSet::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The event loop entrance animations run on.
    pub fn event_loop(&self) -> &EventLoop {
        &self.event_loop
    }

    /// The serpentine layout.
    pub fn layout(&self) -> &SerpentineGridLayout<FlowGrid> {
        &self.layout
    }

    /// Current geometry, `None` until the container has a width.
    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    /// The entrance animation queue.
    pub fn sequencer(&self) -> &AnimationSequencer {
        &self.sequencer
    }

    /// Items that already played their entrance.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.layout.item_count()
    }

    /// Container size.
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Vertical scroll offset.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Items on screen after the last layout pass, ascending.
    pub fn displayed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.displayed.iter().copied()
    }

    // -------------------------------------------------------------------------
    // Geometry and scrolling
    // -------------------------------------------------------------------------

    /// Resize the container. The geometry is always recomputed and every
    /// known cell moves to its new frame.
    pub fn set_container_size(&mut self, size: Size) -> Result<()> {
        let _perf = PerfSpan::new("set_container_size");
        self.container_size = size;

        let bounds = Rect::from_origin_size(Point::ZERO, size);
        if self.layout.should_invalidate_for_bounds_change(bounds) {
            let geometry = if size.width > 0.0 {
                GridGeometry::from_config(&self.config.grid, size.width).map(Some)
            } else {
                Ok(None)
            };
            match geometry {
                Ok(geometry) => self.geometry = geometry,
                Err(err) => {
                    tracing::warn!(target: TARGET, width = size.width, %err, "no usable geometry");
                    self.geometry = None;
                    self.scroll_offset = 0.0;
                    return Err(err.into());
                }
            }
        }

        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
        self.refresh_frames()?;

        tracing::debug!(
            target: TARGET,
            width = size.width,
            height = size.height,
            columns = self.geometry.map(|g| g.column_count()),
            "container resized"
        );
        Ok(())
    }

    /// Scroll to `offset`, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        let offset = if offset.is_nan() { 0.0 } else { offset };
        self.scroll_offset = self.clamp_scroll(offset);
    }

    /// Scroll by `delta`.
    pub fn scroll_by(&mut self, delta: f32) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Size of the scrollable content, including the bottom inset.
    pub fn content_size(&self) -> Size {
        let items = self
            .geometry
            .map_or(0.0, |geometry| geometry.content_height(self.item_count()));
        Size::new(
            self.container_size.width,
            items + self.config.grid.content_inset_bottom,
        )
    }

    /// Largest valid scroll offset.
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_size().height - self.container_size.height).max(0.0)
    }

    /// The visible part of the content.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_offset,
            self.container_size.width,
            self.container_size.height,
        )
    }

    /// Placements of the items intersecting the visible rect, in layout order.
    pub fn visible_placements(&self) -> Result<Vec<ItemPlacement>> {
        match &self.geometry {
            Some(geometry) => Ok(self.layout.placements(self.visible_rect(), geometry)?),
            None => Ok(Vec::new()),
        }
    }

    fn clamp_scroll(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll_offset())
    }

    fn refresh_frames(&mut self) -> Result<()> {
        let Some(geometry) = self.geometry else {
            return Ok(());
        };
        for (&index, cell) in &self.cells {
            let placement = self.layout.placement(index, &geometry)?;
            cell.borrow_mut().set_frame(placement.frame);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// Lay out the visible items.
    ///
    /// Items that were not on screen after the previous pass get
    /// [`item_will_display`](Self::item_will_display); items that left the
    /// screen are forgotten so they are displayed again when they return.
    pub fn layout_pass(&mut self) -> Result<LayoutPass> {
        let _perf = PerfSpan::new("layout_pass");
        let placements = self.visible_placements()?;
        let now_visible: BTreeSet<usize> = placements.iter().map(|p| p.index).collect();

        let mut pass = LayoutPass {
            visible: placements.len(),
            hidden: self.displayed.difference(&now_visible).copied().collect(),
            ..LayoutPass::default()
        };

        for placement in &placements {
            self.ensure_cell(placement.index, Some(placement.frame));
            if self.displayed.contains(&placement.index) {
                continue;
            }
            pass.newly_visible.push(placement.index);
            if self.item_will_display(placement.index)? {
                pass.entrances_queued += 1;
            }
        }
        self.displayed = now_visible;

        tracing::debug!(
            target: TARGET,
            scroll = self.scroll_offset,
            visible = pass.visible,
            appeared = pass.newly_visible.len(),
            hidden = pass.hidden.len(),
            entrances = pass.entrances_queued,
            "layout pass"
        );
        Ok(pass)
    }

    /// Notify the surface that item `index` is about to be shown.
    ///
    /// The cell is reset to transparent with its resting background. The first
    /// time an index is shown its entrance animation is queued and `true` is
    /// returned; afterwards the cell jumps straight to its revealed state.
    pub fn item_will_display(&mut self, index: usize) -> Result<bool> {
        let item_count = self.item_count();
        if index >= item_count {
            return Err(LayoutError::IndexOutOfRange { index, item_count }.into());
        }

        let frame = match &self.geometry {
            Some(geometry) => Some(self.layout.placement(index, geometry)?.frame),
            None => None,
        };
        let cell = self.ensure_cell(index, frame);
        let entrance = &self.config.entrance;
        let revealed = entrance.revealed_color;

        {
            let mut cell = cell.borrow_mut();
            cell.opacity_mut().set_immediate(0.0);
            cell.background_mut().set_immediate(entrance.resting_color);
        }

        if !self.visited.mark(index) {
            cell.borrow_mut().reveal(revealed);
            tracing::trace!(target: TARGET, index, "revisited, entrance skipped");
            return Ok(false);
        }

        // A cell revealed by a revisit before its turn keeps its final state;
        // the queued entrance still holds its slot but changes nothing.
        let setup_cell = cell.clone();
        let mutate_cell = cell;
        let id = self.sequencer.enqueue(
            entrance.duration(),
            move || {
                let mut cell = setup_cell.borrow_mut();
                if cell.is_revealed() {
                    return;
                }
                let height = cell.frame().height();
                cell.transform_mut()
                    .set_immediate(Transform2D::translate(0.0, height));
            },
            move || {
                let mut cell = mutate_cell.borrow_mut();
                if cell.is_revealed() {
                    tracing::trace!(target: TARGET, index = cell.index(), "already revealed");
                    return;
                }
                cell.opacity_mut().set(1.0);
                cell.background_mut().set(revealed);
                cell.transform_mut().set(Transform2D::IDENTITY);
            },
        );
        tracing::debug!(target: TARGET, index, animation = id.as_u64(), "entrance queued");
        Ok(true)
    }

    /// The presented state of item `index` at the loop's current time, if a
    /// cell was ever created for it.
    pub fn cell(&self, index: usize) -> Option<CellSnapshot> {
        let now = self.event_loop.now();
        self.cells.get(&index).map(|cell| cell.borrow().snapshot(now))
    }

    /// Snapshots of the displayed cells, ascending by index.
    pub fn displayed_cells(&self) -> Vec<CellSnapshot> {
        self.displayed
            .iter()
            .filter_map(|&index| self.cell(index))
            .collect()
    }

    fn ensure_cell(&mut self, index: usize, frame: Option<Rect>) -> CellHandle {
        let resting = self.config.entrance.resting_color;
        let cell = self.cells.entry(index).or_insert_with(|| {
            Rc::new(RefCell::new(GridCell::new(
                index,
                frame.unwrap_or(Rect::ZERO),
                resting,
            )))
        });
        if let Some(frame) = frame {
            cell.borrow_mut().set_frame(frame);
        }
        cell.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use snake_grid_core::ManualClock;
    use snake_grid_render::Color;

    use super::*;
    use crate::error::Error;

    fn view() -> (SnakeGridView, EventLoop) {
        let event_loop = EventLoop::with_clock(ManualClock::new());
        let mut view = SnakeGridView::new(SurfaceConfig::default(), event_loop.clone()).unwrap();
        view.set_container_size(Size::new(300.0, 500.0)).unwrap();
        (view, event_loop)
    }

    #[test]
    fn test_content_size_includes_inset() {
        let (view, _) = view();
        assert_eq!(view.content_size(), Size::new(300.0, 749.0));
        assert_eq!(view.max_scroll_offset(), 249.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let (mut view, _) = view();
        view.set_scroll_offset(10_000.0);
        assert_eq!(view.scroll_offset(), 249.0);
        view.set_scroll_offset(-5.0);
        assert_eq!(view.scroll_offset(), 0.0);
        view.set_scroll_offset(f32::NAN);
        assert_eq!(view.scroll_offset(), 0.0);
        view.scroll_by(100.0);
        assert_eq!(view.visible_rect(), Rect::new(0.0, 100.0, 300.0, 500.0));
    }

    #[test]
    fn test_visible_placements_are_mirrored() {
        let (view, _) = view();
        let placements = view.visible_placements().unwrap();
        assert_eq!(placements.len(), 15);
        assert_eq!(placements[0].index, 0);
        assert_eq!(placements[0].frame.left(), 201.0);
        assert_eq!(placements[3].frame.left(), 0.0);
    }

    #[test]
    fn test_layout_pass_queues_each_item_once() {
        let (mut view, event_loop) = view();
        let pass = view.layout_pass().unwrap();
        assert_eq!(pass.newly_visible, (0..15).collect::<Vec<_>>());
        assert_eq!(pass.entrances_queued, 15);

        let again = view.layout_pass().unwrap();
        assert!(again.newly_visible.is_empty());
        assert_eq!(again.entrances_queued, 0);

        // Nothing has run yet: the first drain step is only posted.
        assert_eq!(view.cell(0).unwrap().opacity, 0.0);
        assert_eq!(event_loop.pending_task_count(), 1);
    }

    #[test]
    fn test_item_will_display_first_and_repeat() {
        let (mut view, event_loop) = view();
        assert!(view.item_will_display(4).unwrap());
        event_loop.run_until_idle().unwrap();

        let shown = view.cell(4).unwrap();
        assert_eq!(shown.opacity, 1.0);
        assert_eq!(shown.background, Color::RED);

        assert!(!view.item_will_display(4).unwrap());
        let again = view.cell(4).unwrap();
        assert_eq!(again.opacity, 1.0);
        assert_eq!(again.background, Color::RED);
        assert!(again.transform.is_identity());
        assert!(event_loop.is_idle());
    }

    #[test]
    fn test_item_will_display_out_of_range() {
        let (mut view, _) = view();
        let err = view.item_will_display(20).unwrap_err();
        assert!(matches!(
            err,
            Error::Layout(LayoutError::IndexOutOfRange { index: 20, item_count: 20 })
        ));
        assert!(view.visited().is_empty());
    }

    #[test]
    fn test_entrance_starts_below_final_frame() {
        let (mut view, event_loop) = view();
        view.item_will_display(0).unwrap();
        event_loop.run_turn();

        let start = view.cell(0).unwrap();
        assert_eq!(start.frame, Rect::new(201.0, 0.0, 99.0, 99.0));
        assert_eq!(start.presented_frame, Rect::new(201.0, 99.0, 99.0, 99.0));
        assert_eq!(start.opacity, 0.0);
        assert!(start.animating);
    }

    #[test]
    fn test_resize_recomputes_frames() {
        let (mut view, _) = view();
        view.layout_pass().unwrap();
        view.set_container_size(Size::new(600.0, 500.0)).unwrap();

        let geometry = view.geometry().unwrap();
        assert_eq!(geometry.item_size().width, 199.0);
        assert_eq!(view.cell(0).unwrap().frame.left(), 401.0);
    }

    #[test]
    fn test_zero_width_has_no_geometry() {
        let event_loop = EventLoop::with_clock(ManualClock::new());
        let mut view = SnakeGridView::new(SurfaceConfig::default(), event_loop).unwrap();
        view.set_container_size(Size::ZERO).unwrap();
        assert!(view.geometry().is_none());
        assert!(view.visible_placements().unwrap().is_empty());
        assert_eq!(view.layout_pass().unwrap(), LayoutPass::default());
    }

    #[test]
    fn test_too_narrow_container_is_an_error() {
        let event_loop = EventLoop::with_clock(ManualClock::new());
        let mut view = SnakeGridView::new(SurfaceConfig::default(), event_loop).unwrap();
        assert!(view.set_container_size(Size::new(2.0, 500.0)).is_err());
        assert!(view.geometry().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SurfaceConfig::default();
        config.grid.column_count = Some(0);
        let event_loop = EventLoop::with_clock(ManualClock::new());
        assert!(matches!(
            SnakeGridView::new(config, event_loop),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_zero_duration_entrance_is_instant() {
        let mut config = SurfaceConfig::default();
        config.entrance.duration_secs = 0.0;
        let event_loop = EventLoop::with_clock(ManualClock::new());
        let mut view = SnakeGridView::new(config, event_loop.clone()).unwrap();
        view.set_container_size(Size::new(300.0, 500.0)).unwrap();
        view.layout_pass().unwrap();

        event_loop.run_until_idle().unwrap();
        assert_eq!(event_loop.now(), Duration::ZERO);
        for snapshot in view.displayed_cells() {
            assert_eq!(snapshot.opacity, 1.0);
            assert!(!snapshot.animating);
        }
    }
}
