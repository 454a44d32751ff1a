//! Geometry and paint primitives for snake-grid.
//!
//! The grid never draws anything itself; cells expose their frame, transform,
//! opacity and background color so an embedding toolkit can paint them.
//!
//! ```
//! use snake_grid_render::{Color, Rect, Transform2D};
//!
//! let frame = Rect::new(201.0, 0.0, 99.0, 99.0);
//! let entering = Transform2D::translate(0.0, frame.height());
//! assert_eq!(entering.transform_rect(&frame).top(), 99.0);
//! assert_eq!(Color::WHITE.lerp(Color::RED, 1.0), Color::RED);
//! ```

mod transform;
mod types;

pub use transform::Transform2D;
pub use types::{Color, Point, Rect, Size};
