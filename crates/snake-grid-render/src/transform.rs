//! 2D affine transforms applied to cell content.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect};

/// A 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`. Cells only ever
/// animate between pure translations, but the full matrix is kept so a
/// serialized transform round-trips unchanged.
///
/// ```
/// use snake_grid_render::{Rect, Transform2D};
///
/// let lowered = Transform2D::translate(0.0, 99.0);
/// let frame = lowered.transform_rect(&Rect::new(201.0, 0.0, 99.0, 99.0));
/// assert_eq!(frame, Rect::new(201.0, 99.0, 99.0, 99.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self::translate(0.0, 0.0);

    /// A pure translation.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx,
            ty,
        }
    }

    #[inline]
    fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Map a rectangle through this transform.
    ///
    /// Only exact for translate/scale transforms, which is all cells use.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let origin = self.apply(rect.origin);
        let far = self.apply(Point::new(rect.right(), rect.bottom()));
        Rect::new(
            origin.x.min(far.x),
            origin.y.min(far.y),
            (far.x - origin.x).abs(),
            (far.y - origin.y).abs(),
        )
    }

    /// Check if this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Component-wise interpolation towards `other`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Self {
            a: mix(self.a, other.a),
            b: mix(self.b, other.b),
            c: mix(self.c, other.c),
            d: mix(self.d, other.d),
            tx: mix(self.tx, other.tx),
            ty: mix(self.ty, other.ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_leaves_rect_alone() {
        let r = Rect::new(3.0, 4.0, 10.0, 20.0);
        assert_eq!(Transform2D::IDENTITY.transform_rect(&r), r);
        assert!(Transform2D::default().is_identity());
        assert!(!Transform2D::translate(0.0, 1.0).is_identity());
    }

    #[test]
    fn test_lerp_slides_back_to_identity() {
        let lowered = Transform2D::translate(0.0, 100.0);
        let frame = Rect::new(0.0, 0.0, 50.0, 50.0);

        let half = lowered.lerp(&Transform2D::IDENTITY, 0.5);
        assert_eq!(half.transform_rect(&frame).top(), 50.0);
        assert!(lowered.lerp(&Transform2D::IDENTITY, 1.0).is_identity());
        assert_eq!(lowered.lerp(&Transform2D::IDENTITY, 0.0), lowered);
    }
}
