//! Easing curves for timed transitions.
//!
//! An easing curve maps linear progress in `[0, 1]` to eased progress. The
//! entrance animation uses [`Easing::EaseInOut`] unless configured otherwise.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic, starts slow.
    EaseIn,
    /// Quadratic, ends slow.
    EaseOut,
    /// Quadratic, slow at both ends.
    #[default]
    EaseInOut,
    /// Cubic, starts slow.
    EaseInCubic,
    /// Cubic, ends slow.
    EaseOutCubic,
    /// Cubic, slow at both ends.
    EaseInOutCubic,
    /// Sinusoidal, starts slow.
    EaseInSine,
    /// Sinusoidal, ends slow.
    EaseOutSine,
    /// Sinusoidal, slow at both ends.
    EaseInOutSine,
}

impl Easing {
    /// Shorthand for [`ease`].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        ease(self, t)
    }
}

/// Apply an easing curve to a progress value.
///
/// `t` is clamped into `[0, 1]` first; every curve maps 0 to 0 and 1 to 1.
///
/// ```
/// use snake_grid::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.25), 0.25);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert_eq!(ease(Easing::EaseInOut, 2.0), 1.0);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseInCubic => t * t * t,
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
        Easing::EaseInSine => 1.0 - ((t * PI) / 2.0).cos(),
        Easing::EaseOutSine => ((t * PI) / 2.0).sin(),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
    }
}
