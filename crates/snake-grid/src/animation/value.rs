//! Animatable values.
//!
//! An [`Animated<T>`] keeps a *model* value (what was last assigned) and, while
//! a transition is in flight, derives a *presentation* value from loop time.

use std::time::Duration;

use snake_grid_render::{Color, Point, Transform2D};

use super::transaction;
use super::transition::Transition;

/// Types that can be blended between two values.
pub trait Interpolate: Clone {
    /// Blend from `self` towards `other`; `t == 0` yields `self`, `t == 1`
    /// yields `other`.
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Point {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.interpolate(&other.x, t), self.y.interpolate(&other.y, t))
    }
}

impl Interpolate for Color {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }
}

impl Interpolate for Transform2D {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// A value that transitions when written inside an animation transaction.
///
/// ```
/// use std::time::Duration;
/// use snake_grid::animation::{Animated, Easing, Transaction, with_transaction};
///
/// let mut opacity = Animated::new(0.0_f32);
/// let tx = Transaction::new(Duration::ZERO, Duration::from_millis(500), Easing::Linear);
/// with_transaction(tx, || opacity.set(1.0));
///
/// assert_eq!(*opacity.model(), 1.0);
/// assert_eq!(opacity.presentation(Duration::from_millis(250)), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Animated<T> {
    model: T,
    transition: Option<Transition<T>>,
}

impl<T: Interpolate> Animated<T> {
    /// Create a value at rest.
    pub fn new(value: T) -> Self {
        Self {
            model: value,
            transition: None,
        }
    }

    /// Assign a new model value.
    ///
    /// Inside an animated transaction this starts a transition from the value
    /// presented at the transaction's start; otherwise it applies instantly.
    pub fn set(&mut self, value: T) {
        match transaction::current() {
            Some(tx) if tx.is_animated() => {
                let from = self.presentation(tx.start);
                self.transition = Some(Transition::new(
                    from,
                    value.clone(),
                    tx.start,
                    tx.duration,
                    tx.easing,
                ));
                self.model = value;
            }
            _ => self.set_immediate(value),
        }
    }

    /// Assign a new model value, dropping any transition in flight.
    pub fn set_immediate(&mut self, value: T) {
        self.model = value;
        self.transition = None;
    }

    /// The last assigned value.
    #[inline]
    pub fn model(&self) -> &T {
        &self.model
    }

    /// The value to present at loop time `now`.
    pub fn presentation(&self, now: Duration) -> T {
        match &self.transition {
            Some(transition) => transition.value_at(now),
            None => self.model.clone(),
        }
    }

    /// Whether a transition is still running at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|transition| !transition.is_finished(now))
    }

    /// The transition in flight, if one was started and not replaced.
    pub fn transition(&self) -> Option<&Transition<T>> {
        self.transition.as_ref()
    }
}

impl<T: Interpolate + Default> Default for Animated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
