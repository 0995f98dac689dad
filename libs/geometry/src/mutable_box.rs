//! The mutable rectangle used by in-place clipping, cropping and transform helpers.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rect::{Rect, Rectangular, SetRect};

/// An axis-aligned box with floating-point lambda bounds that is modified in place.
///
/// Helpers such as [`transform_rect`](crate::units::transform_rect) and the shape crop
/// operations rewrite a `MutableBox` they are handed. Everything else uses [`Rect`].
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let mut b = MutableBox::from_sides(0.0, 0.0, 1.0, 1.0);
/// b.set_location(2.0, 3.0).unwrap();
/// assert_eq!(b.max_x(), 3.0);
/// assert_eq!(b.max_y(), 4.0);
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutableBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl MutableBox {
    /// Creates a box from its sides, sorting each pair.
    pub fn from_sides(lx: f64, ly: f64, hx: f64, hy: f64) -> Self {
        Self {
            min_x: lx.min(hx),
            min_y: ly.min(hy),
            max_x: lx.max(hx),
            max_y: ly.max(hy),
        }
    }

    /// Creates a zero-size box at `(x, y)`.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::from_sides(x, y, x, y)
    }

    /// Grows the box to include `(x, y)`.
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Returns `true` if the box has no positive area.
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// The smallest grid [`Rect`] enclosing this box.
    pub fn to_rect(&self) -> Result<Rect> {
        Rect::from_lambda_enclosing(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl From<Rect> for MutableBox {
    fn from(value: Rect) -> Self {
        Self::from_sides(value.min_x(), value.min_y(), value.max_x(), value.max_y())
    }
}

impl Rectangular for MutableBox {
    #[inline]
    fn min_x(&self) -> f64 {
        self.min_x
    }
    #[inline]
    fn min_y(&self) -> f64 {
        self.min_y
    }
    #[inline]
    fn max_x(&self) -> f64 {
        self.max_x
    }
    #[inline]
    fn max_y(&self) -> f64 {
        self.max_y
    }
}

impl SetRect for MutableBox {
    fn set_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        *self = Self::from_sides(x, y, x + w, y + h);
        Ok(())
    }

    fn set_location(&mut self, x: f64, y: f64) -> Result<()> {
        let (w, h) = (self.width(), self.height());
        self.set_rect(x, y, w, h)
    }
}
