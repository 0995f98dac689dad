//! Immutable axis-aligned rectangles and the rectangle traits shared with [`MutableBox`].
//!
//! [`MutableBox`]: crate::mutable_box::MutableBox

use std::fmt::Display;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::error::{Error, Result};
use crate::point::Point;
use crate::transform::{TransformMut, Transformation, TranslateMut};
use crate::units::{checked_grid, GRID};

/// Read access to the lambda bounds of an axis-aligned box.
pub trait Rectangular {
    /// The low x bound.
    fn min_x(&self) -> f64;
    /// The low y bound.
    fn min_y(&self) -> f64;
    /// The high x bound.
    fn max_x(&self) -> f64;
    /// The high y bound.
    fn max_y(&self) -> f64;

    /// The extent along x.
    #[inline]
    fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    /// The extent along y.
    #[inline]
    fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// The x-coordinate of the center.
    #[inline]
    fn center_x(&self) -> f64 {
        (self.min_x() + self.max_x()) / 2.
    }

    /// The y-coordinate of the center.
    #[inline]
    fn center_y(&self) -> f64 {
        (self.min_y() + self.max_y()) / 2.
    }
}

/// In-place mutation of a box's bounds.
///
/// Only [`MutableBox`](crate::mutable_box::MutableBox) accepts mutation; [`Rect`] rejects it
/// with [`Error::ImmutableValue`].
pub trait SetRect {
    /// Replaces the bounds with the box at `(x, y)` of size `w` by `h`.
    fn set_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// Moves the box so its low corner lands at `(x, y)`, keeping its size.
    fn set_location(&mut self, x: f64, y: f64) -> Result<()>;
}

/// An immutable axis-aligned rectangle with grid-exact bounds.
///
/// The lower-left and upper-right corners are kept sorted, so a rectangle is never inverted.
/// It is empty when it has zero width or height.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "[i64; 4]", into = "[i64; 4]")]
pub struct Rect {
    p0: Point,
    p1: Point,
    width: f64,
    height: f64,
}

impl Rect {
    fn from_corners_unchecked(p0: Point, p1: Point) -> Self {
        Self {
            p0,
            p1,
            width: p1.lambda_x() - p0.lambda_x(),
            height: p1.lambda_y() - p0.lambda_y(),
        }
    }

    /// Creates the rectangle spanned by two corner points, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let r = Rect::new(Point::new(400, 0), Point::new(0, 800));
    /// assert_eq!(r.grid_min_x(), 0);
    /// assert_eq!(r.max_y(), 2.0);
    /// assert_eq!(r.width(), 1.0);
    /// ```
    pub fn new(a: Point, b: Point) -> Self {
        let (x0, x1) = sorted(a.grid_x(), b.grid_x());
        let (y0, y1) = sorted(a.grid_y(), b.grid_y());
        Self::from_corners_unchecked(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Creates a rectangle from grid bounds, sorting each pair of sides.
    pub fn from_grid(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Result<Self> {
        Ok(Self::new(
            Point::from_grid(min_x, min_y)?,
            Point::from_grid(max_x, max_y)?,
        ))
    }

    /// Creates a rectangle from lambda bounds, snapping every side to the nearest grid line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let r = Rect::from_lambda(-0.5, -0.5, 0.5, 0.5).unwrap();
    /// assert_eq!(r.grid_max_x(), 200);
    /// assert!(r.contains_point(Point::from_lambda(0.5, 0.5).unwrap()));
    /// ```
    pub fn from_lambda(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        Ok(Self::new(
            Point::from_lambda(min_x, min_y)?,
            Point::from_lambda(max_x, max_y)?,
        ))
    }

    /// Creates the smallest grid rectangle enclosing the given lambda bounds.
    ///
    /// Low sides round down and high sides round up, unless a side already sits on a grid
    /// line up to floating-point noise.
    pub fn from_lambda_enclosing(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let (min_x, max_x) = sorted(min_x, max_x);
        let (min_y, max_y) = sorted(min_y, max_y);
        let outward = |v: f64, up: bool| {
            let scaled = v * GRID;
            let nearest = scaled.round();
            if (scaled - nearest).abs() < 1e-6 {
                checked_grid(nearest)
            } else if up {
                checked_grid(scaled.ceil())
            } else {
                checked_grid(scaled.floor())
            }
        };
        Self::from_grid(
            outward(min_x, false)?,
            outward(min_y, false)?,
            outward(max_x, true)?,
            outward(max_y, true)?,
        )
    }

    /// Creates a zero-area rectangle at `p`.
    #[inline]
    pub fn from_point(p: Point) -> Self {
        Self::from_corners_unchecked(p, p)
    }

    /// The lower-left corner.
    #[inline]
    pub fn lower_left(&self) -> Point {
        self.p0
    }

    /// The upper-right corner.
    #[inline]
    pub fn upper_right(&self) -> Point {
        self.p1
    }

    /// The low x bound in grid units.
    #[inline]
    pub fn grid_min_x(&self) -> i64 {
        self.p0.grid_x()
    }

    /// The low y bound in grid units.
    #[inline]
    pub fn grid_min_y(&self) -> i64 {
        self.p0.grid_y()
    }

    /// The high x bound in grid units.
    #[inline]
    pub fn grid_max_x(&self) -> i64 {
        self.p1.grid_x()
    }

    /// The high y bound in grid units.
    #[inline]
    pub fn grid_max_y(&self) -> i64 {
        self.p1.grid_y()
    }

    /// Width in grid units.
    #[inline]
    pub fn grid_width(&self) -> i64 {
        self.grid_max_x() - self.grid_min_x()
    }

    /// Height in grid units.
    #[inline]
    pub fn grid_height(&self) -> i64 {
        self.grid_max_y() - self.grid_min_y()
    }

    /// Returns `true` if the rectangle has zero width or zero height.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid_min_x() >= self.grid_max_x() || self.grid_min_y() >= self.grid_max_y()
    }

    /// Area in square lambda units.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The center of the rectangle, snapped to the grid.
    pub fn center(&self) -> Point {
        Point::from_grid_clamped(
            (self.grid_min_x() as i128 + self.grid_max_x() as i128).div_euclid(2),
            (self.grid_min_y() as i128 + self.grid_max_y() as i128).div_euclid(2),
        )
    }

    /// The four corners, counter-clockwise from the lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.p0,
            Point::new(self.grid_max_x(), self.grid_min_y()),
            self.p1,
            Point::new(self.grid_min_x(), self.grid_max_y()),
        ]
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        (self.grid_min_x()..=self.grid_max_x()).contains(&p.grid_x())
            && (self.grid_min_y()..=self.grid_max_y()).contains(&p.grid_y())
    }

    /// Returns `true` if `other` lies entirely inside this rectangle, boundary included.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.p0) && self.contains_point(other.p1)
    }

    /// Returns `true` if the two rectangles overlap or touch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let a = Rect::from_grid(0, 0, 10, 10).unwrap();
    /// assert!(a.intersects(&Rect::from_grid(10, 10, 20, 20).unwrap()));
    /// assert!(!a.intersects(&Rect::from_grid(11, 0, 20, 10).unwrap()));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.grid_min_x() <= other.grid_max_x()
            && other.grid_min_x() <= self.grid_max_x()
            && self.grid_min_y() <= other.grid_max_y()
            && other.grid_min_y() <= self.grid_max_y()
    }

    /// The overlap of two rectangles, or [`None`] if they do not touch.
    ///
    /// Touching rectangles yield an empty overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::from_corners_unchecked(
            Point::new(
                self.grid_min_x().max(other.grid_min_x()),
                self.grid_min_y().max(other.grid_min_y()),
            ),
            Point::new(
                self.grid_max_x().min(other.grid_max_x()),
                self.grid_max_y().min(other.grid_max_y()),
            ),
        ))
    }

    /// The smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Self::from_corners_unchecked(
            Point::new(
                self.grid_min_x().min(other.grid_min_x()),
                self.grid_min_y().min(other.grid_min_y()),
            ),
            Point::new(
                self.grid_max_x().max(other.grid_max_x()),
                self.grid_max_y().max(other.grid_max_y()),
            ),
        )
    }

    /// The bounding rectangle of a sequence of points, or [`None`] if it is empty.
    pub fn bounding_points(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        points
            .into_iter()
            .map(Rect::from_point)
            .reduce(|acc, r| acc.union(&r))
    }
}

fn sorted<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

impl Rectangular for Rect {
    #[inline]
    fn min_x(&self) -> f64 {
        self.p0.lambda_x()
    }
    #[inline]
    fn min_y(&self) -> f64 {
        self.p0.lambda_y()
    }
    #[inline]
    fn max_x(&self) -> f64 {
        self.p1.lambda_x()
    }
    #[inline]
    fn max_y(&self) -> f64 {
        self.p1.lambda_y()
    }
    #[inline]
    fn width(&self) -> f64 {
        self.width
    }
    #[inline]
    fn height(&self) -> f64 {
        self.height
    }
}

impl SetRect for Rect {
    fn set_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) -> Result<()> {
        Err(Error::ImmutableValue("Rect"))
    }

    fn set_location(&mut self, _x: f64, _y: f64) -> Result<()> {
        Err(Error::ImmutableValue("Rect"))
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        self.p0 == other.p0 && self.p1 == other.p1
    }
}

impl Eq for Rect {}

impl Hash for Rect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.p0.hash(state);
        self.p1.hash(state);
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.p0, self.p1)
    }
}

impl TryFrom<[i64; 4]> for Rect {
    type Error = Error;

    fn try_from(value: [i64; 4]) -> Result<Self> {
        Self::from_grid(value[0], value[1], value[2], value[3])
    }
}

impl From<Rect> for [i64; 4] {
    fn from(value: Rect) -> Self {
        [
            value.grid_min_x(),
            value.grid_min_y(),
            value.grid_max_x(),
            value.grid_max_y(),
        ]
    }
}

impl Bbox for Rect {
    fn bbox(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl TranslateMut for Rect {
    fn translate_mut(&mut self, p: Point) {
        self.p0.translate_mut(p);
        self.p1.translate_mut(p);
    }
}

impl TransformMut for Rect {
    fn transform_mut(&mut self, trans: Transformation) {
        let corners = self.corners().map(|mut c| {
            c.transform_mut(trans);
            c
        });
        if let Some(bounds) = Rect::bounding_points(corners) {
            *self = bounds;
        }
    }
}
