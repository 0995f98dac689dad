//! Grid-exact 2-D points.

use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::snap::snap_to_grid;
use crate::transform::{TransformMut, Transformation, TranslateMut};
use crate::units::{self, clamp_grid, grid_to_lambda, round_to_grid, MAX_GRID};

/// Lower bound (inclusive) of the compact coordinate range reported by [`Point::is_small`].
const SMALL_MIN: i64 = -(1 << 30);
/// Upper bound (exclusive) of the compact coordinate range reported by [`Point::is_small`].
const SMALL_MAX: i64 = 1 << 30;

/// An immutable point in two-dimensional layout space.
///
/// The coordinates are held exactly in grid units, with the matching lambda values cached
/// next to them. Equality, hashing and ordering only look at the grid values.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct Point {
    grid_x: i64,
    grid_y: i64,
    lambda_x: f64,
    lambda_y: f64,
}

impl Point {
    /// The origin, `(0, 0)`.
    pub const ORIGIN: Point = Point {
        grid_x: 0,
        grid_y: 0,
        lambda_x: 0.,
        lambda_y: 0.,
    };

    /// Creates a point from grid coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate lies outside `[-MAX_GRID, MAX_GRID]`.
    /// Use [`Point::from_grid`] for a fallible version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let p = Point::new(400, -200);
    /// assert_eq!(p.lambda_x(), 1.0);
    /// assert_eq!(p.lambda_y(), -0.5);
    /// ```
    pub fn new(grid_x: i64, grid_y: i64) -> Self {
        assert!(
            (-MAX_GRID..=MAX_GRID).contains(&grid_x) && (-MAX_GRID..=MAX_GRID).contains(&grid_y),
            "grid coordinates ({grid_x}, {grid_y}) out of range"
        );
        Self::from_grid_unchecked(grid_x, grid_y)
    }

    /// Creates a point from grid coordinates, checking that both lie within the grid range.
    pub fn from_grid(grid_x: i64, grid_y: i64) -> Result<Self> {
        for value in [grid_x, grid_y] {
            if !(-MAX_GRID..=MAX_GRID).contains(&value) {
                return Err(Error::GridOverflow {
                    value: value as f64,
                });
            }
        }
        Ok(Self::from_grid_unchecked(grid_x, grid_y))
    }

    /// Creates a point from lambda coordinates, snapping each to the nearest grid position.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let p = Point::from_lambda(0.5, 0.6).unwrap();
    /// assert_eq!(p.grid(), (200, 240));
    /// assert!(Point::from_lambda(1e300, 0.0).is_err());
    /// ```
    pub fn from_lambda(x: f64, y: f64) -> Result<Self> {
        Ok(Self::from_grid_unchecked(
            units::lambda_to_grid(x)?,
            units::lambda_to_grid(y)?,
        ))
    }

    /// Snaps a computed lambda position, saturating at the grid range.
    pub(crate) fn from_lambda_clamped(x: f64, y: f64) -> Self {
        Self::from_grid_unchecked(clamp_grid(round_to_grid(x)), clamp_grid(round_to_grid(y)))
    }

    /// Saturating constructor for grid values computed internally.
    pub(crate) fn from_grid_clamped(grid_x: i128, grid_y: i128) -> Self {
        let clamp = |v: i128| v.clamp(-(MAX_GRID as i128), MAX_GRID as i128) as i64;
        Self::from_grid_unchecked(clamp(grid_x), clamp(grid_y))
    }

    fn from_grid_unchecked(grid_x: i64, grid_y: i64) -> Self {
        if grid_x == 0 && grid_y == 0 {
            return Self::ORIGIN;
        }
        Self {
            grid_x,
            grid_y,
            lambda_x: grid_to_lambda(grid_x),
            lambda_y: grid_to_lambda(grid_y),
        }
    }

    /// The x-coordinate in grid units.
    #[inline]
    pub fn grid_x(&self) -> i64 {
        self.grid_x
    }

    /// The y-coordinate in grid units.
    #[inline]
    pub fn grid_y(&self) -> i64 {
        self.grid_y
    }

    /// The x-coordinate in lambda units.
    #[inline]
    pub fn lambda_x(&self) -> f64 {
        self.lambda_x
    }

    /// The y-coordinate in lambda units.
    #[inline]
    pub fn lambda_y(&self) -> f64 {
        self.lambda_y
    }

    /// Both grid coordinates as a tuple.
    #[inline]
    pub fn grid(&self) -> (i64, i64) {
        (self.grid_x, self.grid_y)
    }

    /// Both lambda coordinates as a tuple.
    #[inline]
    pub fn lambda(&self) -> (f64, f64) {
        (self.lambda_x, self.lambda_y)
    }

    /// Returns `true` if both grid coordinates fit the compact range `[-2^30, 2^30)`.
    #[inline]
    pub fn is_small(&self) -> bool {
        (SMALL_MIN..SMALL_MAX).contains(&self.grid_x) && (SMALL_MIN..SMALL_MAX).contains(&self.grid_y)
    }

    /// Returns `true` if this is the origin.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.grid_x == 0 && self.grid_y == 0
    }

    /// Euclidean distance to `other`, in lambda units.
    ///
    /// Axis-aligned pairs skip the square root.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let a = Point::new(0, 0);
    /// assert_eq!(a.distance(Point::new(0, -800)), 2.0);
    /// assert_eq!(a.distance(Point::new(1200, 1600)), 5.0);
    /// ```
    pub fn distance(&self, other: Point) -> f64 {
        let dx = other.lambda_x - self.lambda_x;
        let dy = other.lambda_y - self.lambda_y;
        if dx == 0. {
            dy.abs()
        } else if dy == 0. {
            dx.abs()
        } else {
            dx.hypot(dy)
        }
    }

    /// Squared Euclidean distance to `other`, in square lambda units.
    pub fn lambda_distance_sq(&self, other: Point) -> f64 {
        let dx = other.lambda_x - self.lambda_x;
        let dy = other.lambda_y - self.lambda_y;
        dx * dx + dy * dy
    }

    /// Returns this point offset by the given grid deltas.
    pub fn translated(&self, dx: i64, dy: i64) -> Result<Self> {
        let x = self.grid_x.checked_add(dx);
        let y = self.grid_y.checked_add(dy);
        match (x, y) {
            (Some(x), Some(y)) => Self::from_grid(x, y),
            _ => Err(Error::GridOverflow {
                value: self.grid_x as f64 + dx as f64,
            }),
        }
    }

    /// Snaps both grid coordinates to the nearest multiple of the grid step `grid`.
    ///
    /// # Panics
    ///
    /// Panics if `grid` is not positive.
    pub fn snap_to_grid(&self, grid: i64) -> Self {
        Self::from_grid_unchecked(
            snap_to_grid(self.grid_x, grid).clamp(-MAX_GRID, MAX_GRID),
            snap_to_grid(self.grid_y, grid).clamp(-MAX_GRID, MAX_GRID),
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.grid() == other.grid()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid().hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.grid().cmp(&other.grid())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lambda_x, self.lambda_y)
    }
}

impl TryFrom<(i64, i64)> for Point {
    type Error = Error;

    fn try_from(value: (i64, i64)) -> Result<Self> {
        Self::from_grid(value.0, value.1)
    }
}

impl From<Point> for (i64, i64) {
    fn from(value: Point) -> Self {
        value.grid()
    }
}

impl TranslateMut for Point {
    fn translate_mut(&mut self, p: Point) {
        *self = Self::from_grid_clamped(
            self.grid_x as i128 + p.grid_x as i128,
            self.grid_y as i128 + p.grid_y as i128,
        );
    }
}

impl TransformMut for Point {
    fn transform_mut(&mut self, trans: Transformation) {
        let (x, y) = trans.apply(self.lambda_x, self.lambda_y);
        *self = Self::from_lambda_clamped(x, y);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;
    use crate::transform::{Transform, Translate};
    use crate::units::GRID;

    #[test]
    fn lambda_fields_track_grid_exactly() {
        for (gx, gy) in [(1, -1), (399, 401), (MAX_GRID, -MAX_GRID), (123_456_789, 7)] {
            let p = Point::new(gx, gy);
            assert_eq!(p.lambda_x(), gx as f64 / GRID);
            assert_eq!(p.lambda_y(), gy as f64 / GRID);
        }
    }

    #[test]
    fn construction_overflow_is_an_error() {
        assert!(matches!(
            Point::from_grid(MAX_GRID + 1, 0),
            Err(Error::GridOverflow { .. })
        ));
        assert!(Point::from_lambda(f64::NAN, 0.).is_err());
        assert!(Point::new(0, MAX_GRID).translated(0, 1).is_err());
    }

    #[test]
    fn zero_maps_to_origin() {
        let p = Point::from_lambda(0.0001, -0.0001).unwrap();
        assert!(p.is_origin());
        assert_eq!(p, Point::ORIGIN);
        assert_eq!(Point::from_grid(0, 0).unwrap(), Point::ORIGIN);
    }

    #[test]
    fn small_range_is_half_open() {
        assert!(Point::new(-(1 << 30), (1 << 30) - 1).is_small());
        assert!(!Point::new(1 << 30, 0).is_small());
        assert!(!Point::new(0, -(1 << 30) - 1).is_small());
    }

    #[test]
    fn axis_aligned_distance_is_exact() {
        let a = Point::new(3, 7);
        let b = Point::new(3, 1207);
        assert_eq!(a.distance(b), 3.0);
        assert_eq!(b.distance(a), 3.0);
        assert_eq!(a.lambda_distance_sq(b), 9.0);
    }

    #[test]
    fn equality_and_hash_follow_grid_values() {
        let set: HashSet<Point> = [
            Point::new(1, 2),
            Point::from_lambda(1. / GRID, 2. / GRID).unwrap(),
            Point::new(2, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(Point::new(1, 5) < Point::new(2, 0));
    }

    #[test]
    fn translate_and_transform() {
        let p = Point::new(400, 0).translate(Point::new(0, 400));
        assert_eq!(p, Point::new(400, 400));
        let q = p.transform(Transformation::translate(1., -1.));
        assert_eq!(q, Point::new(800, 0));
    }

    #[test]
    fn snaps_to_coarse_grid() {
        assert_eq!(Point::new(149, -151).snap_to_grid(100), Point::new(100, -200));
    }

    #[test]
    fn serde_uses_grid_values() {
        let p = Point::new(5, -9);
        let s = toml::to_string(&Wrapper { p }).unwrap();
        let back: Wrapper = toml::from_str(&s).unwrap();
        assert_eq!(back.p, p);
        assert_eq!(back.p.lambda_y(), -9. / GRID);
    }

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        p: Point,
    }
}
