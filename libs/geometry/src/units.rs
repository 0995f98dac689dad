//! Grid/lambda unit arithmetic and the geometric primitives built on it.
//!
//! Layout coordinates are stored as integer *grid units*; [`GRID`] grid units make up one
//! floating-point *lambda unit*. All tolerant comparisons in this module are locked to the grid
//! resolution rather than to a general floating-point epsilon.
//!
//! Angles are integers in tenth-degrees (`3600` is a full turn) unless a function name says
//! `radians`.

use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::point::Point;
use crate::rect::{Rectangular, SetRect};
use crate::mutable_box::MutableBox;
use crate::transform::Transformation;

/// Number of grid units in one lambda unit.
pub const GRID: f64 = 400.;

/// Half of one grid unit, in lambda units.
pub const HALF_EPSILON: f64 = 0.5 / GRID;

/// Tolerance used by [`are_equals`], in lambda units.
pub const EPSILON: f64 = 1.01 / GRID;

/// Machine epsilon used by the `doubles_*` helpers.
pub const DBL_EPSILON: f64 = 2.220_446_049_250_313e-16;

/// Largest grid magnitude a coordinate may take.
///
/// Every grid value up to this bound is exactly representable as an `f64`.
pub const MAX_GRID: i64 = 1 << 53;

/// Returns `true` if `a` exceeds `b` by more than half a grid unit.
#[inline]
pub fn is_greater_than(a: f64, b: f64) -> bool {
    a - b > HALF_EPSILON
}

/// Returns `true` if `a` is below `b` by more than half a grid unit.
#[inline]
pub fn is_less_than(a: f64, b: f64) -> bool {
    b - a > HALF_EPSILON
}

/// Returns `true` unless `a` is below `b` by more than half a grid unit.
#[inline]
pub fn is_greater_or_equal(a: f64, b: f64) -> bool {
    !is_less_than(a, b)
}

/// Returns `true` unless `a` exceeds `b` by more than half a grid unit.
#[inline]
pub fn is_less_or_equal(a: f64, b: f64) -> bool {
    !is_greater_than(a, b)
}

/// Returns `true` if `a` and `b` differ by less than [`EPSILON`].
///
/// # Examples
///
/// ```
/// # use geometry_kernel::units::*;
/// assert!(are_equals(1.0, 1.0 + 1.0 / GRID));
/// assert!(!are_equals(1.0, 1.0 + 2.0 / GRID));
/// ```
#[inline]
pub fn are_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns `true` if both coordinates of `a` and `b` satisfy [`are_equals`].
#[inline]
pub fn points_equal(a: Point, b: Point) -> bool {
    are_equals(a.lambda_x(), b.lambda_x()) && are_equals(a.lambda_y(), b.lambda_y())
}

/// Rounds a lambda value to the nearest grid position, halves away from zero.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::units::*;
/// assert_eq!(round(0.5 / GRID), 1.0 / GRID);
/// assert_eq!(round(-0.5 / GRID), -1.0 / GRID);
/// assert_eq!(round(0.3 / GRID), 0.0);
/// ```
pub fn round(x: f64) -> f64 {
    round_to_grid(x) / GRID
}

/// Rounds a lambda value to a (possibly non-finite or huge) grid count.
pub(crate) fn round_to_grid(x: f64) -> f64 {
    if x >= 0. {
        (x * GRID + 0.5).floor()
    } else {
        -(-x * GRID + 0.5).floor()
    }
}

/// Converts a grid count to lambda units.
#[inline]
pub fn grid_to_lambda(grid: i64) -> f64 {
    grid as f64 / GRID
}

/// Converts a lambda value to the nearest grid count.
///
/// Fails if the snapped value is not finite or exceeds [`MAX_GRID`].
pub fn lambda_to_grid(lambda: f64) -> Result<i64> {
    checked_grid(round_to_grid(lambda))
}

/// Converts a lambda size to an even grid count.
///
/// Sizes are kept even so that they split symmetrically around a center.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::units::*;
/// assert_eq!(lambda_to_size_grid(1.0).unwrap(), 400);
/// assert_eq!(lambda_to_size_grid(3.0 / GRID).unwrap(), 4);
/// assert_eq!(lambda_to_size_grid(-3.0 / GRID).unwrap(), -4);
/// ```
pub fn lambda_to_size_grid(lambda: f64) -> Result<i64> {
    let half = lambda * 0.5;
    let half_grid = if half >= 0. {
        (half * GRID + 0.5).floor()
    } else {
        -(-half * GRID + 0.5).floor()
    };
    checked_grid(half_grid * 2.)
}

/// Saturates a rounded grid count into `[-MAX_GRID, MAX_GRID]`; NaN becomes 0.
pub(crate) fn clamp_grid(value: f64) -> i64 {
    if value.is_nan() {
        0
    } else {
        value.clamp(-(MAX_GRID as f64), MAX_GRID as f64) as i64
    }
}

pub(crate) fn checked_grid(value: f64) -> Result<i64> {
    if !value.is_finite() || value.abs() > MAX_GRID as f64 {
        return Err(Error::GridOverflow { value });
    }
    Ok(value as i64)
}

/// Rounds `a` to the nearest multiple of `nearest`.
pub fn to_nearest(a: f64, nearest: f64) -> f64 {
    (a / nearest).round() * nearest
}

/// Returns `true` if `a` and `b` differ by at most [`DBL_EPSILON`].
#[inline]
pub fn doubles_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= DBL_EPSILON
}

/// Returns `true` if `a` is less than `b` by more than [`DBL_EPSILON`].
#[inline]
pub fn doubles_less_than(a: f64, b: f64) -> bool {
    a + DBL_EPSILON < b
}

/// Returns `true` if `a` and `b` are within a ratio of 1e-5 or an absolute 1e-3.
pub fn doubles_close(a: f64, b: f64) -> bool {
    if b != 0. {
        let ratio = a / b;
        if ratio < 1.00001 && ratio > 0.99999 {
            return true;
        }
    }
    (a - b).abs() < 0.001
}

/// Returns `true` for quarter-turn rotations (900 or 2700).
#[inline]
pub fn is_ninety_degree_rotation(angle: i32) -> bool {
    angle == 900 || angle == 2700
}

lazy_static! {
    /// First-quadrant sines: entry `i` is the sine of `i` tenth-degrees.
    static ref SINE_TABLE: [f64; 901] = {
        let mut table = [0.; 901];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (i as f64 * PI / 1800.).sin();
        }
        table[900] = 1.;
        table
    };
}

/// Wraps a tenth-degree angle into `[0, 3600)`.
#[inline]
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(3600)
}

/// Sine of an angle in tenth-degrees, from the quadrant table.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::units::*;
/// assert_eq!(sin(900), 1.0);
/// assert_eq!(sin(1800), 0.0);
/// assert_eq!(sin(-900), -1.0);
/// ```
pub fn sin(angle: i32) -> f64 {
    let table = &*SINE_TABLE;
    let a = normalize_angle(angle) as usize;
    if a <= 900 {
        table[a]
    } else if a <= 1800 {
        table[1800 - a]
    } else if a <= 2700 {
        -table[a - 1800]
    } else {
        -table[3600 - a]
    }
}

/// Cosine of an angle in tenth-degrees, from the quadrant table.
pub fn cos(angle: i32) -> f64 {
    let table = &*SINE_TABLE;
    let a = normalize_angle(angle) as usize;
    if a <= 900 {
        table[900 - a]
    } else if a <= 1800 {
        -table[a - 900]
    } else if a <= 2700 {
        -table[2700 - a]
    } else {
        table[a - 2700]
    }
}

/// Angle from `(x1, y1)` to `(x2, y2)` in radians, in `[0, 2π)`.
///
/// Coincident points have angle 0.
pub(crate) fn angle_radians_xy(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0. && dy == 0. {
        tracing::trace!(x1, y1, "angle requested between coincident points");
        return 0.;
    }
    let ang = dy.atan2(dx);
    if ang < 0. {
        ang + PI * 2.
    } else {
        ang
    }
}

pub(crate) fn angle_xy(x1: f64, y1: f64, x2: f64, y2: f64) -> i32 {
    let angle = angle_radians_xy(x1, y1, x2, y2);
    let i_angle = (angle * 1800. / PI + 0.5) as i32;
    if i_angle >= 3600 {
        i_angle - 3600
    } else {
        i_angle
    }
}

/// Angle from `end1` to `end2` in tenth-degrees, in `[0, 3600)`.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// # use geometry_kernel::units::figure_angle;
/// let a = Point::new(0, 0);
/// assert_eq!(figure_angle(a, Point::new(0, 10)), 900);
/// assert_eq!(figure_angle(a, Point::new(-10, 0)), 1800);
/// assert_eq!(figure_angle(a, Point::new(10, -10)), 3150);
/// ```
pub fn figure_angle(end1: Point, end2: Point) -> i32 {
    angle_xy(end1.lambda_x(), end1.lambda_y(), end2.lambda_x(), end2.lambda_y())
}

/// Angle from `end1` to `end2` in radians, in `[0, 2π)`.
pub fn figure_angle_radians(end1: Point, end2: Point) -> f64 {
    angle_radians_xy(end1.lambda_x(), end1.lambda_y(), end2.lambda_x(), end2.lambda_y())
}

/// Solves the line equations `a x + b y + c = 0` of two lines through the given points.
fn solve_lines(
    (fa1, fb1, fc1): (f64, f64, f64),
    (fa2, fb2, fc2): (f64, f64, f64),
) -> (f64, f64) {
    let (fa1, fb1, fc1, fa2, fb2, fc2) = if fa1.abs() < fa2.abs() {
        (fa2, fb2, fc2, fa1, fb1, fc1)
    } else {
        (fa1, fb1, fc1, fa2, fb2, fc2)
    };
    let fy = (fa2 * fc1 / fa1 - fc2) / (fb2 - fa2 * fb1 / fa1);
    ((-fb1 * fy - fc1) / fa1, fy)
}

pub(crate) fn intersect_xy(
    (x1, y1): (f64, f64),
    ang1: i32,
    (x2, y2): (f64, f64),
    ang2: i32,
) -> Option<(f64, f64)> {
    let ang1 = normalize_angle(ang1);
    let ang2 = normalize_angle(ang2);
    if ang1 == ang2 || ang1.min(ang2) + 1800 == ang1.max(ang2) {
        return None;
    }
    let line = |x: f64, y: f64, ang: i32| {
        let fa = sin(ang);
        let fb = -cos(ang);
        (fa, fb, -fa * x - fb * y)
    };
    Some(solve_lines(line(x1, y1, ang1), line(x2, y2, ang2)))
}

/// Intersects the line through `p1` at `ang1` with the line through `p2` at `ang2`.
///
/// Returns [`None`] when the lines are parallel or anti-parallel; this is a defined
/// "no unique intersection" outcome rather than an error.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// # use geometry_kernel::units::intersect;
/// let p = intersect(Point::new(0, 0), 0, Point::new(400, -400), 900).unwrap();
/// assert_eq!(p, Point::new(400, 0));
/// assert_eq!(intersect(Point::new(0, 0), 450, Point::new(10, 0), 2250), None);
/// ```
pub fn intersect(p1: Point, ang1: i32, p2: Point, ang2: i32) -> Option<Point> {
    let (x, y) = intersect_xy(p1.lambda(), ang1, p2.lambda(), ang2)?;
    Some(Point::from_lambda_clamped(x, y))
}

/// Intersects two lines whose angles are given in radians.
pub fn intersect_radians(p1: Point, ang1: f64, p2: Point, ang2: f64) -> Option<Point> {
    if doubles_equal(ang1, ang2) {
        return None;
    }
    if doubles_equal(ang1.min(ang2) + PI, ang1.max(ang2)) {
        return None;
    }
    let line = |p: Point, ang: f64| {
        let fa = ang.sin();
        let fb = -ang.cos();
        (fa, fb, -fa * p.lambda_x() - fb * p.lambda_y())
    };
    let (x, y) = solve_lines(line(p1, ang1), line(p2, ang2));
    Some(Point::from_lambda_clamped(x, y))
}

/// Returns `true` if `pt` lies on the segment from `end1` to `end2`.
///
/// The test is exact on grid coordinates.
pub fn is_on_line(end1: Point, end2: Point, pt: Point) -> bool {
    let (x1, y1) = end1.grid();
    let (x2, y2) = end2.grid();
    let (x, y) = pt.grid();
    if x < x1.min(x2) || x > x1.max(x2) || y < y1.min(y2) || y > y1.max(y2) {
        return false;
    }
    if x1 == x2 {
        return x == x1;
    }
    if y1 == y2 {
        return y == y1;
    }
    (x - x1) as i128 * (y2 - y1) as i128 == (y - y1) as i128 * (x2 - x1) as i128
}

pub(crate) fn closest_to_line_xy(
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
    (x, y): (f64, f64),
) -> (f64, f64) {
    if y1 == y2 {
        return (x, y1);
    }
    if x1 == x2 {
        return (x1, y);
    }
    let m = (y1 - y2) / (x1 - x2);
    let b = -x1 * m + y1;
    let mi = -1. / m;
    let bi = -x * mi + y;
    let t = (bi - b) / (m - mi);
    (t, m * t + b)
}

pub(crate) fn closest_to_segment_xy(
    p1: (f64, f64),
    p2: (f64, f64),
    pt: (f64, f64),
) -> (f64, f64) {
    let (ix, iy) = closest_to_line_xy(p1, p2, pt);
    if ix >= p1.0.min(p2.0) && ix <= p1.0.max(p2.0) && iy >= p1.1.min(p2.1) && iy <= p1.1.max(p2.1)
    {
        return (ix, iy);
    }
    let d1 = (pt.0 - p1.0).hypot(pt.1 - p1.1);
    let d2 = (pt.0 - p2.0).hypot(pt.1 - p2.1);
    if d2 < d1 {
        p2
    } else {
        p1
    }
}

/// Finds the point of the infinite line through `p1` and `p2` closest to `pt`.
pub fn closest_point_to_line(p1: Point, p2: Point, pt: Point) -> Point {
    let (x, y) = closest_to_line_xy(p1.lambda(), p2.lambda(), pt.lambda());
    Point::from_lambda_clamped(x, y)
}

/// Finds the point of the segment from `p1` to `p2` closest to `pt`.
///
/// The result always lies between the two segment ends.
pub fn closest_point_to_segment(p1: Point, p2: Point, pt: Point) -> Point {
    let (x, y) = closest_to_segment_xy(p1.lambda(), p2.lambda(), pt.lambda());
    Point::from_lambda_clamped(x, y)
}

pub(crate) fn dist_to_line_xy(l1: (f64, f64), l2: (f64, f64), pt: (f64, f64)) -> f64 {
    let (x1, y1) = l1;
    let (x2, y2) = l2;
    if doubles_equal(x1, x2) && doubles_equal(y1, y2) {
        return (pt.0 - x1).hypot(pt.1 - y1);
    }
    let ang = angle_xy(x1, y1, x2, y2);
    let Some((mut ix, mut iy)) = intersect_xy(l1, ang, pt, ang + 900) else {
        return (pt.0 - x1).hypot(pt.1 - y1);
    };
    if doubles_equal(x1, x2) {
        ix = x1;
    }
    if doubles_equal(y1, y2) {
        iy = y1;
    }
    if ix < x1.min(x2) || ix > x1.max(x2) || iy < y1.min(y2) || iy > y1.max(y2) {
        if (ix - x1).abs() + (iy - y1).abs() < (ix - x2).abs() + (iy - y2).abs() {
            (ix, iy) = (x1, y1);
        } else {
            (ix, iy) = (x2, y2);
        }
    }
    (ix - pt.0).hypot(iy - pt.1)
}

/// Distance from `pt` to the segment from `l1` to `l2`, in lambda units.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// # use geometry_kernel::units::dist_to_line;
/// let d = dist_to_line(Point::new(0, 0), Point::new(4000, 0), Point::new(2000, 800));
/// assert!((d - 2.0).abs() < 1e-9);
/// ```
pub fn dist_to_line(l1: Point, l2: Point, pt: Point) -> f64 {
    dist_to_line_xy(l1.lambda(), l2.lambda(), pt.lambda())
}

/// Absolute area enclosed by a closed point sequence, in square lambda units.
pub fn area_of_points(points: &[Point]) -> f64 {
    let Some(first) = points.first() else {
        return 0.;
    };
    let (mut x0, mut y0) = first.lambda();
    let mut y1 = 0.;
    let mut area = 0.;
    for p in &points[1..] {
        let (x1, y) = p.lambda();
        y1 = y;
        area += (x1 - x0) * (y0 + y1) / 2.;
        x0 = x1;
        y0 = y1;
    }
    area += (first.lambda_x() - x0) * (first.lambda_y() + y1) / 2.;
    area.abs()
}

fn quadrant(x: f64, y: f64) -> u8 {
    if x > 0. {
        if y >= 0. {
            1
        } else {
            4
        }
    } else if y > 0. {
        2
    } else {
        3
    }
}

/// Bounding box of the arc centered at `c` running clockwise from `s` to `e`.
///
/// Endpoints in the same quadrant bound a full circle when the clockwise sweep wraps around.
pub fn arc_bbox(s: Point, e: Point, c: Point) -> MutableBox {
    let (cx, cy) = c.lambda();
    let radius = c.distance(s);
    let (mut lx, mut ly, mut hx, mut hy) = (cx - radius, cy - radius, cx + radius, cy + radius);

    let (x1, y1) = (s.lambda_x() - cx, s.lambda_y() - cy);
    let (x2, y2) = (e.lambda_x() - cx, e.lambda_y() - cy);
    let q1 = quadrant(x1, y1);
    let q2 = quadrant(x2, y2);

    if q1 == q2 {
        let full_circle = if q1 == 1 || q1 == 2 { x1 > x2 } else { x1 < x2 };
        if full_circle {
            return MutableBox::from_sides(lx, ly, hx, hy);
        }
        return MutableBox::from_sides(
            s.lambda_x().min(e.lambda_x()),
            s.lambda_y().min(e.lambda_y()),
            s.lambda_x().max(e.lambda_x()),
            s.lambda_y().max(e.lambda_y()),
        );
    }

    match (q1, q2) {
        (1, 2) => hy = y1.max(y2) + cy,
        (1, 3) => {
            lx = x2 + cx;
            hy = y1 + cy;
        }
        (1, 4) => {
            lx = x1.min(x2) + cx;
            ly = y2 + cy;
            hy = y1 + cy;
        }
        (2, 1) => {
            lx = x1 + cx;
            ly = y1.min(y2) + cy;
            hx = x2 + cx;
        }
        (2, 3) => lx = x1.min(x2) + cx,
        (2, 4) => {
            lx = x1 + cx;
            ly = y2 + cy;
        }
        (3, 1) => {
            ly = y1 + cy;
            hx = x2 + cx;
        }
        (3, 2) => {
            ly = y1 + cy;
            hx = x1.max(x2) + cx;
            hy = y2 + cy;
        }
        (3, 4) => ly = y1.min(y2) + cy,
        (4, 1) => hx = x1.max(x2) + cx,
        (4, 2) => {
            hx = x1 + cx;
            hy = y2 + cy;
        }
        (4, 3) => {
            lx = x2 + cx;
            hx = x1 + cx;
            hy = y1.max(y2) + cy;
        }
        _ => {}
    }
    MutableBox::from_sides(lx, ly, hx, hy)
}

/// Finds the centers of the two circles of radius `r` passing through `p1` and `p2`,
/// which are a distance `d` apart.
///
/// Returns [`None`] for coincident points or when the points are too far apart.
pub fn find_centers(r: f64, p1: Point, p2: Point, d: f64) -> Option<[Point; 2]> {
    if p1 == p2 {
        return None;
    }
    let (x01, y01) = p1.lambda();
    let (x02, y02) = p2.lambda();
    let r2 = r * r;
    let delta_1 = -d / 2.;
    let delta_12 = delta_1 * delta_1;
    if r2 < delta_12 {
        return None;
    }
    let delta_2 = (r2 - delta_12).sqrt();
    let x1 = x02 + ((delta_1 * (x02 - x01)) + (delta_2 * (y02 - y01))) / d;
    let y1 = y02 + ((delta_1 * (y02 - y01)) + (delta_2 * (x01 - x02))) / d;
    let x2 = x02 + ((delta_1 * (x02 - x01)) + (delta_2 * (y01 - y02))) / d;
    let y2 = y02 + ((delta_1 * (y02 - y01)) + (delta_2 * (x02 - x01))) / d;
    Some([
        Point::from_lambda_clamped(x1, y1),
        Point::from_lambda_clamped(x2, y2),
    ])
}

fn arc_angle(r: f64, dx: f64, dy: f64) -> f64 {
    let ratio = 1800. / PI;
    let a1 = (dx / r).clamp(-1., 1.).acos() * ratio;
    let a2 = (dy / r).clamp(-1., 1.).asin() * ratio;
    if a2 < 0. {
        3600. - a1
    } else {
        a1
    }
}

/// Returns the midpoint of the arc centered at `c` running from `p1` to `p2`.
pub fn compute_arc_center(c: Point, p1: Point, p2: Point) -> Point {
    let radius = p1.distance(c);
    let (cx, cy) = c.lambda();
    let mut a1 = arc_angle(radius, p1.lambda_x() - cx, p1.lambda_y() - cy);
    let a2 = arc_angle(radius, p2.lambda_x() - cx, p2.lambda_y() - cy);
    if a1 < a2 {
        a1 += 3600.;
    }
    let theta = (a1 + a2) / 2. * PI / 1800.;
    Point::from_lambda_clamped(cx + radius * theta.cos(), cy + radius * theta.sin())
}

/// Returns `true` if `pt` lies inside or on the boundary of `bounds`.
#[inline]
pub fn point_in_rect(pt: Point, bounds: &impl Rectangular) -> bool {
    xy_in_rect(pt.lambda(), bounds)
}

pub(crate) fn xy_in_rect((x, y): (f64, f64), bounds: &impl Rectangular) -> bool {
    x >= bounds.min_x() && x <= bounds.max_x() && y >= bounds.min_y() && y <= bounds.max_y()
}

/// Returns `true` if two boxes overlap or touch.
#[inline]
pub fn rects_intersect(r1: &impl Rectangular, r2: &impl Rectangular) -> bool {
    !(r2.max_x() < r1.min_x()
        || r2.min_x() > r1.max_x()
        || r2.max_y() < r1.min_y()
        || r2.min_y() > r1.max_y())
}

/// Bit set of the quadrants around `(center_x, center_y)` that `bounds` reaches into.
///
/// Bit 0 is low-x/low-y, bit 1 high-x/low-y, bit 2 low-x/high-y and bit 3 high-x/high-y.
/// A box edge lying on a center line does not reach across it.
pub fn get_quadrants(center_x: f64, center_y: f64, bounds: &impl Rectangular) -> u8 {
    let mut loc = 0;
    if bounds.min_y() < center_y {
        if bounds.min_x() < center_x {
            loc |= 1 << 0;
        }
        if bounds.max_x() > center_x {
            loc |= 1 << 1;
        }
    }
    if bounds.max_y() > center_y {
        if bounds.min_x() < center_x {
            loc |= 1 << 2;
        }
        if bounds.max_x() > center_x {
            loc |= 1 << 3;
        }
    }
    loc
}

/// Replaces `bounds` with the bounding box of its transformed corners.
///
/// The box is modified in place. Immutable boxes report
/// [`Error::ImmutableValue`].
pub fn transform_rect<R: Rectangular + SetRect>(
    bounds: &mut R,
    xform: &Transformation,
) -> Result<()> {
    if xform.is_identity() {
        return Ok(());
    }
    let corners = [
        (bounds.min_x(), bounds.min_y()),
        (bounds.max_x(), bounds.min_y()),
        (bounds.max_x(), bounds.max_y()),
        (bounds.min_x(), bounds.max_y()),
    ]
    .map(|(x, y)| xform.apply(x, y));
    let mut out = MutableBox::from_point(corners[0].0, corners[0].1);
    for &(x, y) in &corners[1..] {
        out.include(x, y);
    }
    bounds.set_rect(out.min_x(), out.min_y(), out.width(), out.height())
}
