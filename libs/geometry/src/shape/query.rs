//! Containment, distance and measurement queries.

use std::f64::consts::PI;

use crate::clip::clip_line;
use crate::point::Point;
use crate::rect::{Rect, Rectangular};
use crate::style::{AreaFill, CircleFill};
use crate::units::{
    angle_radians_xy, angle_xy, are_equals, area_of_points, closest_to_segment_xy,
    dist_to_line_xy, figure_angle, is_on_line, point_in_rect, points_equal, rects_intersect,
    xy_in_rect,
};

use super::{Shape, ShapeKind};

/// Distance reported by [`Shape::poly_distance`] when the shape touches the other object.
pub const TOUCHING: f64 = f64::MIN_POSITIVE;

/// Straight segments used to stand in for curves in edge queries.
const CURVE_SEGMENTS: usize = 32;

type Xy = (f64, f64);

/// Distance between two lambda positions. Axis-aligned pairs skip the square root.
pub(crate) fn distance_xy(a: Xy, b: Xy) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    if dx == 0. {
        dy.abs()
    } else if dy == 0. {
        dx.abs()
    } else {
        dx.hypot(dy)
    }
}

/// The edges of a closed ring, starting with the closing edge.
fn closed_edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[(i + n - 1) % n], points[i]))
}

fn open_edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points.windows(2).map(|w| (w[0], w[1]))
}

/// Vertices of a regular polygon approximating a circle, counter-clockwise from angle 0.
pub(crate) fn circle_points(center: Point, radius: f64, segments: usize) -> Vec<Point> {
    let (cx, cy) = center.lambda();
    (0..segments)
        .map(|i| {
            let a = 2. * PI * i as f64 / segments as f64;
            Point::from_lambda_clamped(cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

/// Polyline approximating the counter-clockwise arc from `start` to `end`.
///
/// [`ShapeKind::Arc`] runs clockwise, so callers pass its ends swapped.
fn arc_points(center: Point, start: Point, end: Point, segments: usize) -> Vec<Point> {
    let (cx, cy) = center.lambda();
    let radius = center.distance(start);
    let a0 = angle_radians_xy(cx, cy, start.lambda_x(), start.lambda_y());
    let a1 = angle_radians_xy(cx, cy, end.lambda_x(), end.lambda_y());
    let sweep = (a1 - a0).rem_euclid(2. * PI);
    let mut out = vec![start];
    for i in 1..segments {
        let a = a0 + sweep * i as f64 / segments as f64;
        out.push(Point::from_lambda_clamped(
            cx + radius * a.cos(),
            cy + radius * a.sin(),
        ));
    }
    out.push(end);
    out
}

/// Sign of the cross product `(b - a) x (c - a)`, exact on grid values.
fn orient(a: Point, b: Point, c: Point) -> i8 {
    let (ax, ay) = (a.grid_x() as i128, a.grid_y() as i128);
    let cross = (b.grid_x() as i128 - ax) * (c.grid_y() as i128 - ay)
        - (b.grid_y() as i128 - ay) * (c.grid_x() as i128 - ax);
    cross.signum() as i8
}

/// Returns `true` if the closed segments `p1-q1` and `p2-q2` share a point.
pub(crate) fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orient(p1, q1, p2);
    let o2 = orient(p1, q1, q2);
    let o3 = orient(p2, q2, p1);
    let o4 = orient(p2, q2, q1);
    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && is_on_line(p1, q1, p2))
        || (o2 == 0 && is_on_line(p1, q1, q2))
        || (o3 == 0 && is_on_line(p2, q2, p1))
        || (o4 == 0 && is_on_line(p2, q2, q1))
}

impl Shape {
    /// Returns `true` if `pt` lies inside or on this shape.
    ///
    /// Polygons and text test boxes directly and everything else by summing the angles
    /// subtended by successive vertices; the point is inside when the absolute sum, in
    /// tenth-degrees, exceeds the vertex count. Points on an edge or at a vertex are inside.
    /// Crosses contain only their center, polylines only their vertices and edges, circles
    /// the points strictly closer than the radius, and arcs the points on the swept curve.
    pub fn is_inside(&self, pt: Point) -> bool {
        match &self.kind {
            ShapeKind::Area { points, .. } | ShapeKind::Text { points, .. } => {
                self.polygon_contains(points, pt)
            }
            ShapeKind::Cross { .. } => {
                let b = self.bounds();
                are_equals(b.center_x(), pt.lambda_x()) && are_equals(b.center_y(), pt.lambda_y())
            }
            ShapeKind::Path { points, .. } => {
                points.iter().any(|&p| points_equal(p, pt))
                    || open_edges(points).any(|(a, b)| is_on_line(a, b, pt))
            }
            ShapeKind::Vectors { segments } => segments.iter().any(|&[a, b]| {
                points_equal(a, pt) || points_equal(b, pt) || is_on_line(a, b, pt)
            }),
            ShapeKind::Circle { center, edge, .. } => center.distance(pt) < center.distance(*edge),
            ShapeKind::Arc {
                center, start, end, ..
            } => arc_contains(*center, *end, *start, pt),
        }
    }

    fn polygon_contains(&self, points: &[Point], pt: Point) -> bool {
        if let Some(b) = self.get_box() {
            if point_in_rect(pt, &b) {
                return true;
            }
            return b.grid_width() == 0 && b.grid_height() == 0 && points_equal(pt, b.lower_left());
        }

        let Some(&first_last) = points.last() else {
            return false;
        };
        if points_equal(pt, first_last) {
            return true;
        }
        let mut last = first_last;
        let mut last_angle = figure_angle(pt, last);
        let mut sum: i64 = 0;
        for &this in points {
            if points_equal(pt, this) || is_on_line(this, last, pt) {
                return true;
            }
            let this_angle = figure_angle(pt, this);
            let mut turn = last_angle - this_angle;
            if turn < -1800 {
                turn += 3600;
            }
            if turn > 1800 {
                turn -= 3600;
            }
            sum += turn as i64;
            last_angle = this_angle;
            last = this;
        }
        sum.abs() > points.len() as i64
    }

    /// Returns `true` if the whole shape lies inside `bounds`, boundary included.
    ///
    /// Circles are tested by their bounding square.
    pub fn is_inside_rect(&self, bounds: &impl Rectangular) -> bool {
        if let ShapeKind::Circle { center, edge, .. } = &self.kind {
            let (cx, cy) = center.lambda();
            let rad = (cx - edge.lambda_x())
                .abs()
                .max((cy - edge.lambda_y()).abs());
            return xy_in_rect((cx + rad, cy + rad), bounds)
                && xy_in_rect((cx - rad, cy - rad), bounds);
        }
        self.points().into_iter().all(|p| point_in_rect(p, bounds))
    }

    /// Returns `true` if `pt` equals one of the shape's points, within [`are_equals`].
    pub fn is_point_on_corner(&self, pt: Point) -> bool {
        self.points().into_iter().any(|p| points_equal(p, pt))
    }

    /// Distance from this shape to the box `other`, in lambda units.
    ///
    /// A zero-size box is treated as a point. Direct hits on filled shapes return a large
    /// negative value that still orders hits by their distance to the shape's center.
    /// Shapes touching a box of positive size report [`TOUCHING`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let s = Shape::from_rect(&Rect::from_grid(0, 0, 400, 400).unwrap(), AreaFill::Filled);
    /// assert!(s.poly_distance_to_point(Point::new(200, 200)) < 0.0);
    /// assert_eq!(s.poly_distance_to_point(Point::new(800, 400)), 1.0);
    /// assert_eq!(s.poly_distance(&Rect::from_grid(400, 400, 800, 800).unwrap()), TOUCHING);
    /// ```
    pub fn poly_distance(&self, other: &impl Rectangular) -> f64 {
        let bounds = self.bounds();
        let poly_center = (bounds.center_x(), bounds.center_y());
        let this_is_point = bounds.width() == 0. && bounds.height() == 0.;
        let other_is_point = other.width() == 0. && other.height() == 0.;
        let other_pt = (other.center_x(), other.center_y());
        let to_center = distance_xy(other_pt, poly_center);

        if this_is_point {
            if other_is_point {
                if poly_center == other_pt {
                    return TOUCHING;
                }
            } else if xy_in_rect(poly_center, other) {
                return TOUCHING;
            }
            return to_center;
        }

        let edges: Vec<(Point, Point)> = match &self.kind {
            ShapeKind::Area {
                fill: AreaFill::Closed,
                points,
            } => closed_edges(points).collect(),
            ShapeKind::Area { points, .. } | ShapeKind::Text { points, .. } => {
                if !other_is_point {
                    return if rects_intersect(other, &bounds) {
                        TOUCHING
                    } else {
                        to_center
                    };
                }
                let pt = Point::from_lambda_clamped(other_pt.0, other_pt.1);
                if self.is_inside(pt) {
                    return to_center - f64::MAX;
                }
                if let Some(b) = self.get_box() {
                    let dx = if other_pt.0 > b.max_x() {
                        other_pt.0 - b.max_x()
                    } else if other_pt.0 < b.min_x() {
                        b.min_x() - other_pt.0
                    } else {
                        0.
                    };
                    let dy = if other_pt.1 > b.max_y() {
                        other_pt.1 - b.max_y()
                    } else if other_pt.1 < b.min_y() {
                        b.min_y() - other_pt.1
                    } else {
                        0.
                    };
                    if dx == 0. || dy == 0. {
                        return dx + dy;
                    }
                    return dx.hypot(dy);
                }
                closed_edges(points).collect()
            }
            ShapeKind::Path { points, .. } => open_edges(points).collect(),
            ShapeKind::Vectors { segments } => segments.iter().map(|&[a, b]| (a, b)).collect(),
            ShapeKind::Circle {
                fill,
                center,
                edge,
            } => {
                let radius = center.distance(*edge);
                let dist = distance_xy(center.lambda(), other_pt);
                if other_is_point {
                    if *fill == CircleFill::Disc && dist < radius {
                        return dist - f64::MAX;
                    }
                    return (dist - radius).abs();
                }
                return if rects_intersect(other, &bounds) {
                    TOUCHING
                } else {
                    dist - radius
                };
            }
            ShapeKind::Arc {
                center, start, end, ..
            } => {
                let radius = center.distance(*start);
                if !other_is_point {
                    let clipped =
                        self.clip_arc(other.min_x(), other.max_x(), other.min_y(), other.max_y());
                    if !clipped.is_empty() {
                        return TOUCHING;
                    }
                    return distance_xy(center.lambda(), other_pt) - radius;
                }
                let (cx, cy) = center.lambda();
                let sang = angle_xy(cx, cy, start.lambda_x(), start.lambda_y());
                let eang = angle_xy(cx, cy, end.lambda_x(), end.lambda_y());
                let pang = angle_xy(cx, cy, other_pt.0, other_pt.1);
                if !in_sweep(eang, sang, pang) {
                    return distance_xy(other_pt, start.lambda())
                        .min(distance_xy(other_pt, end.lambda()));
                }
                return (distance_xy(center.lambda(), other_pt) - radius).abs();
            }
            ShapeKind::Cross { .. } => return to_center,
        };

        if !other_is_point {
            return if rects_intersect(other, &bounds) {
                TOUCHING
            } else {
                to_center
            };
        }
        edges
            .into_iter()
            .map(|(a, b)| dist_to_line_xy(a.lambda(), b.lambda(), other_pt))
            .fold(f64::MAX, f64::min)
    }

    /// Distance from this shape to a point. See [`Shape::poly_distance`].
    pub fn poly_distance_to_point(&self, pt: Point) -> f64 {
        self.poly_distance(&Rect::from_point(pt))
    }

    /// Distance between the boxes of two box shapes, or [`None`] if either is not a box.
    ///
    /// Diagonally separated boxes report the corner-to-corner distance; overlapping boxes a
    /// negative overlap depth.
    pub fn separation_box(&self, other: &Shape) -> Option<f64> {
        let a = self.get_box()?;
        let b = other.get_box()?;
        let dx = (b.min_x() - a.max_x()).max(a.min_x() - b.max_x());
        let dy = (b.min_y() - a.max_y()).max(a.min_y() - b.max_y());
        if dx > 0. && dy > 0. {
            Some(dx.hypot(dy))
        } else {
            Some(dx.max(dy))
        }
    }

    /// Smallest distance between this shape and `other`, 0 if they touch.
    ///
    /// Measures every vertex of each shape to the closest point of the other, then keeps the
    /// box separation if that is smaller.
    pub fn separation(&self, other: &Shape) -> f64 {
        if self.intersects(other) {
            return 0.;
        }
        let mut best = f64::MAX;
        for (from, to) in [(self, other), (other, self)] {
            for p in from.points() {
                let c = to.closest_point_xy(p.lambda());
                let d = distance_xy(c, p.lambda());
                if d <= 0. {
                    return 0.;
                }
                best = best.min(d);
            }
        }
        match self.separation_box(other) {
            Some(d) if d < best => d,
            _ => best,
        }
    }

    /// The point of this shape closest to `pt`, snapped to the grid.
    ///
    /// Filled polygons return `pt` itself when it is inside. Circles, arcs and crosses
    /// answer with the center of their bounds.
    pub fn closest_point(&self, pt: Point) -> Point {
        let (x, y) = self.closest_point_xy(pt.lambda());
        Point::from_lambda_clamped(x, y)
    }

    pub(crate) fn closest_point_xy(&self, pt: Xy) -> Xy {
        let edges: Vec<(Point, Point)> = match &self.kind {
            ShapeKind::Area {
                fill: AreaFill::Closed,
                points,
            } => closed_edges(points).collect(),
            ShapeKind::Area { fill, points } => {
                if let Some(b) = self.get_box() {
                    return clamp_to(pt, &b);
                }
                if *fill == AreaFill::Filled
                    && self.is_inside(Point::from_lambda_clamped(pt.0, pt.1))
                {
                    return pt;
                }
                closed_edges(points).collect()
            }
            ShapeKind::Text { points, .. } => {
                if let Some(b) = self.get_box() {
                    return clamp_to(pt, &b);
                }
                closed_edges(points).collect()
            }
            ShapeKind::Path { points, .. } => open_edges(points).collect(),
            ShapeKind::Vectors { segments } => segments.iter().map(|&[a, b]| (a, b)).collect(),
            ShapeKind::Circle { .. } | ShapeKind::Arc { .. } | ShapeKind::Cross { .. } => {
                let b = self.bounds();
                return (b.center_x(), b.center_y());
            }
        };
        let mut best = f64::MAX;
        let mut best_point = pt;
        for (a, b) in edges {
            let c = closest_to_segment_xy(a.lambda(), b.lambda(), pt);
            let d = distance_xy(c, pt);
            if d > best {
                continue;
            }
            best = d;
            best_point = c;
        }
        best_point
    }

    /// Returns `true` if `rect` lies entirely inside this shape.
    ///
    /// All four corners must be inside, and no edge of the shape may cut through the
    /// interior of `rect`.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if !rect.corners().into_iter().all(|c| self.is_inside(c)) {
            return false;
        }
        let (lx, hx, ly, hy) = (rect.min_x(), rect.max_x(), rect.min_y(), rect.max_y());
        let points = self.points();
        for (last, this) in closed_edges(&points) {
            let mut from = [last.lambda_x(), last.lambda_y()];
            let mut to = [this.lambda_x(), this.lambda_y()];
            if clip_line(&mut from, &mut to, lx, hx, ly, hy) {
                continue;
            }
            // A visible edge is only allowed along the box boundary.
            if from[0] == to[0] {
                if from[1] == to[1] {
                    if to[0] <= lx || to[0] >= hx || to[1] <= ly || to[1] >= hy {
                        continue;
                    }
                } else if to[0] <= lx || to[0] >= hx {
                    continue;
                }
            }
            if from[1] == to[1] && (to[1] <= ly || to[1] >= hy) {
                continue;
            }
            return false;
        }
        true
    }

    /// Returns `true` if this shape and `rect` share any point.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let bounds = self.bounds();
        if !rects_intersect(&bounds, rect) {
            return false;
        }
        let (lx, hx, ly, hy) = (rect.min_x(), rect.max_x(), rect.min_y(), rect.max_y());
        let visible = |(a, b): (Point, Point)| {
            let mut from = [a.lambda_x(), a.lambda_y()];
            let mut to = [b.lambda_x(), b.lambda_y()];
            !clip_line(&mut from, &mut to, lx, hx, ly, hy)
        };
        match &self.kind {
            ShapeKind::Area { points, .. } | ShapeKind::Text { points, .. } => {
                closed_edges(points).any(visible) || self.is_inside(rect.center())
            }
            ShapeKind::Path { points, .. } => {
                points.iter().any(|&p| point_in_rect(p, rect)) || open_edges(points).any(visible)
            }
            ShapeKind::Vectors { segments } => segments.iter().any(|&[a, b]| visible((a, b))),
            ShapeKind::Cross { .. } => xy_in_rect((bounds.center_x(), bounds.center_y()), rect),
            ShapeKind::Circle {
                fill,
                center,
                edge,
            } => {
                let radius = center.distance(*edge);
                let c = center.lambda();
                let nearest = distance_xy(c, clamp_to(c, rect));
                if *fill == CircleFill::Disc {
                    return nearest <= radius;
                }
                let farthest = rect
                    .corners()
                    .into_iter()
                    .map(|p| distance_xy(c, p.lambda()))
                    .fold(0., f64::max);
                nearest <= radius && farthest >= radius
            }
            ShapeKind::Arc { .. } => !self.clip_arc(lx, hx, ly, hy).is_empty(),
        }
    }

    /// The straight edges of this shape; curves are approximated.
    pub(crate) fn edges(&self) -> Vec<(Point, Point)> {
        match &self.kind {
            ShapeKind::Area { points, .. }
            | ShapeKind::Text { points, .. }
            | ShapeKind::Cross { points, .. } => closed_edges(points).collect(),
            ShapeKind::Path { points, .. } => open_edges(points).collect(),
            ShapeKind::Vectors { segments } => segments.iter().map(|&[a, b]| (a, b)).collect(),
            ShapeKind::Circle { center, edge, .. } => {
                closed_edges(&circle_points(*center, center.distance(*edge), CURVE_SEGMENTS))
                    .collect()
            }
            ShapeKind::Arc {
                center, start, end, ..
            } => open_edges(&arc_points(*center, *end, *start, CURVE_SEGMENTS)).collect(),
        }
    }

    /// Returns `true` if an edge of this shape meets an edge of `other`.
    ///
    /// Only the outlines are compared: a shape lying wholly inside another does not intersect
    /// it. Curves are compared through their polygonal approximation.
    pub fn intersects(&self, other: &Shape) -> bool {
        let b1 = self.bounds();
        let b2 = other.bounds();
        if !rects_intersect(&b1, &b2) {
            return false;
        }
        let theirs = other.edges();
        self.edges().into_iter().any(|(p1, q1)| {
            let lo = (p1.lambda_x().min(q1.lambda_x()), p1.lambda_y().min(q1.lambda_y()));
            let hi = (p1.lambda_x().max(q1.lambda_x()), p1.lambda_y().max(q1.lambda_y()));
            if lo.0 > b2.max_x() || hi.0 < b2.min_x() || lo.1 > b2.max_y() || hi.1 < b2.min_y() {
                return false;
            }
            theirs
                .iter()
                .any(|&(p2, q2)| segments_intersect(p1, q1, p2, q2))
        })
    }

    /// The length of the outline, in lambda units.
    ///
    /// Closed shapes include their closing edge, vector lists sum their segments, circles
    /// measure their circumference and arcs their swept length.
    pub fn perimeter(&self) -> f64 {
        match &self.kind {
            ShapeKind::Circle { center, edge, .. } => 2. * PI * center.distance(*edge),
            ShapeKind::Arc {
                center, start, end, ..
            } => center.distance(*start) * sweep_radians(*center, *end, *start),
            _ => self.edges().into_iter().map(|(a, b)| a.distance(b)).sum(),
        }
    }

    /// The length of the longest straight edge, in lambda units.
    ///
    /// Circles report their diameter and arcs the chord between their ends.
    pub fn max_length(&self) -> f64 {
        match &self.kind {
            ShapeKind::Circle { center, edge, .. } => 2. * center.distance(*edge),
            ShapeKind::Arc { start, end, .. } => start.distance(*end),
            _ => self
                .edges()
                .into_iter()
                .map(|(a, b)| a.distance(b))
                .fold(0., f64::max),
        }
    }

    /// The enclosed area in square lambda units.
    ///
    /// Only polygons and text enclose area; every other style reports 0.
    pub fn area(&self) -> f64 {
        match &self.kind {
            ShapeKind::Area { points, .. } | ShapeKind::Text { points, .. } => {
                match self.get_box() {
                    Some(b) => b.area().abs(),
                    None => area_of_points(points),
                }
            }
            _ => 0.,
        }
    }
}

fn clamp_to(pt: Xy, r: &impl Rectangular) -> Xy {
    (
        pt.0.clamp(r.min_x(), r.max_x()),
        pt.1.clamp(r.min_y(), r.max_y()),
    )
}

/// Returns `true` if tenth-degree angle `ang` is within the counter-clockwise sweep from
/// `start` to `end`. Equal ends sweep the full circle.
fn in_sweep(start: i32, end: i32, ang: i32) -> bool {
    if end > start {
        ang >= start && ang <= end
    } else {
        ang >= start || ang <= end
    }
}

fn sweep_radians(center: Point, start: Point, end: Point) -> f64 {
    let (cx, cy) = center.lambda();
    let a0 = angle_radians_xy(cx, cy, start.lambda_x(), start.lambda_y());
    let a1 = angle_radians_xy(cx, cy, end.lambda_x(), end.lambda_y());
    (a1 - a0).rem_euclid(2. * PI)
}

fn arc_contains(center: Point, start: Point, end: Point, pt: Point) -> bool {
    let ang = figure_angle(center, pt);
    let sang = figure_angle(center, start);
    let eang = figure_angle(center, end);
    if !in_sweep(sang, eang, ang) {
        return false;
    }
    let range = if eang > sang {
        eang - sang
    } else {
        3600 - sang + eang
    };
    let start_dist = center.distance(start);
    let end_dist = center.distance(end);
    let want = if ang == sang || range == 0 {
        start_dist
    } else if ang == eang {
        end_dist
    } else if end_dist == start_dist {
        start_dist
    } else {
        let offset = (ang - sang).rem_euclid(3600) as f64;
        start_dist + offset / range as f64 * (end_dist - start_dist)
    };
    are_equals(center.distance(pt), want)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use test_log::test;

    use super::*;
    use crate::style::{Style, TextAnchor};

    fn pts(coords: &[(i64, i64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn lambda(x: f64, y: f64) -> Point {
        Point::from_lambda(x, y).unwrap()
    }

    fn unit_box() -> Shape {
        Shape::from_rect(
            &Rect::from_lambda(-0.5, -0.5, 0.5, 0.5).unwrap(),
            AreaFill::Filled,
        )
    }

    /// An L-shaped hexagon: the 2x2 square at the origin minus its upper-right quarter.
    fn ell() -> Shape {
        Shape::new(
            Style::Filled,
            pts(&[(0, 0), (800, 0), (800, 400), (400, 400), (400, 800), (0, 800)]),
        )
        .unwrap()
    }

    #[test]
    fn unit_box_contains_its_boundary() {
        let b = unit_box();
        assert!(b.is_inside(lambda(0.5, 0.5)));
        assert!(b.is_inside(lambda(0., 0.)));
        assert!(!b.is_inside(lambda(0.5, 0.6)));
    }

    #[test]
    fn winding_test_on_concave_polygon() {
        let l = ell();
        assert!(l.is_inside(lambda(0.5, 0.5)));
        assert!(l.is_inside(lambda(1.5, 0.5)));
        assert!(l.is_inside(lambda(0.5, 1.5)));
        assert!(!l.is_inside(lambda(1.5, 1.5)));
        assert!(!l.is_inside(lambda(3., 3.)));
        // On an edge and at a vertex.
        assert!(l.is_inside(lambda(1.5, 1.)));
        assert!(l.is_inside(lambda(1., 1.)));
    }

    #[test]
    fn zero_size_box_contains_its_point() {
        let p = Shape::new(Style::Filled, pts(&[(4, 4), (4, 4), (4, 4), (4, 4)])).unwrap();
        assert!(p.is_inside(Point::new(4, 4)));
        assert!(p.is_inside(Point::new(5, 4)));
        assert!(!p.is_inside(Point::new(9, 4)));
    }

    #[test]
    fn inside_by_family() {
        let cross = Shape::new(Style::Cross, pts(&[(0, 0), (800, 800)])).unwrap();
        assert!(cross.is_inside(Point::new(400, 400)));
        assert!(!cross.is_inside(Point::new(0, 0)));

        let path = Shape::new(Style::Opened, pts(&[(0, 0), (800, 0), (800, 800)])).unwrap();
        assert!(path.is_inside(Point::new(400, 0)));
        assert!(!path.is_inside(Point::new(400, 400)));

        let v = Shape::new(Style::Vectors, pts(&[(0, 0), (800, 0), (0, 800), (800, 800)]))
            .unwrap();
        assert!(v.is_inside(Point::new(400, 800)));
        assert!(!v.is_inside(Point::new(0, 400)));

        let circle = Shape::new(Style::Circle, pts(&[(0, 0), (400, 0)])).unwrap();
        assert!(circle.is_inside(Point::new(200, 200)));
        assert!(!circle.is_inside(Point::new(400, 0)));

        let text = Shape::new(Style::Text(TextAnchor::Cent), pts(&[(10, 10)])).unwrap();
        assert!(text.is_inside(Point::new(10, 10)));
    }

    #[test]
    fn arc_contains_points_on_its_sweep() {
        // Clockwise from +x round to +y: three quadrants.
        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (2000, 0), (0, 2000)])).unwrap();
        assert!(!arc.is_inside(Point::new(1200, 1600)));
        assert!(arc.is_inside(Point::new(-1200, -1600)));
        assert!(arc.is_inside(Point::new(2000, 0)));
        assert!(arc.is_inside(Point::new(0, 2000)));
        assert!(!arc.is_inside(Point::new(-1000, -1000)));

        let quarter = Shape::new(Style::CircleArc, pts(&[(0, 0), (0, 2000), (2000, 0)])).unwrap();
        assert!(quarter.is_inside(Point::new(1200, 1600)));
        assert!(!quarter.is_inside(Point::new(-1200, -1600)));
    }

    #[test]
    fn three_quarter_arc_measures_along_its_sweep() {
        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (2000, 0), (0, 2000)])).unwrap();
        assert_relative_eq!(
            arc.poly_distance_to_point(Point::new(-2400, 0)),
            1.,
            epsilon = 1e-9
        );
        let b = arc.bounds();
        assert_relative_eq!(b.min_x(), -5.);
        assert_relative_eq!(b.min_y(), -5.);
        assert_relative_eq!(b.max_x(), 5.);
        assert_relative_eq!(b.max_y(), 5.);
    }

    #[test]
    fn rect_containment() {
        let r = Rect::from_grid(-400, -400, 400, 400).unwrap();
        let circle = Shape::new(Style::Disc, pts(&[(0, 0), (400, 0)])).unwrap();
        assert!(circle.is_inside_rect(&r));
        let big = Shape::new(Style::Disc, pts(&[(0, 0), (401, 0)])).unwrap();
        assert!(!big.is_inside_rect(&r));
        assert!(unit_box().is_inside_rect(&r));
        assert!(unit_box().is_point_on_corner(lambda(0.5, -0.5)));
        assert!(!unit_box().is_point_on_corner(lambda(0.5, 0.)));
    }

    #[test]
    fn point_distance_to_box() {
        let s = Shape::from_rect(&Rect::from_grid(0, 0, 400, 400).unwrap(), AreaFill::Filled);
        assert_relative_eq!(s.poly_distance_to_point(Point::new(1600, 1600)), 18f64.sqrt());
        assert_relative_eq!(s.poly_distance_to_point(Point::new(200, -800)), 2.);
        let hit = s.poly_distance_to_point(Point::new(200, 200));
        assert!(hit < -1e300);
    }

    #[test]
    fn direct_hits_order_by_center_distance() {
        let s = ell();
        let near = s.poly_distance_to_point(Point::new(400, 400));
        let far = s.poly_distance_to_point(Point::new(40, 40));
        assert!(near < 0. && far < 0.);
        let outside = s.poly_distance_to_point(Point::new(1200, 1200));
        assert_relative_eq!(outside, 5f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn outline_distances() {
        let closed = Shape::from_rect(&Rect::from_grid(0, 0, 800, 800).unwrap(), AreaFill::Closed);
        assert_relative_eq!(closed.poly_distance_to_point(Point::new(400, 400)), 1.);
        let path = Shape::new(Style::Opened, pts(&[(0, 0), (800, 0)])).unwrap();
        assert_relative_eq!(path.poly_distance_to_point(Point::new(400, 800)), 2.);
        let v = Shape::new(Style::Vectors, pts(&[(0, 0), (800, 0), (0, 800), (800, 800)]))
            .unwrap();
        assert_relative_eq!(v.poly_distance_to_point(Point::new(400, 400)), 1.);
        assert_eq!(
            path.poly_distance(&Rect::from_grid(0, -10, 10, 10).unwrap()),
            TOUCHING
        );
    }

    #[test]
    fn circle_and_arc_distances() {
        let disc = Shape::new(Style::Disc, pts(&[(0, 0), (800, 0)])).unwrap();
        assert!(disc.poly_distance_to_point(Point::new(400, 0)) < -1e300);
        assert_relative_eq!(disc.poly_distance_to_point(Point::new(1200, 0)), 1.);
        let ring = Shape::new(Style::Circle, pts(&[(0, 0), (800, 0)])).unwrap();
        assert_relative_eq!(ring.poly_distance_to_point(Point::new(400, 0)), 1.);
        assert_relative_eq!(ring.poly_distance(&Rect::from_grid(4000, -400, 4400, 400).unwrap()), 8.5);
        assert_eq!(ring.poly_distance(&Rect::from_grid(0, 0, 4000, 400).unwrap()), TOUCHING);

        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (0, 800), (800, 0)])).unwrap();
        // On the sweep: distance to the curve.
        assert_relative_eq!(arc.poly_distance_to_point(Point::new(1200, 0)), 1., epsilon = 1e-9);
        // Off the sweep: distance to the nearer end.
        assert_relative_eq!(arc.poly_distance_to_point(Point::new(0, -800)), 8f64.sqrt());
        let long = Shape::new(Style::CircleArc, pts(&[(0, 0), (800, 0), (0, 800)])).unwrap();
        assert_relative_eq!(long.poly_distance_to_point(Point::new(0, -800)), 0., epsilon = 1e-9);
        assert_relative_eq!(long.poly_distance_to_point(Point::new(800, 800)), 2.);
    }

    #[test]
    fn single_point_shapes_measure_to_center() {
        let cross = Shape::new(Style::Cross, pts(&[(0, 0)])).unwrap();
        assert_eq!(cross.poly_distance_to_point(Point::new(0, 0)), TOUCHING);
        assert_relative_eq!(cross.poly_distance_to_point(Point::new(1200, 1600)), 5.);
        assert_eq!(
            cross.poly_distance(&Rect::from_grid(-1, -1, 1, 1).unwrap()),
            TOUCHING
        );
    }

    #[test]
    fn box_separation() {
        let a = Shape::from_rect(&Rect::from_grid(0, 0, 400, 400).unwrap(), AreaFill::Filled);
        let b = Shape::from_rect(&Rect::from_grid(1600, 2000, 2000, 2400).unwrap(), AreaFill::Filled);
        assert_relative_eq!(a.separation_box(&b).unwrap(), 5.);
        let c = Shape::from_rect(&Rect::from_grid(800, 0, 1200, 400).unwrap(), AreaFill::Filled);
        assert_relative_eq!(a.separation_box(&c).unwrap(), 1.);
        assert_eq!(a.separation_box(&ell()), None);
        assert_relative_eq!(a.separation(&b), 5.);
        assert_relative_eq!(a.separation(&c), 1.);
        let touching = Shape::from_rect(&Rect::from_grid(400, 0, 800, 400).unwrap(), AreaFill::Filled);
        assert_eq!(a.separation(&touching), 0.);
    }

    #[test]
    fn separation_of_nested_shapes_is_zero() {
        let outer = Shape::from_rect(&Rect::from_grid(0, 0, 4000, 4000).unwrap(), AreaFill::Filled);
        let inner = Shape::new(Style::Filled, pts(&[(400, 400), (800, 400), (400, 800)])).unwrap();
        assert!(!outer.intersects(&inner));
        assert_eq!(outer.separation(&inner), 0.);
    }

    #[test]
    fn closest_points() {
        let s = Shape::from_rect(&Rect::from_grid(0, 0, 400, 400).unwrap(), AreaFill::Filled);
        assert_eq!(s.closest_point(Point::new(800, 200)), Point::new(400, 200));
        assert_eq!(s.closest_point(Point::new(100, 200)), Point::new(100, 200));
        let l = ell();
        assert_eq!(l.closest_point(Point::new(100, 100)), Point::new(100, 100));
        // Equidistant edges resolve to the later one.
        assert_eq!(l.closest_point(Point::new(700, 700)), Point::new(400, 700));
        let closed = Shape::new(Style::Closed, pts(&[(0, 0), (800, 0), (0, 800)])).unwrap();
        assert_eq!(closed.closest_point(Point::new(100, 50)), Point::new(100, 0));
        let disc = Shape::new(Style::Disc, pts(&[(0, 0), (800, 0)])).unwrap();
        assert_eq!(disc.closest_point(Point::new(5000, 0)), Point::new(0, 0));
    }

    #[test]
    fn rect_inside_concave_polygon() {
        let l = ell();
        assert!(l.contains_rect(&Rect::from_grid(0, 0, 400, 400).unwrap()));
        assert!(l.contains_rect(&Rect::from_grid(100, 100, 700, 300).unwrap()));
        assert!(!l.contains_rect(&Rect::from_grid(100, 100, 700, 700).unwrap()));
        assert!(!l.contains_rect(&Rect::from_grid(700, 700, 900, 900).unwrap()));
    }

    #[test]
    fn rect_intersection_by_family() {
        let l = ell();
        assert!(l.intersects_rect(&Rect::from_grid(700, 300, 1200, 1200).unwrap()));
        assert!(!l.intersects_rect(&Rect::from_grid(500, 500, 1200, 1200).unwrap()));
        assert!(l.intersects_rect(&Rect::from_grid(100, 100, 200, 200).unwrap()));
        let disc = Shape::new(Style::Disc, pts(&[(0, 0), (800, 0)])).unwrap();
        assert!(disc.intersects_rect(&Rect::from_grid(-100, -100, 100, 100).unwrap()));
        let ring = Shape::new(Style::Circle, pts(&[(0, 0), (800, 0)])).unwrap();
        assert!(!ring.intersects_rect(&Rect::from_grid(-100, -100, 100, 100).unwrap()));
        assert!(ring.intersects_rect(&Rect::from_grid(700, -100, 900, 100).unwrap()));
        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (0, 800), (800, 0)])).unwrap();
        assert!(!arc.intersects_rect(&Rect::from_grid(-900, -100, -700, 100).unwrap()));
        assert!(arc.intersects_rect(&Rect::from_grid(700, -100, 900, 100).unwrap()));
        let path = Shape::new(Style::Opened, pts(&[(0, 0), (800, 800)])).unwrap();
        assert!(path.intersects_rect(&Rect::from_grid(300, 300, 500, 500).unwrap()));
        assert!(!path.intersects_rect(&Rect::from_grid(600, 0, 800, 200).unwrap()));
    }

    #[test]
    fn outline_intersection() {
        let a = Shape::from_rect(&Rect::from_grid(0, 0, 400, 400).unwrap(), AreaFill::Filled);
        let b = Shape::from_rect(&Rect::from_grid(200, 200, 600, 600).unwrap(), AreaFill::Filled);
        assert!(a.intersects(&b));
        let corner = Shape::from_rect(&Rect::from_grid(400, 400, 600, 600).unwrap(), AreaFill::Filled);
        assert!(a.intersects(&corner));
        let apart = Shape::from_rect(&Rect::from_grid(401, 0, 600, 600).unwrap(), AreaFill::Filled);
        assert!(!a.intersects(&apart));
        let diag = Shape::new(Style::Opened, pts(&[(-100, 200), (200, 500)])).unwrap();
        assert!(a.intersects(&diag));
        let skew = Shape::new(Style::Opened, pts(&[(-100, 350), (100, 550)])).unwrap();
        assert!(!a.intersects(&skew));
    }

    #[test]
    fn measures() {
        let l = ell();
        assert_relative_eq!(l.perimeter(), 8.);
        assert_relative_eq!(l.max_length(), 2.);
        assert_relative_eq!(l.area(), 3.);
        let path = Shape::new(Style::Opened, pts(&[(0, 0), (1200, 0), (1200, 1600)])).unwrap();
        assert_relative_eq!(path.perimeter(), 7.);
        assert_relative_eq!(path.max_length(), 4.);
        assert_eq!(path.area(), 0.);
        let circle = Shape::new(Style::Circle, pts(&[(0, 0), (400, 0)])).unwrap();
        assert_relative_eq!(circle.perimeter(), 2. * PI);
        assert_relative_eq!(circle.max_length(), 2.);
        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (0, 400), (400, 0)])).unwrap();
        assert_relative_eq!(arc.perimeter(), PI / 2.);
        let long = Shape::new(Style::CircleArc, pts(&[(0, 0), (400, 0), (0, 400)])).unwrap();
        assert_relative_eq!(long.perimeter(), 1.5 * PI);
        let bx = Shape::from_rect(&Rect::from_grid(0, 0, 400, 1200).unwrap(), AreaFill::Crossed);
        assert_relative_eq!(bx.area(), 3.);
    }

    #[test]
    fn exact_segment_intersection() {
        let p = |x, y| Point::new(x, y);
        assert!(segments_intersect(p(0, 0), p(10, 10), p(0, 10), p(10, 0)));
        assert!(segments_intersect(p(0, 0), p(10, 0), p(5, 0), p(20, 0)));
        assert!(!segments_intersect(p(0, 0), p(10, 0), p(11, 0), p(20, 0)));
        assert!(segments_intersect(p(0, 0), p(10, 0), p(10, 0), p(10, 5)));
        assert!(!segments_intersect(p(0, 0), p(10, 10), p(0, 1), p(10, 11)));
        assert!(segments_intersect(p(3, 3), p(3, 3), p(0, 0), p(6, 6)));
    }
}
