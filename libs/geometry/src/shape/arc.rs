//! Clipping circles and arcs to a box.

use std::f64::consts::PI;

use crate::mutable_box::MutableBox;
use crate::point::Point;
use crate::rect::Rectangular;
use crate::style::CircleFill;
use crate::units::{angle_radians_xy, is_greater_than, is_less_than, rects_intersect};

use super::{Shape, ShapeKind};

/// Offsets closer than this, in radians, are the same crossing.
const ANGLE_TOLERANCE: f64 = 1e-9;

impl Shape {
    /// The parts of this circle or arc lying inside the box `lx..=hx`, `ly..=hy`.
    ///
    /// A shape entirely inside the box comes back whole. Otherwise the curve is cut where it
    /// crosses the box edges and every piece whose midpoint lies in the box is returned as a
    /// clockwise arc; filled circles are reduced to their outline. Shapes that are not
    /// curves, and curves missing the box, give nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let circle = Shape::new(Style::Circle, vec![Point::new(0, 0), Point::new(800, 0)]).unwrap();
    /// let pieces = circle.clip_arc(0., 3., 0., 3.);
    /// assert_eq!(pieces.len(), 1);
    /// assert_eq!(pieces[0].points(), vec![Point::new(0, 0), Point::new(0, 800), Point::new(800, 0)]);
    /// ```
    pub fn clip_arc(&self, lx: f64, hx: f64, ly: f64, hy: f64) -> Vec<Shape> {
        let (center, radius, a0, sweep, thick) = match &self.kind {
            ShapeKind::Circle { fill, center, edge } => (
                *center,
                center.distance(*edge),
                0.,
                2. * PI,
                *fill == CircleFill::Thick,
            ),
            ShapeKind::Arc {
                thick,
                center,
                start,
                end,
            } => {
                // Walk counter-clockwise from `end` back to `start`.
                let (cx, cy) = center.lambda();
                let a0 = angle_radians_xy(cx, cy, end.lambda_x(), end.lambda_y());
                let a1 = angle_radians_xy(cx, cy, start.lambda_x(), start.lambda_y());
                let mut sweep = (a1 - a0).rem_euclid(2. * PI);
                if sweep == 0. {
                    sweep = 2. * PI;
                }
                (*center, center.distance(*start), a0, sweep, *thick)
            }
            _ => return Vec::new(),
        };
        if radius == 0. {
            tracing::warn!(%center, "clipping a curve of zero radius");
            return Vec::new();
        }

        let clip = MutableBox::from_sides(lx, ly, hx, hy);
        let bounds = self.bounds();
        if !rects_intersect(&bounds, &clip) {
            return Vec::new();
        }
        if contains(&clip, bounds.min_x(), bounds.min_y())
            && contains(&clip, bounds.max_x(), bounds.max_y())
        {
            return vec![self.clone()];
        }

        let (cx, cy) = center.lambda();
        let mut offsets = Vec::new();
        let mut cross = |ang: f64| {
            let off = (ang - a0).rem_euclid(2. * PI);
            if off < sweep {
                offsets.push(off);
            }
        };
        for x in [lx, hx] {
            let dx = x - cx;
            if dx.abs() <= radius {
                let dy = (radius * radius - dx * dx).sqrt();
                cross(dy.atan2(dx));
                cross((-dy).atan2(dx));
            }
        }
        for y in [ly, hy] {
            let dy = y - cy;
            if dy.abs() <= radius {
                let dx = (radius * radius - dy * dy).sqrt();
                cross(dy.atan2(dx));
                cross(dy.atan2(-dx));
            }
        }

        let full = matches!(self.kind, ShapeKind::Circle { .. });
        if !full {
            offsets.push(0.);
            offsets.push(sweep);
        }
        offsets.sort_by(f64::total_cmp);
        offsets.dedup_by(|a, b| (*a - *b).abs() < ANGLE_TOLERANCE);
        if full {
            let Some(&first) = offsets.first() else {
                return Vec::new();
            };
            offsets.push(first + 2. * PI);
        }

        let at = |off: f64| {
            let a = a0 + off;
            (cx + radius * a.cos(), cy + radius * a.sin())
        };
        let mut pieces = Vec::new();
        for w in offsets.windows(2) {
            let (o1, o2) = (w[0], w[1]);
            if o2 - o1 < ANGLE_TOLERANCE {
                continue;
            }
            let (mx, my) = at((o1 + o2) / 2.);
            if !contains(&clip, mx, my) {
                continue;
            }
            let (sx, sy) = at(o2);
            let (ex, ey) = at(o1);
            let start = Point::from_lambda_clamped(sx, sy);
            let end = Point::from_lambda_clamped(ex, ey);
            if start == end {
                continue;
            }
            pieces.push(self.derive(ShapeKind::Arc {
                thick,
                center,
                start,
                end,
            }));
        }
        pieces
    }
}

fn contains(r: &impl Rectangular, x: f64, y: f64) -> bool {
    !is_less_than(x, r.min_x())
        && !is_greater_than(x, r.max_x())
        && !is_less_than(y, r.min_y())
        && !is_greater_than(y, r.max_y())
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::style::Style;

    fn shape(style: Style, coords: &[(i64, i64)]) -> Shape {
        Shape::new(style, coords.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn contained_curves_come_back_whole() {
        let disc = shape(Style::Disc, &[(0, 0), (800, 0)]);
        assert_eq!(disc.clip_arc(-3., 3., -3., 3.), vec![disc.clone()]);
        let arc = shape(Style::CircleArc, &[(0, 0), (0, 800), (800, 0)]);
        assert_eq!(arc.clip_arc(0., 2., 0., 2.), vec![arc]);
        // The same ends the other way round sweep three quadrants.
        let long = shape(Style::CircleArc, &[(0, 0), (800, 0), (0, 800)]);
        assert_ne!(long.clip_arc(0., 2., 0., 2.), vec![long]);
    }

    #[test]
    fn disjoint_boxes_clip_everything() {
        let circle = shape(Style::Circle, &[(0, 0), (800, 0)]);
        assert!(circle.clip_arc(5., 6., 5., 6.).is_empty());
        // A box inside the circle never meets the outline.
        assert!(circle.clip_arc(-1., 1., -1., 1.).is_empty());
        let arc = shape(Style::CircleArc, &[(0, 0), (0, 800), (800, 0)]);
        assert!(arc.clip_arc(-3., -1., -1., 1.).is_empty());
        let long = shape(Style::CircleArc, &[(0, 0), (800, 0), (0, 800)]);
        assert!(!long.clip_arc(-3., -1., -1., 1.).is_empty());
    }

    #[test]
    fn quarter_arc_cut_by_corner_box() {
        let arc = shape(Style::ThickCircleArc, &[(0, 0), (0, 800), (800, 0)]);
        let pieces = arc.clip_arc(1., 3., 1., 3.);
        assert_eq!(pieces.len(), 1);
        let ShapeKind::Arc {
            thick, start, end, ..
        } = pieces[0].kind()
        else {
            panic!("expected an arc, got {:?}", pieces[0]);
        };
        assert!(*thick);
        assert_eq!(start.grid(), (400, 693));
        assert_eq!(end.grid(), (693, 400));
    }

    #[test]
    fn circle_pieces_wrap_through_angle_zero() {
        let circle = shape(Style::Circle, &[(0, 0), (800, 0)]);
        let pieces = circle.clip_arc(1., 3., -3., 3.);
        assert_eq!(pieces.len(), 1);
        let pts = pieces[0].points();
        assert_eq!(pts[1].grid(), (400, 693));
        assert_eq!(pts[2].grid(), (400, -693));
    }

    #[test]
    fn arc_crossing_a_box_twice_splits() {
        // Upper half circle, cut by a box that covers its middle but not its top.
        let arc = shape(Style::CircleArc, &[(0, 0), (-800, 0), (800, 0)]);
        let pieces = arc.clip_arc(-3., 3., 0., 1.);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].points()[1].grid(), (693, 400));
        assert_eq!(pieces[0].points()[2], Point::new(800, 0));
        assert_eq!(pieces[1].points()[1], Point::new(-800, 0));
        assert_eq!(pieces[1].points()[2].grid(), (-693, 400));
    }

    #[test]
    fn zero_radius_and_non_curves_clip_to_nothing() {
        let dot = shape(Style::Circle, &[(0, 0), (0, 0)]);
        assert!(dot.clip_arc(-1., 1., -1., 1.).is_empty());
        let path = shape(Style::Opened, &[(0, 0), (400, 0)]);
        assert!(path.clip_arc(-1., 1., -1., 1.).is_empty());
    }
}
