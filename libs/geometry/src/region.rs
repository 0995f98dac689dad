//! Boolean areas built from shapes.
//!
//! A [`Region`] is the union of any number of polygons with holes, stored in grid units.
//! Regions back the merging handlers in [`merge`](crate::merge) and
//! [`poly_qtree`](crate::poly_qtree).

use geo::{
    Area, BooleanOps, BoundingRect, Coord, Intersects, LineString, MapCoordsInPlace, MultiPolygon,
    Polygon,
};

use crate::bbox::Bbox;
use crate::config::KernelConfig;
use crate::error::{Error, Result};
use crate::point::Point;
use crate::rect::Rect;
use crate::shape::{circle_points, Shape, ShapeKind};
use crate::style::AreaFill;
use crate::transform::{TransformMut, Transformation, TranslateMut};
use crate::units::{rects_intersect, GRID};

/// A union of polygons with holes, in grid coordinates.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let a = Region::from_rect(&Rect::from_lambda(0., 0., 10., 10.).unwrap());
/// let b = Region::from_rect(&Rect::from_lambda(10., 0., 20., 10.).unwrap());
/// assert!(a.intersects(&b));
/// let ab = a.union(&b);
/// assert_eq!(ab.area(), 200.);
/// assert!(ab.is_rectangular());
/// assert_eq!(ab.bounds(), Some(Rect::from_lambda(0., 0., 20., 10.).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    polys: MultiPolygon<f64>,
    bounds: Option<Rect>,
}

impl Default for Region {
    fn default() -> Self {
        Self::empty()
    }
}

fn coord(p: Point) -> Coord<f64> {
    Coord {
        x: p.grid_x() as f64,
        y: p.grid_y() as f64,
    }
}

fn point(c: &Coord<f64>) -> Point {
    Point::from_grid_clamped(c.x.round() as i128, c.y.round() as i128)
}

/// The points of a ring without its closing point.
fn ring_points(ring: &LineString<f64>) -> Vec<Point> {
    let mut pts: Vec<Point> = ring.coords().map(point).collect();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}

fn ring_length(ring: &LineString<f64>) -> f64 {
    ring.lines()
        .map(|l| (l.end.x - l.start.x).hypot(l.end.y - l.start.y))
        .sum::<f64>()
        / GRID
}

impl Region {
    /// A region covering nothing.
    pub fn empty() -> Self {
        Self {
            polys: MultiPolygon::new(Vec::new()),
            bounds: None,
        }
    }

    fn from_polys(polys: MultiPolygon<f64>) -> Self {
        let mut region = Self {
            polys,
            bounds: None,
        };
        region.update_bounds();
        region
    }

    /// Resolves self-intersections and overlaps of a raw polygon set.
    fn normalized(polys: MultiPolygon<f64>) -> Self {
        Self::from_polys(polys.union(&MultiPolygon::new(Vec::new())))
    }

    /// The region covered by the polygon through `points`.
    ///
    /// Fewer than three points cover nothing.
    pub fn from_points(points: &[Point]) -> Self {
        if points.len() < 3 {
            return Self::empty();
        }
        let ring = LineString::new(points.iter().copied().map(coord).collect());
        Self::normalized(MultiPolygon::new(vec![Polygon::new(ring, Vec::new())]))
    }

    /// The region covered by `rect`.
    pub fn from_rect(rect: &Rect) -> Self {
        Self::from_points(&rect.corners())
    }

    /// The area covered by `shape`.
    ///
    /// Polygons and text outlines cover their interior whatever their fill; circles cover their
    /// disc, approximated by a polygon of [`KernelConfig::circle_segments`] sides. Open shapes,
    /// arcs and crosses have no area and are rejected with [`Error::Unsupported`].
    pub fn from_shape(shape: &Shape, config: &KernelConfig) -> Result<Self> {
        match shape.kind() {
            ShapeKind::Area { points, .. } | ShapeKind::Text { points, .. } => {
                Ok(Self::from_points(points))
            }
            ShapeKind::Circle { center, edge, .. } => Ok(Self::from_points(&circle_points(
                *center,
                center.distance(*edge),
                config.sanitized().circle_segments,
            ))),
            ShapeKind::Path { .. } => Err(Error::Unsupported("open paths have no area")),
            ShapeKind::Vectors { .. } => Err(Error::Unsupported("vector lists have no area")),
            ShapeKind::Arc { .. } => Err(Error::Unsupported("arcs have no area")),
            ShapeKind::Cross { .. } => Err(Error::Unsupported("crosses have no area")),
        }
    }

    fn update_bounds(&mut self) {
        self.bounds = self
            .polys
            .bounding_rect()
            .map(|r| Rect::new(point(&r.min()), point(&r.max())));
    }

    /// Returns `true` if the region covers nothing.
    pub fn is_empty(&self) -> bool {
        self.polys.0.is_empty()
    }

    /// The bounding box, or [`None`] for an empty region.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// The union of two regions.
    pub fn union(&self, other: &Region) -> Region {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_polys(self.polys.union(&other.polys))
    }

    /// Adds `other` to this region.
    pub fn add(&mut self, other: &Region) {
        *self = self.union(other);
    }

    /// Returns `true` if the regions overlap or share any boundary point.
    pub fn intersects(&self, other: &Region) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) if rects_intersect(&a, &b) => self.polys.intersects(&other.polys),
            _ => false,
        }
    }

    /// The covered area in square lambda units.
    pub fn area(&self) -> f64 {
        self.polys.unsigned_area() / (GRID * GRID)
    }

    /// The total length of every boundary loop, holes included, in lambda units.
    pub fn perimeter(&self) -> f64 {
        self.polys
            .iter()
            .map(|p| {
                ring_length(p.exterior()) + p.interiors().iter().map(ring_length).sum::<f64>()
            })
            .sum()
    }

    /// Returns `true` if the region is exactly one axis-aligned rectangle.
    pub fn is_rectangular(&self) -> bool {
        let [poly] = self.polys.0.as_slice() else {
            return false;
        };
        if !poly.interiors().is_empty() {
            return false;
        }
        self.bounds
            .is_some_and(|b| (b.area() - self.area()).abs() < 1. / (GRID * GRID))
    }

    /// The number of disjoint polygons in the region.
    pub fn polygon_count(&self) -> usize {
        self.polys.0.len()
    }

    /// Splits the region into one region per polygon.
    pub(crate) fn split(self) -> Vec<Region> {
        self.polys
            .0
            .into_iter()
            .map(|p| Self::from_polys(MultiPolygon::new(vec![p])))
            .collect()
    }

    /// Every boundary loop, outlines and holes alike, without closing points.
    pub fn loops(&self) -> Vec<Vec<Point>> {
        self.polys
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
            .map(ring_points)
            .collect()
    }

    /// Converts the region back into filled shapes.
    ///
    /// With `simple` set, every boundary loop becomes its own shape, holes included. Otherwise
    /// each polygon becomes one shape whose outline visits every hole: after the outline, each
    /// hole is entered from the first outline point and closed back to its own first point.
    pub fn to_shapes(&self, simple: bool) -> Vec<Shape> {
        let filled = |points: Vec<Point>| Shape::from_kind(ShapeKind::Area {
            fill: AreaFill::Filled,
            points,
        });
        if simple {
            return self
                .loops()
                .into_iter()
                .filter_map(|l| filled(l).ok())
                .collect();
        }
        self.polys
            .iter()
            .filter_map(|p| {
                let mut pts = ring_points(p.exterior());
                let first = *pts.first()?;
                for hole in p.interiors() {
                    let hole = ring_points(hole);
                    let Some(&hole_first) = hole.first() else {
                        continue;
                    };
                    pts.push(first);
                    pts.extend(hole);
                    pts.push(hole_first);
                }
                filled(pts).ok()
            })
            .collect()
    }
}

impl Bbox for Region {
    fn bbox(&self) -> Option<Rect> {
        self.bounds
    }
}

impl TransformMut for Region {
    fn transform_mut(&mut self, trans: Transformation) {
        if trans.is_identity() {
            return;
        }
        self.polys.map_coords_in_place(|c| {
            let (x, y) = trans.apply(c.x / GRID, c.y / GRID);
            Coord {
                x: (x * GRID).round(),
                y: (y * GRID).round(),
            }
        });
        self.update_bounds();
    }
}

impl TranslateMut for Region {
    fn translate_mut(&mut self, p: Point) {
        let (dx, dy) = (p.grid_x() as f64, p.grid_y() as f64);
        self.polys.map_coords_in_place(|c| Coord {
            x: c.x + dx,
            y: c.y + dy,
        });
        self.update_bounds();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use test_log::test;

    use super::*;
    use crate::orientation::Orientation;
    use crate::style::Style;

    fn rect(lx: f64, ly: f64, hx: f64, hy: f64) -> Region {
        Region::from_rect(&Rect::from_lambda(lx, ly, hx, hy).unwrap())
    }

    #[test]
    fn overlapping_union_counts_area_once() {
        let a = rect(0., 0., 10., 10.);
        assert_eq!(a.union(&a).area(), 100.);
        let b = rect(5., 5., 15., 15.);
        let ab = a.union(&b);
        assert_relative_eq!(ab.area(), 175.);
        assert!(!ab.is_rectangular());
        assert_eq!(ab.polygon_count(), 1);
        assert_relative_eq!(ab.perimeter(), 60.);
    }

    #[test]
    fn touching_regions_intersect() {
        let a = rect(0., 0., 10., 10.);
        assert!(a.intersects(&rect(10., 10., 20., 20.)));
        assert!(!a.intersects(&rect(11., 0., 20., 10.)));
        assert!(!a.intersects(&Region::empty()));
    }

    #[test]
    fn holes_become_separate_or_nested_loops() {
        let frame = rect(0., 0., 30., 10.)
            .union(&rect(0., 20., 30., 30.))
            .union(&rect(0., 0., 10., 30.))
            .union(&rect(20., 0., 30., 30.));
        assert_eq!(frame.polygon_count(), 1);
        assert_relative_eq!(frame.area(), 800.);
        assert_eq!(frame.loops().len(), 2);

        let simple = frame.to_shapes(true);
        assert_eq!(simple.len(), 2);
        let mut areas: Vec<f64> = simple.iter().map(Shape::area).collect();
        areas.sort_by(f64::total_cmp);
        assert_eq!(areas, vec![100., 900.]);

        let nested = frame.to_shapes(false);
        assert_eq!(nested.len(), 1);
        let pts = nested[0].points();
        let outline = frame.loops()[0].len();
        let hole = frame.loops()[1].len();
        assert_eq!(pts.len(), outline + 1 + hole + 1);
        assert_eq!(pts[outline], pts[0]);
        assert_eq!(pts[outline + 1], pts[pts.len() - 1]);
    }

    #[test]
    fn shapes_convert_by_family() {
        let config = KernelConfig::default();
        let tri = Shape::new(
            Style::Filled,
            vec![Point::new(0, 0), Point::new(4000, 0), Point::new(0, 4000)],
        )
        .unwrap();
        assert_relative_eq!(Region::from_shape(&tri, &config).unwrap().area(), 50.);

        let disc = Shape::new(Style::Disc, vec![Point::new(0, 0), Point::new(4000, 0)]).unwrap();
        let area = Region::from_shape(&disc, &config).unwrap().area();
        let expected = 0.5 * 32. * 100. * (2. * std::f64::consts::PI / 32.).sin();
        assert_relative_eq!(area, expected, epsilon = 0.1);

        let path = Shape::new(Style::Opened, vec![Point::new(0, 0), Point::new(400, 0)]).unwrap();
        assert!(matches!(
            Region::from_shape(&path, &config),
            Err(Error::Unsupported(_))
        ));
        let dot = Shape::new(Style::Filled, vec![Point::new(0, 0)]).unwrap();
        assert!(Region::from_shape(&dot, &config).unwrap().is_empty());
    }

    #[test]
    fn transforms_move_bounds() {
        let mut r = rect(0., 0., 10., 20.);
        r.transform_mut(Transformation::from_orientation(&Orientation::r(), 5., 0.));
        assert_eq!(r.bounds(), Some(Rect::from_lambda(-15., 0., 5., 10.).unwrap()));
        assert_eq!(r.area(), 200.);
        r.translate_mut(Point::new(6000, 400));
        assert_eq!(r.bbox(), Some(Rect::from_lambda(0., 1., 20., 11.).unwrap()));
    }
}
