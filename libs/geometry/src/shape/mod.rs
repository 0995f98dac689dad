//! Styled point sequences: the shapes that layout geometry is drawn and checked with.
//!
//! A [`Shape`] pairs a [`ShapeKind`] with an optional [`Layer`] and [`PortName`]. Every query
//! dispatches on the kind, so each style family only ever sees the point arrangement it was
//! built with.

mod arc;
mod crop;
mod query;
mod wire;

use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::error::{Error, Result};
use crate::mutable_box::MutableBox;
use crate::orientation::Orientation;
use crate::point::Point;
use crate::rect::{Rect, Rectangular};
use crate::style::{AreaFill, CircleFill, LineTexture, Style, TextAnchor};
use crate::transform::{TransformMut, Transformation, TranslateMut};
use crate::units::arc_bbox;

pub use crop::{crop_box, crop_box_complete, half_crop_box, CropOutcome};
pub use query::TOUCHING;
pub(crate) use query::circle_points;
pub use wire::{extend_factor, make_end_point_poly};

/// An opaque handle naming the layer a shape is drawn on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Layer(ArcStr);

impl Layer {
    /// Creates a layer handle.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self(name.into())
    }

    /// The layer name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Layer {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque handle naming the port a shape belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortName(ArcStr);

impl PortName {
    /// Creates a port handle.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self(name.into())
    }

    /// The port name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PortName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The geometry of a shape, with the points each style family needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// A closed polygon: at least one vertex.
    Area {
        /// How the polygon is drawn.
        fill: AreaFill,
        /// The vertices, implicitly closed.
        points: Vec<Point>,
    },
    /// Text anchored at the shape. Boxed text uses the points as its outline.
    Text {
        /// Where the text sits relative to its point.
        anchor: TextAnchor,
        /// The anchor point, or the outline of boxed text.
        points: Vec<Point>,
    },
    /// An open polyline.
    Path {
        /// How the line is drawn.
        line: LineTexture,
        /// The vertices in drawing order.
        points: Vec<Point>,
    },
    /// Independent line segments.
    Vectors {
        /// The segment end pairs.
        segments: Vec<[Point; 2]>,
    },
    /// A full circle.
    Circle {
        /// How the circle is drawn.
        fill: CircleFill,
        /// The center.
        center: Point,
        /// A point on the circle.
        edge: Point,
    },
    /// A circular arc running clockwise from `start` to `end`.
    ///
    /// The radius is the distance from `center` to `start`.
    Arc {
        /// Whether the arc is drawn thick.
        thick: bool,
        /// The center of the circle.
        center: Point,
        /// The start of the arc.
        start: Point,
        /// The end of the arc.
        end: Point,
    },
    /// A cross marker centered on the bounds of its points.
    Cross {
        /// Whether the cross is drawn big.
        big: bool,
        /// The marker points.
        points: Vec<Point>,
    },
}

impl ShapeKind {
    /// The style tag of this kind.
    pub fn style(&self) -> Style {
        match self {
            ShapeKind::Area { fill, .. } => (*fill).into(),
            ShapeKind::Text { anchor, .. } => Style::Text(*anchor),
            ShapeKind::Path { line, .. } => (*line).into(),
            ShapeKind::Vectors { .. } => Style::Vectors,
            ShapeKind::Circle { fill, .. } => (*fill).into(),
            ShapeKind::Arc { thick: false, .. } => Style::CircleArc,
            ShapeKind::Arc { thick: true, .. } => Style::ThickCircleArc,
            ShapeKind::Cross { big: false, .. } => Style::Cross,
            ShapeKind::Cross { big: true, .. } => Style::BigCross,
        }
    }

    /// The number of points in [`ShapeKind::points`].
    pub fn point_count(&self) -> usize {
        match self {
            ShapeKind::Area { points, .. }
            | ShapeKind::Text { points, .. }
            | ShapeKind::Path { points, .. }
            | ShapeKind::Cross { points, .. } => points.len(),
            ShapeKind::Vectors { segments } => segments.len() * 2,
            ShapeKind::Circle { .. } => 2,
            ShapeKind::Arc { .. } => 3,
        }
    }

    /// All points in style order.
    ///
    /// Circles list the center and then the edge point; arcs list the center, the start and
    /// the end.
    pub fn points(&self) -> Vec<Point> {
        match self {
            ShapeKind::Area { points, .. }
            | ShapeKind::Text { points, .. }
            | ShapeKind::Path { points, .. }
            | ShapeKind::Cross { points, .. } => points.clone(),
            ShapeKind::Vectors { segments } => segments.iter().flatten().copied().collect(),
            ShapeKind::Circle { center, edge, .. } => vec![*center, *edge],
            ShapeKind::Arc {
                center, start, end, ..
            } => vec![*center, *start, *end],
        }
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        match self {
            ShapeKind::Area { points, .. }
            | ShapeKind::Text { points, .. }
            | ShapeKind::Path { points, .. }
            | ShapeKind::Cross { points, .. } => points.iter_mut().collect(),
            ShapeKind::Vectors { segments } => segments.iter_mut().flatten().collect(),
            ShapeKind::Circle { center, edge, .. } => vec![center, edge],
            ShapeKind::Arc {
                center, start, end, ..
            } => vec![center, start, end],
        }
    }

    fn validate(&self) -> Result<()> {
        let count = self.point_count();
        let expected = match self {
            ShapeKind::Vectors { segments } if segments.is_empty() => "at least one pair",
            ShapeKind::Vectors { .. } | ShapeKind::Circle { .. } | ShapeKind::Arc { .. } => {
                return Ok(())
            }
            _ if count == 0 => "at least 1",
            _ => return Ok(()),
        };
        Err(Error::PointCount {
            style: self.style(),
            count,
            expected,
        })
    }
}

/// A styled point sequence on an optional layer.
///
/// Shapes are values: every operation either answers a query or returns a new shape.
/// The bounds are computed on first use and cached.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let square = Shape::from_rect(&Rect::from_lambda(-0.5, -0.5, 0.5, 0.5).unwrap(), AreaFill::Filled);
/// assert!(square.is_inside(Point::from_lambda(0.5, 0.5).unwrap()));
/// assert!(!square.is_inside(Point::from_lambda(0.5, 0.6).unwrap()));
/// assert_eq!(square.area(), 1.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    layer: Option<Layer>,
    port: Option<PortName>,
    kind: ShapeKind,
    #[serde(skip)]
    bounds: OnceLock<MutableBox>,
}

impl Shape {
    /// Creates a shape from a style tag and its points in style order.
    ///
    /// Polygon, polyline, text and cross styles need at least one point, [`Style::Vectors`]
    /// a positive even count, circles exactly 2 and arcs exactly 3.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let arc = Shape::new(
    ///     Style::CircleArc,
    ///     vec![Point::new(0, 0), Point::new(400, 0), Point::new(0, 400)],
    /// )
    /// .unwrap();
    /// assert_eq!(arc.style(), Style::CircleArc);
    /// assert!(Shape::new(Style::Circle, vec![Point::new(0, 0)]).is_err());
    /// ```
    pub fn new(style: Style, points: Vec<Point>) -> Result<Self> {
        let count = points.len();
        let wrong = |expected| Error::PointCount {
            style,
            count,
            expected,
        };
        let kind = match style {
            Style::Filled => area(AreaFill::Filled, points),
            Style::Closed => area(AreaFill::Closed, points),
            Style::Crossed => area(AreaFill::Crossed, points),
            Style::Opened => path(LineTexture::Solid, points),
            Style::OpenedT1 => path(LineTexture::Dotted, points),
            Style::OpenedT2 => path(LineTexture::Dashed, points),
            Style::OpenedT3 => path(LineTexture::Thick, points),
            Style::Text(anchor) => ShapeKind::Text { anchor, points },
            Style::Cross => ShapeKind::Cross { big: false, points },
            Style::BigCross => ShapeKind::Cross { big: true, points },
            Style::Vectors => {
                if count % 2 != 0 {
                    return Err(wrong("an even number"));
                }
                ShapeKind::Vectors {
                    segments: points.chunks_exact(2).map(|c| [c[0], c[1]]).collect(),
                }
            }
            Style::Circle | Style::ThickCircle | Style::Disc => {
                let [center, edge] = <[Point; 2]>::try_from(points).map_err(|_| wrong("2"))?;
                let fill = match style {
                    Style::Circle => CircleFill::Outline,
                    Style::ThickCircle => CircleFill::Thick,
                    _ => CircleFill::Disc,
                };
                ShapeKind::Circle { fill, center, edge }
            }
            Style::CircleArc | Style::ThickCircleArc => {
                let [center, start, end] =
                    <[Point; 3]>::try_from(points).map_err(|_| wrong("3"))?;
                ShapeKind::Arc {
                    thick: style == Style::ThickCircleArc,
                    center,
                    start,
                    end,
                }
            }
        };
        Self::from_kind(kind)
    }

    /// Creates a shape from its geometry, checking the point counts.
    pub fn from_kind(kind: ShapeKind) -> Result<Self> {
        kind.validate()?;
        Ok(Self {
            kind,
            layer: None,
            port: None,
            bounds: OnceLock::new(),
        })
    }

    /// Creates a four-corner polygon covering `rect`.
    pub fn from_rect(rect: &Rect, fill: AreaFill) -> Self {
        Self {
            kind: area(fill, Self::make_points(rect).to_vec()),
            layer: None,
            port: None,
            bounds: OnceLock::new(),
        }
    }

    /// The corners of `rect`, counter-clockwise from the lower-left.
    #[inline]
    pub fn make_points(rect: &Rect) -> [Point; 4] {
        rect.corners()
    }

    /// Returns this shape on `layer`.
    pub fn with_layer(mut self, layer: impl Into<Layer>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Returns this shape attached to `port`.
    pub fn with_port(mut self, port: impl Into<PortName>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// The geometry.
    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// The style tag.
    #[inline]
    pub fn style(&self) -> Style {
        self.kind.style()
    }

    /// All points in style order. See [`ShapeKind::points`].
    #[inline]
    pub fn points(&self) -> Vec<Point> {
        self.kind.points()
    }

    /// The layer, if any.
    #[inline]
    pub fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }

    /// The port, if any.
    #[inline]
    pub fn port(&self) -> Option<&PortName> {
        self.port.as_ref()
    }

    /// The lambda bounds of the shape.
    ///
    /// Circles are bounded by their full disc and arcs by the quadrants they sweep; everything
    /// else by its points.
    pub fn bounds(&self) -> MutableBox {
        *self.bounds.get_or_init(|| self.compute_bounds())
    }

    fn compute_bounds(&self) -> MutableBox {
        match &self.kind {
            ShapeKind::Circle { center, edge, .. } => {
                let r = center.distance(*edge);
                let (cx, cy) = center.lambda();
                MutableBox::from_sides(cx - r, cy - r, cx + r, cy + r)
            }
            ShapeKind::Arc {
                center, start, end, ..
            } => arc_bbox(*start, *end, *center),
            kind => {
                let mut points = kind.points().into_iter();
                let Some(first) = points.next() else {
                    return MutableBox::default();
                };
                let mut b = MutableBox::from_point(first.lambda_x(), first.lambda_y());
                for p in points {
                    b.include(p.lambda_x(), p.lambda_y());
                }
                b
            }
        }
    }

    /// Returns the axis-aligned rectangle this shape describes, if it is one.
    ///
    /// Only four-point polygons (filled, closed, crossed or boxed text) and five-point closed
    /// loops (filled, closed or any open polyline whose last point repeats the first) are
    /// recognized. Rotated rectangles are not boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let pts = vec![Point::new(0, 0), Point::new(0, 10), Point::new(20, 10), Point::new(20, 0)];
    /// let s = Shape::new(Style::Closed, pts).unwrap();
    /// assert_eq!(s.get_box(), Some(Rect::from_grid(0, 0, 20, 10).unwrap()));
    /// let diamond = vec![Point::new(0, 5), Point::new(5, 10), Point::new(10, 5), Point::new(5, 0)];
    /// assert_eq!(Shape::new(Style::Filled, diamond).unwrap().get_box(), None);
    /// ```
    pub fn get_box(&self) -> Option<Rect> {
        let points = match &self.kind {
            ShapeKind::Area { fill, points } => match points.len() {
                4 => points,
                5 if *fill != AreaFill::Crossed => points,
                _ => return None,
            },
            ShapeKind::Text {
                anchor: TextAnchor::Box,
                points,
            } if points.len() == 4 => points,
            ShapeKind::Path { points, .. } if points.len() == 5 => points,
            _ => return None,
        };
        if points.len() == 5 && points[0] != points[4] {
            return None;
        }
        let (x, y): (Vec<i64>, Vec<i64>) = points[..4].iter().map(Point::grid).unzip();
        let vertical_first = x[0] == x[1] && x[2] == x[3] && y[0] == y[3] && y[1] == y[2];
        let horizontal_first = x[0] == x[3] && x[1] == x[2] && y[0] == y[1] && y[2] == y[3];
        if vertical_first || horizontal_first {
            Some(Rect::new(points[0], points[2]))
        } else {
            None
        }
    }

    /// The smaller side of [`Shape::get_box`], or 0 if this is not a box.
    pub fn min_size(&self) -> f64 {
        self.get_box().map_or(0., |b| b.width().min(b.height()))
    }

    /// The larger side of [`Shape::get_box`], or 0 if this is not a box.
    pub fn max_size(&self) -> f64 {
        self.get_box().map_or(0., |b| b.width().max(b.height()))
    }

    /// Returns `true` if both shapes describe the same geometry.
    ///
    /// Boxes compare by extent regardless of vertex order; anything else compares point by
    /// point.
    pub fn poly_same(&self, other: &Shape) -> bool {
        if self.kind.point_count() != other.kind.point_count() {
            return false;
        }
        match (self.get_box(), other.get_box()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.points() == other.points(),
            _ => false,
        }
    }

    /// The center of the bounds, snapped to the grid.
    pub fn center(&self) -> Point {
        let b = self.bounds();
        Point::from_lambda_clamped(b.center_x(), b.center_y())
    }

    /// Snaps every point to the nearest multiple of the grid step `grid`.
    ///
    /// # Panics
    ///
    /// Panics if `grid` is not positive.
    pub fn round_points(&mut self, grid: i64) {
        for p in self.kind.points_mut() {
            *p = p.snap_to_grid(grid);
        }
        self.bounds = OnceLock::new();
    }

    /// A new shape with `kind` on this shape's layer and port.
    fn derive(&self, kind: ShapeKind) -> Shape {
        Shape {
            layer: self.layer.clone(),
            port: self.port.clone(),
            kind,
            bounds: OnceLock::new(),
        }
    }

    /// The boundary loops of this shape's area as filled shapes, smallest area first.
    ///
    /// Holes come back as separate loops. Open shapes have no area and are rejected.
    pub fn sorted_loops(&self, config: &crate::config::KernelConfig) -> Result<Vec<Shape>> {
        let region = crate::region::Region::from_shape(self, config)?;
        let mut loops: Vec<Shape> = region
            .to_shapes(true)
            .into_iter()
            .map(|s| Shape {
                layer: self.layer.clone(),
                ..s
            })
            .collect();
        loops.sort_by(|a, b| a.area().total_cmp(&b.area()));
        Ok(loops)
    }
}

fn area(fill: AreaFill, points: Vec<Point>) -> ShapeKind {
    ShapeKind::Area { fill, points }
}

fn path(line: LineTexture, points: Vec<Point>) -> ShapeKind {
    ShapeKind::Path { line, points }
}

/// Rotates a text style for display on an object with orientation `orientation`.
///
/// Styles other than text are returned unchanged.
pub fn rotate_style(style: Style, orientation: &Orientation) -> Style {
    match style {
        Style::Text(anchor) => Style::Text(orientation.rotate_text_anchor(anchor)),
        other => other,
    }
}

/// Undoes [`rotate_style`]: the stored style that displays as `style` under `orientation`.
pub fn unrotate_style(style: Style, orientation: &Orientation) -> Style {
    match style {
        Style::Text(anchor) => Style::Text(orientation.unrotate_text_anchor(anchor)),
        other => other,
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.layer == other.layer && self.port == other.port
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.layer.hash(state);
        self.port.hash(state);
    }
}

impl Bbox for Shape {
    fn bbox(&self) -> Option<Rect> {
        self.bounds().to_rect().ok()
    }
}

impl TranslateMut for Shape {
    fn translate_mut(&mut self, p: Point) {
        for q in self.kind.points_mut() {
            q.translate_mut(p);
        }
        self.bounds = OnceLock::new();
    }
}

impl TransformMut for Shape {
    /// Transforms every point. Mirroring transforms swap the ends of arcs so that they keep
    /// running clockwise.
    fn transform_mut(&mut self, trans: Transformation) {
        if trans.is_identity() {
            return;
        }
        for p in self.kind.points_mut() {
            p.transform_mut(trans);
        }
        if let ShapeKind::Arc { start, end, .. } = &mut self.kind {
            if trans.determinant() < 0. {
                std::mem::swap(start, end);
            }
        }
        self.bounds = OnceLock::new();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use test_log::test;

    use super::*;
    use crate::transform::{Transform, Translate};

    fn pts(coords: &[(i64, i64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn construction_checks_arity() {
        assert!(matches!(
            Shape::new(Style::Circle, pts(&[(0, 0)])),
            Err(Error::PointCount { count: 1, .. })
        ));
        assert!(Shape::new(Style::CircleArc, pts(&[(0, 0), (1, 1)])).is_err());
        assert!(Shape::new(Style::Vectors, pts(&[(0, 0), (1, 1), (2, 2)])).is_err());
        assert!(Shape::new(Style::Vectors, Vec::new()).is_err());
        assert!(Shape::new(Style::Filled, Vec::new()).is_err());
        assert!(Shape::new(Style::Text(TextAnchor::Cent), pts(&[(0, 0)])).is_ok());
        let v = Shape::new(Style::Vectors, pts(&[(0, 0), (1, 1), (2, 2), (3, 3)])).unwrap();
        assert_eq!(v.points().len(), 4);
        assert_eq!(v.style(), Style::Vectors);
    }

    #[test]
    fn styles_survive_construction() {
        for style in [
            Style::Filled,
            Style::Closed,
            Style::Crossed,
            Style::Opened,
            Style::OpenedT1,
            Style::OpenedT2,
            Style::OpenedT3,
            Style::Cross,
            Style::BigCross,
            Style::Text(TextAnchor::TopLeft),
        ] {
            assert_eq!(Shape::new(style, pts(&[(0, 0)])).unwrap().style(), style);
        }
        for style in [Style::Circle, Style::ThickCircle, Style::Disc] {
            assert_eq!(Shape::new(style, pts(&[(0, 0), (4, 0)])).unwrap().style(), style);
        }
        let arc = Shape::new(Style::ThickCircleArc, pts(&[(0, 0), (4, 0), (0, 4)])).unwrap();
        assert_eq!(arc.style(), Style::ThickCircleArc);
    }

    #[test]
    fn box_recognition() {
        let closed_loop = pts(&[(0, 0), (10, 0), (10, 20), (0, 20), (0, 0)]);
        let s = Shape::new(Style::Opened, closed_loop.clone()).unwrap();
        assert_eq!(s.get_box(), Some(Rect::from_grid(0, 0, 10, 20).unwrap()));
        assert_eq!(
            Shape::new(Style::Crossed, closed_loop).unwrap().get_box(),
            None
        );
        let open = pts(&[(0, 0), (10, 0), (10, 20), (0, 20), (0, 1)]);
        assert_eq!(Shape::new(Style::Filled, open).unwrap().get_box(), None);
        let four = pts(&[(0, 0), (10, 0), (10, 20), (0, 20)]);
        assert!(Shape::new(Style::Opened, four.clone()).unwrap().get_box().is_none());
        assert!(Shape::new(Style::Text(TextAnchor::Box), four.clone())
            .unwrap()
            .get_box()
            .is_some());
        assert!(Shape::new(Style::Text(TextAnchor::Cent), four)
            .unwrap()
            .get_box()
            .is_none());
    }

    #[test]
    fn sizes_come_from_the_box() {
        let s = Shape::from_rect(&Rect::from_grid(0, 0, 400, 1200).unwrap(), AreaFill::Closed);
        assert_eq!(s.min_size(), 1.);
        assert_eq!(s.max_size(), 3.);
        let tri = Shape::new(Style::Filled, pts(&[(0, 0), (4, 0), (0, 4)])).unwrap();
        assert_eq!(tri.min_size(), 0.);
    }

    #[test]
    fn poly_same_ignores_box_vertex_order() {
        let a = Shape::new(Style::Filled, pts(&[(0, 0), (0, 4), (4, 4), (4, 0)])).unwrap();
        let b = Shape::new(Style::Filled, pts(&[(0, 0), (4, 0), (4, 4), (0, 4)])).unwrap();
        assert!(a.poly_same(&b));
        let tri = Shape::new(Style::Filled, pts(&[(0, 0), (4, 0), (0, 4)])).unwrap();
        assert!(tri.poly_same(&tri.clone()));
        assert!(!a.poly_same(&tri));
    }

    #[test]
    fn bounds_by_family() {
        let c = Shape::new(Style::Disc, pts(&[(400, 400), (800, 400)])).unwrap();
        let b = c.bounds();
        assert_relative_eq!(b.min_x(), 0.);
        assert_relative_eq!(b.max_y(), 2.);
        // Clockwise quarter from +y to +x.
        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (0, 400), (400, 0)])).unwrap();
        let b = arc.bounds();
        assert_relative_eq!(b.min_x(), 0.);
        assert_relative_eq!(b.min_y(), 0.);
        assert_relative_eq!(b.max_x(), 1.);
        assert_relative_eq!(b.max_y(), 1.);
        assert_eq!(arc.bbox(), Some(Rect::from_grid(0, 0, 400, 400).unwrap()));
        assert_eq!(arc.center(), Point::new(200, 200));
        // The same ends taken the other way round sweep three quadrants.
        let long = Shape::new(Style::CircleArc, pts(&[(0, 0), (400, 0), (0, 400)])).unwrap();
        assert_eq!(long.bbox(), Some(Rect::from_grid(-400, -400, 400, 400).unwrap()));
    }

    #[test]
    fn mirroring_keeps_arcs_clockwise() {
        let arc = Shape::new(Style::CircleArc, pts(&[(0, 0), (0, 400), (400, 0)])).unwrap();
        let mirrored = arc.clone().transform(Transformation::from(&*Orientation::x()));
        let ShapeKind::Arc { start, end, .. } = mirrored.kind() else {
            panic!("arc expected");
        };
        assert_eq!(*start, Point::new(-400, 0));
        assert_eq!(*end, Point::new(0, 400));
        let b = mirrored.bounds();
        assert_relative_eq!(b.min_x(), -1.);
        assert_relative_eq!(b.max_x(), 0.);
        assert_relative_eq!(b.min_y(), 0.);
        assert_relative_eq!(b.max_y(), 1.);
        let rotated = arc.transform(Transformation::from(&*Orientation::r()));
        let ShapeKind::Arc { start, .. } = rotated.kind() else {
            panic!("arc expected");
        };
        assert_eq!(*start, Point::new(-400, 0));
    }

    #[test]
    fn translation_resets_bounds() {
        let s = Shape::from_rect(&Rect::from_grid(0, 0, 400, 400).unwrap(), AreaFill::Filled)
            .with_layer("metal1");
        assert_relative_eq!(s.bounds().max_x(), 1.);
        let moved = s.translate(Point::new(400, 0));
        assert_relative_eq!(moved.bounds().max_x(), 2.);
        assert_eq!(moved.layer().map(Layer::name), Some("metal1"));
    }

    #[test]
    fn round_points_snaps_to_coarse_grid() {
        let mut s = Shape::new(Style::Opened, pts(&[(149, 0), (351, -151)])).unwrap();
        s.round_points(100);
        assert_eq!(s.points(), pts(&[(100, 0), (400, -200)]));
    }

    #[test]
    fn text_styles_rotate_with_orientation() {
        let r = Orientation::r();
        let rotated = rotate_style(Style::Text(TextAnchor::Left), &r);
        assert_eq!(rotated, Style::Text(TextAnchor::Bot));
        assert_eq!(unrotate_style(rotated, &r), Style::Text(TextAnchor::Left));
        assert_eq!(rotate_style(Style::Filled, &r), Style::Filled);
    }

    #[test]
    fn equality_ignores_cached_bounds() {
        let a = Shape::new(Style::Filled, pts(&[(0, 0), (4, 0), (0, 4)])).unwrap();
        let b = a.clone();
        let _ = a.bounds();
        assert_eq!(a, b);
        assert_ne!(a, b.with_port("A"));
    }

    #[test]
    fn serde_round_trip_keeps_geometry() {
        let s = Shape::new(Style::CircleArc, pts(&[(0, 0), (400, 0), (0, 400)]))
            .unwrap()
            .with_layer("poly");
        let text = toml::to_string(&s).unwrap();
        let back: Shape = toml::from_str(&text).unwrap();
        assert_eq!(back, s);
    }
}
