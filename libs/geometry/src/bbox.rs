//! Axis-aligned rectangular bounding boxes.

use impl_trait_for_tuples::impl_for_tuples;

use crate::point::Point;
use crate::rect::Rect;

/// A geometric object that has a bounding box.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let rect = Rect::from_grid(0, 0, 100, 200).unwrap();
/// assert_eq!(rect.bbox(), Some(rect));
/// let pts = vec![Point::new(5, 7), Point::new(-5, 9)];
/// assert_eq!(pts.bbox(), Some(Rect::from_grid(-5, 7, 5, 9).unwrap()));
/// ```
pub trait Bbox {
    /// Computes the axis-aligned rectangular bounding box.
    ///
    /// Returns [`None`] for objects with no geometry. Points and zero-area rectangles are not
    /// empty and have a bounding box.
    fn bbox(&self) -> Option<Rect>;
}

/// Combines two optional bounding boxes.
pub(crate) fn bounding_union(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

impl<T> Bbox for &T
where
    T: Bbox,
{
    fn bbox(&self) -> Option<Rect> {
        T::bbox(*self)
    }
}

#[impl_for_tuples(16)]
impl Bbox for TupleIdentifier {
    #[allow(clippy::let_and_return)]
    fn bbox(&self) -> Option<Rect> {
        let mut bbox = None;
        for_tuples!( #( bbox = bounding_union(bbox, TupleIdentifier.bbox()); )* );
        bbox
    }
}

impl<T: Bbox> Bbox for Vec<T> {
    fn bbox(&self) -> Option<Rect> {
        self.as_slice().bbox()
    }
}

impl<T: Bbox> Bbox for [T] {
    fn bbox(&self) -> Option<Rect> {
        self.iter()
            .fold(None, |acc, item| bounding_union(acc, item.bbox()))
    }
}

impl Bbox for Option<Rect> {
    fn bbox(&self) -> Option<Rect> {
        *self
    }
}

impl Bbox for Point {
    fn bbox(&self) -> Option<Rect> {
        Some(Rect::from_point(*self))
    }
}
