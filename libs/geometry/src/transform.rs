//! Affine transformation types and traits.

use approx::{AbsDiffEq, RelativeEq};
use impl_trait_for_tuples::impl_for_tuples;
use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;
use crate::point::Point;

/// An affine map in lambda units: a 2x2 linear part followed by a translation.
///
/// Transformations built from [`Orientation`]s and offsets are rigid; [`Transformation::cascade`]
/// keeps them that way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The linear part, row-major.
    pub(crate) m: [[f64; 2]; 2],
    /// The translation applied after the linear part.
    pub(crate) b: [f64; 2],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub const fn identity() -> Self {
        Self {
            m: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }

    /// Returns a translation by `(x, y)` lambda units.
    pub const fn translate(x: f64, y: f64) -> Self {
        Self {
            m: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }

    /// Creates a transform that orients geometry about the origin and then moves it by
    /// `(dx, dy)` lambda units.
    pub fn from_orientation(orientation: &Orientation, dx: f64, dy: f64) -> Self {
        Self {
            m: orientation.matrix(),
            b: [dx, dy],
        }
    }

    /// Creates a transform from its raw parts.
    pub const fn from_parts(m: [[f64; 2]; 2], b: [f64; 2]) -> Self {
        Self { m, b }
    }

    /// Create a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// Applying the result equals applying `child` and then `parent`. The operation is not
    /// commutative.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// let t = Transformation::cascade(
    ///     Transformation::from_orientation(&Orientation::y(), 0., 0.),
    ///     Transformation::translate(1., 1.),
    /// );
    /// assert_eq!(t.apply(1., 1.), (2., -2.));
    /// ```
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        let (bx, by) = parent.apply(child.b[0], child.b[1]);
        let p = &parent.m;
        let c = &child.m;
        Self {
            m: [
                [
                    p[0][0] * c[0][0] + p[0][1] * c[1][0],
                    p[0][0] * c[0][1] + p[0][1] * c[1][1],
                ],
                [
                    p[1][0] * c[0][0] + p[1][1] * c[1][0],
                    p[1][0] * c[0][1] + p[1][1] * c[1][1],
                ],
            ],
            b: [bx, by],
        }
    }

    /// The determinant of the linear part.
    ///
    /// Negative for mirroring transforms.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Returns the inverse transformation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// use approx::assert_relative_eq;
    ///
    /// let trans = Transformation::cascade(
    ///     Transformation::from_orientation(&Orientation::r(), 0., 0.),
    ///     Transformation::translate(5., 10.),
    /// );
    /// let inv = trans.inv();
    ///
    /// assert_relative_eq!(Transformation::cascade(inv, trans), Transformation::identity());
    /// ```
    pub fn inv(&self) -> Transformation {
        let det = self.determinant();
        let m = [
            [self.m[1][1] / det, -self.m[0][1] / det],
            [-self.m[1][0] / det, self.m[0][0] / det],
        ];
        let bx = -(m[0][0] * self.b[0] + m[0][1] * self.b[1]);
        let by = -(m[1][0] * self.b[0] + m[1][1] * self.b[1]);
        Self { m, b: [bx, by] }
    }

    /// Applies the transformation to a lambda position.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m[0][0] * x + self.m[0][1] * y + self.b[0],
            self.m[1][0] * x + self.m[1][1] * y + self.b[1],
        )
    }

    /// Returns `true` if this transformation leaves every position unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// The linear part, row-major.
    #[inline]
    pub fn matrix(&self) -> [[f64; 2]; 2] {
        self.m
    }

    /// The translation part, in lambda units.
    #[inline]
    pub fn offset(&self) -> (f64, f64) {
        (self.b[0], self.b[1])
    }
}

impl From<&Orientation> for Transformation {
    fn from(value: &Orientation) -> Self {
        Self::from_orientation(value, 0., 0.)
    }
}

impl AbsDiffEq for Transformation {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.m
            .iter()
            .flatten()
            .chain(&self.b)
            .zip(other.m.iter().flatten().chain(&other.b))
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Transformation {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.m
            .iter()
            .flatten()
            .chain(&self.b)
            .zip(other.m.iter().flatten().chain(&other.b))
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
#[impl_for_tuples(32)]
pub trait TransformMut {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform_mut(&mut self, trans: Transformation);
}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for i in self.iter_mut() {
            i.transform_mut(trans);
        }
    }
}

impl<T: TransformMut> TransformMut for Option<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        if let Some(inner) = self.as_mut() {
            inner.transform_mut(trans);
        }
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
///
/// Takes in an owned copy of the shape and returns the transformed version.
pub trait Transform: TransformMut + Sized {
    /// Applies matrix-vector [`Transformation`] `trans`.
    ///
    /// Creates a new shape at a location equal to the transformation of the original.
    #[inline]
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

/// A trait for specifying how a shape is translated by a [`Point`].
#[impl_for_tuples(32)]
pub trait TranslateMut {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate_mut(&mut self, p: Point);
}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for i in self.iter_mut() {
            i.translate_mut(p);
        }
    }
}

impl<T: TranslateMut> TranslateMut for Option<T> {
    fn translate_mut(&mut self, p: Point) {
        if let Some(inner) = self.as_mut() {
            inner.translate_mut(p);
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
///
/// Takes in an owned copy of the shape and returns the translated version.
pub trait Translate: TranslateMut + Sized {
    /// Translates the shape by a [`Point`] through mutation.
    ///
    /// Creates a new shape at a location equal to the translation of the original.
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use test_log::test;

    use super::*;

    fn all_manhattan() -> Vec<std::sync::Arc<Orientation>> {
        let mut out = Vec::new();
        for angle in [0, 900, 1800, 2700] {
            for (mx, my) in [(false, false), (true, false), (false, true), (true, true)] {
                out.push(Orientation::from_angle_mirror(angle, mx, my));
            }
        }
        out
    }

    #[test]
    fn cascade_identity_preserves_transformation() {
        for o in all_manhattan() {
            let tf = Transformation::from_orientation(&o, 1.3, 0.325);
            let casc = Transformation::cascade(tf, Transformation::identity());
            assert_eq!(tf, casc, "orientation {}", o);
            let casc = Transformation::cascade(Transformation::identity(), tf);
            assert_eq!(tf, casc, "orientation {}", o);
        }
    }

    #[test]
    fn cascade_matches_orientation_concatenation() {
        for a in all_manhattan() {
            for b in all_manhattan() {
                let ta = Transformation::from(&*a);
                let tb = Transformation::from(&*b);
                let expected = Transformation::from(&*a.concatenate(&b));
                assert_relative_eq!(Transformation::cascade(ta, tb), expected);
            }
        }
    }

    #[test]
    fn inverse_undoes_transformation() {
        for o in all_manhattan() {
            let tf = Transformation::from_orientation(&o, 2.5, -7.);
            let (x, y) = tf.apply(3., 4.);
            let (bx, by) = tf.inv().apply(x, y);
            assert_relative_eq!(bx, 3.);
            assert_relative_eq!(by, 4.);
            assert_relative_eq!(
                Transformation::cascade(tf, tf.inv()),
                Transformation::identity()
            );
        }
    }

    #[test]
    fn determinant_sign_marks_mirrors() {
        assert_eq!(Transformation::from(&*Orientation::x()).determinant(), -1.);
        assert_eq!(Transformation::from(&*Orientation::rr()).determinant(), 1.);
        assert_eq!(Transformation::from(&*Orientation::yr()).determinant(), -1.);
    }

    #[test]
    fn point_transformations_work() {
        let pt = Point::new(800, 400);

        let pt_mirror_y = pt.transform(Transformation::from(&*Orientation::y()));
        assert_eq!(pt_mirror_y, Point::new(800, -400));

        let pt_mirror_x = pt.transform(Transformation::from(&*Orientation::x()));
        assert_eq!(pt_mirror_x, Point::new(-800, 400));

        let pt_r90 = pt.transform(Transformation::from_orientation(&Orientation::r(), 23., 11.));
        assert_eq!(pt_r90, Point::new(23 * 400 - 400, 11 * 400 + 800));

        let pt_r180 = pt.transform(Transformation::from_orientation(&Orientation::rr(), -50., 10.));
        assert_eq!(pt_r180, Point::new(-50 * 400 - 800, 10 * 400 - 400));

        let pt_r270 = pt.transform(Transformation::from_orientation(&Orientation::rrr(), 80., 90.));
        assert_eq!(pt_r270, Point::new(80 * 400 + 400, 90 * 400 - 800));
    }

    #[test]
    fn tuples_and_vecs_transform_elementwise() {
        let mut pts = (vec![Point::new(400, 0)], Some(Point::new(0, 400)));
        pts.transform_mut(Transformation::from(&*Orientation::r()));
        assert_eq!(pts.0[0], Point::new(0, 400));
        assert_eq!(pts.1, Some(Point::new(-400, 0)));
    }
}
