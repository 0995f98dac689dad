//! Canonical rotation and mirror orientations.
//!
//! Every distinct `(angle, mirror_x, mirror_y)` triple has exactly one shared [`Orientation`]
//! instance, handed out as an [`Arc`] by [`Orientation::from_angle_mirror`].

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::rect::Rect;
use crate::style::TextAnchor;
use crate::transform::{Transform, Transformation};
use crate::units::{self, angle_xy, normalize_angle};

/// The value identifying an orientation.
///
/// `angle` is a counter-clockwise rotation in tenth-degrees. `mirror_x` negates x and
/// `mirror_y` negates y; mirrors are applied after the rotation.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrientationKey {
    /// Counter-clockwise rotation in tenth-degrees.
    pub angle: i32,
    /// Whether x is negated after rotating.
    pub mirror_x: bool,
    /// Whether y is negated after rotating.
    pub mirror_y: bool,
}

impl OrientationKey {
    /// Creates a key, normalizing the angle into `[0, 3600)`.
    pub fn new(angle: i32, mirror_x: bool, mirror_y: bool) -> Self {
        Self {
            angle: normalize_angle(angle),
            mirror_x,
            mirror_y,
        }
    }

    /// Returns `true` if exactly one mirror flag is set.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.mirror_x != self.mirror_y
    }

    /// The shared orientation for this key.
    #[inline]
    pub fn canonical(self) -> Arc<Orientation> {
        Orientation::from_angle_mirror(self.angle, self.mirror_x, self.mirror_y)
    }

    fn inverse(&self) -> Self {
        if self.is_odd() || self.angle == 0 || self.angle == 1800 {
            *self
        } else {
            Self::new(3600 - self.angle, self.mirror_x, self.mirror_y)
        }
    }
}

lazy_static! {
    static ref CANONICAL: Mutex<HashMap<OrientationKey, Arc<Orientation>>> =
        Mutex::new(HashMap::new());
}

/// A rotation followed by optional mirroring about either axis.
///
/// Instances are immutable and canonical: two orientations with equal keys are the same
/// allocation. The 2x2 matrix and the inverse key are computed once at construction.
#[derive(Debug)]
pub struct Orientation {
    key: OrientationKey,
    inverse: OrientationKey,
    matrix: [[f64; 2]; 2],
}

impl Orientation {
    /// Returns the shared orientation for the given angle (tenth-degrees) and mirror flags.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let a = Orientation::from_angle_mirror(900, true, false);
    /// let b = Orientation::from_angle_mirror(4500, true, false);
    /// assert!(Arc::ptr_eq(&a, &b));
    /// assert_eq!(a.angle(), 900);
    /// ```
    pub fn from_angle_mirror(angle: i32, mirror_x: bool, mirror_y: bool) -> Arc<Orientation> {
        let key = OrientationKey::new(angle, mirror_x, mirror_y);
        let mut cache = CANONICAL.lock().unwrap_or_else(|e| e.into_inner());
        cache
            .entry(key)
            .or_insert_with(|| {
                tracing::trace!(?key, "creating canonical orientation");
                Arc::new(Orientation::build(key))
            })
            .clone()
    }

    fn build(key: OrientationKey) -> Self {
        // Rotation part from the quadrant tables; exact for multiples of 900.
        let quadrant = key.angle / 900;
        let rem = key.angle % 900;
        let (c, s) = if rem == 0 {
            match quadrant {
                0 => (1., 0.),
                1 => (0., 1.),
                2 => (-1., 0.),
                _ => (0., -1.),
            }
        } else {
            (units::cos(key.angle), units::sin(key.angle))
        };
        let sx = if key.mirror_x { -1. } else { 1. };
        let sy = if key.mirror_y { -1. } else { 1. };
        Self {
            key,
            inverse: key.inverse(),
            matrix: [[sx * c, -sx * s], [sy * s, sy * c]],
        }
    }

    /// The identity orientation.
    pub fn ident() -> Arc<Orientation> {
        Self::from_angle_mirror(0, false, false)
    }

    /// A 90 degree counter-clockwise rotation.
    pub fn r() -> Arc<Orientation> {
        Self::from_angle_mirror(900, false, false)
    }

    /// A 180 degree rotation.
    pub fn rr() -> Arc<Orientation> {
        Self::from_angle_mirror(1800, false, false)
    }

    /// A 270 degree counter-clockwise rotation.
    pub fn rrr() -> Arc<Orientation> {
        Self::from_angle_mirror(2700, false, false)
    }

    /// Mirror in x.
    pub fn x() -> Arc<Orientation> {
        Self::from_angle_mirror(0, true, false)
    }

    /// Mirror in y.
    pub fn y() -> Arc<Orientation> {
        Self::from_angle_mirror(0, false, true)
    }

    /// Rotate 90 degrees, then mirror in x.
    pub fn xr() -> Arc<Orientation> {
        Self::from_angle_mirror(900, true, false)
    }

    /// Rotate 90 degrees, then mirror in y.
    pub fn yr() -> Arc<Orientation> {
        Self::from_angle_mirror(900, false, true)
    }

    /// The value identifying this orientation.
    #[inline]
    pub fn key(&self) -> OrientationKey {
        self.key
    }

    /// Counter-clockwise rotation in tenth-degrees, in `[0, 3600)`.
    #[inline]
    pub fn angle(&self) -> i32 {
        self.key.angle
    }

    /// Whether x is negated after rotating.
    #[inline]
    pub fn mirror_x(&self) -> bool {
        self.key.mirror_x
    }

    /// Whether y is negated after rotating.
    #[inline]
    pub fn mirror_y(&self) -> bool {
        self.key.mirror_y
    }

    /// The 2x2 linear map, row-major.
    #[inline]
    pub fn matrix(&self) -> [[f64; 2]; 2] {
        self.matrix
    }

    /// Returns `true` for the identity orientation.
    #[inline]
    pub fn is_ident(&self) -> bool {
        self.key == OrientationKey::default()
    }

    /// Returns `true` if the angle is a multiple of 90 degrees.
    #[inline]
    pub fn is_manhattan(&self) -> bool {
        self.key.angle % 900 == 0
    }

    /// The orientation undoing this one.
    pub fn inverse(&self) -> Arc<Orientation> {
        self.inverse.canonical()
    }

    /// Composes `self` with `other`: applying the result equals applying `other` first and
    /// then `self`.
    ///
    /// Mirror flags combine by exclusive or. The rotation of `self` changes sign when `other`
    /// mirrors an odd number of axes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let r = Orientation::r();
    /// assert!(Arc::ptr_eq(&r.concatenate(&r), &Orientation::rr()));
    ///
    /// // Mirroring reverses the rotation that follows it.
    /// let xr = Orientation::r().concatenate(&Orientation::x());
    /// assert_eq!(xr.angle(), 2700);
    /// assert!(xr.mirror_x());
    /// ```
    pub fn concatenate(&self, other: &Orientation) -> Arc<Orientation> {
        let angle = if other.key.is_odd() {
            other.key.angle - self.key.angle
        } else {
            other.key.angle + self.key.angle
        };
        Self::from_angle_mirror(
            angle,
            self.key.mirror_x != other.key.mirror_x,
            self.key.mirror_y != other.key.mirror_y,
        )
    }

    /// Applies the linear map to a lambda vector.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.matrix;
        (m[0][0] * x + m[0][1] * y, m[1][0] * x + m[1][1] * y)
    }

    /// Transforms a point about the origin.
    pub fn transform_point(&self, p: Point) -> Point {
        let (x, y) = self.apply(p.lambda_x(), p.lambda_y());
        Point::from_lambda_clamped(x, y)
    }

    /// Transforms a rectangle about the origin, returning the bounding box of the result.
    pub fn transform_rect(&self, r: &Rect) -> Rect {
        r.transform(Transformation::from_orientation(self, 0., 0.))
    }

    /// Rotates the anchor of text placed on an object with this orientation.
    ///
    /// Centered and boxed anchors, and non-Manhattan orientations, leave the anchor unchanged.
    pub fn rotate_text_anchor(&self, anchor: TextAnchor) -> TextAnchor {
        if self.is_ident() || !self.is_manhattan() {
            return anchor;
        }
        let Some(angle) = anchor.angle() else {
            return anchor;
        };
        let (x, y) = self.apply(units::cos(angle), units::sin(angle));
        TextAnchor::from_angle(angle_xy(0., 0., x, y))
    }

    /// Converts an apparent text anchor on an object with this orientation back to the anchor
    /// that is stored, so that [`Orientation::rotate_text_anchor`] reproduces the apparent one.
    pub fn unrotate_text_anchor(&self, anchor: TextAnchor) -> TextAnchor {
        if self.is_ident() || !self.is_manhattan() {
            return anchor;
        }
        self.inverse().rotate_text_anchor(anchor)
    }
}

impl PartialEq for Orientation {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Orientation {}

impl Hash for Orientation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_ident() {
            return write!(f, "I");
        }
        if self.key.mirror_x {
            write!(f, "X")?;
        }
        if self.key.mirror_y {
            write!(f, "Y")?;
        }
        if self.is_manhattan() {
            for _ in 0..self.key.angle / 900 {
                write!(f, "R")?;
            }
        } else {
            write!(f, "R{}", self.key.angle)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use test_log::test;

    use super::*;

    const ANGLES: [i32; 6] = [0, 900, 1800, 2700, 450, 370];
    const PARITIES: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

    fn all() -> Vec<Arc<Orientation>> {
        let mut out = Vec::new();
        for angle in ANGLES {
            for (mx, my) in PARITIES {
                out.push(Orientation::from_angle_mirror(angle, mx, my));
            }
        }
        out
    }

    fn matmul(a: [[f64; 2]; 2], b: [[f64; 2]; 2]) -> [[f64; 2]; 2] {
        [
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ]
    }

    #[test]
    fn canonical_instances_are_shared() {
        for o in all() {
            let again = Orientation::from_angle_mirror(o.angle(), o.mirror_x(), o.mirror_y());
            assert!(Arc::ptr_eq(&o, &again));
        }
        let a = Orientation::from_angle_mirror(-900, false, true);
        let b = Orientation::from_angle_mirror(2700, false, true);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn canonicalization_is_thread_safe() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| Orientation::from_angle_mirror(1230, true, true)))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], r));
        }
    }

    #[test]
    fn concatenate_then_inverse_recovers_original() {
        for o1 in all() {
            for o2 in all() {
                let back = o1.concatenate(&o2.inverse()).concatenate(&o2);
                assert!(
                    Arc::ptr_eq(&back, &o1),
                    "{} . inv({}) . {} gave {}",
                    o1,
                    o2,
                    o2,
                    back
                );
            }
        }
    }

    #[test]
    fn concatenate_matches_matrix_product() {
        for o1 in all() {
            for o2 in all() {
                let c = o1.concatenate(&o2);
                let expected = matmul(o1.matrix(), o2.matrix());
                for (row, exp_row) in c.matrix().iter().zip(expected) {
                    for (v, e) in row.iter().zip(exp_row) {
                        assert_abs_diff_eq!(*v, e, epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn inverse_rules() {
        assert!(Arc::ptr_eq(&Orientation::xr().inverse(), &Orientation::xr()));
        assert!(Arc::ptr_eq(&Orientation::rr().inverse(), &Orientation::rr()));
        assert!(Arc::ptr_eq(&Orientation::r().inverse(), &Orientation::rrr()));
        let odd = Orientation::from_angle_mirror(370, false, true);
        assert!(Arc::ptr_eq(&odd.inverse(), &odd));
        let both = Orientation::from_angle_mirror(370, true, true);
        assert_eq!(both.inverse().angle(), 3230);
    }

    #[test]
    fn manhattan_matrices_are_exact() {
        assert_eq!(Orientation::r().matrix(), [[0., -1.], [1., 0.]]);
        assert_eq!(Orientation::rr().matrix(), [[-1., 0.], [0., -1.]]);
        assert_eq!(Orientation::xr().matrix(), [[0., 1.], [1., 0.]]);
        assert_eq!(Orientation::y().matrix(), [[1., 0.], [0., -1.]]);
    }

    #[test]
    fn transforms_points() {
        let p = Point::new(400, 800);
        assert_eq!(Orientation::r().transform_point(p), Point::new(-800, 400));
        assert_eq!(Orientation::x().transform_point(p), Point::new(-400, 800));
        let r = Rect::from_grid(0, 0, 400, 800).unwrap();
        assert_eq!(
            Orientation::rrr().transform_rect(&r),
            Rect::from_grid(0, -400, 800, 0).unwrap()
        );
    }

    #[test]
    fn text_anchor_rotation_round_trips() {
        use TextAnchor::*;
        assert_eq!(Orientation::r().rotate_text_anchor(Left), Bot);
        assert_eq!(Orientation::rr().rotate_text_anchor(TopLeft), BotRight);
        assert_eq!(Orientation::x().rotate_text_anchor(Left), Right);
        assert_eq!(Orientation::y().rotate_text_anchor(BotLeft), TopLeft);
        assert_eq!(Orientation::r().rotate_text_anchor(Cent), Cent);
        assert_eq!(Orientation::r().rotate_text_anchor(Box), Box);
        for o in all() {
            for anchor in [Left, BotLeft, Bot, BotRight, Right, TopRight, Top, TopLeft] {
                let there = o.rotate_text_anchor(anchor);
                assert_eq!(o.unrotate_text_anchor(there), anchor, "orientation {}", o);
            }
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Orientation::ident().to_string(), "I");
        assert_eq!(Orientation::rrr().to_string(), "RRR");
        assert_eq!(Orientation::xr().to_string(), "XR");
        assert_eq!(Orientation::from_angle_mirror(450, false, true).to_string(), "YR450");
    }
}
