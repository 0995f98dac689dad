//! Outlines of straight wires with extended ends.

use crate::error::Result;
use crate::point::Point;
use crate::style::Style;
use crate::units::{cos, sin};

use super::Shape;

/// `50 / tan(a / 2)` scaled by 100 for end angles `a` of 0 to 90 degrees.
const EXTEND_TABLE: [i32; 91] = [
    0, 11459, 5729, 3819, 2864, 2290, 1908, 1635, 1430, 1271, 1143, 1039, 951, 878, 814, 760, 712,
    669, 631, 598, 567, 540, 514, 492, 470, 451, 433, 417, 401, 387, 373, 361, 349, 338, 327, 317,
    308, 299, 290, 282, 275, 267, 261, 254, 248, 241, 236, 230, 225, 219, 214, 210, 205, 201, 196,
    192, 188, 184, 180, 177, 173, 170, 166, 163, 160, 157, 154, 151, 148, 146, 143, 140, 138, 135,
    133, 130, 128, 126, 123, 121, 119, 117, 115, 113, 111, 109, 107, 105, 104, 102, 100,
];

/// How far a wire end of `width` extends past its end point.
///
/// `extend` is the end angle in degrees. Values outside `1..90` extend by half the width.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// assert_eq!(extend_factor(4.0, 0), 2.0);
/// assert_eq!(extend_factor(4.0, 90), 2.0);
/// assert!(extend_factor(4.0, 10) < 0.2);
/// ```
pub fn extend_factor(width: f64, extend: i32) -> f64 {
    if extend <= 0 || extend >= 90 {
        width * 0.5
    } else {
        width * 50. / EXTEND_TABLE[extend as usize] as f64
    }
}

/// Builds the outline of a straight wire from `head` to `tail`.
///
/// `angle` is the wire direction in tenth-degrees and `len` its length; a zero length on an
/// angled wire is recomputed from the ends. The ends extend by `ext_head` and `ext_tail`
/// along the wire. Outlines of nonzero width drawn with an open style repeat their first
/// corner so they close.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let wire = make_end_point_poly(
///     4.0, 2.0, 0,
///     Point::from_lambda(4.0, 0.0).unwrap(), 1.0,
///     Point::from_lambda(0.0, 0.0).unwrap(), 1.0,
///     Style::Filled,
/// )
/// .unwrap();
/// assert_eq!(wire.get_box(), Some(Rect::from_lambda(-1.0, -1.0, 5.0, 1.0).unwrap()));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn make_end_point_poly(
    len: f64,
    width: f64,
    angle: i32,
    head: Point,
    ext_head: f64,
    tail: Point,
    ext_tail: f64,
    style: Style,
) -> Result<Shape> {
    let w2 = width / 2.;
    let (mut x1, mut y1) = head.lambda();
    let (mut x2, mut y2) = tail.lambda();
    let (mut eh, mut et) = (ext_head, ext_tail);

    let corners = match angle {
        900 | 2700 => {
            if angle == 900 {
                std::mem::swap(&mut y1, &mut y2);
                std::mem::swap(&mut eh, &mut et);
            }
            [
                (x1 - w2, y1 - eh),
                (x1 + w2, y1 - eh),
                (x2 + w2, y2 + et),
                (x2 - w2, y2 + et),
            ]
        }
        0 | 1800 => {
            if angle == 0 {
                std::mem::swap(&mut x1, &mut x2);
                std::mem::swap(&mut eh, &mut et);
            }
            [
                (x1 - eh, y1 - w2),
                (x1 - eh, y1 + w2),
                (x2 + et, y2 + w2),
                (x2 + et, y2 - w2),
            ]
        }
        _ => {
            let len = if len == 0. { head.distance(tail) } else { len };
            let (xe1, ye1, xe2, ye2, x_extra, y_extra);
            if len == 0. {
                let (sa, ca) = (sin(angle), cos(angle));
                xe1 = x1 - ca * eh;
                ye1 = y1 - sa * eh;
                xe2 = x2 + ca * et;
                ye2 = y2 + sa * et;
                x_extra = ca * w2;
                y_extra = sa * w2;
            } else {
                let (ux, uy) = ((x2 - x1) / len, (y2 - y1) / len);
                xe1 = x1 - eh * ux;
                ye1 = y1 - eh * uy;
                xe2 = x2 + et * ux;
                ye2 = y2 + et * uy;
                x_extra = w2 * ux;
                y_extra = w2 * uy;
            }
            [
                (y_extra + xe1, ye1 - x_extra),
                (xe1 - y_extra, x_extra + ye1),
                (xe2 - y_extra, x_extra + ye2),
                (y_extra + xe2, ye2 - x_extra),
            ]
        }
    };

    let mut points = corners
        .into_iter()
        .map(|(x, y)| Point::from_lambda(x, y))
        .collect::<Result<Vec<_>>>()?;
    if width != 0. && style.is_opened() {
        points.push(points[0]);
    }
    Shape::new(style, points)
}
