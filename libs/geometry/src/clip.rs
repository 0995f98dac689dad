//! Line and polygon clipping against axis-aligned boxes.
//!
//! Lines are clipped with Cohen–Sutherland outcodes; polygons are clipped one box side at a
//! time, Sutherland–Hodgman style. Integer variants compute slope terms in `i64` so that
//! `i32` coordinates never overflow.

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode<T: PartialOrd>(x: T, y: T, lx: T, hx: T, ly: T, hy: T) -> u8 {
    let mut code = 0;
    if x < lx {
        code |= LEFT;
    } else if x > hx {
        code |= RIGHT;
    }
    if y < ly {
        code |= BOTTOM;
    } else if y > hy {
        code |= TOP;
    }
    code
}

/// Clips the segment from `from` to `to` against the box `[lx, hx] x [ly, hy]`.
///
/// Both ends are moved onto the box boundary where needed. Returns `true` if no part of
/// the segment is visible, in which case the ends hold unspecified values.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::clip::clip_line;
/// let mut from = [-5.0, 5.0];
/// let mut to = [15.0, 5.0];
/// assert!(!clip_line(&mut from, &mut to, 0.0, 10.0, 0.0, 10.0));
/// assert_eq!(from, [0.0, 5.0]);
/// assert_eq!(to, [10.0, 5.0]);
/// ```
pub fn clip_line(
    from: &mut [f64; 2],
    to: &mut [f64; 2],
    lx: f64,
    hx: f64,
    ly: f64,
    hy: f64,
) -> bool {
    loop {
        let mut fc = outcode(from[0], from[1], lx, hx, ly, hy);
        let tc = outcode(to[0], to[1], lx, hx, ly, hy);

        if fc == 0 && tc == 0 {
            return false;
        }
        if fc == tc || fc & tc != 0 {
            return true;
        }

        if fc == 0 {
            std::mem::swap(from, to);
            fc = tc;
        }

        if fc & LEFT != 0 {
            if to[0] == from[0] {
                return true;
            }
            let t = (to[1] - from[1]) * (lx - from[0]) / (to[0] - from[0]);
            *from = [lx, from[1] + t];
        }
        if fc & RIGHT != 0 {
            if to[0] == from[0] {
                return true;
            }
            let t = (to[1] - from[1]) * (hx - from[0]) / (to[0] - from[0]);
            *from = [hx, from[1] + t];
        }
        if fc & BOTTOM != 0 {
            if to[1] == from[1] {
                return true;
            }
            let t = (to[0] - from[0]) * (ly - from[1]) / (to[1] - from[1]);
            *from = [from[0] + t, ly];
        }
        if fc & TOP != 0 {
            if to[1] == from[1] {
                return true;
            }
            let t = (to[0] - from[0]) * (hy - from[1]) / (to[1] - from[1]);
            *from = [from[0] + t, hy];
        }
    }
}

/// Integer variant of [`clip_line`].
///
/// Intersection coordinates truncate toward zero.
pub fn clip_line_grid(
    from: &mut [i32; 2],
    to: &mut [i32; 2],
    lx: i32,
    hx: i32,
    ly: i32,
    hy: i32,
) -> bool {
    // Slope terms: (a - b) * (c - d) / (e - f), all widened to i64.
    fn term(a: i32, b: i32, c: i32, d: i32, e: i32, f: i32) -> i32 {
        let num = (a as i64 - b as i64) * (c as i64 - d as i64);
        (num / (e as i64 - f as i64)) as i32
    }

    loop {
        let mut fc = outcode(from[0], from[1], lx, hx, ly, hy);
        let tc = outcode(to[0], to[1], lx, hx, ly, hy);

        if fc == 0 && tc == 0 {
            return false;
        }
        if fc == tc || fc & tc != 0 {
            return true;
        }

        if fc == 0 {
            std::mem::swap(from, to);
            fc = tc;
        }

        if fc & LEFT != 0 {
            if to[0] == from[0] {
                return true;
            }
            from[1] += term(to[1], from[1], lx, from[0], to[0], from[0]);
            from[0] = lx;
        }
        if fc & RIGHT != 0 {
            if to[0] == from[0] {
                return true;
            }
            from[1] += term(to[1], from[1], hx, from[0], to[0], from[0]);
            from[0] = hx;
        }
        if fc & BOTTOM != 0 {
            if to[1] == from[1] {
                return true;
            }
            from[0] += term(to[0], from[0], ly, from[1], to[1], from[1]);
            from[1] = ly;
        }
        if fc & TOP != 0 {
            if to[1] == from[1] {
                return true;
            }
            from[0] += term(to[0], from[0], hy, from[1], to[1], from[1]);
            from[1] = hy;
        }
    }
}

/// Clips a closed polygon against the box `[lx, hx] x [ly, hy]`.
///
/// Returns the clipped outline with consecutive duplicates and wrap-around duplicates
/// removed. A polygon lying fully inside the box is returned unchanged.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::clip::clip_poly;
/// let square = [[-5, -5], [5, -5], [5, 5], [-5, 5]];
/// let clipped = clip_poly(&square, 0, 10, 0, 10);
/// assert_eq!(clipped.len(), 4);
/// assert!(clipped.iter().all(|p| p[0] >= 0 && p[1] >= 0));
/// ```
pub fn clip_poly(points: &[[i32; 2]], lx: i32, hx: i32, ly: i32, hy: i32) -> Vec<[i32; 2]> {
    let outside = points
        .iter()
        .fold(0, |acc, p| acc | outcode(p[0], p[1], lx, hx, ly, hy));
    if outside == 0 {
        return points.to_vec();
    }

    let mut poly = points.to_vec();
    for (edge, value) in [(LEFT, lx), (RIGHT, hx), (TOP, hy), (BOTTOM, ly)] {
        if outside & edge != 0 {
            poly = clip_edge(&poly, edge, value);
        }
    }

    poly.dedup();
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    poly
}

/// Clips a polygon against one box side.
fn clip_edge(poly: &[[i32; 2]], edge: u8, value: i32) -> Vec<[i32; 2]> {
    let mut out: Vec<[i32; 2]> = Vec::with_capacity(poly.len() * 2);
    let mut first = None;
    for i in 0..poly.len() {
        let prev = if i == 0 { poly.len() - 1 } else { i - 1 };
        let Some((p1, p2)) = clip_segment(poly[prev], poly[i], edge, value) else {
            continue;
        };
        match out.last() {
            Some(&last) => {
                if last != p1 {
                    out.push(p1);
                }
            }
            None => first = Some(p1),
        }
        out.push(p2);
    }
    if let (Some(first), Some(&last)) = (first, out.last()) {
        if last != first {
            out.push(first);
        }
    }
    out
}

/// Clips the segment `p1`-`p2` against a single box side.
///
/// Returns [`None`] if the segment lies entirely on the outer side.
fn clip_segment(p1: [i32; 2], p2: [i32; 2], edge: u8, value: i32) -> Option<([i32; 2], [i32; 2])> {
    let out = |p: [i32; 2]| match edge {
        LEFT => p[0] < value,
        RIGHT => p[0] > value,
        BOTTOM => p[1] < value,
        _ => p[1] > value,
    };
    let (c1, c2) = (out(p1), out(p2));
    if c1 == c2 {
        return if c1 { None } else { Some((p1, p2)) };
    }

    // Move the outside end onto the edge.
    let (outer, inner) = if c1 { (p1, p2) } else { (p2, p1) };
    let [x1, y1] = outer.map(i64::from);
    let [x2, y2] = inner.map(i64::from);
    let v = value as i64;
    let moved = if edge == LEFT || edge == RIGHT {
        [value, (y1 + (y2 - y1) * (v - x1) / (x2 - x1)) as i32]
    } else {
        [(x1 + (x2 - x1) * (v - y1) / (y2 - y1)) as i32, value]
    };
    Some(if c1 { (moved, p2) } else { (p1, moved) })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn clip_line_trivial_accept_and_reject() {
        let mut a = [1.0, 1.0];
        let mut b = [2.0, 2.0];
        assert!(!clip_line(&mut a, &mut b, 0., 10., 0., 10.));
        assert_eq!((a, b), ([1.0, 1.0], [2.0, 2.0]));

        let mut a = [-5.0, 1.0];
        let mut b = [-1.0, 8.0];
        assert!(clip_line(&mut a, &mut b, 0., 10., 0., 10.));
    }

    #[test]
    fn clip_line_diagonal_through_corner_region() {
        let mut a = [-10.0, -10.0];
        let mut b = [20.0, 20.0];
        assert!(!clip_line(&mut a, &mut b, 0., 10., 0., 10.));
        let mut ends = [a, b];
        ends.sort_by(|p, q| p[0].total_cmp(&q[0]));
        assert_eq!(ends, [[0.0, 0.0], [10.0, 10.0]]);
    }

    #[test]
    fn clip_line_grid_uses_wide_intermediates() {
        let mut a = [-2_000_000_000, 0];
        let mut b = [2_000_000_000, 2_000_000_000];
        assert!(!clip_line_grid(&mut a, &mut b, 0, 1_000_000_000, 0, 2_000_000_000));
        let mut ends = [a, b];
        ends.sort();
        assert_eq!(ends[0], [0, 1_000_000_000]);
        assert_eq!(ends[1], [1_000_000_000, 1_500_000_000]);
    }

    #[test]
    fn clip_line_grid_rejects_vertical_outside() {
        let mut a = [20, -5];
        let mut b = [20, 15];
        assert!(clip_line_grid(&mut a, &mut b, 0, 10, 0, 10));
    }

    #[test]
    fn clip_poly_inside_is_unchanged() {
        let tri = [[1, 1], [5, 1], [3, 4]];
        assert_eq!(clip_poly(&tri, 0, 10, 0, 10), tri.to_vec());
    }

    #[test]
    fn clip_poly_against_corner() {
        let square = [[-10, -10], [10, -10], [10, 10], [-10, 10]];
        let clipped = clip_poly(&square, 0, 20, 0, 20);
        let mut sorted = clipped.clone();
        sorted.sort();
        assert_eq!(sorted, vec![[0, 0], [0, 10], [10, 0], [10, 10]]);
    }

    #[test]
    fn clip_poly_fully_outside_is_empty() {
        let square = [[20, 20], [30, 20], [30, 30], [20, 30]];
        assert!(clip_poly(&square, 0, 10, 0, 10).is_empty());
    }
}
