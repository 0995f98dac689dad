//! Snapping of grid coordinates onto coarser manufacturing grids.

use crate::error::Result;
use crate::units::lambda_to_grid;

/// Snaps the grid value `pos` to the nearest multiple of the grid step `grid`.
///
/// Values exactly halfway between two multiples snap toward negative infinity.
///
/// # Panics
///
/// Panics if `grid` is not positive.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::snap::snap_to_grid;
/// assert_eq!(snap_to_grid(7, 5), 5);
/// assert_eq!(snap_to_grid(8, 5), 10);
/// assert_eq!(snap_to_grid(-8, 5), -10);
/// ```
pub const fn snap_to_grid(pos: i64, grid: i64) -> i64 {
    assert!(grid > 0);

    let rem = pos.rem_euclid(grid);
    if rem <= grid / 2 {
        pos - rem
    } else {
        pos + grid - rem
    }
}

/// Converts a lambda value to grid units and snaps it to the grid step `grid`.
///
/// # Panics
///
/// Panics if `grid` is not positive.
pub fn snap_lambda(lambda: f64, grid: i64) -> Result<i64> {
    Ok(snap_to_grid(lambda_to_grid(lambda)?, grid))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn snaps_to_nearest_multiple() {
        assert_eq!(snap_to_grid(0, 400), 0);
        assert_eq!(snap_to_grid(200, 400), 0);
        assert_eq!(snap_to_grid(201, 400), 400);
        assert_eq!(snap_to_grid(-200, 400), -400);
        assert_eq!(snap_to_grid(-199, 400), 0);
        assert_eq!(snap_to_grid(1234, 1), 1234);
    }

    #[test]
    fn snaps_lambda_values() {
        assert_eq!(snap_lambda(1.26, 100).unwrap(), 500);
        assert!(snap_lambda(f64::INFINITY, 100).is_err());
    }
}
