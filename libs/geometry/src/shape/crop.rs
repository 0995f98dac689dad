//! Cropping one box against another.
//!
//! Each helper rewrites `bounds` in place and reports what happened as a [`CropOutcome`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rect::{Rectangular, SetRect};
use crate::units::{are_equals, is_greater_than};

/// The result of cropping a box.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CropOutcome {
    /// The boxes do not overlap.
    NoOverlap,
    /// The overlap cannot be removed by moving a single side.
    CannotCrop,
    /// The box was cropped, or needed no cropping.
    Cropped,
    /// The box was covered completely.
    Eliminated,
}

impl CropOutcome {
    /// The numeric code of this outcome: -2, -1, 0 or 1 in declaration order.
    pub fn code(&self) -> i32 {
        match self {
            CropOutcome::NoOverlap => -2,
            CropOutcome::CannotCrop => -1,
            CropOutcome::Cropped => 0,
            CropOutcome::Eliminated => 1,
        }
    }
}

/// The sides of two boxes, named the way every crop helper reads them.
struct Sides {
    lx: f64,
    hx: f64,
    ly: f64,
    hy: f64,
    bx: f64,
    ux: f64,
    by: f64,
    uy: f64,
}

impl Sides {
    fn new(bounds: &impl Rectangular, limit: &impl Rectangular) -> Self {
        Self {
            lx: bounds.min_x(),
            hx: bounds.max_x(),
            ly: bounds.min_y(),
            hy: bounds.max_y(),
            bx: limit.min_x(),
            ux: limit.max_x(),
            by: limit.min_y(),
            uy: limit.max_y(),
        }
    }

    /// Returns `true` unless the boxes are apart by more than half a grid unit.
    fn touch(&self) -> bool {
        is_greater_than(self.hx, self.bx)
            && is_greater_than(self.hy, self.by)
            && is_greater_than(self.ux, self.lx)
            && is_greater_than(self.uy, self.ly)
    }

    /// Which sides of `bounds` the limit reaches past: low x, high x, low y, high y.
    fn covered(&self) -> [bool; 4] {
        [
            !is_greater_than(self.bx, self.lx),
            !is_greater_than(self.hx, self.ux),
            !is_greater_than(self.by, self.ly),
            !is_greater_than(self.hy, self.uy),
        ]
    }

    fn store<R: SetRect>(&self, bounds: &mut R) -> Result<()> {
        bounds.set_rect(self.lx, self.ly, self.hx - self.lx, self.hy - self.ly)
    }
}

/// Removes the part of `bounds` overlapped by `limit` by moving one side.
///
/// Only boxes where `limit` spans the full width or the full height of `bounds` can be cropped;
/// when both are possible the direction with the larger overlap wins. Boxes that do not touch
/// are left unchanged and reported as [`CropOutcome::Cropped`].
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let mut b = MutableBox::from_sides(0., 0., 10., 10.);
/// let limit = MutableBox::from_sides(-1., 8., 11., 12.);
/// assert_eq!(crop_box(&mut b, &limit).unwrap(), CropOutcome::Cropped);
/// assert_eq!(b, MutableBox::from_sides(0., 0., 10., 8.));
/// ```
pub fn crop_box<R: Rectangular + SetRect>(
    bounds: &mut R,
    limit: &impl Rectangular,
) -> Result<CropOutcome> {
    let mut s = Sides::new(&*bounds, limit);
    if !s.touch() {
        return Ok(CropOutcome::Cropped);
    }
    let [blx, uhx, bly, uhy] = s.covered();
    if blx && uhx && bly && uhy {
        return Ok(CropOutcome::Eliminated);
    }

    let x_overlap = s.hx.min(s.ux) - s.lx.max(s.bx);
    let y_overlap = s.hy.min(s.uy) - s.ly.max(s.by);
    // Only the axis with the larger overlap may be cropped.
    if x_overlap > y_overlap {
        if blx && uhx {
            if !is_greater_than(s.hy, s.uy) {
                s.hy = s.by;
            }
            if bly {
                s.ly = s.uy;
            }
            if !is_greater_than(s.hy, s.ly) {
                return Ok(CropOutcome::Eliminated);
            }
            s.store(bounds)?;
            return Ok(CropOutcome::Cropped);
        }
    } else if bly && uhy {
        if !is_greater_than(s.hx, s.ux) {
            s.hx = s.bx;
        }
        if blx {
            s.lx = s.ux;
        }
        if !is_greater_than(s.hx, s.lx) {
            return Ok(CropOutcome::Eliminated);
        }
        s.store(bounds)?;
        return Ok(CropOutcome::Cropped);
    }
    Ok(CropOutcome::CannotCrop)
}

/// Crops `bounds` against `limit` by moving every side that `limit` reaches past.
///
/// Reports [`CropOutcome::NoOverlap`] for boxes that do not touch.
pub fn crop_box_complete<R: Rectangular + SetRect>(
    bounds: &mut R,
    limit: &impl Rectangular,
) -> Result<CropOutcome> {
    let mut s = Sides::new(&*bounds, limit);
    if !s.touch() {
        return Ok(CropOutcome::NoOverlap);
    }
    let [blx, uhx, bly, uhy] = s.covered();
    if blx && uhx && bly && uhy {
        return Ok(CropOutcome::Eliminated);
    }

    if s.bx <= s.lx {
        s.lx = s.ux;
    }
    if s.by >= s.ly {
        s.hy = s.by;
    }
    if s.uy <= s.hy {
        s.ly = s.hy;
    }
    if s.hx <= s.ux {
        s.hx = s.bx;
    }
    s.store(bounds)?;
    Ok(CropOutcome::Cropped)
}

/// Like [`crop_box`], but moves each affected side only halfway into the overlap.
///
/// A box covered completely is halved on the side with the largest margin instead of being
/// eliminated; it is eliminated only when there is no margin left.
pub fn half_crop_box<R: Rectangular + SetRect>(
    bounds: &mut R,
    limit: &impl Rectangular,
) -> Result<CropOutcome> {
    let mut s = Sides::new(&*bounds, limit);
    if !s.touch() {
        return Ok(CropOutcome::Cropped);
    }
    let [blx, uhx, bly, uhy] = s.covered();

    if blx && uhx && bly && uhy {
        let lxe = s.lx - s.bx;
        let hxe = s.ux - s.hx;
        let lye = s.ly - s.by;
        let hye = s.uy - s.hy;
        let biggest = lxe.max(hxe).max(lye).max(hye);
        if are_equals(biggest, 0.) {
            return Ok(CropOutcome::Eliminated);
        }
        if are_equals(lxe, biggest) {
            s.lx = (s.lx + s.ux) / 2.;
        } else if are_equals(hxe, biggest) {
            s.hx = (s.hx + s.bx) / 2.;
        } else if are_equals(lye, biggest) {
            s.ly = (s.ly + s.uy) / 2.;
        } else {
            s.hy = (s.hy + s.by) / 2.;
        }
        if !is_greater_than(s.hx, s.lx) || !is_greater_than(s.hy, s.ly) {
            return Ok(CropOutcome::Eliminated);
        }
        s.store(bounds)?;
        return Ok(CropOutcome::Cropped);
    }

    let mut crops = false;
    if blx && uhx {
        if !is_greater_than(s.hy, s.uy) {
            s.hy = (s.hy + s.by) / 2.;
        }
        if bly {
            s.ly = (s.ly + s.uy) / 2.;
        }
        s.store(bounds)?;
        crops = true;
    }
    if bly && uhy {
        if !is_greater_than(s.hx, s.ux) {
            s.hx = (s.hx + s.bx) / 2.;
        }
        if blx {
            s.lx = (s.lx + s.ux) / 2.;
        }
        s.store(bounds)?;
        crops = true;
    }
    Ok(if crops {
        CropOutcome::Cropped
    } else {
        CropOutcome::CannotCrop
    })
}
