//! An import prelude that re-exports commonly used items.

pub use crate::bbox::Bbox;
pub use crate::config::{KernelConfig, SweepMode};
pub use crate::error::{Error, Result};
pub use crate::merge::{GeometryHandler, RegionMerge};
pub use crate::mutable_box::MutableBox;
pub use crate::orientation::Orientation;
pub use crate::point::Point;
pub use crate::poly_qtree::PolyQTree;
pub use crate::qtree::ObjectQTree;
pub use crate::rect::{Rect, Rectangular, SetRect};
pub use crate::region::Region;
pub use crate::shape::{
    crop_box, crop_box_complete, extend_factor, half_crop_box, make_end_point_poly, CropOutcome,
    rotate_style, unrotate_style, Layer, PortName, Shape, ShapeKind, TOUCHING,
};
pub use crate::style::{AreaFill, CircleFill, LineTexture, Style, TextAnchor};
pub use crate::transform::{Transform, TransformMut, Transformation, Translate, TranslateMut};
