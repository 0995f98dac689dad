//! 2-D geometry for integrated circuit layout.
//!
//! Coordinates live on an integer grid of [`GRID`](units::GRID) units per lambda. Shapes are
//! immutable values indexed by quad-trees and merged into disjoint regions per layer.
//!
//! # Examples
//!
//! Merge two overlapping [rectangles](crate::rect::Rect):
//!
//! ```
//! # use geometry_kernel::prelude::*;
//! let layer = Layer::new("metal1");
//! let mut merge = RegionMerge::new(&KernelConfig::default());
//! for rect in [
//!     Rect::from_lambda(0., 0., 10., 10.).unwrap(),
//!     Rect::from_lambda(5., 5., 15., 15.).unwrap(),
//! ] {
//!     merge.add(&layer, &Shape::from_rect(&rect, AreaFill::Filled)).unwrap();
//! }
//! merge.post_process();
//!
//! let shapes = merge.get_objects(&layer, false, false);
//! assert_eq!(shapes.len(), 1);
//! assert_eq!(shapes[0].area(), 175.);
//! ```
#![warn(missing_docs)]

pub mod bbox;
pub mod clip;
pub mod config;
pub mod error;
pub mod merge;
pub mod mutable_box;
pub mod orientation;
pub mod point;
pub mod poly_qtree;
pub mod prelude;
pub mod qtree;
pub mod rect;
pub mod region;
pub mod shape;
pub mod snap;
pub mod style;
pub mod transform;
pub mod units;
