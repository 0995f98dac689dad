//! Geometry kernel error types.

use crate::rect::Rect;
use crate::style::Style;

/// A result type returning kernel errors.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised by the geometry kernel.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A coordinate does not fit in the grid integer range once snapped.
    #[error("coordinate {value} overflows the grid range")]
    GridOverflow {
        /// The offending value, in grid units.
        value: f64,
    },
    /// A shape was built with a point count its style does not accept.
    #[error("style {style} does not accept {count} points (expected {expected})")]
    PointCount {
        /// The requested style.
        style: Style,
        /// The number of points supplied.
        count: usize,
        /// A description of the accepted counts.
        expected: &'static str,
    },
    /// A mutating operation was invoked on an immutable value.
    #[error("cannot modify immutable {0}")]
    ImmutableValue(&'static str),
    /// The operation is not provided for this kind of geometry.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    /// An entry lies entirely outside of a spatial index's root box.
    #[error("bounds {bounds} lie outside of the index root")]
    OutsideIndex {
        /// The bounds of the rejected entry.
        bounds: Rect,
    },
    /// The configuration could not be parsed.
    #[error(transparent)]
    Config(#[from] toml::de::Error),
}
