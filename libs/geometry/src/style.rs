//! Shape style tags.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Where a text shape's point sits relative to the text.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAnchor {
    /// Text centered on the point.
    #[default]
    Cent,
    /// The point is at the top-center; text hangs below.
    Top,
    /// The point is at the bottom-center; text sits above.
    Bot,
    /// The point is at the left-center; text runs to the right.
    Left,
    /// The point is at the right-center; text runs to the left.
    Right,
    /// The point is at the upper-left.
    TopLeft,
    /// The point is at the lower-left.
    BotLeft,
    /// The point is at the upper-right.
    TopRight,
    /// The point is at the lower-right.
    BotRight,
    /// Text centered inside the shape's outline and kept within it.
    Box,
}

impl TextAnchor {
    /// All anchors.
    pub const ALL: [TextAnchor; 10] = [
        TextAnchor::Cent,
        TextAnchor::Top,
        TextAnchor::Bot,
        TextAnchor::Left,
        TextAnchor::Right,
        TextAnchor::TopLeft,
        TextAnchor::BotLeft,
        TextAnchor::TopRight,
        TextAnchor::BotRight,
        TextAnchor::Box,
    ];

    /// The direction from the anchor point into the text, in tenth-degrees.
    ///
    /// Centered and boxed text have no direction.
    pub fn angle(&self) -> Option<i32> {
        match self {
            TextAnchor::Left => Some(0),
            TextAnchor::BotLeft => Some(450),
            TextAnchor::Bot => Some(900),
            TextAnchor::BotRight => Some(1350),
            TextAnchor::Right => Some(1800),
            TextAnchor::TopRight => Some(2250),
            TextAnchor::Top => Some(2700),
            TextAnchor::TopLeft => Some(3150),
            TextAnchor::Cent | TextAnchor::Box => None,
        }
    }

    /// The anchor whose [`TextAnchor::angle`] is `angle`; [`TextAnchor::Cent`] for any other angle.
    pub fn from_angle(angle: i32) -> TextAnchor {
        match angle {
            0 => TextAnchor::Left,
            450 => TextAnchor::BotLeft,
            900 => TextAnchor::Bot,
            1350 => TextAnchor::BotRight,
            1800 => TextAnchor::Right,
            2250 => TextAnchor::TopRight,
            2700 => TextAnchor::Top,
            3150 => TextAnchor::TopLeft,
            _ => TextAnchor::Cent,
        }
    }
}

/// How a closed outline is drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AreaFill {
    /// A filled polygon.
    Filled,
    /// A closed outline.
    Closed,
    /// A closed outline with its diagonals drawn.
    Crossed,
}

/// The texture of an open polyline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LineTexture {
    /// Solid.
    Solid,
    /// Dotted.
    Dotted,
    /// Dashed.
    Dashed,
    /// Thick.
    Thick,
}

/// How a full circle is drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CircleFill {
    /// Outline only.
    Outline,
    /// Thick outline.
    Thick,
    /// Filled disc.
    Disc,
}

/// The style tag of a [`Shape`](crate::shape::Shape).
///
/// The style selects how the shape's points are interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// A filled polygon.
    Filled,
    /// A closed polygon outline.
    Closed,
    /// A closed outline drawn with its diagonals.
    Crossed,
    /// An open polyline.
    Opened,
    /// A dotted open polyline.
    OpenedT1,
    /// A dashed open polyline.
    OpenedT2,
    /// A thick open polyline.
    OpenedT3,
    /// Independent segments between consecutive point pairs.
    Vectors,
    /// A circle outline: center, then a point on the edge.
    Circle,
    /// A thick circle outline.
    ThickCircle,
    /// A filled circle.
    Disc,
    /// A clockwise arc: center, start, end.
    CircleArc,
    /// A thick arc.
    ThickCircleArc,
    /// Text anchored at the shape's point.
    Text(TextAnchor),
    /// A small cross.
    Cross,
    /// A big cross.
    BigCross,
}

impl Style {
    /// Returns `true` for the text styles.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Style::Text(_))
    }

    /// Returns `true` for styles drawn as open polylines, including [`Style::Vectors`].
    #[inline]
    pub fn is_opened(&self) -> bool {
        matches!(
            self,
            Style::Opened | Style::OpenedT1 | Style::OpenedT2 | Style::OpenedT3 | Style::Vectors
        )
    }

    /// The text anchor angle in tenth-degrees; 0 for non-directional or non-text styles.
    pub fn text_angle(&self) -> i32 {
        match self {
            Style::Text(anchor) => anchor.angle().unwrap_or(0),
            _ => 0,
        }
    }

    /// The text style whose anchor angle is `angle`; centered text for any other angle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry_kernel::prelude::*;
    /// assert_eq!(Style::text_style_from_angle(2700), Style::Text(TextAnchor::Top));
    /// assert_eq!(Style::text_style_from_angle(100), Style::Text(TextAnchor::Cent));
    /// ```
    pub fn text_style_from_angle(angle: i32) -> Style {
        Style::Text(TextAnchor::from_angle(angle))
    }

    /// The printable name of the style.
    pub fn name(&self) -> &'static str {
        match self {
            Style::Filled => "filled",
            Style::Closed => "closed",
            Style::Crossed => "crossed",
            Style::Opened => "opened",
            Style::OpenedT1 => "opened-dotted",
            Style::OpenedT2 => "opened-dashed",
            Style::OpenedT3 => "opened-thick",
            Style::Vectors => "vectors",
            Style::Circle => "circle",
            Style::ThickCircle => "thick-circle",
            Style::Disc => "disc",
            Style::CircleArc => "circle-arc",
            Style::ThickCircleArc => "thick-circle-arc",
            Style::Text(TextAnchor::Cent) => "text-center",
            Style::Text(TextAnchor::Top) => "text-top",
            Style::Text(TextAnchor::Bot) => "text-bottom",
            Style::Text(TextAnchor::Left) => "text-left",
            Style::Text(TextAnchor::Right) => "text-right",
            Style::Text(TextAnchor::TopLeft) => "text-topleft",
            Style::Text(TextAnchor::BotLeft) => "text-botleft",
            Style::Text(TextAnchor::TopRight) => "text-topright",
            Style::Text(TextAnchor::BotRight) => "text-botright",
            Style::Text(TextAnchor::Box) => "text-box",
            Style::Cross => "cross",
            Style::BigCross => "big-cross",
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<AreaFill> for Style {
    fn from(value: AreaFill) -> Self {
        match value {
            AreaFill::Filled => Style::Filled,
            AreaFill::Closed => Style::Closed,
            AreaFill::Crossed => Style::Crossed,
        }
    }
}

impl From<LineTexture> for Style {
    fn from(value: LineTexture) -> Self {
        match value {
            LineTexture::Solid => Style::Opened,
            LineTexture::Dotted => Style::OpenedT1,
            LineTexture::Dashed => Style::OpenedT2,
            LineTexture::Thick => Style::OpenedT3,
        }
    }
}

impl From<CircleFill> for Style {
    fn from(value: CircleFill) -> Self {
        match value {
            CircleFill::Outline => Style::Circle,
            CircleFill::Thick => Style::ThickCircle,
            CircleFill::Disc => Style::Disc,
        }
    }
}
