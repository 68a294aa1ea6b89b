//! cadraw paint types
//!
//! Value types shared by the text and backend crates:
//!
//! - Colors decoded from `#AARRGGBB` strings
//! - Points, rectangles and 2D / 4x4 affine transforms
//! - Entity paths (line and cubic segments) and glyph outlines
//! - Pens (`LineStyle`) and brushes (`FillStyle`)
//! - Cubic Bézier math used for curve bounds and arc approximation

pub mod bezier;
pub mod color;
pub mod matrix;
pub mod outline;
pub mod path;
pub mod primitives;
pub mod style;

pub use bezier::Bezier4P;
pub use color::Color;
pub use matrix::Matrix44;
pub use outline::{Outline, OutlineBuilder, OutlineCommand};
pub use path::{Path, PathSegment};
pub use primitives::{Point, Rect, Transform2D};
pub use style::{FillStyle, LineCap, LineJoin, LineStyle};

use thiserror::Error;

/// Paint errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaintError {
    #[error("Invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("Unsupported path segment: {0}")]
    UnsupportedSegment(&'static str),

    #[error("Invalid curve parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, PaintError>;
