//! Pens and brushes handed to the scene sink

use crate::color::Color;
use std::sync::Arc;

/// Fill style for shapes
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FillStyle {
    /// Explicit "no fill"
    #[default]
    None,
    Solid(Color),
}

impl FillStyle {
    pub fn is_none(&self) -> bool {
        matches!(self, FillStyle::None)
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            FillStyle::None => None,
            FillStyle::Solid(color) => Some(*color),
        }
    }
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Solid(color)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke style (pen)
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    /// Width in pixels when `cosmetic`, else in world units
    pub width: f32,
    /// Constant pixel width independent of the view zoom
    pub cosmetic: bool,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Alternating dash/gap lengths in units of the pen width, `None` is solid
    pub dash_pattern: Option<Arc<[f32]>>,
    /// `false` only for [`LineStyle::NONE`]; a transparent zero-width pen
    /// is still a pen
    pub visible: bool,
}

impl LineStyle {
    /// A pen that draws nothing
    pub const NONE: LineStyle = LineStyle {
        color: Color::TRANSPARENT,
        width: 0.0,
        cosmetic: true,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        dash_pattern: None,
        visible: false,
    };

    pub fn is_none(&self) -> bool {
        !self.visible
    }

    pub fn is_dashed(&self) -> bool {
        self.dash_pattern.is_some()
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cosmetic: false,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash_pattern: None,
            visible: true,
        }
    }
}
