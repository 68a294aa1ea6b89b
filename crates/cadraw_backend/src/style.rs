//! Pen and brush construction from entity properties

use crate::color::ColorResolver;
use crate::config::BackendParams;
use crate::dash::DashPatternResolver;
use crate::properties::Properties;
use cadraw_paint::{FillStyle, LineJoin, LineStyle};

/// Millimeters per pixel at 72 dpi
pub const MM_PER_PIXEL: f64 = 0.3527;

const METRIC_PATTERN_FACTOR: f64 = 30.0;
const IMPERIAL_PATTERN_FACTOR: f64 = 750.0;

/// Builds pens and brushes, sharing the color and dash caches
#[derive(Debug)]
pub struct StyleResolver {
    colors: ColorResolver,
    dashes: DashPatternResolver,
    lineweight_scaling: f64,
    linetype_scaling: f64,
}

impl StyleResolver {
    pub fn new(params: &BackendParams) -> Self {
        Self {
            colors: ColorResolver::new(),
            dashes: DashPatternResolver::new(params.min_dash_length),
            lineweight_scaling: params.lineweight_scaling,
            linetype_scaling: params.linetype_scaling,
        }
    }

    /// Cosmetic pen with round joins; dashed if the linetype has a pattern
    /// and linetype scaling is enabled.
    pub fn pen_for(&mut self, properties: &Properties) -> cadraw_paint::Result<LineStyle> {
        let width = properties.lineweight / MM_PER_PIXEL * self.lineweight_scaling;
        let dash_pattern = if properties.linetype_pattern.len() > 1 && self.linetype_scaling != 0.0
        {
            // dash lengths are in units of the pen width
            let scale = properties.linetype_scale * self.unit_pattern_factor(properties.units);
            Some(self.dashes.resolve(&properties.linetype_pattern, scale))
        } else {
            None
        };
        Ok(LineStyle {
            color: self.colors.resolve(&properties.color)?,
            width: width as f32,
            cosmetic: true,
            line_join: LineJoin::Round,
            dash_pattern,
            ..Default::default()
        })
    }

    /// Solid brush in the entity color if filling is set, else no fill
    pub fn brush_for(&mut self, properties: &Properties) -> cadraw_paint::Result<FillStyle> {
        if properties.filling {
            Ok(FillStyle::Solid(self.colors.resolve(&properties.color)?))
        } else {
            Ok(FillStyle::None)
        }
    }

    /// Dash scale per unit of linetype scale. Not cached, it only depends on
    /// the unit code.
    pub fn unit_pattern_factor(&self, units: u16) -> f64 {
        let base = if crate::properties::is_imperial(units) {
            IMPERIAL_PATTERN_FACTOR
        } else {
            METRIC_PATTERN_FACTOR
        };
        let scaling = if self.linetype_scaling == 0.0 {
            1.0
        } else {
            self.linetype_scaling
        };
        base / scaling
    }

    pub fn colors(&mut self) -> &mut ColorResolver {
        &mut self.colors
    }

    pub fn dashes(&self) -> &DashPatternResolver {
        &self.dashes
    }
}
