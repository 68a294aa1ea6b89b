//! Glyph outline sources
//!
//! An [`OutlineSource`] turns a string into the outline of its glyphs for a
//! resolved font. Outlines are laid out from the origin along the positive
//! x-axis with the baseline at y = 0 and y growing downward, so glyph tops
//! have negative y.

use crate::face::FontFace;
use crate::font::ResolvedFont;
use crate::registry::FontRegistry;
use crate::Result;
use cadraw_paint::{Outline, OutlineCommand, Point};
use rustybuzz::{Direction, UnicodeBuffer};

/// Provider of unscaled text outlines
pub trait OutlineSource {
    /// Outline of `text` in `font` at the source's native size
    fn shape(&mut self, text: &str, font: &ResolvedFont) -> Result<Outline>;
}

impl<T: OutlineSource + ?Sized> OutlineSource for Box<T> {
    fn shape(&mut self, text: &str, font: &ResolvedFont) -> Result<Outline> {
        (**self).shape(text, font)
    }
}

/// Default native size of system font outlines, in outline units per em
pub const DEFAULT_NATIVE_SIZE: f64 = 12.0;

/// Outline source backed by installed fonts: shaped with rustybuzz, glyph
/// outlines read with ttf-parser.
pub struct SystemOutlineSource {
    registry: FontRegistry,
    native_size: f64,
}

impl SystemOutlineSource {
    pub fn new() -> Self {
        Self::with_registry(FontRegistry::new())
    }

    pub fn with_registry(registry: FontRegistry) -> Self {
        Self {
            registry,
            native_size: DEFAULT_NATIVE_SIZE,
        }
    }

    pub fn with_native_size(mut self, native_size: f64) -> Self {
        self.native_size = native_size;
        self
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.registry
    }
}

impl Default for SystemOutlineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineSource for SystemOutlineSource {
    fn shape(&mut self, text: &str, font: &ResolvedFont) -> Result<Outline> {
        let face = self.registry.face_for(font)?;
        shape_with_face(&face, text, self.native_size)
    }
}

fn shape_with_face(face: &FontFace, text: &str, native_size: f64) -> Result<Outline> {
    let shaper = face.shaper()?;
    let ttf = face.ttf()?;
    let scale = native_size / face.units_per_em().max(1) as f64;

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.set_direction(Direction::LeftToRight);
    let output = rustybuzz::shape(&shaper, &[], buffer);

    let mut sink = GlyphOutlineSink {
        outline: Outline::new(),
        scale,
        origin: Point::ZERO,
    };
    let mut pen_x = 0.0;
    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        sink.origin = Point::new(
            (pen_x + pos.x_offset as f64) * scale,
            -(pos.y_offset as f64) * scale,
        );
        // glyphs without outline (space) only advance the pen
        let _ = ttf.outline_glyph(ttf_parser::GlyphId(info.glyph_id as u16), &mut sink);
        pen_x += pos.x_advance as f64;
    }
    Ok(sink.outline)
}

/// Collects ttf-parser outline callbacks, scaled to the native size and with
/// the y-axis pointing down.
struct GlyphOutlineSink {
    outline: Outline,
    scale: f64,
    origin: Point,
}

impl GlyphOutlineSink {
    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.origin.x + x as f64 * self.scale,
            self.origin.y - y as f64 * self.scale,
        )
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.outline.push(OutlineCommand::MoveTo(p));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.outline.push(OutlineCommand::LineTo(p));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let control = self.map(x1, y1);
        let end = self.map(x, y);
        self.outline.push(OutlineCommand::QuadTo { control, end });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let control1 = self.map(x1, y1);
        let control2 = self.map(x2, y2);
        let end = self.map(x, y);
        self.outline.push(OutlineCommand::CubicTo {
            control1,
            control2,
            end,
        });
    }

    fn close(&mut self) {
        self.outline.push(OutlineCommand::Close);
    }
}
