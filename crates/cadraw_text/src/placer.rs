//! Text placement in world coordinates
//!
//! Text is shaped at the outline source's native size, scaled so its
//! cap-height matches the requested one, flipped from the y-down outline
//! space into y-up world space and finally mapped through the entity
//! transform.

use crate::font::{FontDescriptor, FontMeasurements, ResolvedFont};
use crate::glyph_cache::GlyphPathCache;
use crate::metrics::FontMetricsCache;
use crate::normalize::{prepare_string_for_rendering, TextEntity};
use crate::source::OutlineSource;
use crate::Result;
use cadraw_paint::{Matrix44, Outline};

pub struct TextPlacer<O: OutlineSource> {
    source: O,
    metrics: FontMetricsCache,
    outlines: GlyphPathCache,
}

impl<O: OutlineSource> TextPlacer<O> {
    pub fn new(source: O, default_font: ResolvedFont, use_cache: bool) -> Self {
        Self {
            source,
            metrics: FontMetricsCache::new(default_font),
            outlines: GlyphPathCache::new(use_cache),
        }
    }

    /// World-space outline of `text`, `None` for blank text.
    ///
    /// Blank text returns before any font lookup or shaping.
    pub fn place(
        &mut self,
        text: &str,
        entity: TextEntity,
        transform: &Matrix44,
        cap_height: f64,
        font: Option<&FontDescriptor>,
    ) -> Result<Option<Outline>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let text = prepare_string_for_rendering(text, entity);
        let font = self.metrics.font_for(font);
        let scale = self.scale(cap_height, &font)?;
        let combined = Matrix44::scale(scale, -scale, 0.0) * *transform;

        let outline = self.outlines.outline_for(&text, &font, &mut self.source)?;
        Ok(Some(outline.transformed(&combined.to_2d())))
    }

    /// Width of `text` from its origin to the rightmost drawn point, at the
    /// given cap-height. Blank text has width 0.
    pub fn measure_line_width(
        &mut self,
        text: &str,
        entity: TextEntity,
        cap_height: f64,
        font: Option<&FontDescriptor>,
    ) -> Result<f64> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }
        let text = prepare_string_for_rendering(text, entity);
        let font = self.metrics.font_for(font);
        let scale = self.scale(cap_height, &font)?;
        let rect = self.outlines.rect_for(&text, &font, &mut self.source)?;
        Ok(rect.right() * scale)
    }

    /// Font measurements scaled to `cap_height`
    pub fn font_measurements(
        &mut self,
        cap_height: f64,
        font: Option<&FontDescriptor>,
    ) -> Result<FontMeasurements> {
        let font = self.metrics.font_for(font);
        let measurements = self
            .metrics
            .measurements_for(&font, &mut self.outlines, &mut self.source)?;
        Ok(measurements.scale_from_baseline(cap_height))
    }

    fn scale(&mut self, cap_height: f64, font: &ResolvedFont) -> Result<f64> {
        let measurements = self
            .metrics
            .measurements_for(font, &mut self.outlines, &mut self.source)?;
        Ok(cap_height / measurements.cap_height)
    }

    /// Drop all cached glyph outlines; measurements are kept
    pub fn clear_cache(&mut self) {
        tracing::debug!("Clearing {} cached text outlines", self.outlines.len());
        self.outlines.clear();
    }

    pub fn source(&self) -> &O {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut O {
        &mut self.source
    }

    pub fn metrics(&self) -> &FontMetricsCache {
        &self.metrics
    }

    pub fn outlines(&self) -> &GlyphPathCache {
        &self.outlines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockOutlineSource;
    use cadraw_paint::Rect;

    fn placer() -> TextPlacer<BlockOutlineSource> {
        TextPlacer::new(
            BlockOutlineSource::default(),
            ResolvedFont::new("sans-serif", 50, false),
            true,
        )
    }

    #[test]
    fn test_place_scales_and_flips() {
        let mut placer = placer();
        let outline = placer
            .place("X", TextEntity::Text, &Matrix44::identity(), 2.5, None)
            .unwrap()
            .unwrap();
        let bounds = outline.bounding_rect().unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 1.25, 2.5));
    }

    #[test]
    fn test_place_applies_entity_transform_last() {
        let mut placer = placer();
        let outline = placer
            .place(
                "X",
                TextEntity::Text,
                &Matrix44::translate(10.0, 20.0, 0.0),
                5.0,
                None,
            )
            .unwrap()
            .unwrap();
        let bounds = outline.bounding_rect().unwrap();
        assert_eq!(bounds, Rect::new(10.0, 20.0, 2.5, 5.0));
    }

    #[test]
    fn test_blank_text_skips_lookup_and_shaping() {
        let mut placer = placer();
        let placed = placer
            .place("  \t ", TextEntity::Text, &Matrix44::identity(), 1.0, None)
            .unwrap();
        assert!(placed.is_none());
        assert_eq!(
            placer
                .measure_line_width("", TextEntity::Text, 1.0, None)
                .unwrap(),
            0.0
        );
        assert_eq!(placer.source().shape_calls(), 0);
        assert_eq!(placer.metrics().font_lookups(), 0);
    }

    #[test]
    fn test_measure_line_width() {
        let mut placer = placer();
        // "AB": right edge at 6 + 5 = 11 outline units, scale 0.1
        let width = placer
            .measure_line_width("AB", TextEntity::Text, 1.0, None)
            .unwrap();
        assert!((width - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_font_measurements_scaled() {
        let mut placer = placer();
        let m = placer.font_measurements(2.0, None).unwrap();
        assert_eq!(m.cap_height, 2.0);
        assert!((m.x_height - 1.0).abs() < 1e-12);
        assert!((m.descender_height - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_clear_cache_forces_reshaping() {
        let mut placer = placer();
        let identity = Matrix44::identity();
        placer
            .place("AB", TextEntity::Text, &identity, 1.0, None)
            .unwrap();
        let calls = placer.source().shape_calls();
        placer
            .place("AB", TextEntity::Text, &identity, 1.0, None)
            .unwrap();
        assert_eq!(placer.source().shape_calls(), calls);
        placer.clear_cache();
        placer
            .place("AB", TextEntity::Text, &identity, 1.0, None)
            .unwrap();
        assert_eq!(placer.source().shape_calls(), calls + 1);
    }
}
