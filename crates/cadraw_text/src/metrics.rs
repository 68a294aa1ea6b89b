//! Font resolution and measurement caches

use crate::font::{FontDescriptor, FontId, FontMeasurements, ResolvedFont};
use crate::glyph_cache::GlyphPathCache;
use crate::source::OutlineSource;
use crate::{Result, TextError};
use cadraw_paint::Rect;
use rustc_hash::FxHashMap;

/// Resolves font descriptors and measures fonts from probe glyphs.
///
/// Measurements are taken from the bounding boxes of `X` (cap-height), `x`
/// (baseline and x-height) and `p` (descender), and are computed once per
/// font for the cache's lifetime.
#[derive(Debug)]
pub struct FontMetricsCache {
    default_font: ResolvedFont,
    resolved: FxHashMap<FontDescriptor, ResolvedFont>,
    measurements: FxHashMap<FontId, FontMeasurements>,
    lookups: usize,
}

impl FontMetricsCache {
    pub fn new(default_font: ResolvedFont) -> Self {
        Self {
            default_font,
            resolved: FxHashMap::default(),
            measurements: FxHashMap::default(),
            lookups: 0,
        }
    }

    pub fn default_font(&self) -> &ResolvedFont {
        &self.default_font
    }

    /// Concrete font for a descriptor, the default font for `None`
    pub fn font_for(&mut self, descriptor: Option<&FontDescriptor>) -> ResolvedFont {
        self.lookups += 1;
        let Some(descriptor) = descriptor else {
            return self.default_font.clone();
        };
        if let Some(font) = self.resolved.get(descriptor) {
            return font.clone();
        }
        let font = ResolvedFont::from_descriptor(descriptor);
        tracing::trace!(
            "Resolved font {:?} to weight {} italic {}",
            descriptor.family,
            font.weight(),
            font.is_italic()
        );
        self.resolved.insert(descriptor.clone(), font.clone());
        font
    }

    /// Unscaled measurements of `font`
    pub fn measurements_for<O: OutlineSource + ?Sized>(
        &mut self,
        font: &ResolvedFont,
        outlines: &mut GlyphPathCache,
        source: &mut O,
    ) -> Result<FontMeasurements> {
        if let Some(m) = self.measurements.get(&font.id()) {
            return Ok(*m);
        }

        let upper_x = probe(font, 'X', outlines, source)?;
        let lower_x = probe(font, 'x', outlines, source)?;
        let lower_p = probe(font, 'p', outlines, source)?;
        let baseline = lower_x.bottom();
        let measurements = FontMeasurements {
            baseline,
            cap_height: baseline - upper_x.top(),
            x_height: baseline - lower_x.top(),
            descender_height: lower_p.bottom() - baseline,
        };
        if measurements.cap_height <= 0.0 {
            return Err(TextError::MissingProbeGlyph {
                family: font.family().to_string(),
                probe: 'X',
            });
        }

        tracing::trace!("Measured font '{}': {:?}", font.family(), measurements);
        self.measurements.insert(font.id(), measurements);
        Ok(measurements)
    }

    /// Number of font resolutions requested so far
    pub fn font_lookups(&self) -> usize {
        self.lookups
    }
}

fn probe<O: OutlineSource + ?Sized>(
    font: &ResolvedFont,
    probe: char,
    outlines: &mut GlyphPathCache,
    source: &mut O,
) -> Result<Rect> {
    let mut buf = [0u8; 4];
    outlines
        .outline_for(probe.encode_utf8(&mut buf), font, source)?
        .bounding_rect()
        .ok_or_else(|| TextError::MissingProbeGlyph {
            family: font.family().to_string(),
            probe,
        })
}
