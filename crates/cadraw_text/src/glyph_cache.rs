//! Per-font cache of text outlines

use crate::font::{FontId, ResolvedFont};
use crate::source::OutlineSource;
use crate::Result;
use cadraw_paint::{Outline, Rect};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Text outlines keyed by font id, then by string.
///
/// The cache only grows; entries are removed by [`GlyphPathCache::clear`].
/// With caching disabled every request shapes anew and nothing is stored.
#[derive(Debug)]
pub struct GlyphPathCache {
    enabled: bool,
    paths: FxHashMap<FontId, FxHashMap<String, Arc<Outline>>>,
}

impl GlyphPathCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            paths: FxHashMap::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Unscaled outline of `text` in `font`
    pub fn outline_for<O: OutlineSource + ?Sized>(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        source: &mut O,
    ) -> Result<Arc<Outline>> {
        if let Some(outline) = self.paths.get(&font.id()).and_then(|m| m.get(text)) {
            return Ok(Arc::clone(outline));
        }

        tracing::trace!("Glyph cache miss: {:?} in '{}'", text, font.family());
        let outline = Arc::new(source.shape(text, font)?);
        if self.enabled {
            self.paths
                .entry(font.id())
                .or_default()
                .insert(text.to_string(), Arc::clone(&outline));
        }
        Ok(outline)
    }

    /// Bounding rectangle of the unscaled outline, empty text yields an empty
    /// rectangle at the origin.
    pub fn rect_for<O: OutlineSource + ?Sized>(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        source: &mut O,
    ) -> Result<Rect> {
        Ok(self
            .outline_for(text, font, source)?
            .bounding_rect()
            .unwrap_or_default())
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Number of cached outlines over all fonts
    pub fn len(&self) -> usize {
        self.paths.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GlyphPathCache {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockOutlineSource;

    #[test]
    fn test_cache_hits_skip_shaping() {
        let mut source = BlockOutlineSource::default();
        let mut cache = GlyphPathCache::new(true);
        let font = ResolvedFont::new("sans-serif", 50, false);
        let a = cache.outline_for("ABC", &font, &mut source).unwrap();
        let b = cache.outline_for("ABC", &font, &mut source).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(source.shape_calls(), 1);

        let bold = ResolvedFont::new("sans-serif", 80, false);
        cache.outline_for("ABC", &bold, &mut source).unwrap();
        assert_eq!(source.shape_calls(), 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        cache.outline_for("ABC", &font, &mut source).unwrap();
        assert_eq!(source.shape_calls(), 3);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let mut source = BlockOutlineSource::default();
        let mut cache = GlyphPathCache::new(false);
        let font = ResolvedFont::new("sans-serif", 50, false);
        cache.outline_for("ABC", &font, &mut source).unwrap();
        cache.outline_for("ABC", &font, &mut source).unwrap();
        assert_eq!(source.shape_calls(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_rect_for() {
        let mut source = BlockOutlineSource::default();
        let mut cache = GlyphPathCache::default();
        let font = ResolvedFont::new("sans-serif", 50, false);
        let rect = cache.rect_for("Ab", &font, &mut source).unwrap();
        assert_eq!(rect, Rect::new(0.0, -10.0, 11.0, 10.0));
    }
}
