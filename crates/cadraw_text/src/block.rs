//! Deterministic block glyphs
//!
//! Every visible character is drawn as a closed rectangle whose height
//! depends on the character class. Used where no system fonts are available
//! and wherever exact, font-independent geometry is needed.

use crate::font::ResolvedFont;
use crate::source::OutlineSource;
use crate::Result;
use cadraw_paint::{Outline, Rect};

/// Glyph box dimensions in outline units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMetrics {
    pub advance: f64,
    pub glyph_width: f64,
    pub cap_height: f64,
    pub x_height: f64,
    pub descender: f64,
}

impl Default for BlockMetrics {
    fn default() -> Self {
        Self {
            advance: 6.0,
            glyph_width: 5.0,
            cap_height: 10.0,
            x_height: 5.0,
            descender: 3.0,
        }
    }
}

impl BlockMetrics {
    /// Vertical extent (top, bottom) of a glyph box, `None` for blank glyphs
    fn extent(&self, c: char) -> Option<(f64, f64)> {
        if c.is_whitespace() {
            return None;
        }
        let top = if c.is_lowercase() && !"bdfhklt".contains(c) {
            -self.x_height
        } else {
            -self.cap_height
        };
        let bottom = if "gjpqy".contains(c) {
            self.descender
        } else {
            0.0
        };
        Some((top, bottom))
    }
}

/// [`OutlineSource`] producing block glyphs, independent of the font
#[derive(Debug, Default)]
pub struct BlockOutlineSource {
    metrics: BlockMetrics,
    shape_calls: usize,
}

impl BlockOutlineSource {
    pub fn new(metrics: BlockMetrics) -> Self {
        Self {
            metrics,
            shape_calls: 0,
        }
    }

    pub fn metrics(&self) -> &BlockMetrics {
        &self.metrics
    }

    /// Number of strings shaped so far
    pub fn shape_calls(&self) -> usize {
        self.shape_calls
    }
}

impl OutlineSource for BlockOutlineSource {
    fn shape(&mut self, text: &str, _font: &ResolvedFont) -> Result<Outline> {
        self.shape_calls += 1;
        let mut outline = Outline::new();
        for (i, c) in text.chars().enumerate() {
            let Some((top, bottom)) = self.metrics.extent(c) else {
                continue;
            };
            let x = i as f64 * self.metrics.advance;
            outline.extend(&Outline::rect(Rect::new(
                x,
                top,
                self.metrics.glyph_width,
                bottom - top,
            )));
        }
        Ok(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> ResolvedFont {
        ResolvedFont::new("sans-serif", 50, false)
    }

    #[test]
    fn test_glyph_classes() {
        let mut source = BlockOutlineSource::default();
        let cap = source.shape("X", &font()).unwrap().bounding_rect().unwrap();
        assert_eq!((cap.top(), cap.bottom()), (-10.0, 0.0));
        let x = source.shape("x", &font()).unwrap().bounding_rect().unwrap();
        assert_eq!((x.top(), x.bottom()), (-5.0, 0.0));
        let p = source.shape("p", &font()).unwrap().bounding_rect().unwrap();
        assert_eq!((p.top(), p.bottom()), (-5.0, 3.0));
        let d = source.shape("d", &font()).unwrap().bounding_rect().unwrap();
        assert_eq!(d.top(), -10.0);
        assert_eq!(source.shape_calls(), 4);
    }

    #[test]
    fn test_spaces_only_advance() {
        let mut source = BlockOutlineSource::default();
        let outline = source.shape("A B", &font()).unwrap();
        // two closed rectangles
        assert_eq!(outline.commands().len(), 10);
        assert_eq!(outline.bounding_rect().unwrap().right(), 17.0);
        assert!(source.shape("   ", &font()).unwrap().is_empty());
    }
}
