//! Drawing color resolution

use cadraw_paint::{Color, PaintError};
use rustc_hash::FxHashMap;

/// Resolves `#RRGGBB` / `#RRGGBBAA` strings, memoized by the input string
#[derive(Debug, Default)]
pub struct ColorResolver {
    cache: FxHashMap<String, Color>,
    computations: usize,
}

impl ColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, color: &str) -> cadraw_paint::Result<Color> {
        if let Some(resolved) = self.cache.get(color) {
            return Ok(*resolved);
        }
        let resolved = Color::from_argb_hex(&normalize(color)?)?;
        tracing::trace!("Resolved color {} to {:?}", color, resolved);
        self.computations += 1;
        self.cache.insert(color.to_string(), resolved);
        Ok(resolved)
    }

    /// Number of cache misses so far
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Alpha-first form: `#RRGGBB` becomes `#ffRRGGBB`, `#RRGGBBAA` becomes
/// `#AARRGGBB`.
pub fn normalize(color: &str) -> cadraw_paint::Result<String> {
    if !color.is_ascii() || !color.starts_with('#') {
        return Err(PaintError::InvalidColor(color.to_string()));
    }
    match color.len() {
        7 => Ok(format!("#ff{}", &color[1..])),
        9 => Ok(format!("#{}{}", &color[7..9], &color[1..7])),
        _ => Err(PaintError::InvalidColor(color.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_moves_alpha_first() {
        assert_eq!(normalize("#102030").unwrap(), "#ff102030");
        assert_eq!(normalize("#10203040").unwrap(), "#40102030");
    }

    #[test]
    fn test_resolve_rgba() {
        let mut resolver = ColorResolver::new();
        let color = resolver.resolve("#ff000080").unwrap();
        assert_eq!(color.to_rgba8(), [255, 0, 0, 128]);
        let color = resolver.resolve("#00ff00").unwrap();
        assert_eq!(color.to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_resolve_is_memoized() {
        let mut resolver = ColorResolver::new();
        let a = resolver.resolve("#123456").unwrap();
        let b = resolver.resolve("#123456").unwrap();
        assert_eq!(a, b);
        assert_eq!(resolver.computations(), 1);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_malformed_lengths() {
        let mut resolver = ColorResolver::new();
        for bad in ["", "#fff", "#12345", "#1234567", "#123456789", "#ééé"] {
            assert!(
                matches!(resolver.resolve(bad), Err(PaintError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(resolver.resolve("#gg0000").is_err());
        assert!(resolver.resolve("x123456").is_err());
        assert!(resolver.is_empty());
    }
}
