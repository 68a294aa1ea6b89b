//! Font registry for system font discovery and caching
//!
//! Uses fontdb to map resolved fonts onto installed font faces. Families that
//! are not installed fall back to a generic category.

use crate::face::FontFace;
use crate::font::{FontId, ResolvedFont};
use crate::{Result, TextError};
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Generic font category for fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenericFont {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

impl GenericFont {
    /// Generic category named by a family string, `None` for concrete families
    pub fn from_family(family: &str) -> Option<GenericFont> {
        match family.trim().to_ascii_lowercase().as_str() {
            "" | "sans-serif" | "sans" => Some(GenericFont::SansSerif),
            "serif" => Some(GenericFont::Serif),
            "monospace" => Some(GenericFont::Monospace),
            "cursive" => Some(GenericFont::Cursive),
            "fantasy" => Some(GenericFont::Fantasy),
            _ => None,
        }
    }

    fn family(self) -> Family<'static> {
        match self {
            GenericFont::SansSerif => Family::SansSerif,
            GenericFont::Serif => Family::Serif,
            GenericFont::Monospace => Family::Monospace,
            GenericFont::Cursive => Family::Cursive,
            GenericFont::Fantasy => Family::Fantasy,
        }
    }
}

/// Font registry that discovers and caches font faces
pub struct FontRegistry {
    db: Database,
    /// Cached faces by font id (Some = found, None = not found)
    faces: FxHashMap<FontId, Option<Arc<FontFace>>>,
    fallback: GenericFont,
}

impl FontRegistry {
    /// Create a registry over all installed system fonts
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Font registry loaded {} system faces", db.len());
        Self::with_database(db)
    }

    /// Create a registry over an explicit font database
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            faces: FxHashMap::default(),
            fallback: GenericFont::SansSerif,
        }
    }

    /// Add font file data (TTF/OTF/TTC) to the database
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        // earlier misses may now resolve
        self.faces.retain(|_, face| face.is_some());
    }

    pub fn set_fallback(&mut self, generic: GenericFont) {
        self.fallback = generic;
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Face for a resolved font, falling back to the generic category when the
    /// family is not installed.
    pub fn face_for(&mut self, font: &ResolvedFont) -> Result<Arc<FontFace>> {
        if let Some(cached) = self.faces.get(&font.id()) {
            return cached.clone().ok_or_else(|| not_found(font));
        }

        let weight = font.css_weight();
        let italic = font.is_italic();
        let generic = GenericFont::from_family(font.family());
        let id = match generic {
            Some(generic) => self.query(generic.family(), weight, italic),
            None => self
                .query(Family::Name(font.family()), weight, italic)
                .or_else(|| {
                    tracing::warn!(
                        "Font '{}' (weight={}, italic={}) not found, falling back to {:?}",
                        font.family(),
                        weight,
                        italic,
                        self.fallback
                    );
                    self.query(self.fallback.family(), weight, italic)
                }),
        };

        let Some(id) = id else {
            self.faces.insert(font.id(), None);
            return Err(not_found(font));
        };

        let face = Arc::new(self.load_face_by_id(id)?);
        self.faces.insert(font.id(), Some(Arc::clone(&face)));
        Ok(face)
    }

    fn query(&self, family: Family<'_>, weight: u16, italic: bool) -> Option<fontdb::ID> {
        let families = [family];
        let mut query = Query {
            families: &families,
            weight: Weight(weight),
            style: if italic { Style::Italic } else { Style::Normal },
            stretch: Stretch::Normal,
        };
        self.db.query(&query).or_else(|| {
            if !italic {
                return None;
            }
            tracing::warn!("No italic face, trying oblique");
            query.style = Style::Oblique;
            self.db.query(&query)
        })
    }

    fn load_face_by_id(&self, id: fontdb::ID) -> Result<FontFace> {
        let (src, face_index) = self
            .db
            .face_source(id)
            .ok_or_else(|| TextError::FontLoadError("Font source not found".to_string()))?;

        let data = match src {
            Source::File(path) => std::fs::read(&path).map_err(|e| {
                TextError::FontLoadError(format!("Failed to read font file {:?}: {}", path, e))
            })?,
            Source::Binary(arc) => arc.as_ref().as_ref().to_vec(),
            Source::SharedFile(_path, data) => data.as_ref().as_ref().to_vec(),
        };

        FontFace::from_data_with_index(data, face_index)
    }

    /// Installed family names, sorted and deduplicated
    pub fn list_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect();
        families.sort();
        families.dedup();
        families
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(font: &ResolvedFont) -> TextError {
    TextError::FontLoadError(format!(
        "Font '{}' (weight={}, italic={}) not found",
        font.family(),
        font.css_weight(),
        font.is_italic()
    ))
}
