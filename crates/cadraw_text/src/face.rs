//! Loaded font face data

use crate::{Result, TextError};
use std::sync::Arc;

/// Raw font file data plus the face index inside a collection
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    face_index: u32,
    family_name: String,
    units_per_em: u16,
}

impl FontFace {
    /// Parse font data, validating that the face can be read
    pub fn from_data_with_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| TextError::FontParseError(e.to_string()))?;
        let units_per_em = face.units_per_em();
        let family_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
            .find_map(|name| name.to_string())
            .unwrap_or_default();
        Ok(Self {
            data: Arc::new(data),
            face_index,
            family_name,
            units_per_em,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Borrowing parser for outlines and metrics
    pub fn ttf(&self) -> Result<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.face_index)
            .map_err(|e| TextError::FontParseError(e.to_string()))
    }

    /// Borrowing shaper face
    pub fn shaper(&self) -> Result<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.face_index).ok_or_else(|| {
            TextError::FontParseError(format!(
                "cannot create shaper for {:?} (face {})",
                self.family_name, self.face_index
            ))
        })
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}
