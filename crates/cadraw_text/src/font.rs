//! Logical font descriptors and resolved fonts

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Font weight as given by the drawing: a number on the 0-1000 scale or a
/// named level such as "bold".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Numeric(u16),
    Named(String),
}

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight::Numeric(400);
    pub const BOLD: FontWeight = FontWeight::Numeric(700);

    /// Numeric weight on the 0-1000 scale
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Numeric(v) => *v,
            FontWeight::Named(name) => weight_name_to_value(name),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        FontWeight::Numeric(value)
    }
}

impl From<&str> for FontWeight {
    fn from(name: &str) -> Self {
        FontWeight::Named(name.to_string())
    }
}

/// Numeric value of a named weight, case-insensitive.
///
/// Unknown names map to normal (400).
pub fn weight_name_to_value(name: &str) -> u16 {
    match name.to_ascii_lowercase().replace(['-', ' ', '_'], "").as_str() {
        "thin" | "hairline" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "normal" | "regular" | "book" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        other => {
            tracing::warn!("Unknown font weight name {:?}, using normal", other);
            400
        }
    }
}

/// Map a 0-1000 weight onto the renderer's 0-99 scale: `trunc(w / 10) + 10`,
/// clamped. Normal (400) lands on 50 and halfway weights round down.
///
/// Lossy and not invertible; neighbouring weights may collide.
pub fn map_weight(weight: &FontWeight) -> u8 {
    let value = (weight.value() as f64 / 10.0).trunc() as i64 + 10;
    value.clamp(0, 99) as u8
}

/// Logical font as referenced by a text entity's style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontDescriptor {
    pub family: String,
    /// Free-form style string, italic if it contains "italic"
    pub style: String,
    pub weight: FontWeight,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, style: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
            weight,
        }
    }

    pub fn is_italic(&self) -> bool {
        self.style.to_lowercase().contains("italic")
    }
}

/// Identity hash of a resolved font, used as cache key for measurements and
/// glyph outlines.
pub type FontId = u64;

/// Concrete font request derived from a descriptor.
///
/// Different descriptors can resolve to equal fonts; they then share the
/// same [`FontId`] and therefore the same cached resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    family: String,
    weight: u8,
    italic: bool,
    id: FontId,
}

impl ResolvedFont {
    pub fn new(family: impl Into<String>, weight: u8, italic: bool) -> Self {
        let family = family.into();
        let mut hasher = FxHasher::default();
        family.hash(&mut hasher);
        weight.hash(&mut hasher);
        italic.hash(&mut hasher);
        let id = hasher.finish();
        Self {
            family,
            weight,
            italic,
            id,
        }
    }

    pub fn from_descriptor(descriptor: &FontDescriptor) -> Self {
        Self::new(
            descriptor.family.clone(),
            map_weight(&descriptor.weight),
            descriptor.is_italic(),
        )
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Weight on the renderer's 0-99 scale
    pub fn weight(&self) -> u8 {
        self.weight
    }

    /// Weight back on the 100-900 scale, for font database queries
    pub fn css_weight(&self) -> u16 {
        ((self.weight as i32 - 10) * 10).clamp(100, 900) as u16
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn id(&self) -> FontId {
        self.id
    }
}

impl Hash for ResolvedFont {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Vertical font metrics in the units of the outline they were measured on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMeasurements {
    pub baseline: f64,
    pub cap_height: f64,
    pub x_height: f64,
    pub descender_height: f64,
}

impl FontMeasurements {
    /// Scale all measurements so that the cap-height equals
    /// `desired_cap_height`.
    pub fn scale_from_baseline(&self, desired_cap_height: f64) -> FontMeasurements {
        let scale = desired_cap_height / self.cap_height;
        FontMeasurements {
            baseline: self.baseline * scale,
            cap_height: desired_cap_height,
            x_height: self.x_height * scale,
            descender_height: self.descender_height * scale,
        }
    }

    pub fn cap_top(&self) -> f64 {
        self.baseline + self.cap_height
    }

    pub fn x_top(&self) -> f64 {
        self.baseline + self.x_height
    }

    pub fn bottom(&self) -> f64 {
        self.baseline - self.descender_height
    }

    pub fn total_height(&self) -> f64 {
        self.cap_height + self.descender_height
    }
}
