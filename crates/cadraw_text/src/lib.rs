//! Text outlines for cadraw
//!
//! This crate provides:
//! - Logical font descriptors and their mapping onto concrete fonts
//! - Font measurements from probe glyph bounding boxes
//! - Glyph outline caching per resolved font
//! - Text placement: cap-height scaling followed by the entity transform
//!
//! Outlines come from an [`OutlineSource`]: system fonts through fontdb,
//! ttf-parser and rustybuzz, or deterministic block glyphs for headless use.

pub mod block;
pub mod face;
pub mod font;
pub mod glyph_cache;
pub mod metrics;
pub mod normalize;
pub mod placer;
pub mod registry;
pub mod source;

pub use block::{BlockMetrics, BlockOutlineSource};
pub use face::FontFace;
pub use font::{
    map_weight, weight_name_to_value, FontDescriptor, FontId, FontMeasurements, FontWeight,
    ResolvedFont,
};
pub use glyph_cache::GlyphPathCache;
pub use metrics::FontMetricsCache;
pub use normalize::{prepare_string_for_rendering, TextEntity};
pub use placer::TextPlacer;
pub use registry::{FontRegistry, GenericFont};
pub use source::{OutlineSource, SystemOutlineSource};

use thiserror::Error;

/// Text rendering errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Font {family:?} has no usable bounding box for probe glyph {probe:?}")]
    MissingProbeGlyph { family: String, probe: char },
}

pub type Result<T> = std::result::Result<T, TextError>;
