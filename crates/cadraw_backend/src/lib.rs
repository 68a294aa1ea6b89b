//! cadraw rendering backend
//!
//! Converts a stream of drawing calls (points, lines, paths, filled regions,
//! polygons and text) into primitives of a retained scene. Styling comes from
//! per-entity [`Properties`]:
//!
//! - colors and dash patterns are resolved once and memoized
//! - pens are cosmetic, their width derived from the lineweight
//! - text is scaled to the requested cap-height, then placed with the entity
//!   transform
//!
//! Every emitted primitive is tagged with the entity being drawn and its
//! parents, see [`EntityTag`].

pub mod backend;
pub mod color;
pub mod config;
pub mod dash;
pub mod entity;
pub mod properties;
pub mod scene;
pub mod style;

pub use backend::{RenderingBackend, SceneState};
pub use color::ColorResolver;
pub use config::{BackendParams, ConfigError};
pub use dash::DashPatternResolver;
pub use entity::{EntityRef, EntityTag};
pub use properties::{is_imperial, Properties, IMPERIAL_UNITS};
pub use scene::{Primitive, PrimitiveId, RecordedPrimitive, RecordingScene, SceneSink};
pub use style::StyleResolver;

use cadraw_paint::PaintError;
use cadraw_text::TextError;
use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Paint(#[from] PaintError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("Scene is finalized, clear() it before drawing again")]
    SceneFinalized,
}

pub type Result<T> = std::result::Result<T, RenderError>;
