//! Backend configuration (cadraw.toml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Construction-time rendering parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendParams {
    /// Diameter of point markers; halved into the marker radius, which the
    /// view scale divides at paint time
    #[serde(default = "default_point_size")]
    pub point_size: f64,
    /// Pixel-width multiplier for lineweights
    #[serde(default = "default_lineweight_scaling")]
    pub lineweight_scaling: f64,
    /// 0 disables dash patterns
    #[serde(default = "default_linetype_scaling")]
    pub linetype_scaling: f64,
    /// Lower bound of every dash and gap length
    #[serde(default = "default_min_dash_length")]
    pub min_dash_length: f64,
    /// Draw filled regions (hatches)
    #[serde(default = "default_true")]
    pub show_hatch: bool,
    /// Keep glyph outlines between text draws
    #[serde(default = "default_true")]
    pub use_text_cache: bool,
    /// Outline the scene bounds on finalize
    #[serde(default)]
    pub debug_draw_rect: bool,
    /// Family of the font used when a text has no font descriptor
    #[serde(default = "default_font_family")]
    pub default_font_family: String,
}

fn default_point_size() -> f64 {
    1.0
}

fn default_lineweight_scaling() -> f64 {
    2.0
}

fn default_linetype_scaling() -> f64 {
    1.0
}

fn default_min_dash_length() -> f64 {
    0.1
}

fn default_true() -> bool {
    true
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

impl Default for BackendParams {
    fn default() -> Self {
        Self {
            point_size: default_point_size(),
            lineweight_scaling: default_lineweight_scaling(),
            linetype_scaling: default_linetype_scaling(),
            min_dash_length: default_min_dash_length(),
            show_hatch: true,
            use_text_cache: true,
            debug_draw_rect: false,
            default_font_family: default_font_family(),
        }
    }
}

impl BackendParams {
    /// Parse parameters from TOML, missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load parameters from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let params = BackendParams::from_toml_str("").unwrap();
        assert_eq!(params, BackendParams::default());
        assert_eq!(params.point_size, 1.0);
        assert_eq!(params.lineweight_scaling, 2.0);
        assert!(params.show_hatch);
        assert!(!params.debug_draw_rect);
    }

    #[test]
    fn test_partial_config() {
        let params = BackendParams::from_toml_str(
            r#"
            linetype_scaling = 0.0
            show_hatch = false
            default_font_family = "serif"
            "#,
        )
        .unwrap();
        assert_eq!(params.linetype_scaling, 0.0);
        assert!(!params.show_hatch);
        assert_eq!(params.default_font_family, "serif");
        assert_eq!(params.min_dash_length, 0.1);
    }

    #[test]
    fn test_invalid_config() {
        let err = BackendParams::from_toml_str("point_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = BackendParams::load(Path::new("/nonexistent/cadraw.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let params = BackendParams {
            debug_draw_rect: true,
            ..Default::default()
        };
        let text = params.to_toml_string().unwrap();
        assert_eq!(BackendParams::from_toml_str(&text).unwrap(), params);
    }
}
