//! Per-draw-call style properties

use cadraw_text::FontDescriptor;

/// Drawing unit codes of imperial measurement systems: inches, feet, miles,
/// microinches, mils, yards and the US survey units.
pub const IMPERIAL_UNITS: [u16; 10] = [1, 2, 3, 8, 9, 10, 21, 22, 23, 24];

pub fn is_imperial(units: u16) -> bool {
    IMPERIAL_UNITS.contains(&units)
}

/// Style snapshot of one draw call, read-only to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    /// `#RRGGBB` or `#RRGGBBAA`
    pub color: String,
    /// Lineweight in millimeters
    pub lineweight: f64,
    /// Alternating dash/gap lengths in drawing units
    pub linetype_pattern: Vec<f64>,
    pub linetype_scale: f64,
    pub filling: bool,
    /// Drawing unit code, 0 is unitless
    pub units: u16,
    pub font: Option<FontDescriptor>,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            lineweight: 0.25,
            linetype_pattern: Vec::new(),
            linetype_scale: 1.0,
            filling: false,
            units: 0,
            font: None,
        }
    }
}

impl Properties {
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Default::default()
        }
    }

    pub fn is_imperial(&self) -> bool {
        is_imperial(self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_classification() {
        assert!(is_imperial(1));
        assert!(is_imperial(24));
        assert!(!is_imperial(0));
        assert!(!is_imperial(4));
        assert!(!Properties::default().is_imperial());
    }
}
