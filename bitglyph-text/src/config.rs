//! Render configuration: colours and cell metrics.
//!
//! Read from JSON; every field is optional and falls back to the
//! built-in look (dark grey glyphs on a warm yellow background, 5-wide
//! glyphs on a 6-unit pitch).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CellMetrics;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// RGBA fill for set glyph pixels.
    pub glyph_color: [f32; 4],
    /// RGBA clear colour.
    pub background_color: [f32; 4],
    /// Horizontal advance per glyph in logical units.
    pub cell_pitch: u32,
    /// Drawn glyph width in logical units.
    pub glyph_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let metrics = CellMetrics::default();
        Self {
            glyph_color: [0.2, 0.2, 0.2, 1.0],
            background_color: [1.0, 0.866, 0.333, 1.0],
            cell_pitch: metrics.cell_pitch,
            glyph_width: metrics.glyph_width,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_pitch == 0 || self.glyph_width == 0 {
            return Err(ConfigError::Invalid(
                "cell_pitch and glyph_width must be non-zero".into(),
            ));
        }
        if self.glyph_width > self.cell_pitch {
            return Err(ConfigError::Invalid(format!(
                "glyph_width {} exceeds cell_pitch {}",
                self.glyph_width, self.cell_pitch
            )));
        }
        let channels = self.glyph_color.iter().chain(&self.background_color);
        if channels.copied().any(|c| !(0.0..=1.0).contains(&c)) {
            return Err(ConfigError::Invalid(
                "colour channels must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }

    pub fn metrics(&self) -> CellMetrics {
        CellMetrics {
            cell_pitch: self.cell_pitch,
            glyph_width: self.glyph_width,
        }
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.glyph_color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(config.background_color, [1.0, 0.866, 0.333, 1.0]);
        assert_eq!(config.metrics(), CellMetrics::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RenderConfig::from_json_str(r#"{ "glyph_color": [1.0, 0.0, 0.0, 1.0] }"#).unwrap();
        assert_eq!(config.glyph_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.cell_pitch, 6);
        assert_eq!(config.glyph_width, 5);
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(RenderConfig::from_json_str("{}").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_rejects_zero_metrics() {
        let err = RenderConfig::from_json_str(r#"{ "cell_pitch": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_width_over_pitch() {
        let err = RenderConfig::from_json_str(r#"{ "cell_pitch": 4, "glyph_width": 5 }"#).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_rejects_out_of_range_colour() {
        let err = RenderConfig::from_json_str(r#"{ "background_color": [2.0, 0.0, 0.0, 1.0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = RenderConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_pitch": 8, "glyph_width": 5 }}"#).unwrap();
        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!(config.metrics().cell_pitch, 8);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RenderConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RenderConfig {
            glyph_color: [0.0, 0.0, 0.0, 1.0],
            ..RenderConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RenderConfig::from_json_str(&json).unwrap(), config);
    }
}
