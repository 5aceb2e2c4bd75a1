//! Settings table for layout constants and connector styling
//!
//! Settings load from TOML. Every section and key is optional; anything
//! left out keeps its default.
//!
//! ```toml
//! [layout]
//! grid_size = 10.0
//! port_pitch = 10.0
//!
//! [link]
//! color = "#023047"
//! stroke_width = 1.5
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::LayoutConfig;

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read-only configuration consumed by the layout engine
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutConfig,
    pub common: CommonSettings,
    pub link: LinkSettings,
    pub stub: StubSettings,
}

/// Settings shared by all text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    pub font_family: String,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
        }
    }
}

/// Stroke of links and stubs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    pub color: String,
    pub stroke_width: f64,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            color: "#023047".to_string(),
            stroke_width: 1.0,
        }
    }
}

/// Stub labels
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StubSettings {
    pub font_size: f64,
}

impl Default for StubSettings {
    fn default() -> Self {
        Self { font_size: 8.0 }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }
}
