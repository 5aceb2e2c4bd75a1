//! Schematic Layout - sized nodes and resolved connectors for hierarchical schematics
//!
//! This library turns a tree of components and blocks into visual nodes
//! with placed ports, and their links into connector descriptors for a
//! rendering backend.
//!
//! # Example
//!
//! ```rust
//! use schematic_layout::layout_json;
//!
//! let schematic = layout_json(r#"{
//!     "name": "top",
//!     "blocks": [
//!         {"name": "r1", "kind": "component", "pins": [{"name": "p1"}]},
//!         {"name": "r2", "kind": "component", "pins": [{"name": "p1"}]}
//!     ],
//!     "links": [{"name": "net1", "source": "r1.p1", "target": "r2.p1"}]
//! }"#).unwrap();
//!
//! assert_eq!(schematic.nodes.len(), 3);
//! assert_eq!(schematic.connectors.len(), 1);
//! ```

pub mod element;
pub mod error;
pub mod layout;
pub mod path;
pub mod settings;

pub use element::Element;
pub use error::InputError;
pub use layout::{
    build_schematic, create_node, orthogonal_outward_anchor, resolve_address, resolve_links,
    ApproximateMetrics, Connector, LayoutConfig, LayoutError, Schematic, TextMeasure,
};
pub use settings::{Settings, SettingsError};

use log::{debug, info};
use thiserror::Error;

/// Errors that can occur during the layout pipeline
#[derive(Debug, Error)]
pub enum SchematicError {
    /// Error while decoding the element tree
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error while loading settings
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Error while encoding the output
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Configuration for the complete layout pipeline
#[derive(Debug, Clone, Default)]
pub struct SchematicConfig {
    /// Layout constants and connector styling
    pub settings: Settings,
    /// Blocks to collapse once the tree is built
    pub collapsed: Vec<String>,
}

impl SchematicConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settings table
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the layout constants
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.settings.layout = config;
        self
    }

    /// Collapse the block at `path`
    pub fn with_collapsed(mut self, path: impl Into<String>) -> Self {
        self.collapsed.push(path.into());
        self
    }
}

/// Decode an element tree from JSON
pub fn parse_element(source: &str) -> Result<Element, InputError> {
    serde_json::from_str(source).map_err(|err| InputError::from_json(&err, source))
}

/// Lay out a JSON element tree with default configuration
pub fn layout_json(source: &str) -> Result<Schematic, SchematicError> {
    layout_json_with_config(source, &SchematicConfig::default())
}

/// Lay out a JSON element tree with custom configuration
///
/// # Example
///
/// ```rust
/// use schematic_layout::{layout_json_with_config, LayoutConfig, SchematicConfig};
///
/// let config = SchematicConfig::new()
///     .with_layout(LayoutConfig::default().with_grid_size(5.0))
///     .with_collapsed("top");
///
/// let schematic = layout_json_with_config(
///     r#"{"name": "top", "blocks": [{"name": "u1", "kind": "component"}]}"#,
///     &config,
/// ).unwrap();
///
/// assert!(schematic.node("top.u1").unwrap().hidden);
/// ```
pub fn layout_json_with_config(
    source: &str,
    config: &SchematicConfig,
) -> Result<Schematic, SchematicError> {
    let root = parse_element(source)?;
    debug!(root = root.name.as_str(), children = root.blocks.len(); "Decoded element tree");
    layout_element(&root, config)
}

/// Lay out an already decoded element tree
pub fn layout_element(
    root: &Element,
    config: &SchematicConfig,
) -> Result<Schematic, SchematicError> {
    let metrics = ApproximateMetrics::default();
    let mut schematic = build_schematic(root, &config.settings, &metrics)?;

    for path in &config.collapsed {
        schematic.nodes.set_collapsed(path, true)?;
        info!(node = path.as_str(); "Collapsed block");
    }
    Ok(schematic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_minimal() {
        let schematic = layout_json(r#"{"name": "top"}"#).unwrap();
        assert_eq!(schematic.nodes.len(), 1);
        assert!(schematic.connectors.is_empty());
    }

    #[test]
    fn test_layout_invalid_json() {
        let err = layout_json(r#"{"name": }"#).unwrap_err();
        assert!(matches!(err, SchematicError::Input(_)));
    }

    #[test]
    fn test_layout_missing_name() {
        let err = layout_json(r#"{"pins": []}"#).unwrap_err();
        assert!(matches!(err, SchematicError::Input(_)));
    }

    #[test]
    fn test_layout_unresolved_link() {
        let err = layout_json(
            r#"{"name": "top", "links": [{"name": "n", "source": "x.a", "target": "b"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchematicError::Layout(_)));
        assert!(err.to_string().contains("link 'n'"));
    }

    #[test]
    fn test_collapse_component_fails() {
        let config = SchematicConfig::new().with_collapsed("top.u1");
        let err = layout_json_with_config(
            r#"{"name": "top", "blocks": [{"name": "u1", "kind": "component"}]}"#,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, SchematicError::Layout(LayoutError::NotABlock { .. })));
    }

    #[test]
    fn test_schematic_serializes() {
        let schematic = layout_json(
            r#"{
                "name": "top",
                "blocks": [{"name": "u1", "kind": "component", "pins": [{"name": "a"}]}],
                "links": [{"name": "n", "source": "u1.a", "target": "vin"}]
            }"#,
        )
        .unwrap();
        let value = serde_json::to_value(&schematic).unwrap();

        assert_eq!(value["nodes"][1]["id"], "top.u1");
        assert_eq!(value["connectors"][0]["type"], "link");
        assert_eq!(value["connectors"][0]["router"]["mode"], "manhattan");
        assert_eq!(value["connectors"][0]["source"]["port"], "top.u1.a");
    }
}
