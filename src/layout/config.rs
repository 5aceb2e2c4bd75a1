//! Configuration for the layout engine

use serde::Deserialize;

use super::geometry::snap_to_grid;
use super::types::{NodeKind, Size};

/// Numeric constants for node sizing and port placement
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Spacing unit every size and port position is snapped to
    pub grid_size: f64,

    /// Distance between neighbouring pins when estimating side lengths
    pub port_pitch: f64,

    /// Margin added around the title text
    pub title_margin: f64,

    /// Gap between a port label and the node border
    pub port_label_to_border_gap: f64,

    /// Font size used to measure component titles and pin labels
    pub font_size: f64,

    /// Font size used to measure block titles
    pub block_font_size: f64,

    /// Size of a component before content sizing (width, height)
    pub default_component_size: (f64, f64),

    /// Size of a block before it is fitted around its children (width, height)
    pub default_block_size: (f64, f64),

    /// Padding kept between a block and its children when fitting
    pub parent_padding: f64,

    /// Distance a stub's free end is pushed away from its node
    pub stub_length: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            port_pitch: 10.0,
            title_margin: 10.0,
            port_label_to_border_gap: 5.0,
            font_size: 10.0,
            block_font_size: 14.0,
            default_component_size: (10.0, 10.0),
            default_block_size: (200.0, 100.0),
            parent_padding: 20.0,
            stub_length: 30.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the pin pitch
    pub fn with_port_pitch(mut self, pitch: f64) -> Self {
        self.port_pitch = pitch;
        self
    }

    /// Set the padding used when fitting blocks around children
    pub fn with_parent_padding(mut self, padding: f64) -> Self {
        self.parent_padding = padding;
        self
    }

    /// Set the stub length
    pub fn with_stub_length(mut self, length: f64) -> Self {
        self.stub_length = length;
        self
    }

    /// Snap a value to the configured grid
    pub fn snap(&self, value: f64) -> f64 {
        snap_to_grid(value, self.grid_size)
    }

    /// Size a node of this kind starts with
    pub fn default_size(&self, kind: NodeKind) -> Size {
        let (width, height) = match kind {
            NodeKind::Component => self.default_component_size,
            NodeKind::Block => self.default_block_size,
        };
        Size::new(width, height)
    }

    /// Font size for the title of a node of this kind
    pub fn title_font_size(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Component => self.font_size,
            NodeKind::Block => self.block_font_size,
        }
    }

    /// Whether nodes of this kind size themselves to content on creation.
    ///
    /// Blocks wait for their children to be fitted.
    pub fn resizes_on_create(&self, kind: NodeKind) -> bool {
        matches!(kind, NodeKind::Component)
    }
}
