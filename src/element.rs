//! Domain element tree
//!
//! The input to the layout engine: a tree of named components and blocks,
//! each declaring pins, links between dotted port names, and optional
//! configuration for port groups and signals.

use serde::Deserialize;

use crate::layout::types::{Location, NodeKind};

/// A component or block in the source hierarchy
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Element {
    /// Local name, unique within the parent scope
    pub name: String,
    #[serde(default)]
    pub kind: NodeKind,
    /// Path to the definition this element instantiates
    #[serde(default)]
    pub instance_of: Option<String>,
    #[serde(default)]
    pub pins: Vec<PinDecl>,
    #[serde(default)]
    pub links: Vec<LinkDecl>,
    #[serde(default)]
    pub config: Option<ElementConfig>,
    #[serde(default)]
    pub config_origin_filename: Option<String>,
    #[serde(default)]
    pub config_origin_module: Vec<String>,
    /// Nested elements
    #[serde(default)]
    pub blocks: Vec<Element>,
}

/// A pin declared on an element
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PinDecl {
    pub name: String,
}

/// A link between two dotted port names
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkDecl {
    pub name: String,
    pub source: String,
    pub target: String,
}

/// Per-element layout configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ElementConfig {
    #[serde(default)]
    pub ports: Vec<PortDecl>,
    #[serde(default)]
    pub pins: Vec<PinAssignment>,
    #[serde(default)]
    pub signals: Vec<SignalConfig>,
}

/// A named port group and the side it sits on
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortDecl {
    /// Defaults to `top`
    #[serde(default)]
    pub name: Option<String>,
    /// Defaults to `top`
    #[serde(default)]
    pub location: Option<Location>,
}

/// Assignment of a pin to a declared port group
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PinAssignment {
    pub name: String,
    pub port: String,
}

/// Per-link attributes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalConfig {
    pub name: String,
    #[serde(default)]
    pub is_stub: bool,
}

impl Element {
    /// Create a block with the given name
    pub fn block(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Block,
            ..Self::default()
        }
    }

    /// Create a component with the given name
    pub fn component(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Component,
            ..Self::default()
        }
    }

    /// Set the definition this element instantiates
    pub fn with_instance_of(mut self, instance_of: impl Into<String>) -> Self {
        self.instance_of = Some(instance_of.into());
        self
    }

    /// Append pins by name
    pub fn with_pins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pins
            .extend(names.into_iter().map(|name| PinDecl { name: name.into() }));
        self
    }

    /// Append a link
    pub fn with_link(
        mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.links.push(LinkDecl {
            name: name.into(),
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// Declare a port group
    pub fn with_port(mut self, name: impl Into<String>, location: Location) -> Self {
        self.config_mut().ports.push(PortDecl {
            name: Some(name.into()),
            location: Some(location),
        });
        self
    }

    /// Assign a pin to a port group
    pub fn with_pin_in_port(mut self, pin: impl Into<String>, port: impl Into<String>) -> Self {
        self.config_mut().pins.push(PinAssignment {
            name: pin.into(),
            port: port.into(),
        });
        self
    }

    /// Mark a signal as drawn with stubs
    pub fn with_stub(mut self, signal: impl Into<String>) -> Self {
        self.config_mut().signals.push(SignalConfig {
            name: signal.into(),
            is_stub: true,
        });
        self
    }

    /// Append a nested element
    pub fn with_child(mut self, child: Element) -> Self {
        self.blocks.push(child);
        self
    }

    /// Record where the element was declared
    pub fn with_origin(mut self, filename: impl Into<String>, module: Vec<String>) -> Self {
        self.config_origin_filename = Some(filename.into());
        self.config_origin_module = module;
        self
    }

    fn config_mut(&mut self) -> &mut ElementConfig {
        self.config.get_or_insert_with(ElementConfig::default)
    }

    /// Declared port groups (empty when unconfigured)
    pub fn port_decls(&self) -> &[PortDecl] {
        self.config.as_ref().map(|c| c.ports.as_slice()).unwrap_or(&[])
    }

    /// The port group a pin is assigned to, if configured
    pub fn assigned_port(&self, pin: &str) -> Option<&str> {
        self.config
            .as_ref()?
            .pins
            .iter()
            .find(|assignment| assignment.name == pin)
            .map(|assignment| assignment.port.as_str())
    }

    /// Whether a link is configured to be drawn as stubs
    pub fn is_stub(&self, link: &str) -> bool {
        self.config
            .as_ref()
            .map(|c| c.signals.iter().any(|s| s.name == link && s.is_stub))
            .unwrap_or(false)
    }
}
