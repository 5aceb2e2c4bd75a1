//! Schematic construction pipeline
//!
//! Walks an element tree depth first. Every element becomes a node in the
//! registry before any link that could reference it is resolved: a scope's
//! children are built first, then the scope's own links.
//!
//! ## Key Functions
//!
//! - [`build_schematic`]: build nodes and connectors for a whole tree
//! - [`Schematic::route_preview`]: orthogonal preview path of a connector

use log::{debug, info};
use serde::Serialize;

use crate::element::Element;
use crate::path;
use crate::settings::Settings;

use super::error::LayoutError;
use super::factory::create_node;
use super::links::{resolve_links, Connector};
use super::registry::NodeRegistry;
use super::routing::{route_link, stub_path};
use super::text::TextMeasure;
use super::types::{NodeKind, Point, VisualNode};

/// All nodes and connectors of one diagram
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schematic {
    /// Nodes in construction order, parents before children
    pub nodes: NodeRegistry,
    /// Connectors in resolution order, innermost scopes first
    pub connectors: Vec<Connector>,
}

impl Schematic {
    pub fn node(&self, path: &str) -> Option<&VisualNode> {
        self.nodes.get(path)
    }

    /// Connectors with the given link name
    pub fn connectors_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Connector> {
        self.connectors.iter().filter(move |c| c.name() == name)
    }

    /// Path a connector would take given the current node positions.
    ///
    /// `None` when an endpoint has no placed port.
    pub fn route_preview(&self, connector: &Connector) -> Option<Vec<Point>> {
        match connector {
            Connector::Link(link) => {
                let (start, start_side) = self.nodes.port_position(&link.source)?;
                let (end, end_side) = self.nodes.port_position(&link.target)?;
                Some(route_link(start, start_side, end, end_side, &link.router))
            }
            Connector::Stub(stub) => {
                let node = self.nodes.get(&stub.endpoint.node)?;
                let (port, _) = self.nodes.port_position(&stub.endpoint)?;
                Some(stub_path(&node.bbox(), port, Some(stub.length)))
            }
        }
    }
}

/// Build every node and connector for the tree rooted at `root`.
///
/// The root is always drawn as a block; its path is its own name.
pub fn build_schematic(
    root: &Element,
    settings: &Settings,
    metrics: &dyn TextMeasure,
) -> Result<Schematic, LayoutError> {
    let mut schematic = Schematic::default();

    let node = create_node(NodeKind::Block, root, &root.name, &settings.layout, metrics)?;
    schematic.nodes.insert(node)?;
    build_scope(root, &root.name, &mut schematic, settings, metrics)?;

    info!(
        root = root.name.as_str(),
        nodes = schematic.nodes.len(),
        connectors = schematic.connectors.len();
        "Built schematic"
    );
    Ok(schematic)
}

fn build_scope(
    element: &Element,
    scope: &str,
    schematic: &mut Schematic,
    settings: &Settings,
    metrics: &dyn TextMeasure,
) -> Result<(), LayoutError> {
    for child in &element.blocks {
        let child_path = path::join(scope, &child.name);
        let node = create_node(child.kind, child, &child_path, &settings.layout, metrics)?;
        schematic.nodes.insert_child(scope, node)?;
        build_scope(child, &child_path, schematic, settings, metrics)?;
    }

    if !element.links.is_empty() {
        debug!(scope = scope, links = element.links.len(); "Resolving scope links");
        let connectors = resolve_links(element, scope, &mut schematic.nodes, settings, metrics)?;
        schematic.connectors.extend(connectors);
    }
    Ok(())
}
