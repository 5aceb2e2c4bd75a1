//! Building visual nodes from domain elements

use log::debug;

use crate::element::Element;
use crate::path;

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::ports::place_ports;
use super::sizing::resize_to_content;
use super::text::TextMeasure;
use super::types::{Location, NodeKind, Origin, Pin, VisualNode};

/// Name of the group pins fall into when no port is configured for them
pub const DEFAULT_GROUP: &str = "top";

/// Title shown inside a node.
///
/// Instances carry the name of their definition on a second line.
pub fn element_title(element: &Element) -> String {
    match &element.instance_of {
        Some(definition) => format!("{}\n({})", element.name, path::last_segment(definition)),
        None => element.name.clone(),
    }
}

/// Create a component or block node for `element` at `path`.
///
/// Components are sized to their content right away. Blocks keep their
/// default size until they are fitted around their children, but their
/// ports are still placed against that size.
pub fn create_node(
    kind: NodeKind,
    element: &Element,
    path: &str,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<VisualNode, LayoutError> {
    let mut node = VisualNode::new(path, kind, config.default_size(kind));
    node.instance_name = element.name.clone();
    node.title = element_title(element);
    node.origin = Origin {
        filename: element.config_origin_filename.clone(),
        module: element.config_origin_module.clone(),
    };

    assign_pins(&mut node, element)?;

    if config.resizes_on_create(kind) {
        resize_to_content(&mut node, config, metrics)?;
    } else {
        place_ports(&mut node, config);
    }

    debug!(
        node = node.id.as_str(),
        pins = node.pins().count(),
        groups = node.port_groups.len();
        "Created node"
    );
    Ok(node)
}

/// Put every declared pin into exactly one port group.
///
/// Groups are materialized first so that assignment never depends on the
/// order declarations appear in. Groups left empty are dropped.
fn assign_pins(node: &mut VisualNode, element: &Element) -> Result<(), LayoutError> {
    for decl in element.port_decls() {
        let name = decl.name.as_deref().unwrap_or(DEFAULT_GROUP);
        let location = decl.location.unwrap_or(Location::Top);
        node.ensure_group(name, location).location = location;
    }

    let needs_default = element
        .pins
        .iter()
        .any(|pin| element.assigned_port(&pin.name).is_none());
    if needs_default {
        node.ensure_group(DEFAULT_GROUP, Location::Top);
    }

    for pin in &element.pins {
        let port = element.assigned_port(&pin.name).unwrap_or(DEFAULT_GROUP);
        let pin_path = path::join(&node.id, &pin.name);
        let element_path = node.id.clone();
        let group = node
            .group_mut(port)
            .ok_or_else(|| LayoutError::port_group_not_found(element_path, &pin.name, port))?;
        group.pins.push(Pin::new(&pin.name, pin_path));
    }

    node.port_groups.retain(|group| !group.pins.is_empty());
    Ok(())
}
