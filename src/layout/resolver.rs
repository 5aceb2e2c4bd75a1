//! Hierarchical address resolution
//!
//! A link endpoint is a dotted port name relative to the scope the link is
//! declared in. One segment names a port of the scope itself, two name a
//! port of a direct child. Deeper names reach into grandchildren; those
//! surface as a single synthesized port on the bottom of the intermediate
//! child.

use log::{trace, warn};

use crate::path;

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::registry::NodeRegistry;
use super::sizing::resize_to_content;
use super::text::TextMeasure;
use super::types::{Location, Pin, VisualNode};

/// Group synthesized ports are added to
pub const SYNTHESIZED_GROUP: &str = "bottom";

/// A concrete (node, port) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Path of the node owning the port
    pub node: String,
    /// Fully qualified port path
    pub port: String,
}

/// Resolve `port`, referenced from the node at `current_path`.
///
/// For names deeper than two segments the owning child gains a port named
/// after the last segment and is resized. A port that was already
/// synthesized for the same path is reused, so repeated resolution adds
/// nothing.
pub fn resolve_address(
    port: &str,
    current_path: &str,
    registry: &mut NodeRegistry,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<Address, LayoutError> {
    if !path::is_well_formed(port) {
        return Err(LayoutError::invalid_port_name(current_path, port));
    }

    let port_path = path::join(current_path, port);
    let (first, rest) = path::split_first(port);
    let rest = match rest {
        None => {
            return Ok(Address {
                node: current_path.to_string(),
                port: port_path,
            })
        }
        Some(rest) => rest,
    };

    let owner = path::join(current_path, first);
    let node = registry
        .get_mut(&owner)
        .ok_or_else(|| LayoutError::unresolved(current_path, &owner))?;

    if path::depth(port) > 2 {
        synthesize_port(node, rest, &port_path, config, metrics)?;
    } else if !node.has_pin(&port_path) {
        warn!(node = owner.as_str(), port = port_path.as_str(); "Link targets an undeclared pin");
    }

    Ok(Address {
        node: owner,
        port: port_path,
    })
}

/// Add a bottom port for a reference into a grandchild, unless present
fn synthesize_port(
    node: &mut VisualNode,
    suffix: &str,
    port_path: &str,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<(), LayoutError> {
    if node.has_pin(port_path) {
        trace!(node = node.id.as_str(), port = port_path; "Reusing synthesized port");
        return Ok(());
    }

    let pin = Pin::new(path::last_segment(suffix), port_path).with_label(suffix);
    let group = node.ensure_group(SYNTHESIZED_GROUP, Location::Bottom);
    group.location = Location::Bottom;
    group.pins.push(pin);

    trace!(node = node.id.as_str(), port = port_path; "Synthesized port");
    resize_to_content(node, config, metrics)
}
