//! Turning declared links into connector descriptors
//!
//! Each link of an element is resolved endpoint by endpoint. A link marked
//! as a stub signal becomes a free-ended stub on every endpoint outside the
//! declaring scope; any other link becomes one through-link.

use log::debug;
use serde::Serialize;

use crate::element::{Element, LinkDecl};
use crate::settings::Settings;

use super::error::LayoutError;
use super::registry::NodeRegistry;
use super::resolver::{resolve_address, Address};
use super::routing::{orthogonal_outward_anchor, Offset, Router};
use super::text::TextMeasure;
use super::types::{BoundingBox, Endpoint, Point};

/// Stroke shared by links and stubs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub stroke: String,
    pub stroke_width: f64,
    /// Marker drawn at the target end; connectors carry none
    pub target_marker: Option<String>,
    pub z: i32,
}

impl LineStyle {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            stroke: settings.link.color.clone(),
            stroke_width: settings.link.stroke_width,
            target_marker: None,
            z: 0,
        }
    }
}

/// A connection drawn between two ports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughLink {
    pub name: String,
    pub source: Endpoint,
    pub target: Endpoint,
    pub style: LineStyle,
    pub router: Router,
}

/// Text placed along a stub
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StubLabel {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    /// Fraction of the stub length from its port
    pub distance: f64,
    pub offset: f64,
    pub angle: f64,
}

/// A short connector from one port into free space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stub {
    pub name: String,
    pub endpoint: Endpoint,
    /// Free end relative to the port position
    pub anchor: Offset,
    pub length: f64,
    pub label: StubLabel,
    pub style: LineStyle,
}

/// Output of resolving one link
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Connector {
    Link(ThroughLink),
    Stub(Stub),
}

impl Connector {
    pub fn name(&self) -> &str {
        match self {
            Connector::Link(link) => &link.name,
            Connector::Stub(stub) => &stub.name,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Connector::Stub(_))
    }
}

/// Resolve every link declared on `element`, in declaration order.
///
/// `current_path` is the element's own node path. Resolution may add ports
/// to child nodes, so the registry is borrowed mutably.
pub fn resolve_links(
    element: &Element,
    current_path: &str,
    registry: &mut NodeRegistry,
    settings: &Settings,
    metrics: &dyn TextMeasure,
) -> Result<Vec<Connector>, LayoutError> {
    let mut connectors = Vec::new();

    for link in &element.links {
        let (source, target) = resolve_endpoints(link, current_path, registry, settings, metrics)?;

        if element.is_stub(&link.name) {
            for address in [&source, &target] {
                if address.node == current_path {
                    continue;
                }
                connectors.push(Connector::Stub(build_stub(link, address, registry, settings)));
            }
        } else {
            connectors.push(Connector::Link(ThroughLink {
                name: link.name.clone(),
                source: Endpoint::new(&source.node, &source.port),
                target: Endpoint::new(&target.node, &target.port),
                style: LineStyle::from_settings(settings),
                router: Router::manhattan(settings.layout.grid_size),
            }));
        }
    }

    debug!(
        scope = current_path,
        links = element.links.len(),
        connectors = connectors.len();
        "Resolved links"
    );
    Ok(connectors)
}

fn resolve_endpoints(
    link: &LinkDecl,
    current_path: &str,
    registry: &mut NodeRegistry,
    settings: &Settings,
    metrics: &dyn TextMeasure,
) -> Result<(Address, Address), LayoutError> {
    let config = &settings.layout;
    let source = resolve_address(&link.source, current_path, registry, config, metrics)
        .map_err(|e| e.in_link(&link.name))?;
    let target = resolve_address(&link.target, current_path, registry, config, metrics)
        .map_err(|e| e.in_link(&link.name))?;
    Ok((source, target))
}

fn build_stub(
    link: &LinkDecl,
    address: &Address,
    registry: &NodeRegistry,
    settings: &Settings,
) -> Stub {
    let length = settings.layout.stub_length;

    // Anchor against the node's own frame; pin positions are node-relative
    let anchor = registry
        .get(&address.node)
        .and_then(|node| {
            let position = node.pin(&address.port)?.position?;
            let frame = BoundingBox::from_origin(Point::default(), node.size);
            Some(orthogonal_outward_anchor(&frame, position, Some(length)))
        })
        .unwrap_or_default();

    Stub {
        name: link.name.clone(),
        endpoint: Endpoint::new(&address.node, &address.port),
        anchor,
        length,
        label: StubLabel {
            text: link.name.clone(),
            font_size: settings.stub.font_size,
            font_family: settings.common.font_family.clone(),
            distance: 0.9,
            offset: -5.0,
            angle: 0.0,
        },
        style: LineStyle::from_settings(settings),
    }
}
