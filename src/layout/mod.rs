//! Layout engine for schematic nodes and connectors
//!
//! This module sizes nodes from their content, places their ports, resolves
//! hierarchical link endpoints and emits connector descriptors.

pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod links;
pub mod ports;
pub mod registry;
pub mod resolver;
pub mod routing;
pub mod sizing;
pub mod text;
pub mod types;

pub use config::LayoutConfig;
pub use engine::{build_schematic, Schematic};
pub use error::LayoutError;
pub use factory::create_node;
pub use links::{resolve_links, Connector, LineStyle, Stub, StubLabel, ThroughLink};
pub use registry::{NodeId, NodeRegistry};
pub use resolver::{resolve_address, Address};
pub use routing::{orthogonal_outward_anchor, Offset, Router, RoutingMode};
pub use text::{ApproximateMetrics, TextExtent, TextMeasure};
pub use types::*;
