//! Arena of visual nodes indexed by hierarchical path
//!
//! Every node lives in one `Vec` and is addressed through a path index, so
//! lookups by path always return the same node. Parent/child links are
//! stored as paths on the nodes themselves.

use std::collections::HashMap;

use log::trace;
use serde::{Serialize, Serializer};

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::ports::place_ports;
use super::types::{BoundingBox, Endpoint, Location, NodeKind, Point, Size, VisualNode};

/// Handle to a node in a [`NodeRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(usize);

/// All nodes materialized during a construction pass
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<VisualNode>,
    index: HashMap<String, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a root node
    pub fn insert(&mut self, node: VisualNode) -> Result<NodeId, LayoutError> {
        if self.index.contains_key(&node.id) {
            return Err(LayoutError::DuplicateNode { id: node.id });
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(node.id.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Register a node embedded in `parent`
    pub fn insert_child(
        &mut self,
        parent: &str,
        mut node: VisualNode,
    ) -> Result<NodeId, LayoutError> {
        let parent_id = self
            .id_of(parent)
            .ok_or_else(|| LayoutError::node_not_found(parent))?;
        node.parent = Some(parent.to_string());
        let child_path = node.id.clone();
        let id = self.insert(node)?;
        self.nodes[parent_id.0].children.push(child_path);
        Ok(id)
    }

    pub fn id_of(&self, path: &str) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    pub fn get(&self, path: &str) -> Option<&VisualNode> {
        self.id_of(path).map(|id| &self.nodes[id.0])
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut VisualNode> {
        let id = self.id_of(path)?;
        Some(&mut self.nodes[id.0])
    }

    /// Nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &VisualNode> {
        self.nodes.iter()
    }

    /// Absolute position of a port and the side it sits on
    pub fn port_position(&self, endpoint: &Endpoint) -> Option<(Point, Location)> {
        let node = self.get(&endpoint.node)?;
        let group = node
            .port_groups
            .iter()
            .find(|g| g.pins.iter().any(|p| p.path == endpoint.port))?;
        let local = node.pin(&endpoint.port)?.position?;
        Some((
            Point::new(node.position.x + local.x, node.position.y + local.y),
            group.location,
        ))
    }

    fn require(&self, path: &str) -> Result<NodeId, LayoutError> {
        self.id_of(path).ok_or_else(|| LayoutError::node_not_found(path))
    }

    /// Paths of every node below `path`, depth first
    pub fn descendants(&self, path: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut stack: Vec<&str> = match self.get(path) {
            Some(node) => node.children.iter().rev().map(String::as_str).collect(),
            None => return result,
        };
        while let Some(current) = stack.pop() {
            result.push(current.to_string());
            if let Some(node) = self.get(current) {
                stack.extend(node.children.iter().rev().map(String::as_str));
            }
        }
        result
    }

    /// Move a node; with `deep`, descendants move by the same delta
    pub fn set_position(
        &mut self,
        path: &str,
        position: Point,
        deep: bool,
    ) -> Result<(), LayoutError> {
        let id = self.require(path)?;
        let current = self.nodes[id.0].position;
        let (dx, dy) = (position.x - current.x, position.y - current.y);
        self.nodes[id.0].position = position;

        if deep {
            for descendant in self.descendants(path) {
                if let Some(node) = self.get_mut(&descendant) {
                    node.position.x += dx;
                    node.position.y += dy;
                }
            }
        }
        Ok(())
    }

    /// Set a node's size and re-place its ports against it
    pub fn resize(
        &mut self,
        path: &str,
        size: Size,
        config: &LayoutConfig,
    ) -> Result<(), LayoutError> {
        let id = self.require(path)?;
        let node = &mut self.nodes[id.0];
        node.size = size;
        node.content_sized = false;
        place_ports(node, config);
        Ok(())
    }

    /// Grow every ancestor of `path` to enclose its children plus
    /// `config.parent_padding`.
    ///
    /// Each parent is fitted around all of its children, then the walk
    /// continues with the grandparent.
    pub fn fit_ancestors(&mut self, path: &str, config: &LayoutConfig) -> Result<(), LayoutError> {
        let mut current = self.require(path)?;
        while let Some(parent) = self.nodes[current.0].parent.clone() {
            let parent_id = self.require(&parent)?;
            let children = self.nodes[parent_id.0].children.clone();

            let mut bounds: Option<BoundingBox> = None;
            for child in &children {
                if let Some(node) = self.get(child) {
                    let bbox = node.bbox();
                    bounds = Some(match bounds {
                        Some(acc) => acc.union(&bbox),
                        None => bbox,
                    });
                }
            }

            if let Some(bounds) = bounds {
                let fitted = bounds.inflate(config.parent_padding);
                trace!(
                    node = parent.as_str(),
                    width = fitted.width,
                    height = fitted.height;
                    "Fitted block to children"
                );
                self.nodes[parent_id.0].position = Point::new(fitted.x, fitted.y);
                self.resize(&parent, Size::new(fitted.width, fitted.height), config)?;
            }
            current = parent_id;
        }
        Ok(())
    }

    /// Collapse or expand a block, hiding or showing its descendants.
    ///
    /// A descendant stays hidden while any block between it and this one
    /// is itself collapsed.
    pub fn set_collapsed(&mut self, path: &str, collapsed: bool) -> Result<(), LayoutError> {
        let id = self.require(path)?;
        if self.nodes[id.0].kind != NodeKind::Block {
            return Err(LayoutError::NotABlock { id: path.to_string() });
        }
        self.nodes[id.0].collapsed = collapsed;

        let hidden_above = self.nodes[id.0].hidden;
        self.refresh_visibility(path, hidden_above || collapsed);
        Ok(())
    }

    fn refresh_visibility(&mut self, path: &str, hide_children: bool) {
        let children = match self.get(path) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            let collapsed = match self.get_mut(&child) {
                Some(node) => {
                    node.hidden = hide_children;
                    node.collapsed
                }
                None => continue,
            };
            self.refresh_visibility(&child, hide_children || collapsed);
        }
    }
}

impl Serialize for NodeRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.nodes.iter())
    }
}
