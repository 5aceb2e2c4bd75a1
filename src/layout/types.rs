//! Core types for the layout engine

use serde::{Deserialize, Serialize};

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A bounding box representing the spatial extent of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a bounding box from an origin and a size
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `padding` on every side
    pub fn inflate(&self, padding: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - padding,
            self.y - padding,
            self.width + 2.0 * padding,
            self.height + 2.0 * padding,
        )
    }

    /// The side of the box closest to a point.
    ///
    /// Ties resolve in the order left, right, top, bottom.
    pub fn side_nearest_to_point(&self, point: Point) -> Location {
        let candidates = [
            (Location::Left, point.x - self.x),
            (Location::Right, self.right() - point.x),
            (Location::Top, point.y - self.y),
            (Location::Bottom, self.bottom() - point.y),
        ];

        let mut nearest = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < nearest.1 {
                nearest = *candidate;
            }
        }
        nearest.0
    }
}

/// Side of a node a port group sits on.
///
/// Unrecognized location strings deserialize to [`Location::Other`], which
/// the geometry tables treat as a neutral no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Top,
    Bottom,
    Left,
    Right,
    #[serde(other)]
    Other,
}

impl Location {
    /// The four sides, in the order they are laid out
    pub const SIDES: [Location; 4] = [
        Location::Top,
        Location::Left,
        Location::Right,
        Location::Bottom,
    ];

    /// Whether ports on this side run horizontally
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Location::Top | Location::Bottom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Top => "top",
            Location::Bottom => "bottom",
            Location::Left => "left",
            Location::Right => "right",
            Location::Other => "other",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of visual node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Component,
    #[default]
    Block,
}

/// Text anchor position for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A straight line along a node border, relative to the node origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Where and how the labels of a port group are drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPose {
    /// Offset of each label from its port
    pub offset: Point,
    /// Rotation in degrees
    pub angle: f64,
}

/// Derived geometry of a port group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupPlacement {
    /// Grid-snapped center of the run of pins along the side
    pub center_offset: f64,
    /// Anchor line the group's pins are distributed on
    pub segment: Option<Segment>,
    pub label: LabelPose,
}

/// A single pin (port) on a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin {
    /// Local name
    pub name: String,
    /// Displayed text
    pub label: String,
    /// Fully qualified id, used as the port identifier
    pub path: String,
    /// Position relative to the node origin, once placed
    pub position: Option<Point>,
    pub anchor: TextAnchor,
}

impl Pin {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            path: path.into(),
            position: None,
            anchor: TextAnchor::Middle,
        }
    }

    /// Override the displayed text
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A named cluster of pins on one side of a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortGroup {
    pub name: String,
    pub location: Location,
    pub pins: Vec<Pin>,
    pub placement: Option<GroupPlacement>,
}

impl PortGroup {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            pins: Vec::new(),
            placement: None,
        }
    }
}

/// Where a node was declared, for traceability
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Origin {
    pub filename: Option<String>,
    pub module: Vec<String>,
}

/// Spans used to center port groups along each side.
///
/// Content sizing replaces these with measured values; until then they
/// follow the node's own size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PlacementSpans {
    /// Inset of top/bottom groups from the left edge
    pub port_offset: f64,
    /// Horizontal length top/bottom groups are centered within
    pub max_length: f64,
    /// Vertical length left/right groups are centered within
    pub max_height: f64,
}

impl PlacementSpans {
    /// Spans covering the whole node
    pub fn from_size(size: Size) -> Self {
        Self {
            port_offset: 0.0,
            max_length: size.width,
            max_height: size.height,
        }
    }
}

/// A sized node with ports, ready to hand to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    /// Hierarchical path, unique across the diagram
    pub id: String,
    pub kind: NodeKind,
    pub instance_name: String,
    pub title: String,
    pub size: Size,
    pub position: Point,
    pub origin: Origin,
    pub port_groups: Vec<PortGroup>,
    /// Blocks only: descendants are hidden while collapsed
    pub collapsed: bool,
    pub hidden: bool,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub spans: PlacementSpans,
    /// Whether content sizing has run on this node
    pub content_sized: bool,
}

impl VisualNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, size: Size) -> Self {
        let id = id.into();
        Self {
            instance_name: crate::path::last_segment(&id).to_string(),
            title: crate::path::last_segment(&id).to_string(),
            id,
            kind,
            size,
            position: Point::default(),
            origin: Origin::default(),
            port_groups: Vec::new(),
            collapsed: false,
            hidden: false,
            parent: None,
            children: Vec::new(),
            spans: PlacementSpans::from_size(size),
            content_sized: false,
        }
    }

    /// Bounding box in absolute coordinates
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_origin(self.position, self.size)
    }

    pub fn group(&self, name: &str) -> Option<&PortGroup> {
        self.port_groups.iter().find(|g| g.name == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut PortGroup> {
        self.port_groups.iter_mut().find(|g| g.name == name)
    }

    /// Get a group by name, creating it at `location` if it does not exist
    pub fn ensure_group(&mut self, name: &str, location: Location) -> &mut PortGroup {
        let index = match self.port_groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.port_groups.push(PortGroup::new(name, location));
                self.port_groups.len() - 1
            }
        };
        &mut self.port_groups[index]
    }

    /// All pins across every group, in group order
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.port_groups.iter().flat_map(|g| g.pins.iter())
    }

    /// Find a pin by its fully qualified path
    pub fn pin(&self, path: &str) -> Option<&Pin> {
        self.pins().find(|p| p.path == path)
    }

    pub fn has_pin(&self, path: &str) -> bool {
        self.pin(path).is_some()
    }

    /// Pins on one side, in group order
    pub fn pins_at(&self, location: Location) -> impl Iterator<Item = &Pin> {
        self.port_groups
            .iter()
            .filter(move |g| g.location == location)
            .flat_map(|g| g.pins.iter())
    }
}

/// One end of a connector: a node and one of its ports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub node: String,
    pub port: String,
}

impl Endpoint {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let center = bb.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
        let union = a.union(&b);

        assert_eq!(union.x, 0.0);
        assert_eq!(union.y, 0.0);
        assert_eq!(union.width, 150.0);
        assert_eq!(union.height, 150.0);
    }

    #[test]
    fn test_bounding_box_inflate() {
        let bb = BoundingBox::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
        assert_eq!(bb, BoundingBox::new(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_side_nearest_to_point() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(bb.side_nearest_to_point(Point::new(0.0, 25.0)), Location::Left);
        assert_eq!(bb.side_nearest_to_point(Point::new(100.0, 25.0)), Location::Right);
        assert_eq!(bb.side_nearest_to_point(Point::new(50.0, 0.0)), Location::Top);
        assert_eq!(bb.side_nearest_to_point(Point::new(50.0, 50.0)), Location::Bottom);
        // Corner: left wins the tie
        assert_eq!(bb.side_nearest_to_point(Point::new(0.0, 0.0)), Location::Left);
    }

    #[test]
    fn test_location_deserialize_unknown() {
        let loc: Location = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(loc, Location::Other);
        let loc: Location = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(loc, Location::Left);
    }

    #[test]
    fn test_ensure_group_is_idempotent() {
        let mut node = VisualNode::new("top.u1", NodeKind::Component, Size::new(10.0, 10.0));
        node.ensure_group("pwr", Location::Left);
        node.ensure_group("pwr", Location::Right);
        assert_eq!(node.port_groups.len(), 1);
        assert_eq!(node.port_groups[0].location, Location::Left);
        assert_eq!(node.instance_name, "u1");
    }

    #[test]
    fn test_pins_at_location() {
        let mut node = VisualNode::new("u1", NodeKind::Component, Size::new(10.0, 10.0));
        node.ensure_group("a", Location::Left)
            .pins
            .push(Pin::new("x", "u1.x"));
        node.ensure_group("b", Location::Left)
            .pins
            .push(Pin::new("y", "u1.y"));
        node.ensure_group("top", Location::Top)
            .pins
            .push(Pin::new("z", "u1.z"));

        let left: Vec<&str> = node.pins_at(Location::Left).map(|p| p.name.as_str()).collect();
        assert_eq!(left, vec!["x", "y"]);
        assert!(node.has_pin("u1.z"));
        assert!(!node.has_pin("u1.w"));
    }
}
