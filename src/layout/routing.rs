//! Connector routing
//!
//! Through-links are described by a [`Router`] the renderer follows; stubs
//! get their free end from [`orthogonal_outward_anchor`]. Both can also be
//! turned into preview paths once nodes have positions.

use serde::Serialize;

use super::geometry::snap_to_grid;
use super::types::{BoundingBox, Location, Point};

/// Default distance a stub reaches out of its node
pub const DEFAULT_STUB_LENGTH: f64 = 30.0;

/// Routing mode for connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// Straight line between the two ports
    Direct,
    /// Horizontal and vertical segments only
    #[default]
    Manhattan,
}

/// How the renderer should route a through-link
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Router {
    pub mode: RoutingMode,
    /// Leave and enter ports perpendicular to the node border
    pub perpendicular: bool,
    /// Routing grid step
    pub step: f64,
}

impl Router {
    /// Manhattan routing on the layout grid
    pub fn manhattan(step: f64) -> Self {
        Self {
            mode: RoutingMode::Manhattan,
            perpendicular: true,
            step,
        }
    }
}

/// Displacement applied to an anchor point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// Unit vector pointing out of a node through one side
fn outward(side: Location) -> (f64, f64) {
    match side {
        Location::Left => (-1.0, 0.0),
        Location::Right => (1.0, 0.0),
        Location::Top => (0.0, -1.0),
        Location::Bottom => (0.0, 1.0),
        Location::Other => (0.0, 0.0),
    }
}

/// Offset that pushes a stub's free end out of the node.
///
/// The side nearest to the port decides the direction; `length` defaults to
/// [`DEFAULT_STUB_LENGTH`].
pub fn orthogonal_outward_anchor(
    node_bbox: &BoundingBox,
    port_point: Point,
    length: Option<f64>,
) -> Offset {
    let length = length.unwrap_or(DEFAULT_STUB_LENGTH);
    let (x, y) = outward(node_bbox.side_nearest_to_point(port_point));
    Offset {
        dx: x * length,
        dy: y * length,
    }
}

/// Two-point path of a stub, from the port to its free end
pub fn stub_path(node_bbox: &BoundingBox, port_point: Point, length: Option<f64>) -> Vec<Point> {
    let offset = orthogonal_outward_anchor(node_bbox, port_point, length);
    vec![
        port_point,
        Point::new(port_point.x + offset.dx, port_point.y + offset.dy),
    ]
}

/// Preview path of a through-link between two placed ports.
///
/// With Manhattan routing the path leaves each port by one step along its
/// side's normal, then joins the two exit points with an S-shaped run
/// whose middle segment is snapped to the step grid.
pub fn route_link(
    start: Point,
    start_side: Location,
    end: Point,
    end_side: Location,
    router: &Router,
) -> Vec<Point> {
    if router.mode == RoutingMode::Direct {
        return vec![start, end];
    }

    let exit_len = if router.perpendicular { router.step } else { 0.0 };
    let (sx, sy) = outward(start_side);
    let (ex, ey) = outward(end_side);
    let exit = Point::new(start.x + sx * exit_len, start.y + sy * exit_len);
    let entry = Point::new(end.x + ex * exit_len, end.y + ey * exit_len);

    let mut path = vec![start, exit];
    if exit.x != entry.x && exit.y != entry.y {
        if start_side.is_horizontal() {
            let mid_y = snap_to_grid((exit.y + entry.y) / 2.0, router.step);
            path.push(Point::new(exit.x, mid_y));
            path.push(Point::new(entry.x, mid_y));
        } else {
            let mid_x = snap_to_grid((exit.x + entry.x) / 2.0, router.step);
            path.push(Point::new(mid_x, exit.y));
            path.push(Point::new(mid_x, entry.y));
        }
    }
    path.push(entry);
    path.push(end);

    path.dedup();
    path
}
