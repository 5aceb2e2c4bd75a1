//! Port group placement
//!
//! Pins on a side are laid out one grid unit apart, centered on a
//! grid-snapped offset. Groups sharing a side form one continuous run in
//! group order, each group owning its own stretch of it.

use super::config::LayoutConfig;
use super::geometry::{border_segment, label_anchor, label_pose, point_on_side};
use super::types::{GroupPlacement, Location, PlacementSpans, VisualNode};

/// Distance from the run center back to the start of the run.
///
/// Odd counts put the middle pin on the center; even counts put the pin
/// just past the middle on it. Either way every pin lands on the grid.
pub fn run_start(count: usize, grid_size: f64) -> f64 {
    let half = count as f64 / 2.0;
    if count % 2 == 1 {
        half * grid_size
    } else {
        (half + 0.5) * grid_size
    }
}

/// Grid-snapped center of the run of pins along a side
pub fn center_offset(location: Location, spans: &PlacementSpans, config: &LayoutConfig) -> f64 {
    match location {
        Location::Top | Location::Bottom => {
            config.snap(spans.port_offset + spans.max_length / 2.0)
        }
        Location::Left | Location::Right => config.snap(spans.max_height / 2.0),
        Location::Other => 0.0,
    }
}

/// Recompute the placement of every port group and pin on a node
pub fn place_ports(node: &mut VisualNode, config: &LayoutConfig) {
    let spans = if node.content_sized {
        node.spans
    } else {
        PlacementSpans::from_size(node.size)
    };
    let size = node.size;
    let grid = config.grid_size;

    for location in Location::SIDES.into_iter().chain([Location::Other]) {
        let total: usize = node
            .port_groups
            .iter()
            .filter(|g| g.location == location)
            .map(|g| g.pins.len())
            .sum();
        let center = center_offset(location, &spans, config);
        let start = run_start(total, grid);
        let anchor = label_anchor(location);
        let pose = label_pose(location, config.port_label_to_border_gap);

        let mut placed = 0usize;
        for group in node
            .port_groups
            .iter_mut()
            .filter(|g| g.location == location)
        {
            let group_start = start - placed as f64 * grid;
            let span = group.pins.len() as f64 * grid;
            group.placement = Some(GroupPlacement {
                center_offset: center,
                segment: border_segment(location, center, group_start, span, size),
                label: pose,
            });

            for (index, pin) in group.pins.iter_mut().enumerate() {
                let along = center - group_start + (index as f64 + 0.5) * grid;
                pin.position = point_on_side(location, along, size);
                pin.anchor = anchor;
            }
            placed += group.pins.len();
        }
    }
}
