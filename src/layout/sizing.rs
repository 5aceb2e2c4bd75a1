//! Content-driven node sizing
//!
//! A node is treated as five rectangles: one per side holding that side's
//! pins and a center one holding the title. Left and right take the full
//! height; the width is the widest of top, bottom and title plus both side
//! columns.

use log::trace;

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::ports::place_ports;
use super::text::TextMeasure;
use super::types::{Location, PlacementSpans, Size, VisualNode};

/// Pins on one side, as far as sizing is concerned
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SideContent {
    /// Longest label by character count (first wins on ties)
    pub longest_label: String,
    pub count: usize,
}

impl SideContent {
    /// Summarize the pins of a node at one location
    pub fn of(node: &VisualNode, location: Location) -> Self {
        let mut content = SideContent::default();
        for pin in node.pins_at(location) {
            content.count += 1;
            if pin.label.chars().count() > content.longest_label.chars().count() {
                content.longest_label = pin.label.clone();
            }
        }
        content
    }
}

/// Pin content of all four sides
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeContent {
    pub title: String,
    pub title_font_size: f64,
    pub top: SideContent,
    pub bottom: SideContent,
    pub left: SideContent,
    pub right: SideContent,
}

impl NodeContent {
    pub fn of(node: &VisualNode, config: &LayoutConfig) -> Self {
        Self {
            title: node.title.clone(),
            title_font_size: config.title_font_size(node.kind),
            top: SideContent::of(node, Location::Top),
            bottom: SideContent::of(node, Location::Bottom),
            left: SideContent::of(node, Location::Left),
            right: SideContent::of(node, Location::Right),
        }
    }
}

/// Result of sizing: the node size and the spans ports are centered in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentSize {
    pub size: Size,
    pub spans: PlacementSpans,
}

#[derive(Debug, Clone, Copy, Default)]
struct Dim {
    width: f64,
    height: f64,
}

/// Compute the minimum grid-aligned size that fits the content
pub fn measure_content(
    content: &NodeContent,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<ContentSize, LayoutError> {
    let title_extent = metrics.measure(&content.title, content.title_font_size)?;
    let title = Dim {
        width: title_extent.length + config.title_margin,
        height: title_extent.height + config.title_margin,
    };

    let top = horizontal_side(&content.top, config, metrics)?;
    let bottom = horizontal_side(&content.bottom, config, metrics)?;
    let left = vertical_side(&content.left, config, metrics)?;
    let right = vertical_side(&content.right, config, metrics)?;

    let port_offset = left.width.max(right.width);
    let max_length = top.width.max(bottom.width).max(title.width);
    let max_height = left
        .height
        .max(right.height)
        .max(2.0 * top.height.max(bottom.height) + title.height);

    let size = Size::new(
        config.snap(max_length + 2.0 * port_offset),
        config.snap(max_height),
    );

    Ok(ContentSize {
        size,
        spans: PlacementSpans {
            port_offset,
            max_length,
            max_height,
        },
    })
}

/// Top and bottom pins: labels run vertically into the node
fn horizontal_side(
    side: &SideContent,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<Dim, LayoutError> {
    if side.count == 0 {
        return Ok(Dim::default());
    }
    let label = metrics.measure(&side.longest_label, config.font_size)?;
    Ok(Dim {
        width: (side.count - 1) as f64 * config.port_pitch,
        height: label.length + config.port_label_to_border_gap,
    })
}

/// Left and right pins: labels run horizontally into the node
fn vertical_side(
    side: &SideContent,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<Dim, LayoutError> {
    if side.count == 0 {
        return Ok(Dim::default());
    }
    let label = metrics.measure(&side.longest_label, config.font_size)?;
    Ok(Dim {
        width: label.length + config.port_label_to_border_gap,
        height: side.count as f64 * config.port_pitch,
    })
}

/// Resize a node to fit its content and re-place every port group
pub fn resize_to_content(
    node: &mut VisualNode,
    config: &LayoutConfig,
    metrics: &dyn TextMeasure,
) -> Result<(), LayoutError> {
    let content = NodeContent::of(node, config);
    let measured = measure_content(&content, config, metrics)?;

    trace!(
        node = node.id.as_str(),
        width = measured.size.width,
        height = measured.size.height;
        "Resized node to content"
    );

    node.size = measured.size;
    node.spans = measured.spans;
    node.content_sized = true;
    place_ports(node, config);
    Ok(())
}
