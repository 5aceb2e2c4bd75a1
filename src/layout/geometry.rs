//! Per-side lookup tables for port groups
//!
//! Every function here is pure. [`Location::Other`] yields a neutral value
//! instead of an error so that unexpected configuration still lays out.

use super::types::{LabelPose, Location, Point, Segment, Size, TextAnchor};

/// Round a value to the nearest multiple of the grid size
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Text alignment of pin labels on a side
pub fn label_anchor(location: Location) -> TextAnchor {
    match location {
        Location::Top => TextAnchor::End,
        Location::Bottom => TextAnchor::Start,
        Location::Left => TextAnchor::Start,
        Location::Right => TextAnchor::End,
        Location::Other => TextAnchor::Middle,
    }
}

/// Rotation of pin labels in degrees.
///
/// Labels on the top and bottom run vertically into the node.
pub fn label_angle(location: Location) -> f64 {
    match location {
        Location::Top | Location::Bottom => -90.0,
        Location::Left | Location::Right | Location::Other => 0.0,
    }
}

/// Offset of a pin label from its port, pointing into the node
pub fn label_offset(location: Location, gap: f64) -> Point {
    match location {
        Location::Top => Point::new(0.0, gap),
        Location::Bottom => Point::new(0.0, -gap),
        Location::Left => Point::new(gap, 0.0),
        Location::Right => Point::new(-gap, 0.0),
        Location::Other => Point::new(0.0, 0.0),
    }
}

/// Label pose shared by every pin of a group
pub fn label_pose(location: Location, gap: f64) -> LabelPose {
    LabelPose {
        offset: label_offset(location, gap),
        angle: label_angle(location),
    }
}

/// The stretch of border a run of pins occupies.
///
/// `center` is the grid-snapped middle of the run along the side, `start`
/// how far the run begins before it and `span` its total length.
pub fn border_segment(
    location: Location,
    center: f64,
    start: f64,
    span: f64,
    size: Size,
) -> Option<Segment> {
    let from = center - start;
    let to = from + span;
    let segment = match location {
        Location::Top => Segment {
            start: Point::new(from, 0.0),
            end: Point::new(to, 0.0),
        },
        Location::Bottom => Segment {
            start: Point::new(from, size.height),
            end: Point::new(to, size.height),
        },
        Location::Left => Segment {
            start: Point::new(0.0, from),
            end: Point::new(0.0, to),
        },
        Location::Right => Segment {
            start: Point::new(size.width, from),
            end: Point::new(size.width, to),
        },
        Location::Other => return None,
    };
    Some(segment)
}

/// Point at `distance` along a side, relative to the node origin
pub fn point_on_side(location: Location, distance: f64, size: Size) -> Option<Point> {
    match location {
        Location::Top => Some(Point::new(distance, 0.0)),
        Location::Bottom => Some(Point::new(distance, size.height)),
        Location::Left => Some(Point::new(0.0, distance)),
        Location::Right => Some(Point::new(size.width, distance)),
        Location::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(23.0, 10.0), 20.0);
        assert_eq!(snap_to_grid(25.0, 10.0), 30.0);
        assert_eq!(snap_to_grid(-4.0, 10.0), 0.0);
        // Degenerate grid leaves values untouched
        assert_eq!(snap_to_grid(23.0, 0.0), 23.0);
    }

    #[test]
    fn test_label_anchor() {
        assert_eq!(label_anchor(Location::Top), TextAnchor::End);
        assert_eq!(label_anchor(Location::Bottom), TextAnchor::Start);
        assert_eq!(label_anchor(Location::Left), TextAnchor::Start);
        assert_eq!(label_anchor(Location::Right), TextAnchor::End);
        assert_eq!(label_anchor(Location::Other), TextAnchor::Middle);
    }

    #[test]
    fn test_label_angle() {
        assert_eq!(label_angle(Location::Top), -90.0);
        assert_eq!(label_angle(Location::Bottom), -90.0);
        assert_eq!(label_angle(Location::Left), 0.0);
        assert_eq!(label_angle(Location::Other), 0.0);
    }

    #[test]
    fn test_label_offset_points_inward() {
        assert_eq!(label_offset(Location::Top, 5.0), Point::new(0.0, 5.0));
        assert_eq!(label_offset(Location::Bottom, 5.0), Point::new(0.0, -5.0));
        assert_eq!(label_offset(Location::Left, 5.0), Point::new(5.0, 0.0));
        assert_eq!(label_offset(Location::Right, 5.0), Point::new(-5.0, 0.0));
        assert_eq!(label_offset(Location::Other, 5.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_border_segment() {
        let size = Size::new(60.0, 40.0);

        let top = border_segment(Location::Top, 30.0, 15.0, 30.0, size).unwrap();
        assert_eq!(top.start, Point::new(15.0, 0.0));
        assert_eq!(top.end, Point::new(45.0, 0.0));

        let bottom = border_segment(Location::Bottom, 30.0, 5.0, 10.0, size).unwrap();
        assert_eq!(bottom.start, Point::new(25.0, 40.0));
        assert_eq!(bottom.end, Point::new(35.0, 40.0));

        let right = border_segment(Location::Right, 20.0, 5.0, 10.0, size).unwrap();
        assert_eq!(right.start, Point::new(60.0, 15.0));
        assert_eq!(right.end, Point::new(60.0, 25.0));

        assert!(border_segment(Location::Other, 20.0, 5.0, 10.0, size).is_none());
    }
}
