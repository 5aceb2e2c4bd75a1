//! Dotted hierarchical names
//!
//! Element paths and port names are strings of dot-separated identifiers,
//! e.g. `top.power.vcc`. The number of segments is the name's depth.

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Join a parent path and a local name.
///
/// An empty parent yields the bare name, so the root scope can be addressed
/// without a leading dot.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", parent, SEPARATOR, name)
    }
}

/// Number of dot-separated segments in a name (0 for an empty string)
pub fn depth(name: &str) -> usize {
    if name.is_empty() {
        0
    } else {
        name.split(SEPARATOR).count()
    }
}

/// Split a name into its first segment and the remaining suffix.
///
/// ```
/// use schematic_layout::path::split_first;
///
/// assert_eq!(split_first("a.b.c"), ("a", Some("b.c")));
/// assert_eq!(split_first("a"), ("a", None));
/// ```
pub fn split_first(name: &str) -> (&str, Option<&str>) {
    match name.split_once(SEPARATOR) {
        Some((first, rest)) => (first, Some(rest)),
        None => (name, None),
    }
}

/// The final segment of a path (the local name)
pub fn last_segment(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// The parent portion of a path, if it has more than one segment
pub fn parent(path: &str) -> Option<&str> {
    path.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Check that every segment of a name is non-empty
pub fn is_well_formed(name: &str) -> bool {
    !name.is_empty() && name.split(SEPARATOR).all(|segment| !segment.trim().is_empty())
}
