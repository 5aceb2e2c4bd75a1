//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur while building nodes or resolving links
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A pin is assigned to a port group the element never declares
    #[error("pin '{pin}' of element '{element}' is assigned to undeclared port group '{port}'")]
    PortGroupNotFound {
        element: String,
        pin: String,
        port: String,
    },

    /// A link endpoint names a node that is not materialized in scope
    #[error("{}unknown node '{node}' referenced from '{scope}'", link_context(.link))]
    UnresolvedAddress {
        scope: String,
        link: Option<String>,
        node: String,
    },

    /// A link endpoint is empty or has an empty segment
    #[error("{}invalid port name '{name}' in '{scope}'", link_context(.link))]
    InvalidPortName {
        scope: String,
        link: Option<String>,
        name: String,
    },

    /// Text metrics could not be computed
    #[error("failed to measure text '{text}': {reason}")]
    Measurement { text: String, reason: String },

    /// Two nodes were registered under the same path
    #[error("duplicate node '{id}'")]
    DuplicateNode { id: String },

    /// A node id was not found in the registry
    #[error("node '{id}' not found")]
    NodeNotFound { id: String },

    /// Only blocks can be collapsed
    #[error("node '{id}' is not a block")]
    NotABlock { id: String },
}

impl LayoutError {
    /// Create a configuration mismatch error
    pub fn port_group_not_found(
        element: impl Into<String>,
        pin: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self::PortGroupNotFound {
            element: element.into(),
            pin: pin.into(),
            port: port.into(),
        }
    }

    /// Create an unresolvable address error
    pub fn unresolved(scope: impl Into<String>, node: impl Into<String>) -> Self {
        Self::UnresolvedAddress {
            scope: scope.into(),
            link: None,
            node: node.into(),
        }
    }

    /// Create an invalid port name error
    pub fn invalid_port_name(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidPortName {
            scope: scope.into(),
            link: None,
            name: name.into(),
        }
    }

    /// Create a measurement error
    pub fn measurement(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Measurement {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Name the link a resolution error was raised for
    pub fn in_link(self, link: &str) -> Self {
        match self {
            Self::UnresolvedAddress { scope, node, .. } => Self::UnresolvedAddress {
                scope,
                link: Some(link.to_string()),
                node,
            },
            Self::InvalidPortName { scope, name, .. } => Self::InvalidPortName {
                scope,
                link: Some(link.to_string()),
                name,
            },
            other => other,
        }
    }

    /// The element or node path the error points at, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::PortGroupNotFound { element, .. } => Some(element.as_str()),
            Self::UnresolvedAddress { scope, .. } => Some(scope.as_str()),
            Self::InvalidPortName { scope, .. } => Some(scope.as_str()),
            Self::DuplicateNode { id } => Some(id.as_str()),
            Self::NodeNotFound { id } => Some(id.as_str()),
            Self::NotABlock { id } => Some(id.as_str()),
            Self::Measurement { .. } => None,
        }
    }
}

fn link_context(link: &Option<String>) -> String {
    match link {
        Some(link) => format!("link '{}': ", link),
        None => String::new(),
    }
}
