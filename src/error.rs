//! Error types for leafmark.

use crate::tree::NodeId;
use std::fmt;

/// Result type alias for leafmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for leafmark operations.
///
/// "Nothing found" outcomes (no word at a point, a term with no matches) are
/// not errors; they surface as `None` or empty collections instead.
#[derive(Debug)]
pub enum Error {
    /// Coordinates outside the text they address, or not on a char boundary.
    ///
    /// Usually means the caller kept coordinates from a flattening pass that
    /// predates a tree mutation.
    InvalidCoordinates {
        node: Option<NodeId>,
        offset: usize,
        len: usize,
    },
    /// A flattened-index entry that does not exist.
    InvalidIndex { index: usize, len: usize },
    /// Node id not allocated by this tree.
    UnknownNode(NodeId),
    /// Operation needs a text leaf.
    NotText(NodeId),
    /// Operation needs an element (container) node.
    NotElement(NodeId),
    /// Operation needs a marker container.
    NotMarker(NodeId),
    /// Attaching `child` under `parent` would create a cycle.
    InvalidHierarchy { parent: NodeId, child: NodeId },
    /// Node has no parent to adopt replacement nodes.
    Detached(NodeId),
    /// Highlight pattern failed to compile.
    InvalidPattern(regex::Error),
    /// No document has been loaded yet.
    NoDocument,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinates { node, offset, len } => match node {
                Some(node) => write!(
                    f,
                    "offset {offset} is not a valid position in {node} (length {len})"
                ),
                None => write!(f, "offset {offset} is not a valid position (length {len})"),
            },
            Self::InvalidIndex { index, len } => {
                write!(f, "leaf index {index} out of bounds for {len} flattened leaves")
            }
            Self::UnknownNode(node) => write!(f, "unknown node {node}"),
            Self::NotText(node) => write!(f, "{node} is not a text leaf"),
            Self::NotElement(node) => write!(f, "{node} is not an element"),
            Self::NotMarker(node) => write!(f, "{node} is not a marker"),
            Self::InvalidHierarchy { parent, child } => {
                write!(f, "cannot attach {child} under its own descendant {parent}")
            }
            Self::Detached(node) => write!(f, "{node} is detached from the tree"),
            Self::InvalidPattern(e) => write!(f, "invalid highlight pattern: {e}"),
            Self::NoDocument => write!(f, "no document loaded"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}
