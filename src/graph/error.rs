use thiserror::Error;

use super::NodeId;

/// Errors raised while building a [`RoadGraph`](super::RoadGraph).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node with the same label is already present.
    #[error("node `{0}` already exists")]
    DuplicateNode(String),

    /// Node coordinates must be finite.
    #[error("node `{label}` has non-finite coordinates ({x}, {y})")]
    InvalidCoordinates {
        /// Label of the rejected node.
        label: String,
        /// Offending x coordinate.
        x: f64,
        /// Offending y coordinate.
        y: f64,
    },

    /// An edge endpoint does not reference an existing node.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// Edge length and speed limit must be finite and strictly positive.
    #[error("edge {src} -> {dst} has invalid length {length} or speed limit {speed_limit}")]
    InvalidEdge {
        /// Source node.
        src: NodeId,
        /// Destination node.
        dst: NodeId,
        /// Offending length.
        length: f64,
        /// Offending speed limit.
        speed_limit: f64,
    },

    /// An edge is shorter than the straight line between its endpoints,
    /// which would let the A* heuristic overestimate.
    #[error("edge {src} -> {dst} has length {length}, below the straight-line distance {straight_line}")]
    ShorterThanStraightLine {
        /// Source node.
        src: NodeId,
        /// Destination node.
        dst: NodeId,
        /// Declared length.
        length: f64,
        /// Euclidean distance between the endpoints.
        straight_line: f64,
    },
}
