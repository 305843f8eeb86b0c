//! Road network consumed by path search and simulation.
//!
//! The graph is built once by the caller and is read-only afterwards. Node
//! identifiers are dense indices assigned in insertion order.

mod error;
mod network;

pub use error::GraphError;
pub use network::{Edge, Node, NodeId, RoadGraph};
