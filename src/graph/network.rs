//! Directed, weighted road network.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::GraphError;

/// Dense node identifier assigned by [`RoadGraph::add_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this node in the graph's node table.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An intersection with planar coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    label: String,
    x: f64,
    y: f64,
}

impl Node {
    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Human-readable label given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A directed road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    src: NodeId,
    dst: NodeId,
    length: f64,
    speed_limit: f64,
}

impl Edge {
    /// Tail of the edge.
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// Head of the edge.
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    /// Physical length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Speed limit on this segment.
    pub fn speed_limit(&self) -> f64 {
        self.speed_limit
    }

    /// Free-flow traversal time, `length / speed_limit`.
    pub fn base_travel_time(&self) -> f64 {
        self.length / self.speed_limit
    }
}

/// Relative slack when comparing an edge length with the straight-line
/// distance, absorbing rounding in caller-computed coordinates.
const LENGTH_TOLERANCE: f64 = 1e-9;

/// Road network: nodes plus per-node outgoing edge lists.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
///
/// let mut g = RoadGraph::new();
/// let a = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 100.0, 0.0).unwrap();
/// g.add_road(a, b, 100.0, 10.0).unwrap();
///
/// assert_eq!(g.neighbors(a).len(), 1);
/// assert_eq!(g.max_speed_limit(), 10.0);
/// assert!((g.heuristic_time(a, b) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct RoadGraph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<Edge>>,
    labels: HashMap<String, NodeId>,
    max_speed: f64,
}

impl RoadGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            labels: HashMap::new(),
            max_speed: 1.0,
        }
    }

    /// Adds a node and returns its identifier.
    ///
    /// Rejects duplicate labels and non-finite coordinates.
    pub fn add_node(&mut self, label: impl Into<String>, x: f64, y: f64) -> Result<NodeId, GraphError> {
        let label = label.into();
        if self.labels.contains_key(&label) {
            return Err(GraphError::DuplicateNode(label));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(GraphError::InvalidCoordinates { label, x, y });
        }
        let id = NodeId(self.nodes.len());
        self.labels.insert(label.clone(), id);
        self.nodes.push(Node { id, label, x, y });
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Adds a one-way edge from `src` to `dst`.
    ///
    /// Length and speed limit must be finite and positive, and the length may
    /// not undercut the straight line between the endpoints. Together with
    /// every speed being at most [`max_speed_limit`](Self::max_speed_limit),
    /// this keeps [`heuristic_time`](Self::heuristic_time) consistent.
    pub fn add_edge(
        &mut self,
        src: NodeId,
        dst: NodeId,
        length: f64,
        speed_limit: f64,
    ) -> Result<(), GraphError> {
        for id in [src, dst] {
            if self.node(id).is_none() {
                return Err(GraphError::UnknownNode(id));
            }
        }
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(length) || !valid(speed_limit) {
            return Err(GraphError::InvalidEdge {
                src,
                dst,
                length,
                speed_limit,
            });
        }
        let straight_line = self.nodes[src.0].distance_to(&self.nodes[dst.0]);
        if length < straight_line - LENGTH_TOLERANCE * straight_line.max(1.0) {
            return Err(GraphError::ShorterThanStraightLine {
                src,
                dst,
                length,
                straight_line,
            });
        }

        self.max_speed = self.max_speed.max(speed_limit);
        self.adjacency[src.0].push(Edge {
            src,
            dst,
            length,
            speed_limit,
        });
        Ok(())
    }

    /// Adds a two-way road: one edge in each direction with identical attributes.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length: f64, speed_limit: f64) -> Result<(), GraphError> {
        self.add_edge(a, b, length, speed_limit)?;
        self.add_edge(b, a, length, speed_limit)
    }

    /// Looks up a node by identifier.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Resolves a label to its identifier.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing edges of `id`; empty for unknown nodes.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cheapest direct edge from `src` to `dst`, if any.
    pub fn edge_between(&self, src: NodeId, dst: NodeId) -> Option<&Edge> {
        self.neighbors(src)
            .iter()
            .filter(|e| e.dst == dst)
            .min_by(|a, b| a.base_travel_time().total_cmp(&b.base_travel_time()))
    }

    /// Maximum speed limit over all edges, never below 1.0.
    pub fn max_speed_limit(&self) -> f64 {
        self.max_speed
    }

    /// A* heuristic: straight-line distance at the network's top speed.
    ///
    /// Consistent because [`add_edge`](Self::add_edge) rejects edges shorter
    /// than the straight line between their endpoints. Unknown nodes yield 0.
    pub fn heuristic_time(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.node(a), self.node(b)) {
            (Some(na), Some(nb)) => na.distance_to(nb) / self.max_speed,
            _ => 0.0,
        }
    }
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (RoadGraph, NodeId, NodeId, NodeId) {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh label");
        let b = g.add_node("B", 3.0, 0.0).expect("fresh label");
        let c = g.add_node("C", 3.0, 4.0).expect("fresh label");
        g.add_road(a, b, 3.0, 1.0).expect("valid road");
        g.add_edge(b, c, 4.0, 2.0).expect("valid edge");
        (g, a, b, c)
    }

    #[test]
    fn test_add_node_assigns_dense_ids() {
        let (g, a, b, c) = triangle();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(c.index(), 2);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.node_id("C"), Some(c));
        assert_eq!(g.node(b).map(Node::label), Some("B"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut g = RoadGraph::new();
        g.add_node("A", 0.0, 0.0).expect("fresh label");
        assert_eq!(
            g.add_node("A", 1.0, 1.0),
            Err(GraphError::DuplicateNode("A".to_string()))
        );
    }

    #[test]
    fn test_edge_to_unknown_node_rejected() {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh label");
        let ghost = NodeId(7);
        assert_eq!(g.add_edge(a, ghost, 1.0, 1.0), Err(GraphError::UnknownNode(ghost)));
        assert!(g.neighbors(a).is_empty());
    }

    #[test]
    fn test_invalid_edge_attributes_rejected() {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh label");
        let b = g.add_node("B", 1.0, 0.0).expect("fresh label");
        assert!(g.add_edge(a, b, 1.0, 0.0).is_err());
        assert!(g.add_edge(a, b, -1.0, 5.0).is_err());
        assert!(g.add_edge(a, b, f64::NAN, 5.0).is_err());
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let mut g = RoadGraph::new();
        assert!(matches!(
            g.add_node("A", f64::NAN, 0.0),
            Err(GraphError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            g.add_node("B", 0.0, f64::INFINITY),
            Err(GraphError::InvalidCoordinates { .. })
        ));
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.node_id("A"), None);
    }

    #[test]
    fn test_edge_shorter_than_straight_line_rejected() {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh label");
        let m = g.add_node("M", 1000.0, 0.0).expect("fresh label");
        let goal = g.add_node("G", 0.0, 1.0).expect("fresh label");

        assert_eq!(
            g.add_edge(a, m, 1.0, 1.0),
            Err(GraphError::ShorterThanStraightLine {
                src: a,
                dst: m,
                length: 1.0,
                straight_line: 1000.0,
            })
        );
        assert!(matches!(
            g.add_edge(m, goal, 1.0, 1.0),
            Err(GraphError::ShorterThanStraightLine { .. })
        ));
        assert!(g.neighbors(a).is_empty());
        assert!(g.neighbors(m).is_empty());

        // Exactly the straight line, and longer, are fine.
        g.add_edge(a, goal, 1.0, 1.0).expect("straight road");
        g.add_edge(a, m, 1500.0, 1.0).expect("winding road");
    }

    #[test]
    fn test_heuristic_never_exceeds_edge_time() {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh label");
        let b = g.add_node("B", 30.0, 40.0).expect("fresh label");
        let c = g.add_node("C", 60.0, 0.0).expect("fresh label");
        g.add_road(a, b, 50.0, 2.0).expect("valid road");
        g.add_road(b, c, 70.0, 5.0).expect("valid road");
        for node in g.nodes() {
            for edge in g.neighbors(node.id()) {
                let drop = g.heuristic_time(edge.src(), c) - g.heuristic_time(edge.dst(), c);
                assert!(drop <= edge.base_travel_time() + 1e-10);
            }
        }
    }

    #[test]
    fn test_one_way_and_two_way_edges() {
        let (g, a, b, c) = triangle();
        assert_eq!(g.neighbors(a).len(), 1);
        assert_eq!(g.neighbors(b).len(), 2);
        assert!(g.neighbors(c).is_empty());
        assert!(g.edge_between(c, b).is_none());
        let bc = g.edge_between(b, c).expect("edge exists");
        assert!((bc.base_travel_time() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_max_speed_limit_floor() {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh label");
        let b = g.add_node("B", 1.0, 0.0).expect("fresh label");
        assert_eq!(g.max_speed_limit(), 1.0);
        g.add_edge(a, b, 1.0, 0.5).expect("valid edge");
        assert_eq!(g.max_speed_limit(), 1.0);
        g.add_edge(b, a, 1.0, 13.9).expect("valid edge");
        assert_eq!(g.max_speed_limit(), 13.9);
    }

    #[test]
    fn test_heuristic_uses_max_speed() {
        let (g, a, _, c) = triangle();
        // dist(A, C) = 5, top speed 2
        assert!((g.heuristic_time(a, c) - 2.5).abs() < 1e-10);
        assert_eq!(g.heuristic_time(a, NodeId(99)), 0.0);
    }

    #[test]
    fn test_neighbors_of_unknown_node() {
        let (g, ..) = triangle();
        assert!(g.neighbors(NodeId(42)).is_empty());
    }
}
