//! A* shortest-path search over base travel times.
//!
//! # Algorithm
//!
//! Classic A* with an open set ordered by `f = g + h`, where `g` is the
//! accumulated base travel time and `h` is
//! [`RoadGraph::heuristic_time`]. Finalized nodes are skipped when popped
//! again. A neighbor is relaxed only on strict improvement of its `g`.
//!
//! Equal `f` scores pop the smaller [`NodeId`] first, then the smaller `g`.
//!
//! # Reference
//!
//! Hart, P.E., Nilsson, N.J. & Raphael, B. (1968). "A Formal Basis for the
//! Heuristic Determination of Minimum Cost Paths", *IEEE Transactions on
//! Systems Science and Cybernetics* 4(2), 100-107.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{NodeId, RoadGraph};

/// Result of a shortest-path query.
///
/// Unreachable goals are represented as `nodes == None` with an infinite
/// cost rather than as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    nodes: Option<Vec<NodeId>>,
    cost: f64,
}

impl ShortestPath {
    fn found(nodes: Vec<NodeId>, cost: f64) -> Self {
        Self {
            nodes: Some(nodes),
            cost,
        }
    }

    fn unreachable() -> Self {
        Self {
            nodes: None,
            cost: f64::INFINITY,
        }
    }

    /// Node sequence from start to goal, or `None` if unreachable.
    pub fn nodes(&self) -> Option<&[NodeId]> {
        self.nodes.as_deref()
    }

    /// Consumes the result, returning the node sequence.
    pub fn into_nodes(self) -> Option<Vec<NodeId>> {
        self.nodes
    }

    /// Total base travel time; `f64::INFINITY` if unreachable.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns `true` if a path was found.
    pub fn is_reachable(&self) -> bool {
        self.nodes.is_some()
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn legs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .as_deref()
            .unwrap_or(&[])
            .windows(2)
            .map(|w| (w[0], w[1]))
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    g: f64,
    node: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    // Reversed: BinaryHeap is a max-heap, we want the smallest entry on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.g.total_cmp(&self.g))
    }
}

/// Finds the fastest path from `start` to `goal`.
///
/// Returns the trivial single-node path with cost 0 when `start == goal`,
/// and an unreachable result when either endpoint is not in the graph.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::path::shortest_path;
///
/// let mut g = RoadGraph::new();
/// let a = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 1.0, 0.0).unwrap();
/// let c = g.add_node("C", 2.0, 0.0).unwrap();
/// g.add_road(a, b, 100.0, 10.0).unwrap();
/// g.add_road(b, c, 100.0, 10.0).unwrap();
///
/// let path = shortest_path(&g, a, c);
/// assert_eq!(path.nodes(), Some(&[a, b, c][..]));
/// assert!((path.cost() - 20.0).abs() < 1e-10);
/// ```
pub fn shortest_path(graph: &RoadGraph, start: NodeId, goal: NodeId) -> ShortestPath {
    if start == goal {
        return ShortestPath::found(vec![start], 0.0);
    }
    if graph.node(start).is_none() || graph.node(goal).is_none() {
        return ShortestPath::unreachable();
    }

    let n = graph.num_nodes();
    let mut g_score: Vec<Option<f64>> = vec![None; n];
    let mut came_from: Vec<Option<NodeId>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut open = BinaryHeap::new();

    g_score[start.index()] = Some(0.0);
    open.push(OpenEntry {
        f: graph.heuristic_time(start, goal),
        g: 0.0,
        node: start,
    });

    while let Some(OpenEntry { node: current, .. }) = open.pop() {
        if closed[current.index()] {
            continue;
        }
        let current_g = g_score[current.index()].unwrap_or(f64::INFINITY);
        if current == goal {
            return ShortestPath::found(reconstruct(&came_from, start, goal), current_g);
        }
        closed[current.index()] = true;

        for edge in graph.neighbors(current) {
            let neighbor = edge.dst();
            let tentative = current_g + edge.base_travel_time();
            if g_score[neighbor.index()].is_some_and(|known| tentative >= known) {
                continue;
            }
            came_from[neighbor.index()] = Some(current);
            g_score[neighbor.index()] = Some(tentative);
            open.push(OpenEntry {
                f: tentative + graph.heuristic_time(neighbor, goal),
                g: tentative,
                node: neighbor,
            });
        }
    }

    ShortestPath::unreachable()
}

/// Fastest travel time between two nodes; 0 for identical nodes and
/// `f64::INFINITY` when unreachable.
pub fn travel_time(graph: &RoadGraph, from: NodeId, to: NodeId) -> f64 {
    shortest_path(graph, from, to).cost()
}

fn reconstruct(came_from: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut rev = vec![goal];
    let mut cur = goal;
    while cur != start {
        match came_from[cur.index()] {
            Some(prev) => {
                rev.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    rev.reverse();
    rev
}
