//! Dense travel-time matrix over the depot and request locations.

use crate::graph::{NodeId, RoadGraph};
use crate::models::DeliveryRequest;
use crate::path::travel_time;

/// Matrix index of the depot.
pub const DEPOT: usize = 0;

/// A dense n×n travel-time matrix stored in row-major order.
///
/// Location 0 is the depot; location `i + 1` is the node of the `i`-th
/// request. Built once per planning session with one A* query per
/// unordered pair and mirrored, so it is only exact when the road network
/// is (nearly) symmetric. One-way streets make it an approximation.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::DeliveryRequest;
/// use city_dispatch::distance::DistanceMatrix;
///
/// let mut g = RoadGraph::new();
/// let depot = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 100.0, 0.0).unwrap();
/// g.add_road(depot, b, 100.0, 10.0).unwrap();
///
/// let requests = vec![DeliveryRequest::new(1, b)];
/// let dm = DistanceMatrix::from_graph(&g, depot, &requests);
/// assert_eq!(dm.size(), 2);
/// assert!((dm.get(0, 1) - 10.0).abs() < 1e-10);
/// assert!((dm.get(1, 0) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes travel times between the depot and every request node.
    ///
    /// Unreachable pairs are stored as `f64::INFINITY`.
    pub fn from_graph(graph: &RoadGraph, depot: NodeId, requests: &[DeliveryRequest]) -> Self {
        let nodes: Vec<NodeId> = std::iter::once(depot)
            .chain(requests.iter().map(DeliveryRequest::node))
            .collect();
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let t = travel_time(graph, nodes[i], nodes[j]);
                dm.set(i, j, t);
                dm.set(j, i, t);
            }
        }
        log::debug!("distance matrix built over {n} locations");
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the travel time from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the travel time from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, time: f64) {
        self.data[from * self.size + to] = time;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Matrix location of the request at position `request_index`.
    pub fn request_location(request_index: usize) -> usize {
        request_index + 1
    }

    /// Returns the nearest of `candidates` as seen from `from`.
    ///
    /// Ties keep the earliest candidate. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}
