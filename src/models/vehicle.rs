//! Delivery vehicle with a per-trip capacity.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// A vehicle that serves delivery requests, possibly over several trips.
///
/// Capacity is the load carried on a single trip from the depot; a vehicle
/// may return to the depot to reload any number of times.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::Vehicle;
///
/// let mut g = RoadGraph::new();
/// let depot = g.add_node("depot", 0.0, 0.0).unwrap();
///
/// let v = Vehicle::new(0, 4, depot);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 4);
/// assert_eq!(v.start_node(), depot);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    start_node: NodeId,
}

impl Vehicle {
    /// Creates a vehicle.
    ///
    /// Capacity is not validated here; planners reject or penalize
    /// non-positive capacities.
    pub fn new(id: usize, capacity: i32, start_node: NodeId) -> Self {
        Self {
            id,
            capacity,
            start_node,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load per trip.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Node where the vehicle begins its first trip.
    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    /// Returns `true` if a single request of this demand fits in one trip.
    pub fn can_carry(&self, demand: i32) -> bool {
        self.capacity >= demand
    }
}
