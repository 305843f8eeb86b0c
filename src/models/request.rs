//! Delivery request type.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// Demand assigned to a request unless overridden.
pub const DEFAULT_DEMAND: i32 = 1;

fn default_demand() -> i32 {
    DEFAULT_DEMAND
}

/// A delivery of `demand` units to a graph node.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::DeliveryRequest;
///
/// let mut g = RoadGraph::new();
/// let shop = g.add_node("shop", 1.0, 2.0).unwrap();
///
/// let r = DeliveryRequest::new(7, shop);
/// assert_eq!(r.demand(), 1);
///
/// let bulky = DeliveryRequest::new(8, shop).with_demand(3);
/// assert_eq!(bulky.demand(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    id: usize,
    node: NodeId,
    #[serde(default = "default_demand")]
    demand: i32,
}

impl DeliveryRequest {
    /// Creates a request with the default demand of one unit.
    pub fn new(id: usize, node: NodeId) -> Self {
        Self {
            id,
            node,
            demand: DEFAULT_DEMAND,
        }
    }

    /// Sets the demand.
    ///
    /// Not validated here; planners reject non-positive demand.
    pub fn with_demand(mut self, demand: i32) -> Self {
        self.demand = demand;
        self
    }

    /// Request ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Destination node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Units to deliver.
    pub fn demand(&self) -> i32 {
        self.demand
    }
}
