//! Plan and planner result types.

use serde::{Deserialize, Serialize};

use super::{Vehicle, VehicleRoute};
use crate::graph::NodeId;

/// A complete delivery plan: one route per vehicle, all sharing a depot.
///
/// Routes are stored in fleet order. Consumers never mutate a plan in
/// place; optimizers produce new plans.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{Plan, Vehicle};
///
/// let mut g = RoadGraph::new();
/// let depot = g.add_node("depot", 0.0, 0.0).unwrap();
/// let fleet = vec![Vehicle::new(0, 4, depot), Vehicle::new(1, 4, depot)];
///
/// let plan = Plan::empty(depot, &fleet);
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.num_served(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    depot: NodeId,
    routes: Vec<VehicleRoute>,
}

impl Plan {
    /// Creates a plan from routes.
    pub fn new(depot: NodeId, routes: Vec<VehicleRoute>) -> Self {
        Self { depot, routes }
    }

    /// Creates a plan with an empty route for every vehicle.
    pub fn empty(depot: NodeId, vehicles: &[Vehicle]) -> Self {
        let routes = vehicles.iter().map(|v| VehicleRoute::new(v.id())).collect();
        Self { depot, routes }
    }

    /// Depot node.
    pub fn depot(&self) -> NodeId {
        self.depot
    }

    /// Routes in fleet order.
    pub fn routes(&self) -> &[VehicleRoute] {
        &self.routes
    }

    /// Route of the given vehicle, if present.
    pub fn route(&self, vehicle_id: usize) -> Option<&VehicleRoute> {
        self.routes.iter().find(|r| r.vehicle_id() == vehicle_id)
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of placed requests.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(VehicleRoute::len).sum()
    }

    /// IDs of all placed requests, route by route.
    pub fn all_request_ids(&self) -> Vec<usize> {
        self.routes.iter().flat_map(VehicleRoute::request_ids).collect()
    }
}

/// A plan together with its deterministic total travel time
/// (sum over vehicles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCost {
    /// The plan.
    pub plan: Plan,
    /// Sum of per-vehicle route costs; may be infinite.
    pub total_time: f64,
}
