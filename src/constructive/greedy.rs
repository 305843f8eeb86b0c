//! Cheapest-append greedy planner.
//!
//! Repeatedly evaluates appending every unplaced request to the end of
//! every eligible vehicle's stop list, and commits the globally cheapest
//! pair. Every candidate is costed from scratch with
//! [`route_cost`](crate::evaluation::route_cost); no incremental deltas.
//!
//! # Tie-breaking
//!
//! Candidates are enumerated with unplaced requests in input order as the
//! outer loop and vehicles in fleet order as the inner loop. Only a strictly
//! cheaper candidate replaces the incumbent, so the first cheapest pair wins.
//!
//! # Complexity
//!
//! O(n² × m) route evaluations for n requests and m vehicles, each
//! evaluation running one A* query per leg.

use crate::error::PlanningError;
use crate::evaluation::{route_cost, validate_fleet, validate_requests};
use crate::graph::{NodeId, RoadGraph};
use crate::models::{DeliveryRequest, Plan, PlanCost, Vehicle, VehicleRoute};

/// Greedy construction of a feasible plan.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{DeliveryRequest, Vehicle};
/// use city_dispatch::constructive::GreedyPlanner;
///
/// let mut g = RoadGraph::new();
/// let a = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 100.0, 0.0).unwrap();
/// let d = g.add_node("D", 0.0, 100.0).unwrap();
/// g.add_road(a, b, 100.0, 10.0).unwrap();
/// g.add_road(a, d, 100.0, 10.0).unwrap();
///
/// let fleet = vec![Vehicle::new(0, 10, a)];
/// let requests = vec![DeliveryRequest::new(1, b), DeliveryRequest::new(2, d)];
///
/// let result = GreedyPlanner::new().build_plan(&g, a, &fleet, &requests).unwrap();
/// assert_eq!(result.plan.all_request_ids(), vec![1, 2]);
/// assert!((result.total_time - 40.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyPlanner {
    return_to_depot: bool,
}

impl GreedyPlanner {
    /// Creates a planner whose routes end at the depot.
    pub fn new() -> Self {
        Self {
            return_to_depot: true,
        }
    }

    /// Sets whether route costs include the final leg back to the depot.
    pub fn with_return_to_depot(mut self, return_to_depot: bool) -> Self {
        self.return_to_depot = return_to_depot;
        self
    }

    /// Builds a plan placing every request on exactly one vehicle.
    ///
    /// # Errors
    ///
    /// - [`PlanningError::NonPositiveCapacity`] / [`PlanningError::NonPositiveDemand`]
    ///   for invalid quantities
    /// - [`PlanningError::UnplaceableDemand`] if some demand exceeds every capacity
    /// - [`PlanningError::InternalAssignmentFailure`] if construction gets stuck
    ///   despite valid inputs
    pub fn build_plan(
        &self,
        graph: &RoadGraph,
        depot: NodeId,
        vehicles: &[Vehicle],
        requests: &[DeliveryRequest],
    ) -> Result<PlanCost, PlanningError> {
        validate_fleet(vehicles)?;
        validate_requests(vehicles, requests)?;

        let mut routes: Vec<Vec<DeliveryRequest>> = vec![Vec::new(); vehicles.len()];
        let mut remaining: Vec<&DeliveryRequest> = requests.iter().collect();

        while !remaining.is_empty() {
            let mut best: Option<(usize, usize, f64)> = None;

            for (pos, request) in remaining.iter().enumerate() {
                for (vi, vehicle) in vehicles.iter().enumerate() {
                    if !vehicle.can_carry(request.demand()) {
                        continue;
                    }
                    let stops = &mut routes[vi];
                    stops.push((*request).clone());
                    let cost = route_cost(graph, vehicle, stops, depot, self.return_to_depot);
                    stops.pop();

                    if best.is_none_or(|(_, _, c)| cost < c) {
                        best = Some((pos, vi, cost));
                    }
                }
            }

            let Some((pos, vi, cost)) = best else {
                log::error!(
                    "greedy construction stuck with {} requests left",
                    remaining.len()
                );
                return Err(PlanningError::InternalAssignmentFailure {
                    remaining: remaining.len(),
                });
            };

            let request = remaining.remove(pos);
            log::debug!(
                "greedy: request {} -> vehicle {} (route cost {cost})",
                request.id(),
                vehicles[vi].id()
            );
            routes[vi].push(request.clone());
        }

        let total_time: f64 = vehicles
            .iter()
            .zip(&routes)
            .map(|(v, stops)| route_cost(graph, v, stops, depot, self.return_to_depot))
            .sum();

        let plan = Plan::new(
            depot,
            vehicles
                .iter()
                .zip(routes)
                .map(|(v, stops)| VehicleRoute::with_stops(v.id(), stops))
                .collect(),
        );
        log::info!(
            "greedy plan: {} requests on {} vehicles, total time {total_time}",
            plan.num_served(),
            plan.num_routes()
        );

        Ok(PlanCost { plan, total_time })
    }
}

impl Default for GreedyPlanner {
    fn default() -> Self {
        Self::new()
    }
}
