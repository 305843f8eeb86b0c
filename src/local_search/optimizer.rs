//! Makespan-minimizing local search over request groupings.
//!
//! # Algorithm
//!
//! 1. Precompute a [`DistanceMatrix`] over the depot and all request nodes.
//! 2. Assign every request to a uniformly random vehicle.
//! 3. For a fixed number of iterations, apply one [`relocate_move`] and
//!    accept the candidate if its makespan is less than or equal to the
//!    current one. Sideways moves let the search drift across plateaus.
//! 4. Track the best state seen, updated only on strict improvement.
//!
//! Each vehicle's group is sequenced with [`nearest_neighbor_order`] and
//! costed with the capacity-aware [`route_time`]. The objective is the
//! slowest vehicle's time, not the fleet total.
//!
//! Fully reproducible for a fixed random source, input order and
//! iteration count.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{relocate_move, Assignment};
use crate::constructive::nearest_neighbor_order;
use crate::distance::DistanceMatrix;
use crate::error::PlanningError;
use crate::evaluation::{route_time, validate_requests};
use crate::graph::{NodeId, RoadGraph};
use crate::models::{DeliveryRequest, Plan, Vehicle, VehicleRoute};

/// Local search configuration.
///
/// # Examples
///
/// ```
/// use city_dispatch::local_search::GroupingConfig;
///
/// let config = GroupingConfig::default().with_iterations(500);
/// assert_eq!(config.iterations, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Number of relocation moves to try.
    pub iterations: usize,
}

impl GroupingConfig {
    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self { iterations: 2000 }
    }
}

/// Outcome of [`GroupingOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingResult {
    /// Plan built from the best grouping, stops in nearest-neighbor order.
    pub plan: Plan,
    /// Matrix-based makespan of `plan`; may be infinite.
    pub makespan_estimate: f64,
    /// Best makespan after initialization (index 0) and after each
    /// iteration. Empty when there was nothing to optimize.
    pub best_history: Vec<f64>,
}

/// Randomized relocation hill-climber.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{DeliveryRequest, Vehicle};
/// use city_dispatch::local_search::{GroupingConfig, GroupingOptimizer};
///
/// let mut g = RoadGraph::new();
/// let a = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 100.0, 0.0).unwrap();
/// let d = g.add_node("D", 0.0, 100.0).unwrap();
/// g.add_road(a, b, 100.0, 10.0).unwrap();
/// g.add_road(a, d, 100.0, 10.0).unwrap();
///
/// let fleet = vec![Vehicle::new(0, 5, a), Vehicle::new(1, 5, a)];
/// let requests = vec![DeliveryRequest::new(1, b), DeliveryRequest::new(2, d)];
///
/// let optimizer = GroupingOptimizer::new(GroupingConfig::default().with_iterations(200));
/// let result = optimizer
///     .optimize(&g, a, &fleet, &requests, &mut StdRng::seed_from_u64(42))
///     .unwrap();
/// // One spoke per vehicle: each drives 20.
/// assert!((result.makespan_estimate - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GroupingOptimizer {
    config: GroupingConfig,
}

impl GroupingOptimizer {
    /// Creates an optimizer with the given configuration.
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Searches for the request grouping with the smallest makespan.
    ///
    /// Vehicles with non-positive capacity are not rejected; they make
    /// every grouping infinitely expensive.
    ///
    /// # Errors
    ///
    /// [`PlanningError::NonPositiveDemand`] and
    /// [`PlanningError::UnplaceableDemand`] from input validation.
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        graph: &RoadGraph,
        depot: NodeId,
        vehicles: &[Vehicle],
        requests: &[DeliveryRequest],
        rng: &mut R,
    ) -> Result<GroupingResult, PlanningError> {
        if requests.is_empty() {
            return Ok(GroupingResult {
                plan: Plan::empty(depot, vehicles),
                makespan_estimate: 0.0,
                best_history: Vec::new(),
            });
        }
        validate_requests(vehicles, requests)?;
        if let Some(v) = vehicles.iter().find(|v| v.capacity() <= 0) {
            log::warn!(
                "vehicle {} has capacity {}; every grouping is infeasible",
                v.id(),
                v.capacity()
            );
        }

        let distances = DistanceMatrix::from_graph(graph, depot, requests);

        let mut current = Assignment::random(vehicles.len(), requests.len(), rng);
        let mut current_cost = makespan(&distances, vehicles, requests, &current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut best_history = Vec::with_capacity(self.config.iterations + 1);
        best_history.push(best_cost);
        log::debug!("local search: initial makespan {best_cost}");

        for iteration in 0..self.config.iterations {
            let candidate = relocate_move(&current, rng);
            let candidate_cost = makespan(&distances, vehicles, requests, &candidate);

            if candidate_cost <= current_cost {
                if candidate_cost < best_cost {
                    log::debug!("local search: iteration {iteration} improves to {candidate_cost}");
                    best = candidate.clone();
                    best_cost = candidate_cost;
                }
                current = candidate;
                current_cost = candidate_cost;
            }
            best_history.push(best_cost);
        }

        let plan = build_plan(depot, vehicles, requests, &distances, &best);
        log::info!(
            "local search: makespan {best_cost} after {} iterations",
            self.config.iterations
        );

        Ok(GroupingResult {
            plan,
            makespan_estimate: best_cost,
            best_history,
        })
    }
}

/// Largest per-vehicle route time of an assignment.
fn makespan(
    distances: &DistanceMatrix,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
    assignment: &Assignment,
) -> f64 {
    let mut worst: f64 = 0.0;
    for (vi, vehicle) in vehicles.iter().enumerate() {
        if vehicle.capacity() <= 0 {
            return f64::INFINITY;
        }
        let group = assignment.group(vi);
        if group.is_empty() {
            continue;
        }
        let stops: Vec<(usize, i32)> = nearest_neighbor_order(distances, group)
            .into_iter()
            .map(|ri| (ri, requests[ri].demand()))
            .collect();
        worst = worst.max(route_time(distances, &stops, vehicle.capacity()));
    }
    worst
}

fn build_plan(
    depot: NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
    distances: &DistanceMatrix,
    assignment: &Assignment,
) -> Plan {
    let routes = vehicles
        .iter()
        .enumerate()
        .map(|(vi, v)| {
            let stops = nearest_neighbor_order(distances, assignment.group(vi))
                .into_iter()
                .map(|ri| requests[ri].clone())
                .collect();
            VehicleRoute::with_stops(v.id(), stops)
        })
        .collect();
    Plan::new(depot, routes)
}
