//! Monte Carlo replay of a finished plan under travel-time noise.
//!
//! # Algorithm
//!
//! For every vehicle, take the capacity-aware waypoint sequence of its
//! route (start, stops, reload visits, optional final depot), resolve each
//! waypoint leg with A*, and sum one noisy sample per traversed edge.
//!
//! A vehicle whose route is infeasible or has an unreachable leg gets an
//! infinite time. Its remaining legs are not sampled.
//!
//! # Complexity
//!
//! One A* search per waypoint leg plus one draw per traversed edge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::NoiseModel;
use crate::evaluation::route_waypoints;
use crate::graph::{NodeId, RoadGraph};
use crate::models::{DeliveryRequest, Plan, Vehicle};
use crate::path::shortest_path;

/// One stochastic sample of a plan's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// `(vehicle_id, time)` in fleet order.
    pub vehicle_times: Vec<(usize, f64)>,
    /// Sum over vehicles.
    pub total_time: f64,
    /// Slowest vehicle.
    pub max_time: f64,
}

/// Aggregate of repeated [`SimulationResult`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Number of aggregated runs.
    pub runs: usize,
    /// Mean of the per-run slowest-vehicle times.
    pub mean_makespan: f64,
    /// Population standard deviation; infinite when any run was.
    pub std_dev_makespan: f64,
    /// Fastest observed makespan.
    pub min_makespan: f64,
    /// Slowest observed makespan.
    pub max_makespan: f64,
    /// Mean of the per-run fleet totals.
    pub mean_total_time: f64,
    /// `(vehicle_id, mean time)` in fleet order.
    pub mean_vehicle_times: Vec<(usize, f64)>,
}

/// Replays plans edge by edge with sampled travel times.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{DeliveryRequest, Plan, Vehicle, VehicleRoute};
/// use city_dispatch::simulation::{NoiseModel, TrafficSimulator};
///
/// let mut g = RoadGraph::new();
/// let a = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 100.0, 0.0).unwrap();
/// g.add_road(a, b, 100.0, 10.0).unwrap();
///
/// let fleet = vec![Vehicle::new(0, 1, a)];
/// let plan = Plan::new(a, vec![VehicleRoute::with_stops(0, vec![DeliveryRequest::new(1, b)])]);
///
/// let sim = TrafficSimulator::new(NoiseModel::default());
/// let result = sim.simulate_once(&g, &plan, &fleet, true, &mut StdRng::seed_from_u64(7));
/// assert_eq!(result.vehicle_times.len(), 1);
/// assert!(result.max_time > 0.0 && result.max_time.is_finite());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrafficSimulator {
    noise: NoiseModel,
}

impl TrafficSimulator {
    /// Creates a simulator with the given noise model.
    pub fn new(noise: NoiseModel) -> Self {
        Self { noise }
    }

    /// Returns the noise model.
    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    /// Draws one noisy execution of `plan`.
    ///
    /// Vehicles are reported in `vehicles` order; a vehicle without a route
    /// in the plan drives nothing and reports 0.
    pub fn simulate_once<R: Rng + ?Sized>(
        &self,
        graph: &RoadGraph,
        plan: &Plan,
        vehicles: &[Vehicle],
        return_to_depot: bool,
        rng: &mut R,
    ) -> SimulationResult {
        let vehicle_times: Vec<(usize, f64)> = vehicles
            .iter()
            .map(|v| {
                let stops = plan.route(v.id()).map(|r| r.stops()).unwrap_or(&[]);
                let time = self.vehicle_time(graph, v, stops, plan.depot(), return_to_depot, rng);
                (v.id(), time)
            })
            .collect();

        let total_time = vehicle_times.iter().map(|&(_, t)| t).sum();
        let max_time = vehicle_times.iter().map(|&(_, t)| t).fold(0.0, f64::max);

        SimulationResult {
            vehicle_times,
            total_time,
            max_time,
        }
    }

    /// Runs `runs` independent samples and aggregates them.
    ///
    /// Zero runs yields an all-zero summary.
    pub fn simulate_many<R: Rng + ?Sized>(
        &self,
        graph: &RoadGraph,
        plan: &Plan,
        vehicles: &[Vehicle],
        runs: usize,
        return_to_depot: bool,
        rng: &mut R,
    ) -> SimulationSummary {
        let mut makespans = Vec::with_capacity(runs);
        let mut total_sum = 0.0;
        let mut vehicle_sums = vec![0.0; vehicles.len()];

        for _ in 0..runs {
            let result = self.simulate_once(graph, plan, vehicles, return_to_depot, rng);
            makespans.push(result.max_time);
            total_sum += result.total_time;
            for (sum, &(_, t)) in vehicle_sums.iter_mut().zip(&result.vehicle_times) {
                *sum += t;
            }
        }

        let n = runs.max(1) as f64;
        let mean_makespan = makespans.iter().sum::<f64>() / n;
        let std_dev_makespan = if mean_makespan.is_finite() {
            (makespans.iter().map(|m| (m - mean_makespan).powi(2)).sum::<f64>() / n).sqrt()
        } else {
            f64::INFINITY
        };
        let min_makespan = makespans.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let max_makespan = makespans.iter().copied().reduce(f64::max).unwrap_or(0.0);

        log::debug!("simulation: {runs} runs, mean makespan {mean_makespan}");

        SimulationSummary {
            runs,
            mean_makespan,
            std_dev_makespan,
            min_makespan,
            max_makespan,
            mean_total_time: total_sum / n,
            mean_vehicle_times: vehicles
                .iter()
                .zip(vehicle_sums)
                .map(|(v, sum)| (v.id(), sum / n))
                .collect(),
        }
    }

    fn vehicle_time<R: Rng + ?Sized>(
        &self,
        graph: &RoadGraph,
        vehicle: &Vehicle,
        stops: &[DeliveryRequest],
        depot: NodeId,
        return_to_depot: bool,
        rng: &mut R,
    ) -> f64 {
        let Some(waypoints) = route_waypoints(vehicle, stops, depot, return_to_depot) else {
            log::warn!(
                "vehicle {} cannot carry its route with capacity {}",
                vehicle.id(),
                vehicle.capacity()
            );
            return f64::INFINITY;
        };

        let mut time = 0.0;
        for leg in waypoints.windows(2) {
            let path = shortest_path(graph, leg[0], leg[1]);
            if !path.is_reachable() {
                log::warn!("vehicle {}: no path from {} to {}", vehicle.id(), leg[0], leg[1]);
                return f64::INFINITY;
            }
            for (u, v) in path.legs() {
                let Some(edge) = graph.edge_between(u, v) else {
                    return f64::INFINITY;
                };
                time += self.noise.sample_edge_time(edge.base_travel_time(), rng);
            }
        }
        time
    }
}
