//! Random-sampling baseline planner.
//!
//! Draws independent random plans (shuffled requests, each dropped on a
//! uniformly chosen vehicle) and keeps the one with the lowest summed route
//! cost. Serves as a sanity baseline for the greedy and local-search
//! planners.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PlanningError;
use crate::evaluation::{route_cost, validate_fleet, validate_requests};
use crate::graph::{NodeId, RoadGraph};
use crate::models::{DeliveryRequest, Plan, PlanCost, Vehicle, VehicleRoute};

/// Best-of-N random assignment planner.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{DeliveryRequest, Vehicle};
/// use city_dispatch::constructive::RandomSamplingPlanner;
///
/// let mut g = RoadGraph::new();
/// let a = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 1.0, 0.0).unwrap();
/// g.add_road(a, b, 10.0, 1.0).unwrap();
///
/// let fleet = vec![Vehicle::new(0, 2, a), Vehicle::new(1, 2, a)];
/// let requests = vec![DeliveryRequest::new(1, b)];
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let best = RandomSamplingPlanner::new(50)
///     .search(&g, a, &fleet, &requests, &mut rng)
///     .unwrap();
/// assert!((best.total_time - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSamplingPlanner {
    samples: usize,
}

impl RandomSamplingPlanner {
    /// Creates a planner drawing `samples` random plans.
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }

    /// Number of plans drawn per search.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Draws random plans and returns the cheapest by summed route cost.
    ///
    /// Ties keep the earlier sample.
    ///
    /// # Errors
    ///
    /// [`PlanningError::NoSamples`] for a zero sample count, plus the
    /// input-validation errors of [`validate_fleet`] and [`validate_requests`].
    pub fn search<R: Rng + ?Sized>(
        &self,
        graph: &RoadGraph,
        depot: NodeId,
        vehicles: &[Vehicle],
        requests: &[DeliveryRequest],
        rng: &mut R,
    ) -> Result<PlanCost, PlanningError> {
        if self.samples == 0 {
            return Err(PlanningError::NoSamples);
        }
        validate_fleet(vehicles)?;
        validate_requests(vehicles, requests)?;

        let mut best: Option<PlanCost> = None;
        for sample in 0..self.samples {
            let plan = random_plan(depot, vehicles, requests, rng);
            let total_time = total_route_cost(graph, depot, vehicles, &plan);
            if best.as_ref().is_none_or(|b| total_time < b.total_time) {
                log::debug!("sampling: sample {sample} improves to {total_time}");
                best = Some(PlanCost { plan, total_time });
            }
        }

        let best = best.ok_or(PlanningError::NoSamples)?;
        log::info!(
            "sampling plan: best of {} samples, total time {}",
            self.samples,
            best.total_time
        );
        Ok(best)
    }
}

fn random_plan<R: Rng + ?Sized>(
    depot: NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
    rng: &mut R,
) -> Plan {
    let mut stops: Vec<Vec<DeliveryRequest>> = vec![Vec::new(); vehicles.len()];
    let mut shuffled = requests.to_vec();
    shuffled.shuffle(rng);
    for request in shuffled {
        let vi = rng.random_range(0..vehicles.len());
        stops[vi].push(request);
    }
    Plan::new(
        depot,
        vehicles
            .iter()
            .zip(stops)
            .map(|(v, s)| VehicleRoute::with_stops(v.id(), s))
            .collect(),
    )
}

fn total_route_cost(graph: &RoadGraph, depot: NodeId, vehicles: &[Vehicle], plan: &Plan) -> f64 {
    vehicles
        .iter()
        .zip(plan.routes())
        .map(|(v, route)| route_cost(graph, v, route.stops(), depot, true))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line() -> (RoadGraph, [NodeId; 3]) {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh");
        let b = g.add_node("B", 1.0, 0.0).expect("fresh");
        let c = g.add_node("C", 2.0, 0.0).expect("fresh");
        g.add_road(a, b, 10.0, 1.0).expect("valid");
        g.add_road(b, c, 10.0, 1.0).expect("valid");
        (g, [a, b, c])
    }

    #[test]
    fn test_zero_samples_rejected() {
        let (g, [a, ..]) = line();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            RandomSamplingPlanner::new(0).search(&g, a, &[Vehicle::new(0, 1, a)], &[], &mut rng),
            Err(PlanningError::NoSamples)
        );
    }

    #[test]
    fn test_places_every_request_once() {
        let (g, [a, b, c]) = line();
        let fleet = vec![Vehicle::new(0, 2, a), Vehicle::new(1, 2, a), Vehicle::new(2, 2, a)];
        let requests: Vec<DeliveryRequest> = [b, c, b, c, c]
            .iter()
            .enumerate()
            .map(|(i, &n)| DeliveryRequest::new(i, n))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let best = RandomSamplingPlanner::new(30)
            .search(&g, a, &fleet, &requests, &mut rng)
            .expect("valid inputs");
        let mut ids = best.plan.all_request_ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(best.total_time.is_finite());
    }

    #[test]
    fn test_more_samples_never_worse() {
        let (g, [a, b, c]) = line();
        let fleet = vec![Vehicle::new(0, 1, a), Vehicle::new(1, 3, a)];
        let requests = vec![
            DeliveryRequest::new(0, c),
            DeliveryRequest::new(1, b),
            DeliveryRequest::new(2, c),
        ];
        // Same seed: the 40-sample run sees the 5-sample run's draws first.
        let few = RandomSamplingPlanner::new(5)
            .search(&g, a, &fleet, &requests, &mut StdRng::seed_from_u64(3))
            .expect("valid");
        let many = RandomSamplingPlanner::new(40)
            .search(&g, a, &fleet, &requests, &mut StdRng::seed_from_u64(3))
            .expect("valid");
        assert!(many.total_time <= few.total_time);
    }

    #[test]
    fn test_reproducible_for_seed() {
        let (g, [a, b, c]) = line();
        let fleet = vec![Vehicle::new(0, 2, a), Vehicle::new(1, 2, a)];
        let requests = vec![DeliveryRequest::new(0, c), DeliveryRequest::new(1, b)];
        let run = || {
            RandomSamplingPlanner::new(10)
                .search(&g, a, &fleet, &requests, &mut StdRng::seed_from_u64(99))
                .expect("valid")
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_validation_runs_first() {
        let (g, [a, b, _]) = line();
        let fleet = vec![Vehicle::new(0, 1, a)];
        let requests = vec![DeliveryRequest::new(0, b).with_demand(2)];
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            RandomSamplingPlanner::new(3).search(&g, a, &fleet, &requests, &mut rng),
            Err(PlanningError::UnplaceableDemand { .. })
        ));
    }
}
