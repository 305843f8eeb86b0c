//! Capacity-aware multi-trip route costing.
//!
//! A vehicle leaves its start node with a full load of `capacity` units.
//! Before each stop, if the remaining load cannot cover the stop's demand,
//! the vehicle first drives back to the depot (unless already there) and
//! reloads. After the last stop it optionally drives home.
//!
//! Every planner compares candidates through this model, either with live
//! A* legs ([`route_cost`]) or with a precomputed matrix ([`route_time`]).
//! Infeasibility is always `f64::INFINITY`, never an error.

use crate::distance::{DistanceMatrix, DEPOT};
use crate::graph::{NodeId, RoadGraph};
use crate::models::{DeliveryRequest, Vehicle};
use crate::path::{shortest_path, travel_time};

/// Sequence of locations a vehicle passes through, including inserted
/// depot reloads. `None` when the capacity or a demand makes the route
/// infeasible.
fn trip_waypoints<L: Copy + PartialEq>(
    start: L,
    depot: L,
    capacity: i32,
    stops: impl IntoIterator<Item = (L, i32)>,
    return_to_depot: bool,
) -> Option<Vec<L>> {
    if capacity <= 0 {
        return None;
    }

    let mut waypoints = vec![start];
    let mut cur = start;
    let mut load_left = capacity;

    for (location, demand) in stops {
        if demand <= 0 || demand > capacity {
            return None;
        }
        if load_left < demand {
            if cur != depot {
                waypoints.push(depot);
                cur = depot;
            }
            load_left = capacity;
        }
        waypoints.push(location);
        cur = location;
        load_left -= demand;
    }

    if return_to_depot && cur != depot {
        waypoints.push(depot);
    }
    Some(waypoints)
}

/// Sums leg costs along waypoints, short-circuiting on the first
/// unreachable leg.
fn sum_legs<L: Copy>(waypoints: &[L], mut leg: impl FnMut(L, L) -> f64) -> f64 {
    let mut total = 0.0;
    for w in waypoints.windows(2) {
        let t = leg(w[0], w[1]);
        if !t.is_finite() {
            return f64::INFINITY;
        }
        total += t;
    }
    total
}

/// Deterministic travel time of `vehicle` serving `stops` in order, using
/// live A* for every leg.
///
/// Starts at the vehicle's start node. Returns `f64::INFINITY` if the
/// vehicle has non-positive capacity, a stop has non-positive demand or a
/// demand larger than the capacity, or any leg is unreachable.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{DeliveryRequest, Vehicle};
/// use city_dispatch::evaluation::route_cost;
///
/// let mut g = RoadGraph::new();
/// let depot = g.add_node("A", 0.0, 0.0).unwrap();
/// let b = g.add_node("B", 100.0, 0.0).unwrap();
/// g.add_road(depot, b, 100.0, 10.0).unwrap();
///
/// let v = Vehicle::new(0, 1, depot);
/// let stops = vec![DeliveryRequest::new(1, b), DeliveryRequest::new(2, b)];
///
/// // Capacity 1 forces a reload between the two deliveries:
/// // A -> B -> A -> B -> A
/// assert!((route_cost(&g, &v, &stops, depot, true) - 40.0).abs() < 1e-10);
/// assert!((route_cost(&g, &v, &stops, depot, false) - 30.0).abs() < 1e-10);
/// ```
pub fn route_cost(
    graph: &RoadGraph,
    vehicle: &Vehicle,
    stops: &[DeliveryRequest],
    depot: NodeId,
    return_to_depot: bool,
) -> f64 {
    let Some(waypoints) = trip_waypoints(
        vehicle.start_node(),
        depot,
        vehicle.capacity(),
        stops.iter().map(|r| (r.node(), r.demand())),
        return_to_depot,
    ) else {
        return f64::INFINITY;
    };
    sum_legs(&waypoints, |a, b| travel_time(graph, a, b))
}

/// Travel time of a route over a precomputed [`DistanceMatrix`].
///
/// `stops` are `(request_index, demand)` pairs where `request_index` is the
/// request's position in the matrix's request list. The vehicle starts at
/// the depot and always returns there. An empty route costs 0.
pub fn route_time(distances: &DistanceMatrix, stops: &[(usize, i32)], capacity: i32) -> f64 {
    if stops.is_empty() {
        return 0.0;
    }
    let Some(waypoints) = trip_waypoints(
        DEPOT,
        DEPOT,
        capacity,
        stops
            .iter()
            .map(|&(idx, demand)| (DistanceMatrix::request_location(idx), demand)),
        true,
    ) else {
        return f64::INFINITY;
    };
    sum_legs(&waypoints, |a, b| distances.get(a, b))
}

/// Capacity-aware node sequence for a route: start node, every stop, each
/// depot reload the cost model inserts, and the final depot if requested.
///
/// An empty route yields just the start node. Returns `None` for
/// infeasible capacity or demand.
pub fn route_waypoints(
    vehicle: &Vehicle,
    stops: &[DeliveryRequest],
    depot: NodeId,
    return_to_depot: bool,
) -> Option<Vec<NodeId>> {
    if stops.is_empty() {
        return Some(vec![vehicle.start_node()]);
    }
    trip_waypoints(
        vehicle.start_node(),
        depot,
        vehicle.capacity(),
        stops.iter().map(|r| (r.node(), r.demand())),
        return_to_depot,
    )
}

/// Full node-by-node path a vehicle drives, expanding every waypoint leg
/// with A*.
///
/// Returns `None` if the route is infeasible or any leg is unreachable.
pub fn expand_route_nodes(
    graph: &RoadGraph,
    vehicle: &Vehicle,
    stops: &[DeliveryRequest],
    depot: NodeId,
    return_to_depot: bool,
) -> Option<Vec<NodeId>> {
    let waypoints = route_waypoints(vehicle, stops, depot, return_to_depot)?;
    let mut nodes = vec![*waypoints.first()?];
    for w in waypoints.windows(2) {
        let leg = shortest_path(graph, w[0], w[1]).into_nodes()?;
        nodes.extend(leg.into_iter().skip(1));
    }
    Some(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Star around depot A: B and D each 100 units away at speed 10,
    /// C two hops past B, E unreachable.
    struct Star {
        g: RoadGraph,
        a: NodeId,
        b: NodeId,
        c: NodeId,
        d: NodeId,
        e: NodeId,
    }

    fn star() -> Star {
        let mut g = RoadGraph::new();
        let a = g.add_node("A", 0.0, 0.0).expect("fresh");
        let b = g.add_node("B", 100.0, 0.0).expect("fresh");
        let c = g.add_node("C", 200.0, 0.0).expect("fresh");
        let d = g.add_node("D", 0.0, 100.0).expect("fresh");
        let e = g.add_node("E", 900.0, 900.0).expect("fresh");
        g.add_road(a, b, 100.0, 10.0).expect("valid");
        g.add_road(b, c, 100.0, 10.0).expect("valid");
        g.add_road(a, d, 100.0, 10.0).expect("valid");
        Star { g, a, b, c, d, e }
    }

    fn req(id: usize, node: NodeId) -> DeliveryRequest {
        DeliveryRequest::new(id, node)
    }

    #[test]
    fn test_single_trip() {
        let s = star();
        let v = Vehicle::new(0, 10, s.a);
        let stops = vec![req(1, s.b), req(2, s.c)];
        // A->B 10, B->C 10, C->A 20; a reload at A would add 20.
        assert!((route_cost(&s.g, &v, &stops, s.a, true) - 40.0).abs() < 1e-10);
        let wp = route_waypoints(&v, &stops, s.a, true).expect("feasible");
        assert_eq!(wp, vec![s.a, s.b, s.c, s.a]);
    }

    #[test]
    fn test_reload_inserted_on_overflow() {
        let s = star();
        let v = Vehicle::new(0, 2, s.a);
        let stops = vec![
            req(1, s.c).with_demand(2),
            req(2, s.b),
        ];
        // A->C 20, C->A 20 (reload), A->B 10, B->A 10
        assert!((route_cost(&s.g, &v, &stops, s.a, true) - 60.0).abs() < 1e-10);
        let wp = route_waypoints(&v, &stops, s.a, true).expect("feasible");
        assert_eq!(wp, vec![s.a, s.c, s.a, s.b, s.a]);
    }

    #[test]
    fn test_reload_skipped_when_already_at_depot() {
        let s = star();
        let v = Vehicle::new(0, 1, s.a);
        let stops = vec![req(1, s.a), req(2, s.b)];
        let wp = route_waypoints(&v, &stops, s.a, true).expect("feasible");
        // Delivering at the depot itself needs no extra depot visit to reload.
        assert_eq!(wp, vec![s.a, s.a, s.b, s.a]);
        assert!((route_cost(&s.g, &v, &stops, s.a, true) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_return() {
        let s = star();
        let v = Vehicle::new(0, 10, s.a);
        assert!((route_cost(&s.g, &v, &[req(1, s.c)], s.a, false) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_start_away_from_depot() {
        let s = star();
        let v = Vehicle::new(0, 10, s.c);
        assert!((route_cost(&s.g, &v, &[], s.a, true) - 20.0).abs() < 1e-10);
        assert_eq!(route_cost(&s.g, &v, &[], s.a, false), 0.0);
        assert!((route_cost(&s.g, &v, &[req(1, s.b)], s.a, true) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_infeasible_inputs() {
        let s = star();
        let stops = vec![req(1, s.b)];
        let zero = Vehicle::new(0, 0, s.a);
        assert_eq!(route_cost(&s.g, &zero, &stops, s.a, true), f64::INFINITY);
        assert_eq!(route_cost(&s.g, &zero, &[], s.a, true), f64::INFINITY);

        let v = Vehicle::new(0, 3, s.a);
        assert_eq!(
            route_cost(&s.g, &v, &[req(1, s.b).with_demand(0)], s.a, true),
            f64::INFINITY
        );
        assert_eq!(
            route_cost(&s.g, &v, &[req(1, s.b).with_demand(4)], s.a, true),
            f64::INFINITY
        );
    }

    #[test]
    fn test_unreachable_leg_is_infinite() {
        let s = star();
        let v = Vehicle::new(0, 10, s.a);
        let stops = vec![req(1, s.b), req(2, s.e)];
        assert_eq!(route_cost(&s.g, &v, &stops, s.a, true), f64::INFINITY);
        assert!(expand_route_nodes(&s.g, &v, &stops, s.a, true).is_none());
    }

    #[test]
    fn test_appending_never_decreases_cost() {
        let s = star();
        let v = Vehicle::new(0, 2, s.a);
        let all = vec![req(1, s.c), req(2, s.d), req(3, s.b), req(4, s.c), req(5, s.a)];
        let mut prev = 0.0;
        for k in 0..=all.len() {
            let cost = route_cost(&s.g, &v, &all[..k], s.a, true);
            assert!(cost + 1e-10 >= prev, "prefix {k}: {cost} < {prev}");
            prev = cost;
        }
    }

    #[test]
    fn test_route_time_matrix() {
        let s = star();
        let requests = vec![req(1, s.b), req(2, s.d), req(3, s.c)];
        let dm = DistanceMatrix::from_graph(&s.g, s.a, &requests);
        assert_eq!(route_time(&dm, &[], 5), 0.0);
        // depot->B->D->depot
        assert!((route_time(&dm, &[(0, 1), (1, 1)], 5) - 40.0).abs() < 1e-10);
        // capacity 1: depot->B->depot->D->depot
        assert!((route_time(&dm, &[(0, 1), (1, 1)], 1) - 40.0).abs() < 1e-10);
        // capacity 1, C then B: depot->C->depot->B->depot
        assert!((route_time(&dm, &[(2, 1), (0, 1)], 1) - 60.0).abs() < 1e-10);
        assert!((route_time(&dm, &[(2, 1), (0, 1)], 2) - 40.0).abs() < 1e-10);
        assert_eq!(route_time(&dm, &[(0, 1)], 0), f64::INFINITY);
    }

    #[test]
    fn test_route_time_matches_route_cost_from_depot() {
        let s = star();
        let requests = vec![req(1, s.c), req(2, s.d), req(3, s.b).with_demand(2)];
        let dm = DistanceMatrix::from_graph(&s.g, s.a, &requests);
        let v = Vehicle::new(0, 2, s.a);
        let live = route_cost(&s.g, &v, &requests, s.a, true);
        let stops: Vec<(usize, i32)> = requests.iter().enumerate().map(|(i, r)| (i, r.demand())).collect();
        assert!((route_time(&dm, &stops, 2) - live).abs() < 1e-10);
    }

    #[test]
    fn test_expand_route_nodes() {
        let s = star();
        let v = Vehicle::new(0, 1, s.a);
        let stops = vec![req(1, s.c), req(2, s.d)];
        let nodes = expand_route_nodes(&s.g, &v, &stops, s.a, true).expect("reachable");
        assert_eq!(nodes, vec![s.a, s.b, s.c, s.b, s.a, s.d, s.a]);
    }

    #[test]
    fn test_empty_route_waypoints() {
        let s = star();
        let v = Vehicle::new(0, 1, s.c);
        assert_eq!(route_waypoints(&v, &[], s.a, true), Some(vec![s.c]));
    }
}
