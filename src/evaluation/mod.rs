//! Route costing and input validation.
//!
//! - [`route_cost`] — capacity-aware multi-trip cost over live A* legs
//! - [`route_time`] — the same model over a [`DistanceMatrix`](crate::distance::DistanceMatrix)
//! - [`route_waypoints`] / [`expand_route_nodes`] — the node sequence a route drives
//! - [`validate_requests`] / [`validate_fleet`] — eager rejection of bad inputs

mod evaluator;
mod validation;

pub use evaluator::{expand_route_nodes, route_cost, route_time, route_waypoints};
pub use validation::{validate_fleet, validate_requests};
