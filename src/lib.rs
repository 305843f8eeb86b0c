//! # city-dispatch
//!
//! Multi-vehicle delivery planning over a city road network, with
//! stochastic robustness checks for the finished plans.
//!
//! ## Modules
//!
//! - [`graph`] — Road network: nodes with coordinates, directed edges with length and speed limit
//! - [`path`] — A* shortest paths over base travel times
//! - [`models`] — Domain types (Vehicle, DeliveryRequest, VehicleRoute, Plan)
//! - [`distance`] — Depot/request travel-time matrix
//! - [`evaluation`] — Capacity-aware multi-trip route cost and input validation
//! - [`constructive`] — Greedy cheapest-append planner, nearest-neighbor sequencing, random sampling
//! - [`local_search`] — Makespan-minimizing relocation search over request groupings
//! - [`simulation`] — Per-edge noisy replay of plans
//!
//! Infeasible or unreachable routes cost `f64::INFINITY`; only rejected
//! inputs produce a [`PlanningError`]. Every randomized operation takes the
//! caller's `rand::Rng`, so a seeded generator makes whole pipelines
//! reproducible.

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod local_search;
pub mod models;
pub mod path;
pub mod simulation;

pub use error::PlanningError;
