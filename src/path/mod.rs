//! Shortest-path search over a [`RoadGraph`](crate::graph::RoadGraph).
//!
//! - [`shortest_path`] — A* over base travel times
//! - [`travel_time`] — cost-only convenience wrapper

mod astar;

pub use astar::{shortest_path, travel_time, ShortestPath};
