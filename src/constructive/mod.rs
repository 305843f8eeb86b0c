//! Constructive planners and sequencing heuristics.
//!
//! - [`GreedyPlanner`] — cheapest-append construction, O(n²m) route evaluations
//! - [`nearest_neighbor_order`] — nearest-neighbor visiting order for a request group
//! - [`RandomSamplingPlanner`] — best of N random assignments (baseline)

mod greedy;
mod nearest_neighbor;
mod sampling;

pub use greedy::GreedyPlanner;
pub use nearest_neighbor::nearest_neighbor_order;
pub use sampling::RandomSamplingPlanner;
