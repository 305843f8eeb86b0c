//! Stochastic re-evaluation of finished plans.
//!
//! - [`NoiseModel`] — zero-mean Gaussian noise proportional to base travel time
//! - [`TrafficSimulator`] — per-edge noisy replay, single run or Monte Carlo summary

mod noise;
mod simulator;

pub use noise::{NoiseModel, DEFAULT_RELATIVE_STD_DEV};
pub use simulator::{SimulationResult, SimulationSummary, TrafficSimulator};
