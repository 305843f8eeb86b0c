//! Precomputed travel-time matrix for performance-sensitive planners.

mod matrix;

pub use matrix::{DistanceMatrix, DEPOT};
