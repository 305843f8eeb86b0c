//! Planning errors.
//!
//! Only rejected inputs and internal defects are errors. An unreachable leg
//! is not: it surfaces as an infinite cost so comparison-based selection
//! treats it as the worst candidate.

use thiserror::Error;

/// Errors returned by the planning entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    /// A request's demand exceeds the capacity of every vehicle.
    #[error("request {request} has demand {demand}, but the largest vehicle carries {max_capacity} per trip")]
    UnplaceableDemand {
        /// Offending request ID.
        request: usize,
        /// Its demand.
        demand: i32,
        /// Largest capacity in the fleet (0 for an empty fleet).
        max_capacity: i32,
    },

    /// A request has zero or negative demand.
    #[error("request {request} has non-positive demand {demand}")]
    NonPositiveDemand {
        /// Offending request ID.
        request: usize,
        /// Its demand.
        demand: i32,
    },

    /// A vehicle has zero or negative capacity.
    #[error("vehicle {vehicle} has non-positive capacity {capacity}")]
    NonPositiveCapacity {
        /// Offending vehicle ID.
        vehicle: usize,
        /// Its capacity.
        capacity: i32,
    },

    /// Greedy construction found no vehicle for the remaining requests even
    /// though input validation passed. Indicates a defect.
    #[error("internal assignment failure: no vehicle/request pair for {remaining} remaining requests")]
    InternalAssignmentFailure {
        /// Requests still unplaced.
        remaining: usize,
    },

    /// A sampling planner was configured with zero samples.
    #[error("sampling planner needs at least one sample")]
    NoSamples,
}
