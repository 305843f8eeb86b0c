//! Eager input checks run before any search work.

use crate::error::PlanningError;
use crate::models::{DeliveryRequest, Vehicle};

/// Checks that every request has positive demand and fits into at least
/// one vehicle's per-trip capacity.
///
/// Requests are checked in order; the first violation is returned.
pub fn validate_requests(vehicles: &[Vehicle], requests: &[DeliveryRequest]) -> Result<(), PlanningError> {
    let max_capacity = vehicles.iter().map(Vehicle::capacity).max().unwrap_or(0);

    for r in requests {
        if r.demand() <= 0 {
            log::warn!("request {} rejected: non-positive demand {}", r.id(), r.demand());
            return Err(PlanningError::NonPositiveDemand {
                request: r.id(),
                demand: r.demand(),
            });
        }
        if !vehicles.iter().any(|v| v.can_carry(r.demand())) {
            log::warn!(
                "request {} rejected: demand {} exceeds every capacity (max {})",
                r.id(),
                r.demand(),
                max_capacity
            );
            return Err(PlanningError::UnplaceableDemand {
                request: r.id(),
                demand: r.demand(),
                max_capacity,
            });
        }
    }
    Ok(())
}

/// Checks that every vehicle has positive capacity.
pub fn validate_fleet(vehicles: &[Vehicle]) -> Result<(), PlanningError> {
    match vehicles.iter().find(|v| v.capacity() <= 0) {
        Some(v) => {
            log::warn!("vehicle {} rejected: non-positive capacity {}", v.id(), v.capacity());
            Err(PlanningError::NonPositiveCapacity {
                vehicle: v.id(),
                capacity: v.capacity(),
            })
        }
        None => Ok(()),
    }
}
