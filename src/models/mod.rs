//! Domain model types for delivery planning.
//!
//! Vehicles with per-trip capacity, delivery requests with demands, routes
//! as ordered stop lists, and plans that tie routes to a shared depot.

mod plan;
mod request;
mod route;
mod vehicle;

pub use plan::{Plan, PlanCost};
pub use request::{DeliveryRequest, DEFAULT_DEMAND};
pub use route::VehicleRoute;
pub use vehicle::Vehicle;
