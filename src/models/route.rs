//! Vehicle route type.

use serde::{Deserialize, Serialize};

use super::DeliveryRequest;

/// Requests assigned to one vehicle, in visiting order.
///
/// Depot visits (start, reload trips, return) are not stored; they are
/// derived from the vehicle's capacity by the cost model.
///
/// # Examples
///
/// ```
/// use city_dispatch::graph::RoadGraph;
/// use city_dispatch::models::{DeliveryRequest, VehicleRoute};
///
/// let mut g = RoadGraph::new();
/// let n = g.add_node("n", 0.0, 0.0).unwrap();
///
/// let mut route = VehicleRoute::new(0);
/// route.push(DeliveryRequest::new(1, n));
/// route.push(DeliveryRequest::new(2, n).with_demand(2));
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.request_ids(), vec![1, 2]);
/// assert_eq!(route.total_demand(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    vehicle_id: usize,
    stops: Vec<DeliveryRequest>,
}

impl VehicleRoute {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
        }
    }

    /// Creates a route with the given visiting order.
    pub fn with_stops(vehicle_id: usize, stops: Vec<DeliveryRequest>) -> Self {
        Self { vehicle_id, stops }
    }

    /// Appends a stop to the end of the route.
    pub fn push(&mut self, request: DeliveryRequest) {
        self.stops.push(request);
    }

    /// Vehicle serving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[DeliveryRequest] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Request IDs in visiting order.
    pub fn request_ids(&self) -> Vec<usize> {
        self.stops.iter().map(DeliveryRequest::id).collect()
    }

    /// Sum of demand over all stops (across all trips).
    pub fn total_demand(&self) -> i32 {
        self.stops.iter().map(DeliveryRequest::demand).sum()
    }
}
