//! Request-to-vehicle grouping used as local-search state.

use rand::Rng;

/// Which requests each vehicle serves, without a visiting order.
///
/// Indexed by vehicle position in the fleet; each group holds request
/// positions in ascending order, so a group behaves like a set and its
/// enumeration order is stable.
///
/// # Examples
///
/// ```
/// use city_dispatch::local_search::Assignment;
///
/// let mut a = Assignment::new(2);
/// a.insert(1, 4);
/// a.insert(1, 2);
/// assert_eq!(a.group(1), &[2, 4]);
/// assert_eq!(a.num_assigned(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    groups: Vec<Vec<usize>>,
}

impl Assignment {
    /// Creates an assignment with `num_vehicles` empty groups.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            groups: vec![Vec::new(); num_vehicles],
        }
    }

    /// Assigns each of `num_requests` requests to a uniformly random vehicle.
    ///
    /// Requests are drawn in index order. Requires `num_vehicles > 0`
    /// whenever `num_requests > 0`.
    pub fn random<R: Rng + ?Sized>(num_vehicles: usize, num_requests: usize, rng: &mut R) -> Self {
        let mut assignment = Self::new(num_vehicles);
        if num_vehicles == 0 {
            return assignment;
        }
        for request in 0..num_requests {
            let vehicle = rng.random_range(0..num_vehicles);
            assignment.groups[vehicle].push(request);
        }
        assignment
    }

    /// Number of vehicle groups.
    pub fn num_vehicles(&self) -> usize {
        self.groups.len()
    }

    /// Requests assigned to the vehicle at position `vehicle`, ascending.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` is out of bounds.
    pub fn group(&self, vehicle: usize) -> &[usize] {
        &self.groups[vehicle]
    }

    /// All groups in fleet order.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Total number of assigned requests.
    pub fn num_assigned(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Adds `request` to `vehicle`'s group, keeping it sorted.
    pub fn insert(&mut self, vehicle: usize, request: usize) {
        let group = &mut self.groups[vehicle];
        let pos = group.binary_search(&request).unwrap_or_else(|p| p);
        group.insert(pos, request);
    }

    /// Removes and returns the request at position `pos` of `vehicle`'s group.
    pub fn remove_at(&mut self, vehicle: usize, pos: usize) -> usize {
        self.groups[vehicle].remove(pos)
    }
}
