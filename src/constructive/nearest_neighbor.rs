//! Nearest-neighbor sequencing of a request group.
//!
//! Starting from the depot, repeatedly visit the closest not-yet-visited
//! request. Cheap and greedy: the resulting order is not optimal, but it is
//! good enough to score request groupings during local search.
//!
//! # Complexity
//!
//! O(k²) for a group of k requests.

use crate::distance::{DistanceMatrix, DEPOT};

/// Orders a group of requests by repeated nearest-neighbor selection.
///
/// `request_indices` are positions in the request list the matrix was
/// built from. Ties keep the candidate that appears first in
/// `request_indices`.
///
/// # Examples
///
/// ```
/// use city_dispatch::distance::DistanceMatrix;
/// use city_dispatch::constructive::nearest_neighbor_order;
///
/// // depot, r0, r1, r2 on a line at 0, 3, 1, 2
/// let pos = [0.0_f64, 3.0, 1.0, 2.0];
/// let data = pos
///     .iter()
///     .flat_map(|a| pos.iter().map(move |b| (a - b).abs()))
///     .collect();
/// let dm = DistanceMatrix::from_data(4, data).unwrap();
///
/// assert_eq!(nearest_neighbor_order(&dm, &[0, 1, 2]), vec![1, 2, 0]);
/// ```
pub fn nearest_neighbor_order(distances: &DistanceMatrix, request_indices: &[usize]) -> Vec<usize> {
    let mut remaining = request_indices.to_vec();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = DEPOT;

    while !remaining.is_empty() {
        let locations: Vec<usize> = remaining
            .iter()
            .map(|&r| DistanceMatrix::request_location(r))
            .collect();
        let Some(next) = distances.nearest_neighbor(current, &locations) else {
            break;
        };
        let pos = locations.iter().position(|&l| l == next).unwrap_or(0);
        current = next;
        order.push(remaining.remove(pos));
    }

    order
}
