//! Random relocation move.
//!
//! Picks a source vehicle uniformly at random, removes one of its requests
//! (uniformly at random) and hands it to a different, uniformly chosen
//! vehicle. The move is a no-op when the source group is empty or the fleet
//! has a single vehicle.

use rand::Rng;

use super::Assignment;

/// Returns a neighbor of `assignment` obtained by one random relocation.
///
/// The input is left untouched.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use city_dispatch::local_search::{relocate_move, Assignment};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let start = Assignment::random(3, 6, &mut rng);
/// let next = relocate_move(&start, &mut rng);
/// assert_eq!(next.num_assigned(), 6);
/// ```
pub fn relocate_move<R: Rng + ?Sized>(assignment: &Assignment, rng: &mut R) -> Assignment {
    let mut candidate = assignment.clone();
    let num_vehicles = candidate.num_vehicles();
    if num_vehicles == 0 {
        return candidate;
    }

    let from = rng.random_range(0..num_vehicles);
    let group_len = candidate.group(from).len();
    if group_len == 0 || num_vehicles < 2 {
        return candidate;
    }

    let request = candidate.remove_at(from, rng.random_range(0..group_len));
    let mut to = rng.random_range(0..num_vehicles - 1);
    if to >= from {
        to += 1;
    }
    candidate.insert(to, request);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_moves_exactly_one_request() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut current = Assignment::random(4, 10, &mut rng);
        for _ in 0..200 {
            let next = relocate_move(&current, &mut rng);
            assert_eq!(next.num_assigned(), 10);
            let changed = (0..4)
                .filter(|&v| next.group(v) != current.group(v))
                .count();
            assert!(changed == 0 || changed == 2, "changed {changed} groups");
            current = next;
        }
    }

    #[test]
    fn test_single_vehicle_is_noop() {
        let mut rng = StdRng::seed_from_u64(2);
        let start = Assignment::random(1, 5, &mut rng);
        for _ in 0..10 {
            assert_eq!(relocate_move(&start, &mut rng), start);
        }
    }

    #[test]
    fn test_empty_source_is_noop() {
        let mut a = Assignment::new(2);
        a.insert(0, 0);
        let mut rng = StdRng::seed_from_u64(3);
        // Over many draws the source is sometimes vehicle 1 (empty): no-op,
        // otherwise request 0 moves to vehicle 1.
        let mut saw_noop = false;
        let mut saw_move = false;
        for _ in 0..50 {
            let next = relocate_move(&a, &mut rng);
            if next == a {
                saw_noop = true;
            } else {
                assert_eq!(next.group(1), &[0]);
                assert!(next.group(0).is_empty());
                saw_move = true;
            }
        }
        assert!(saw_noop && saw_move);
    }

    #[test]
    fn test_never_moves_to_same_vehicle() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut a = Assignment::new(2);
        a.insert(0, 0);
        a.insert(0, 1);
        a.insert(1, 2);
        for _ in 0..50 {
            let next = relocate_move(&a, &mut rng);
            assert_ne!(next, a);
        }
    }
}
