//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, always visit the nearest
//! unvisited customer that still fits. When nothing fits, the next vehicle
//! starts. If the fleet runs out before every customer is placed, the
//! customers are repacked first-fit-decreasing by demand and each vehicle's
//! stops are re-sequenced nearest-first.
//!
//! # Complexity
//!
//! O(n²) for the greedy pass, O(n·m) for the repacking fallback.

use crate::distance::DistanceMatrix;
use crate::error::InfeasibleReason;
use crate::models::VrpInput;

/// Constructs one stop sequence per vehicle with the nearest-neighbor rule.
///
/// Returned sequences hold solver indices (1..=n); the result always has
/// exactly `input.vehicle_count()` entries, unused vehicles get an empty
/// sequence. Ties between equally near customers go to the lower index, so
/// the result is deterministic.
///
/// # Errors
///
/// [`InfeasibleReason::DemandExceedsCapacity`] if a customer alone exceeds
/// the vehicle capacity, [`InfeasibleReason::InsufficientFleet`] if the
/// customers cannot be packed into the fleet.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::{Location, VrpInput};
/// use u_dvrp::distance::{DistanceMatrix, Euclidean};
/// use u_dvrp::constructive::nearest_neighbor;
///
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![
///         Location::new(1, 1.0, 0.0, 10),
///         Location::new(2, 2.0, 0.0, 10),
///         Location::new(3, 3.0, 0.0, 10),
///     ],
///     1,
///     30,
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_input(&input, &Euclidean);
///
/// let routes = nearest_neighbor(&input, &dm).unwrap();
/// assert_eq!(routes, vec![vec![1, 2, 3]]);
/// ```
pub fn nearest_neighbor(
    input: &VrpInput,
    distances: &DistanceMatrix,
) -> Result<Vec<Vec<usize>>, InfeasibleReason> {
    let n = input.num_customers();
    if let Some(c) = input.customers().iter().find(|c| c.demand() > input.capacity()) {
        return Err(InfeasibleReason::DemandExceedsCapacity {
            location_id: c.id(),
            demand: c.demand(),
            capacity: input.capacity(),
        });
    }

    let capacity = u64::from(input.capacity());
    let demand = |i: usize| u64::from(input.location(i).demand());

    let mut assigned = vec![false; n + 1];
    assigned[0] = true; // depot
    let mut remaining = n;
    let mut routes = Vec::with_capacity(input.vehicle_count());

    for _ in 0..input.vehicle_count() {
        let mut route = Vec::new();
        let mut load: u64 = 0;
        let mut current = 0;

        while remaining > 0 {
            let next = distances.nearest_neighbor(
                current,
                (1..=n).filter(|&i| !assigned[i] && load + demand(i) <= capacity),
            );
            let Some(next) = next else { break };
            assigned[next] = true;
            remaining -= 1;
            load += demand(next);
            route.push(next);
            current = next;
        }

        routes.push(route);
    }

    if remaining == 0 {
        return Ok(routes);
    }

    tracing::debug!(
        remaining,
        "nearest-neighbor pass exhausted the fleet, repacking by demand"
    );
    let bins = first_fit_decreasing(input)?;
    Ok(bins
        .into_iter()
        .map(|bin| sequence_nearest_first(&bin, distances))
        .collect())
}

/// Packs customers into vehicle slots, largest demand first.
fn first_fit_decreasing(input: &VrpInput) -> Result<Vec<Vec<usize>>, InfeasibleReason> {
    let capacity = u64::from(input.capacity());
    let mut order: Vec<usize> = (1..=input.num_customers()).collect();
    // Stable sort keeps index order among equal demands.
    order.sort_by(|&a, &b| {
        input
            .location(b)
            .demand()
            .cmp(&input.location(a).demand())
    });

    let mut bins: Vec<Vec<usize>> = vec![Vec::new(); input.vehicle_count()];
    let mut loads = vec![0u64; input.vehicle_count()];
    let mut unassigned = Vec::new();

    for idx in order {
        let d = u64::from(input.location(idx).demand());
        match loads.iter().position(|&l| l + d <= capacity) {
            Some(slot) => {
                loads[slot] += d;
                bins[slot].push(idx);
            }
            None => unassigned.push(input.location(idx).id()),
        }
    }

    if unassigned.is_empty() {
        Ok(bins)
    } else {
        unassigned.sort_unstable();
        Err(InfeasibleReason::InsufficientFleet { unassigned })
    }
}

/// Orders a set of stops by repeatedly visiting the nearest one.
fn sequence_nearest_first(stops: &[usize], distances: &DistanceMatrix) -> Vec<usize> {
    let mut pending: Vec<usize> = stops.to_vec();
    pending.sort_unstable();
    let mut ordered = Vec::with_capacity(pending.len());
    let mut current = 0;
    while let Some(next) = distances.nearest_neighbor(current, pending.iter().copied()) {
        pending.retain(|&i| i != next);
        ordered.push(next);
        current = next;
    }
    ordered
}
