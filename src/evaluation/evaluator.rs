//! Route evaluator: turns index sequences into routes and checks outputs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::distance::DistanceMatrix;
use crate::models::{Route, Violation, ViolationType, VrpInput, VrpOutput};

/// Builds routes from solver index sequences, computing load and distance,
/// and checks finished outputs against the input's constraints.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::{Location, VrpInput};
/// use u_dvrp::distance::{DistanceMatrix, Euclidean};
/// use u_dvrp::evaluation::RouteEvaluator;
///
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![Location::new(1, 3.0, 4.0, 10), Location::new(2, 6.0, 8.0, 20)],
///     1,
///     100,
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_input(&input, &Euclidean);
///
/// let evaluator = RouteEvaluator::new(&input, &dm);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.len(), 2);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    input: &'a VrpInput,
    distances: &'a DistanceMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(input: &'a VrpInput, distances: &'a DistanceMatrix) -> Self {
        Self { input, distances }
    }

    /// Builds a route from solver indices, computing its load and distance.
    ///
    /// Returns the route together with a capacity violation, if any.
    pub fn build_route(&self, vehicle_id: usize, indices: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(vehicle_id);
        for &idx in indices {
            route.push_stop(Arc::clone(self.input.location(idx)));
        }
        route.set_total_distance(self.distances.tour_cost(0, indices.iter().copied()));

        let mut violations = Vec::new();
        if route.total_load() > u64::from(self.input.capacity()) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: vehicle_id,
                load: route.total_load(),
                capacity: self.input.capacity(),
            }));
        }
        (route, violations)
    }

    /// Builds an output from one index sequence per vehicle slot.
    ///
    /// Empty sequences are dropped; the remaining routes keep the slot
    /// position as their vehicle id.
    pub fn build_output(&self, routes: &[Vec<usize>]) -> VrpOutput {
        let built = routes
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_empty())
            .map(|(vehicle_id, r)| self.build_route(vehicle_id, r).0)
            .collect();
        VrpOutput::new(built)
    }

    /// Checks that an output partitions the customers exactly, respects
    /// capacity on every route, and uses no more routes than vehicles.
    pub fn validate(&self, output: &VrpOutput) -> Vec<Violation> {
        validate_output(self.input, output)
    }
}

/// Checks an output against `input`: every customer visited exactly once,
/// no unknown stops, no route over capacity, and no more routes than
/// vehicles.
pub fn validate_output(input: &VrpInput, output: &VrpOutput) -> Vec<Violation> {
    let mut violations = Vec::new();

    if output.num_routes() > input.vehicle_count() {
        violations.push(Violation::new(ViolationType::FleetExceeded {
            routes: output.num_routes(),
            vehicles: input.vehicle_count(),
        }));
    }

    let mut visits: HashMap<usize, usize> = input.customers().iter().map(|c| (c.id(), 0)).collect();

    for (route_index, route) in output.routes().iter().enumerate() {
        let load: u64 = route.stops().iter().map(|l| u64::from(l.demand())).sum();
        if load > u64::from(input.capacity()) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                load,
                capacity: input.capacity(),
            }));
        }
        for stop in route.stops() {
            match visits.get_mut(&stop.id()) {
                Some(count) => {
                    *count += 1;
                    if *count == 2 {
                        violations.push(Violation::new(ViolationType::DuplicateVisit {
                            location_id: stop.id(),
                        }));
                    }
                }
                None => violations.push(Violation::new(ViolationType::UnknownLocation {
                    location_id: stop.id(),
                })),
            }
        }
    }

    for c in input.customers() {
        if visits.get(&c.id()).copied() == Some(0) {
            violations.push(Violation::new(ViolationType::MissingLocation {
                location_id: c.id(),
            }));
        }
    }

    violations
}
