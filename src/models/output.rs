//! Solver output and violation types.

use std::sync::Arc;

use serde::Serialize;

use super::{Location, Route};

/// A type of constraint violation found when checking an output.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the output.
        route_index: usize,
        /// Load on the route.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// A customer is visited more than once.
    DuplicateVisit {
        /// Location id.
        location_id: usize,
    },
    /// A customer of the input is not visited.
    MissingLocation {
        /// Location id.
        location_id: usize,
    },
    /// A stop does not belong to the input's customers.
    UnknownLocation {
        /// Location id.
        location_id: usize,
    },
    /// More routes than vehicles.
    FleetExceeded {
        /// Routes in the output.
        routes: usize,
        /// Vehicles available.
        vehicles: usize,
    },
}

/// A constraint violation in an output.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// The result of one solve: the non-empty routes and their total cost.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::VrpOutput;
///
/// let out = VrpOutput::empty();
/// assert_eq!(out.num_routes(), 0);
/// assert_eq!(out.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct VrpOutput {
    routes: Vec<Route>,
    total_cost: f64,
}

impl VrpOutput {
    /// Creates an output from finished routes.
    ///
    /// The total cost is the sum of the route distances.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_cost = routes.iter().map(|r| r.total_distance()).sum();
        Self { routes, total_cost }
    }

    /// An output with no routes and zero cost.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Routes in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Sum of distances over every leg of every route.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Total number of stops across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// All visited locations, route by route in visit order.
    pub fn locations(&self) -> Vec<Arc<Location>> {
        self.routes
            .iter()
            .flat_map(|r| r.stops().iter().cloned())
            .collect()
    }
}
