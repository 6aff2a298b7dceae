//! Problem instance snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::InputError;

use super::Location;

/// One immutable snapshot of a capacitated VRP instance.
///
/// Location indices used by the solvers follow the usual convention:
/// index 0 is the depot, indices `1..=n` are the customers in input order.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::{Location, VrpInput};
///
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![Location::new(1, 1.0, 0.0, 3), Location::new(2, 0.0, 1.0, 4)],
///     2,
///     5,
/// )
/// .unwrap();
/// assert_eq!(input.num_customers(), 2);
/// assert_eq!(input.total_demand(), 7);
/// assert_eq!(input.location(2).id(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VrpInput {
    depot: Arc<Location>,
    customers: Vec<Arc<Location>>,
    vehicle_count: usize,
    capacity: u32,
}

impl VrpInput {
    /// Creates a validated instance.
    ///
    /// Fails if a location id repeats, the depot appears among the customers,
    /// the capacity is zero, or the fleet is empty.
    pub fn new(
        depot: Location,
        customers: Vec<Location>,
        vehicle_count: usize,
        capacity: u32,
    ) -> Result<Self, InputError> {
        if capacity == 0 {
            return Err(InputError::ZeroCapacity);
        }
        if vehicle_count == 0 {
            return Err(InputError::NoVehicles);
        }

        let mut seen = HashSet::with_capacity(customers.len());
        for c in &customers {
            if c.id() == depot.id() {
                return Err(InputError::DepotInCustomers(c.id()));
            }
            if !seen.insert(c.id()) {
                return Err(InputError::DuplicateLocationId(c.id()));
            }
        }

        Ok(Self {
            depot: Arc::new(depot),
            customers: customers.into_iter().map(Arc::new).collect(),
            vehicle_count,
            capacity,
        })
    }

    /// The depot every route starts and ends at.
    pub fn depot(&self) -> &Arc<Location> {
        &self.depot
    }

    /// Customers in input order.
    pub fn customers(&self) -> &[Arc<Location>] {
        &self.customers
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Number of vehicles available.
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Capacity of each vehicle.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Location at solver index `index` (0 = depot).
    ///
    /// # Panics
    ///
    /// Panics if `index > num_customers()`.
    pub fn location(&self, index: usize) -> &Arc<Location> {
        if index == 0 {
            &self.depot
        } else {
            &self.customers[index - 1]
        }
    }

    /// All locations in solver index order (depot first).
    pub fn locations(&self) -> impl Iterator<Item = &Arc<Location>> {
        std::iter::once(&self.depot).chain(self.customers.iter())
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> u64 {
        self.customers.iter().map(|c| u64::from(c.demand())).sum()
    }
}
