//! Location type.

use serde::{Deserialize, Serialize};

/// A point in the plane that a vehicle visits (or departs from, for the depot).
///
/// Locations are immutable once created and shared by reference between the
/// problem input and every route that visits them.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::Location;
///
/// let depot = Location::depot(1, 35.0, 35.0);
/// assert_eq!(depot.id(), 1);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Location::new(2, 41.0, 49.0, 10);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: usize,
    x: f64,
    y: f64,
    demand: u32,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: usize, x: f64, y: f64, demand: u32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates a depot location (no demand).
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, 0)
    }

    /// Identifier, unique within one instance.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand served at this location.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
