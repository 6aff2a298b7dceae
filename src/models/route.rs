//! Route type.

use std::sync::Arc;

use serde::Serialize;

use super::Location;

/// An ordered sequence of stops served by one vehicle.
///
/// A route starts and ends at the depot; the depot itself is not stored in
/// `stops`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_dvrp::models::{Location, Route};
///
/// let mut route = Route::new(0);
/// route.push_stop(Arc::new(Location::new(1, 3.0, 4.0, 2)));
/// route.set_total_distance(10.0);
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.total_load(), 2);
/// assert_eq!(route.location_ids(), vec![1]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<Arc<Location>>,
    total_distance: f64,
    total_load: u64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            total_distance: 0.0,
            total_load: 0,
        }
    }

    /// Appends a stop to the end of this route.
    pub fn push_stop(&mut self, location: Arc<Location>) {
        self.total_load += u64::from(location.demand());
        self.stops.push(location);
    }

    /// Vehicle serving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Stops in visit order.
    pub fn stops(&self) -> &[Arc<Location>] {
        &self.stops
    }

    /// Number of stops (excluding the depot).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Location ids in visit order.
    pub fn location_ids(&self) -> Vec<usize> {
        self.stops.iter().map(|l| l.id()).collect()
    }

    /// Distance including both depot legs (set by the evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of demands served.
    pub fn total_load(&self) -> u64 {
        self.total_load
    }

    /// Sets the total distance.
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 0);
        assert_eq!(r.total_distance(), 0.0);
        assert_eq!(r.total_load(), 0);
    }

    #[test]
    fn test_route_push_stop() {
        let mut r = Route::new(1);
        r.push_stop(Arc::new(Location::new(5, 0.0, 1.0, 20)));
        r.push_stop(Arc::new(Location::new(3, 0.0, 2.0, 15)));
        assert_eq!(r.len(), 2);
        assert_eq!(r.location_ids(), vec![5, 3]);
        assert_eq!(r.total_load(), 35);
    }

    #[test]
    fn test_route_load_past_u32() {
        let mut r = Route::new(0);
        r.push_stop(Arc::new(Location::new(1, 1.0, 0.0, 3_000_000_000)));
        r.push_stop(Arc::new(Location::new(2, 2.0, 0.0, 3_000_000_000)));
        assert_eq!(r.total_load(), 6_000_000_000);
    }

    #[test]
    fn test_route_shares_location() {
        let loc = Arc::new(Location::new(1, 0.0, 0.0, 1));
        let mut r = Route::new(0);
        r.push_stop(Arc::clone(&loc));
        assert!(Arc::ptr_eq(&r.stops()[0], &loc));
    }
}
