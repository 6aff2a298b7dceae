//! In-memory data provider.

use parking_lot::RwLock;

use crate::models::VrpInput;

use super::VrpDataProvider;

/// Hands out clones of an in-memory snapshot.
///
/// [`replace`](StaticDataProvider::replace) swaps the snapshot between solves
/// through a shared reference, so a provider held by a solver can still be
/// refreshed from outside.
///
/// # Examples
///
/// ```
/// use u_dvrp::data::{StaticDataProvider, VrpDataProvider};
/// use u_dvrp::models::{Location, VrpInput};
///
/// let provider = StaticDataProvider::default();
/// assert!(provider.input().is_none());
///
/// let input = VrpInput::new(Location::depot(0, 0.0, 0.0), vec![], 1, 10).unwrap();
/// provider.replace(Some(input));
/// assert!(provider.input().is_some());
/// ```
#[derive(Debug, Default)]
pub struct StaticDataProvider {
    input: RwLock<Option<VrpInput>>,
}

impl StaticDataProvider {
    /// Creates a provider holding `input`.
    pub fn new(input: VrpInput) -> Self {
        Self {
            input: RwLock::new(Some(input)),
        }
    }

    /// Swaps in a new snapshot and returns the previous one.
    pub fn replace(&self, input: Option<VrpInput>) -> Option<VrpInput> {
        std::mem::replace(&mut *self.input.write(), input)
    }
}

impl VrpDataProvider for StaticDataProvider {
    fn input(&self) -> Option<VrpInput> {
        self.input.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use std::sync::Arc;

    fn snapshot(customers: usize) -> VrpInput {
        let customers = (1..=customers)
            .map(|i| Location::new(i, i as f64, 0.0, 1))
            .collect();
        VrpInput::new(Location::depot(0, 0.0, 0.0), customers, 2, 10).expect("valid")
    }

    #[test]
    fn test_returns_clone_sharing_locations() {
        let provider = StaticDataProvider::new(snapshot(3));
        let a = provider.input().expect("present");
        let b = provider.input().expect("present");
        assert_eq!(a.num_customers(), 3);
        assert!(Arc::ptr_eq(a.location(1), b.location(1)));
    }

    #[test]
    fn test_replace() {
        let provider = StaticDataProvider::new(snapshot(2));
        let previous = provider.replace(Some(snapshot(5)));
        assert_eq!(previous.map(|i| i.num_customers()), Some(2));
        assert_eq!(provider.input().map(|i| i.num_customers()), Some(5));

        provider.replace(None);
        assert!(provider.input().is_none());
    }
}
