//! Distance functions between locations.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::Location;

/// Computes the travel cost of one leg between two locations.
///
/// # Examples
///
/// ```
/// use u_dvrp::distance::{DistanceMetric, Euclidean, RoundedEuclidean};
/// use u_dvrp::models::Location;
///
/// let a = Location::new(0, 0.0, 0.0, 0);
/// let b = Location::new(1, 1.0, 1.0, 0);
/// assert!((Euclidean.distance(&a, &b) - 2f64.sqrt()).abs() < 1e-12);
/// assert_eq!(RoundedEuclidean.distance(&a, &b), 1.0);
/// ```
pub trait DistanceMetric: Debug + Send + Sync {
    /// Cost of travelling from `from` to `to`.
    fn distance(&self, from: &Location, to: &Location) -> f64;
}

/// Straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, from: &Location, to: &Location) -> f64 {
        from.distance_to(to)
    }
}

/// Euclidean distance rounded to the nearest integer (TSPLIB `EUC_2D`).
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundedEuclidean;

impl DistanceMetric for RoundedEuclidean {
    fn distance(&self, from: &Location, to: &Location) -> f64 {
        (from.distance_to(to) + 0.5).floor()
    }
}

/// Serializable choice of [`DistanceMetric`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    #[default]
    Euclidean,
    Rounded,
}

impl MetricKind {
    /// Returns the metric implementation for this kind.
    pub fn metric(self) -> Arc<dyn DistanceMetric> {
        match self {
            MetricKind::Euclidean => Arc::new(Euclidean),
            MetricKind::Rounded => Arc::new(RoundedEuclidean),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_half_up() {
        let a = Location::new(0, 0.0, 0.0, 0);
        let b = Location::new(1, 2.5, 0.0, 0);
        assert_eq!(RoundedEuclidean.distance(&a, &b), 3.0);
    }

    #[test]
    fn test_metric_kind() {
        let a = Location::new(0, 0.0, 0.0, 0);
        let b = Location::new(1, 3.0, 4.0, 0);
        assert_eq!(MetricKind::Euclidean.metric().distance(&a, &b), 5.0);
        assert_eq!(MetricKind::default(), MetricKind::Euclidean);
        let parsed: MetricKind = serde_json::from_str("\"rounded\"").expect("valid");
        assert_eq!(parsed, MetricKind::Rounded);
    }
}
