//! Distance functions and matrices.
//!
//! The distance function is a pluggable [`DistanceMetric`]; a solve builds one
//! dense [`DistanceMatrix`] from it.

mod matrix;
mod metric;

pub use matrix::DistanceMatrix;
pub use metric::{DistanceMetric, Euclidean, MetricKind, RoundedEuclidean};
