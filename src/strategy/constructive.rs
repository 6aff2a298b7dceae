//! Nearest-neighbor baseline strategy.

use std::sync::Arc;

use crate::constructive::nearest_neighbor;
use crate::distance::{DistanceMatrix, DistanceMetric, Euclidean};
use crate::error::StrategyError;
use crate::evaluation::RouteEvaluator;
use crate::models::{VrpInput, VrpOutput};

use super::SolutionStrategy;

/// Builds routes with the nearest-neighbor heuristic and stops there.
///
/// Deterministic: the same input always yields the same output.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::{Location, VrpInput};
/// use u_dvrp::strategy::{ConstructiveStrategy, SolutionStrategy};
///
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![Location::new(1, 3.0, 4.0, 1), Location::new(2, 6.0, 8.0, 1)],
///     1,
///     10,
/// )
/// .unwrap();
/// let output = ConstructiveStrategy::default().optimize(&input).unwrap();
/// assert_eq!(output.num_routes(), 1);
/// assert!((output.total_cost() - 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ConstructiveStrategy {
    metric: Arc<dyn DistanceMetric>,
}

impl ConstructiveStrategy {
    /// Creates a strategy measuring legs with `metric`.
    pub fn new(metric: Arc<dyn DistanceMetric>) -> Self {
        Self { metric }
    }

    /// The distance metric in use.
    pub fn metric(&self) -> &dyn DistanceMetric {
        self.metric.as_ref()
    }

    /// Builds the distance matrix for `input` with this strategy's metric.
    pub(crate) fn distances(&self, input: &VrpInput) -> DistanceMatrix {
        DistanceMatrix::from_input(input, self.metric())
    }

    /// One stop sequence per vehicle slot, in solver indices.
    pub(crate) fn initial_routes(
        &self,
        input: &VrpInput,
        distances: &DistanceMatrix,
    ) -> Result<Vec<Vec<usize>>, StrategyError> {
        nearest_neighbor(input, distances).map_err(StrategyError::Infeasible)
    }
}

impl Default for ConstructiveStrategy {
    fn default() -> Self {
        Self::new(Arc::new(Euclidean))
    }
}

impl SolutionStrategy for ConstructiveStrategy {
    fn name(&self) -> &str {
        "nearest-neighbor"
    }

    fn optimize(&self, input: &VrpInput) -> Result<VrpOutput, StrategyError> {
        let distances = self.distances(input);
        let routes = self.initial_routes(input, &distances)?;
        Ok(RouteEvaluator::new(input, &distances).build_output(&routes))
    }
}
