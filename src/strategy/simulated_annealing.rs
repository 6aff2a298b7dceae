//! Simulated annealing strategy.

use tracing::debug;

use crate::annealing::{AnnealingConfig, AnnealingEngine, FlatSolution};
use crate::error::{ConfigError, StrategyError};
use crate::evaluation::RouteEvaluator;
use crate::models::{VrpInput, VrpOutput};

use super::{ConstructiveStrategy, SolutionStrategy};

/// Starts from the nearest-neighbor solution and improves it by simulated
/// annealing.
///
/// Every call to [`optimize`](SolutionStrategy::optimize) builds a fresh
/// engine and random source, so runs are independent. With a seed set in the
/// configuration the same input always yields the same output.
///
/// # Examples
///
/// ```
/// use u_dvrp::annealing::AnnealingConfig;
/// use u_dvrp::models::{Location, VrpInput};
/// use u_dvrp::strategy::{ConstructiveStrategy, SimulatedAnnealingStrategy, SolutionStrategy};
///
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![
///         Location::new(1, 1.0, 0.0, 1),
///         Location::new(2, 0.0, 1.0, 1),
///         Location::new(3, -1.0, 0.0, 1),
///         Location::new(4, 0.0, -1.0, 1),
///     ],
///     2,
///     2,
/// )
/// .unwrap();
/// let strategy = SimulatedAnnealingStrategy::new(
///     ConstructiveStrategy::default(),
///     AnnealingConfig::default().with_seed(7),
/// )
/// .unwrap();
/// let output = strategy.optimize(&input).unwrap();
/// assert_eq!(output.num_served(), 4);
/// assert!(output.total_cost() <= 8.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingStrategy {
    constructive: ConstructiveStrategy,
    config: AnnealingConfig,
}

impl SimulatedAnnealingStrategy {
    /// Creates the strategy; `constructive` supplies the starting solution
    /// and the distance metric.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter of `config`.
    pub fn new(constructive: ConstructiveStrategy, config: AnnealingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { constructive, config })
    }

    /// The annealing parameters.
    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }
}

impl SolutionStrategy for SimulatedAnnealingStrategy {
    fn name(&self) -> &str {
        "simulated-annealing"
    }

    fn optimize(&self, input: &VrpInput) -> Result<VrpOutput, StrategyError> {
        let distances = self.constructive.distances(input);
        let routes = self.constructive.initial_routes(input, &distances)?;
        let evaluator = RouteEvaluator::new(input, &distances);
        if input.num_customers() == 0 {
            return Ok(evaluator.build_output(&routes));
        }

        let demands: Vec<u32> = input.locations().map(|l| l.demand()).collect();
        let initial = FlatSolution::new(&routes, &demands, &distances);
        let engine = AnnealingEngine::new(&distances, &demands, input.capacity(), &self.config);
        let outcome = engine.run(initial, &mut self.config.rng());

        debug!(
            initial_cost = outcome.initial_cost,
            best_cost = outcome.best.cost(),
            iterations = outcome.stats.iterations,
            "annealing improved constructive start"
        );
        Ok(evaluator.build_output(&outcome.best.to_routes()))
    }
}
