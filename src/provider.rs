//! Solution provider: runs the chosen strategy and vets its output.

use tracing::{error, warn};

use crate::error::StrategyError;
use crate::evaluation::validate_output;
use crate::models::{VrpInput, VrpOutput};
use crate::strategy::SolutionStrategy;

/// Owns one [`SolutionStrategy`] and turns its result into an optional
/// output.
///
/// Infeasible instances and outputs that fail validation both become `None`
/// after being logged.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::{Location, VrpInput};
/// use u_dvrp::provider::SolutionProvider;
/// use u_dvrp::strategy::ConstructiveStrategy;
///
/// let provider = SolutionProvider::new(Box::new(ConstructiveStrategy::default()));
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![Location::new(1, 1.0, 0.0, 20)],
///     1,
///     10,
/// )
/// .unwrap();
/// assert!(provider.solve(&input).is_none());
/// ```
pub struct SolutionProvider {
    strategy: Box<dyn SolutionStrategy>,
}

impl SolutionProvider {
    /// Wraps `strategy`.
    pub fn new(strategy: Box<dyn SolutionStrategy>) -> Self {
        Self { strategy }
    }

    /// Name of the wrapped strategy.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Runs the strategy on `input`.
    pub fn solve(&self, input: &VrpInput) -> Option<VrpOutput> {
        let output = match self.strategy.optimize(input) {
            Ok(output) => output,
            Err(StrategyError::Infeasible(reason)) => {
                warn!(strategy = self.strategy.name(), %reason, "instance is infeasible");
                return None;
            }
        };

        let violations = validate_output(input, &output);
        if !violations.is_empty() {
            error!(
                strategy = self.strategy.name(),
                violations = ?violations,
                "strategy produced an invalid output"
            );
            return None;
        }
        Some(output)
    }
}

impl std::fmt::Debug for SolutionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionProvider")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
