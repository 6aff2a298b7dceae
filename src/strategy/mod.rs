//! Pluggable solution strategies.
//!
//! A [`SolutionStrategy`] turns one [`VrpInput`] snapshot into a
//! [`VrpOutput`] or reports that no capacity-respecting assignment exists.
//!
//! - [`ConstructiveStrategy`] — nearest-neighbor construction only
//! - [`SimulatedAnnealingStrategy`] — constructive start improved by annealing

mod constructive;
mod simulated_annealing;

pub use constructive::ConstructiveStrategy;
pub use simulated_annealing::SimulatedAnnealingStrategy;

use crate::error::StrategyError;
use crate::models::{VrpInput, VrpOutput};

/// Produces routes for a problem snapshot.
///
/// Implementations are chosen once and shared for the lifetime of a solver,
/// so they must not keep per-solve state between calls.
pub trait SolutionStrategy: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Computes routes for `input`.
    ///
    /// # Errors
    ///
    /// [`StrategyError::Infeasible`] when no assignment respecting vehicle
    /// capacity and fleet size exists.
    fn optimize(&self, input: &VrpInput) -> Result<VrpOutput, StrategyError>;
}
