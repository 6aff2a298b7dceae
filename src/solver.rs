//! Solver orchestration.
//!
//! [`VrpSolver`] ties one solve together: pull a snapshot from the data
//! provider, hand it to the solution provider, report the outcome. Default
//! and dynamic solvers are the same type configured with a [`SolverMode`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::data::VrpDataProvider;
use crate::error::ConfigError;
use crate::models::VrpOutput;
use crate::provider::SolutionProvider;
use crate::strategy::{ConstructiveStrategy, SimulatedAnnealingStrategy, SolutionStrategy};

/// Which strategy a solver runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    /// Nearest-neighbor construction only.
    Default,
    /// Nearest-neighbor start improved by simulated annealing.
    #[default]
    Dynamic,
}

impl SolverMode {
    /// Lower-case name used in logs and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverMode::Default => "default",
            SolverMode::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a solve produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveFailure {
    /// The data provider had no instance.
    DataUnavailable,
    /// The strategy found no valid assignment.
    NoSolution,
}

impl fmt::Display for SolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveFailure::DataUnavailable => f.write_str("no input data available"),
            SolveFailure::NoSolution => f.write_str("no solution found"),
        }
    }
}

/// Receives the outcome of every solve.
pub trait SolveReporter: Send + Sync {
    /// Called with the output of a successful solve.
    fn success(&self, output: &VrpOutput);
    /// Called when a solve produced nothing.
    fn failure(&self, failure: SolveFailure);
}

/// Reports through `tracing`, tagging each line with a label.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    label: String,
}

impl TracingReporter {
    /// Creates a reporter whose lines carry `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl SolveReporter for TracingReporter {
    fn success(&self, output: &VrpOutput) {
        info!(
            solver = %self.label,
            routes = output.num_routes(),
            served = output.num_served(),
            total_cost = output.total_cost(),
            "solve succeeded"
        );
    }

    fn failure(&self, failure: SolveFailure) {
        warn!(solver = %self.label, %failure, "solve failed");
    }
}

/// Runs the data provider → solution provider pipeline.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_dvrp::config::SolverConfig;
/// use u_dvrp::data::FileDataProvider;
/// use u_dvrp::solver::{SolverMode, VrpSolver};
///
/// let config = SolverConfig::default().with_mode(SolverMode::Default);
/// let solver = VrpSolver::from_config(&config, Arc::new(FileDataProvider::bundled())).unwrap();
/// let output = solver.solve().unwrap();
/// assert!(output.num_routes() > 0);
/// ```
pub struct VrpSolver {
    data: Arc<dyn VrpDataProvider>,
    solutions: SolutionProvider,
    reporter: Box<dyn SolveReporter>,
}

impl VrpSolver {
    /// Assembles a solver from its parts.
    pub fn new(
        data: Arc<dyn VrpDataProvider>,
        solutions: SolutionProvider,
        reporter: Box<dyn SolveReporter>,
    ) -> Self {
        Self {
            data,
            solutions,
            reporter,
        }
    }

    /// Builds the strategy `config` selects and a [`TracingReporter`]
    /// labelled with the mode.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range annealing parameter.
    pub fn from_config(config: &SolverConfig, data: Arc<dyn VrpDataProvider>) -> Result<Self, ConfigError> {
        let constructive = ConstructiveStrategy::new(config.metric.metric());
        let strategy: Box<dyn SolutionStrategy> = match config.mode {
            SolverMode::Default => Box::new(constructive),
            SolverMode::Dynamic => Box::new(SimulatedAnnealingStrategy::new(
                constructive,
                config.annealing.clone(),
            )?),
        };
        Ok(Self::new(
            data,
            SolutionProvider::new(strategy),
            Box::new(TracingReporter::new(config.mode.as_str())),
        ))
    }

    /// Replaces the reporter.
    pub fn with_reporter(mut self, reporter: Box<dyn SolveReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Solves the data provider's current instance.
    ///
    /// Returns `None` when no instance is available (the strategy is not
    /// run) or when the strategy finds no valid assignment.
    pub fn solve(&self) -> Option<VrpOutput> {
        let Some(input) = self.data.input() else {
            self.reporter.failure(SolveFailure::DataUnavailable);
            return None;
        };
        debug!(
            strategy = self.solutions.strategy_name(),
            customers = input.num_customers(),
            vehicles = input.vehicle_count(),
            capacity = input.capacity(),
            "solving"
        );

        match self.solutions.solve(&input) {
            Some(output) => {
                self.reporter.success(&output);
                Some(output)
            }
            None => {
                self.reporter.failure(SolveFailure::NoSolution);
                None
            }
        }
    }
}

impl fmt::Debug for VrpSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VrpSolver")
            .field("solutions", &self.solutions)
            .finish_non_exhaustive()
    }
}
