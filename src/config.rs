//! Solver configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annealing::AnnealingConfig;
use crate::distance::MetricKind;
use crate::error::{ConfigError, LoadConfigError};
use crate::solver::SolverMode;

/// Everything needed to assemble a [`VrpSolver`](crate::solver::VrpSolver).
///
/// Missing fields take their defaults, so a JSON file only needs the values
/// it changes.
///
/// # Examples
///
/// ```
/// use u_dvrp::config::SolverConfig;
/// use u_dvrp::distance::MetricKind;
/// use u_dvrp::solver::SolverMode;
///
/// let config = SolverConfig::from_json(
///     r#"{ "mode": "default", "metric": "rounded", "annealing": { "seed": 7 } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.mode, SolverMode::Default);
/// assert_eq!(config.metric, MetricKind::Rounded);
/// assert_eq!(config.annealing.seed, Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Which strategy the solver runs.
    pub mode: SolverMode,
    /// How leg costs are measured.
    pub metric: MetricKind,
    /// Annealing parameters, used in [`SolverMode::Dynamic`].
    pub annealing: AnnealingConfig,
}

impl SolverConfig {
    /// Sets the solver mode.
    pub fn with_mode(mut self, mode: SolverMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the annealing parameters.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    /// Checks every nested parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.annealing.validate()
    }

    /// Parses and validates a JSON document.
    pub fn from_json(text: &str) -> Result<Self, LoadConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dynamic_euclidean() {
        let config = SolverConfig::default();
        assert_eq!(config.mode, SolverMode::Dynamic);
        assert_eq!(config.metric, MetricKind::Euclidean);
        assert_eq!(config.annealing, AnnealingConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = SolverConfig::from_json("{}").expect("valid");
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SolverConfig::from_json(r#"{ "annealing": { "cooling_rate": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, LoadConfigError::Invalid(ConfigError::CoolingRate(_))));

        let err = SolverConfig::from_json(r#"{ "mode": "fastest" }"#).unwrap_err();
        assert!(matches!(err, LoadConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SolverConfig::from_json_file("/no/such/config.json").unwrap_err();
        assert!(matches!(err, LoadConfigError::Read { .. }));
        assert!(err.to_string().contains("/no/such/config.json"));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = SolverConfig::default()
            .with_mode(SolverMode::Default)
            .with_metric(MetricKind::Rounded)
            .with_annealing(AnnealingConfig::default().with_seed(3));
        let text = serde_json::to_string(&config).expect("serializable");
        assert_eq!(SolverConfig::from_json(&text).expect("valid"), config);
    }
}
