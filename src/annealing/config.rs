//! Simulated annealing configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration parameters for the simulated annealing engine.
///
/// The temperature follows a geometric schedule `T(k+1) = T(k) * cooling_rate`
/// and the run stops once `T < min_temperature` or `max_iterations` is
/// reached, whichever comes first.
///
/// # Examples
///
/// ```
/// use u_dvrp::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.99)
///     .with_seed(42);
/// assert_eq!(config.initial_temperature, 50.0);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature `T0`.
    pub initial_temperature: f64,
    /// Geometric cooling factor `alpha`, in (0, 1).
    pub cooling_rate: f64,
    /// The run stops once the temperature drops below this value.
    pub min_temperature: f64,
    /// Hard cap on the number of iterations.
    pub max_iterations: usize,
    /// Move draws per iteration before the iteration becomes a no-op.
    pub max_move_attempts: usize,
    /// Random seed (None for OS entropy, non-deterministic).
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.999,
            min_temperature: 1e-3,
            max_iterations: 50_000,
            max_move_attempts: 32,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the geometric cooling factor.
    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    /// Sets the minimum temperature.
    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the number of move draws per iteration.
    pub fn with_max_move_attempts(mut self, n: usize) -> Self {
        self.max_move_attempts = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(ConfigError::InitialTemperature(self.initial_temperature));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err(ConfigError::MinTemperature(self.min_temperature));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::CoolingRate(self.cooling_rate));
        }
        if self.max_move_attempts == 0 {
            return Err(ConfigError::MoveAttempts);
        }
        Ok(())
    }

    /// Creates a fresh random source for one run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
