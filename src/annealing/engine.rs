//! Simulated annealing engine.
//!
//! # Algorithm
//!
//! Starting from a feasible candidate, each iteration draws one random
//! capacity-respecting move, accepts it by the Metropolis criterion
//! (`delta <= 0` always, otherwise with probability `exp(-delta / T)`), keeps
//! the strictly best candidate seen, and cools `T` geometrically.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C. D. & Vecchi, M. P. (1983). "Optimization by
//! Simulated Annealing", *Science* 220(4598), 671-680.

use rand::Rng;
use tracing::debug;

use crate::distance::DistanceMatrix;

use super::{AnnealingConfig, FlatSolution, Move};

/// Lifecycle of one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No candidate loaded yet.
    Initializing,
    /// Iterating.
    Annealing,
    /// Finished; the best candidate is final.
    Terminated,
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnealingStats {
    /// Iterations performed.
    pub iterations: usize,
    /// Moves accepted (improving, equal, or by the Metropolis draw).
    pub accepted: usize,
    /// Worsening moves rejected by the Metropolis draw.
    pub rejected: usize,
    /// Times a new best candidate was captured.
    pub improvements: usize,
    /// Iterations where no feasible move was found within the retry bound.
    pub exhausted: usize,
    /// Temperature when the run stopped.
    pub final_temperature: f64,
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct AnnealingOutcome {
    /// Best candidate seen, cost recomputed from scratch.
    pub best: FlatSolution,
    /// Cost of the starting candidate.
    pub initial_cost: f64,
    /// Run counters.
    pub stats: AnnealingStats,
}

/// Single-run simulated annealing over a [`FlatSolution`].
///
/// The engine is not reusable: build a fresh one per solve.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dvrp::annealing::{AnnealingConfig, AnnealingEngine, EngineState, FlatSolution};
/// use u_dvrp::distance::DistanceMatrix;
///
/// // depot plus 3 customers, symmetric costs
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, 2.0, 1.0,
///     1.0, 0.0, 1.0, 2.0,
///     2.0, 1.0, 0.0, 1.0,
///     1.0, 2.0, 1.0, 0.0,
/// ]).unwrap();
/// let demands = [0, 1, 1, 1];
/// let config = AnnealingConfig::default().with_max_iterations(200).with_seed(1);
///
/// let initial = FlatSolution::new(&[vec![2, 1, 3]], &demands, &dm);
/// let engine = AnnealingEngine::new(&dm, &demands, 3, &config);
/// assert_eq!(engine.state(), EngineState::Initializing);
///
/// let outcome = engine.run(initial, &mut StdRng::seed_from_u64(1));
/// assert!(outcome.best.cost() <= outcome.initial_cost);
/// ```
pub struct AnnealingEngine<'a> {
    distances: &'a DistanceMatrix,
    demands: &'a [u32],
    capacity: u32,
    config: &'a AnnealingConfig,
    state: EngineState,
    current: FlatSolution,
    best: FlatSolution,
    initial_cost: f64,
    temperature: f64,
    iteration: usize,
    stats: AnnealingStats,
}

impl<'a> AnnealingEngine<'a> {
    /// Creates an engine in the [`EngineState::Initializing`] state.
    ///
    /// `demands` is indexed by solver index; `config` is assumed validated.
    pub fn new(
        distances: &'a DistanceMatrix,
        demands: &'a [u32],
        capacity: u32,
        config: &'a AnnealingConfig,
    ) -> Self {
        Self {
            distances,
            demands,
            capacity,
            config,
            state: EngineState::Initializing,
            current: FlatSolution::default(),
            best: FlatSolution::default(),
            initial_cost: 0.0,
            temperature: config.initial_temperature,
            iteration: 0,
            stats: AnnealingStats::default(),
        }
    }

    /// Loads the starting candidate and enters [`EngineState::Annealing`].
    ///
    /// Goes straight to [`EngineState::Terminated`] when the stopping
    /// condition already holds.
    pub fn initialize(&mut self, initial: FlatSolution) {
        self.initial_cost = initial.cost();
        self.best.clone_from(&initial);
        self.current = initial;
        self.temperature = self.config.initial_temperature;
        self.iteration = 0;
        self.state = if self.should_stop() {
            EngineState::Terminated
        } else {
            EngineState::Annealing
        };
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Iterations performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Cost of the best candidate so far.
    pub fn best_cost(&self) -> f64 {
        self.best.cost()
    }

    /// Cost of the current candidate.
    pub fn current_cost(&self) -> f64 {
        self.current.cost()
    }

    /// Performs one iteration; returns the state afterwards.
    ///
    /// Does nothing unless the engine is annealing.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> EngineState {
        if self.state != EngineState::Annealing {
            return self.state;
        }
        let current = &mut self.current;
        let mut drawn = None;
        for _ in 0..self.config.max_move_attempts {
            drawn = Move::draw(current, self.demands, self.capacity, rng);
            if drawn.is_some() {
                break;
            }
        }

        match drawn {
            Some(mv) => {
                let delta = mv.delta(current, self.distances);
                let accept = delta <= 0.0 || rng.random::<f64>() < (-delta / self.temperature).exp();
                if accept {
                    mv.apply(current, self.demands, delta);
                    self.stats.accepted += 1;
                    if current.cost() < self.best.cost() {
                        self.best.clone_from(current);
                        self.stats.improvements += 1;
                    }
                } else {
                    self.stats.rejected += 1;
                }
            }
            None => self.stats.exhausted += 1,
        }

        self.temperature *= self.config.cooling_rate;
        self.iteration += 1;
        if self.should_stop() {
            self.state = EngineState::Terminated;
        }
        self.state
    }

    /// Loads `initial`, iterates until termination, and returns the best
    /// candidate.
    pub fn run<R: Rng>(mut self, initial: FlatSolution, rng: &mut R) -> AnnealingOutcome {
        self.initialize(initial);
        while self.step(rng) == EngineState::Annealing {}
        self.finish()
    }

    /// Consumes the engine and returns the best candidate found so far.
    ///
    /// Before [`AnnealingEngine::initialize`] the best candidate has no routes.
    pub fn finish(self) -> AnnealingOutcome {
        let mut best = self.best;
        best.recompute_cost(self.distances);

        let stats = AnnealingStats {
            iterations: self.iteration,
            final_temperature: self.temperature,
            ..self.stats
        };
        debug!(
            iterations = stats.iterations,
            accepted = stats.accepted,
            rejected = stats.rejected,
            improvements = stats.improvements,
            exhausted = stats.exhausted,
            final_temperature = stats.final_temperature,
            initial_cost = self.initial_cost,
            best_cost = best.cost(),
            "annealing finished"
        );

        AnnealingOutcome {
            best,
            initial_cost: self.initial_cost,
            stats,
        }
    }

    fn should_stop(&self) -> bool {
        self.temperature < self.config.min_temperature || self.iteration >= self.config.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Depot at the origin, 8 customers on a ring of radius 10.
    fn ring() -> (DistanceMatrix, Vec<u32>) {
        let mut pts = vec![(0.0f64, 0.0f64)];
        for k in 0..8 {
            let a = k as f64 * std::f64::consts::PI / 4.0;
            pts.push((10.0 * a.cos(), 10.0 * a.sin()));
        }
        let n = pts.len();
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
                dm.set(i, j, (dx * dx + dy * dy).sqrt());
            }
        }
        let mut demands = vec![1; n];
        demands[0] = 0;
        (dm, demands)
    }

    // Deliberately poor start: opposite points interleaved.
    fn scrambled(dm: &DistanceMatrix, demands: &[u32]) -> FlatSolution {
        FlatSolution::new(&[vec![1, 5, 2, 6], vec![3, 7, 4, 8]], demands, dm)
    }

    #[test]
    fn test_initialize_sets_state() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default();
        let mut engine = AnnealingEngine::new(&dm, &demands, 4, &config);
        assert_eq!(engine.state(), EngineState::Initializing);
        engine.initialize(scrambled(&dm, &demands));
        assert_eq!(engine.state(), EngineState::Annealing);
        assert_eq!(engine.iteration(), 0);
        assert_eq!(engine.temperature(), config.initial_temperature);
        assert_eq!(engine.best_cost(), engine.current_cost());
    }

    #[test]
    fn test_zero_iterations_terminates_immediately() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default().with_max_iterations(0);
        let mut engine = AnnealingEngine::new(&dm, &demands, 4, &config);
        let initial = scrambled(&dm, &demands);
        engine.initialize(initial.clone());
        assert_eq!(engine.state(), EngineState::Terminated);
        let outcome = engine.finish();
        assert_eq!(outcome.best.to_routes(), initial.to_routes());
        assert_eq!(outcome.stats.iterations, 0);
    }

    #[test]
    fn test_temperature_non_increasing_and_positive() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default()
            .with_initial_temperature(5.0)
            .with_cooling_rate(0.9)
            .with_min_temperature(0.01);
        let mut engine = AnnealingEngine::new(&dm, &demands, 4, &config);
        engine.initialize(scrambled(&dm, &demands));
        let mut rng = StdRng::seed_from_u64(11);
        let mut last = engine.temperature();
        while engine.state() == EngineState::Annealing {
            assert!(engine.temperature() > 0.0);
            engine.step(&mut rng);
            assert!(engine.temperature() <= last);
            last = engine.temperature();
        }
        assert!(engine.temperature() < config.min_temperature);
        // 5.0 * 0.9^k < 0.01  ⇔  k ≥ 59
        assert_eq!(engine.iteration(), 59);
    }

    #[test]
    fn test_iteration_cap() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default().with_max_iterations(25);
        let engine = AnnealingEngine::new(&dm, &demands, 4, &config);
        let outcome = engine.run(scrambled(&dm, &demands), &mut StdRng::seed_from_u64(2));
        assert_eq!(outcome.stats.iterations, 25);
        assert_eq!(
            outcome.stats.accepted + outcome.stats.rejected + outcome.stats.exhausted,
            25
        );
    }

    #[test]
    fn test_improves_scrambled_start() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default().with_initial_temperature(10.0);
        let engine = AnnealingEngine::new(&dm, &demands, 4, &config);
        let outcome = engine.run(scrambled(&dm, &demands), &mut StdRng::seed_from_u64(5));
        assert!(outcome.best.cost() < outcome.initial_cost);
        assert!(outcome.stats.improvements > 0);
        assert_eq!(outcome.best.num_stops(), 8);
        for r in 0..outcome.best.num_routes() {
            assert!(outcome.best.load(r) <= 4);
        }
    }

    #[test]
    fn test_best_never_worse_than_start() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default()
            .with_initial_temperature(1e6)
            .with_max_iterations(300);
        for seed in 0..10 {
            let initial = FlatSolution::new(&[vec![1, 2, 3, 4], vec![5, 6, 7, 8]], &demands, &dm);
            let engine = AnnealingEngine::new(&dm, &demands, 4, &config);
            let outcome = engine.run(initial, &mut StdRng::seed_from_u64(seed));
            assert!(outcome.best.cost() <= outcome.initial_cost + 1e-9);
        }
    }

    #[test]
    fn test_exhausted_when_no_move_fits() {
        let (dm, demands) = ring();
        // A single stop on a single route: no move exists.
        let initial = FlatSolution::new(&[vec![3]], &demands, &dm);
        let config = AnnealingConfig::default().with_max_iterations(10);
        let engine = AnnealingEngine::new(&dm, &demands, 1, &config);
        let outcome = engine.run(initial.clone(), &mut StdRng::seed_from_u64(0));
        assert_eq!(outcome.stats.exhausted, 10);
        assert_eq!(outcome.best.to_routes(), initial.to_routes());
        assert!(outcome.stats.final_temperature < config.initial_temperature);
    }

    #[test]
    fn test_seeded_runs_match() {
        let (dm, demands) = ring();
        let config = AnnealingConfig::default().with_max_iterations(2_000);
        let run = |seed| {
            let engine = AnnealingEngine::new(&dm, &demands, 4, &config);
            engine.run(scrambled(&dm, &demands), &mut StdRng::seed_from_u64(seed))
        };
        let (a, b) = (run(99), run(99));
        assert_eq!(a.best, b.best);
        assert_eq!(a.stats, b.stats);
    }
}
