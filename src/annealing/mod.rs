//! Simulated annealing for the capacitated VRP.
//!
//! - [`AnnealingConfig`] — temperature schedule, iteration cap, retry bound, seed
//! - [`FlatSolution`] — allocation-free candidate representation
//! - [`Move`] — intra-route swap, inter-route relocate, inter-route swap
//! - [`AnnealingEngine`] — the `Initializing → Annealing → Terminated` loop

mod config;
mod engine;
mod moves;
mod solution;

pub use config::AnnealingConfig;
pub use engine::{AnnealingEngine, AnnealingOutcome, AnnealingStats, EngineState};
pub use moves::Move;
pub use solution::FlatSolution;
