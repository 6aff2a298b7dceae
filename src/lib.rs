//! # u-dvrp
//!
//! Dynamic capacitated vehicle routing: the problem instance is pulled fresh
//! from a data provider on every solve, handed to a pluggable solution
//! strategy, and the resulting routes are reported.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, VrpInput, Route, VrpOutput)
//! - [`distance`] — Distance metrics and the dense distance matrix
//! - [`evaluation`] — Route building and output validation
//! - [`constructive`] — Nearest-neighbor construction
//! - [`annealing`] — Simulated annealing engine
//! - [`strategy`] — Solution strategies (constructive, simulated annealing)
//! - [`data`] — Instance sources (TSPLIB/CVRPLIB files, in-memory)
//! - [`provider`] — Strategy runner with output validation
//! - [`solver`] — Orchestration and outcome reporting
//! - [`config`] — Serializable solver configuration
//! - [`error`] — Error types

pub mod annealing;
pub mod config;
pub mod constructive;
pub mod data;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod provider;
pub mod solver;
pub mod strategy;
