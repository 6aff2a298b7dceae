//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the core entities: locations with demands, an immutable problem
//! snapshot, routes as ordered sequences of shared locations, and the solver
//! output.

mod input;
mod location;
mod output;
mod route;

pub use input::VrpInput;
pub use location::Location;
pub use output::{Violation, ViolationType, VrpOutput};
pub use route::Route;
