//! Route construction and output checking.

mod evaluator;

pub use evaluator::{validate_output, RouteEvaluator};
