//! Problem instance sources.
//!
//! A [`VrpDataProvider`] yields a fresh [`VrpInput`] snapshot on every call,
//! which is what makes the solver dynamic: the instance may change between
//! two solves.
//!
//! - [`FileDataProvider`] — TSPLIB/CVRPLIB file on disk, or the bundled instance
//! - [`StaticDataProvider`] — in-memory snapshot, replaceable between solves
//! - [`parse_instance`] — the instance-file reader both build on

mod file;
mod parser;
mod static_data;

pub use file::{FileDataProvider, BUNDLED_INSTANCE};
pub use parser::{parse_instance, ParsedInstance};
pub use static_data::StaticDataProvider;

use crate::models::VrpInput;

/// Supplies the problem snapshot for one solve.
///
/// Expected absence (missing file, malformed content, nothing loaded) is
/// `None`, never an error; implementations log the cause themselves.
pub trait VrpDataProvider: Send + Sync {
    /// Returns the current snapshot, if any.
    fn input(&self) -> Option<VrpInput>;
}
