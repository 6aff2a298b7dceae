//! Instance-file data provider.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::VrpInput;

use super::{parse_instance, VrpDataProvider};

/// The instance shipped with the crate, used when no file is given.
pub const BUNDLED_INSTANCE: &str = include_str!("../../resources/default.vrp");

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Bundled,
}

/// Reads a TSPLIB/CVRPLIB instance on every call.
///
/// The file is re-read each time [`input`](VrpDataProvider::input) runs, so
/// editing it between two solves yields the refreshed instance. Missing,
/// unreadable, or malformed files are logged and produce `None`.
///
/// # Examples
///
/// ```
/// use u_dvrp::data::{FileDataProvider, VrpDataProvider};
///
/// let provider = FileDataProvider::bundled();
/// let input = provider.input().unwrap();
/// assert!(input.num_customers() > 0);
///
/// let missing = FileDataProvider::new("/nonexistent/instance.vrp");
/// assert!(missing.input().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FileDataProvider {
    source: Source,
}

impl FileDataProvider {
    /// Reads the instance at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Path(path.into()),
        }
    }

    /// Uses [`BUNDLED_INSTANCE`].
    pub fn bundled() -> Self {
        Self {
            source: Source::Bundled,
        }
    }

    /// The file path, or `None` for the bundled instance.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Path(path) => Some(path),
            Source::Bundled => None,
        }
    }

    fn read(&self) -> Option<Cow<'static, str>> {
        match &self.source {
            Source::Bundled => Some(Cow::Borrowed(BUNDLED_INSTANCE)),
            Source::Path(path) => match std::fs::read_to_string(path) {
                Ok(text) => Some(Cow::Owned(text)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot read instance file");
                    None
                }
            },
        }
    }

    fn origin(&self) -> String {
        match &self.source {
            Source::Path(path) => path.display().to_string(),
            Source::Bundled => "<bundled>".to_string(),
        }
    }
}

impl VrpDataProvider for FileDataProvider {
    fn input(&self) -> Option<VrpInput> {
        let text = self.read()?;
        if text.trim().is_empty() {
            warn!(source = %self.origin(), "instance file is empty");
            return None;
        }
        match parse_instance(&text) {
            Ok(parsed) => {
                debug!(
                    source = %self.origin(),
                    name = parsed.name.as_deref().unwrap_or("-"),
                    edge_weight_type = parsed.edge_weight_type.as_deref().unwrap_or("-"),
                    customers = parsed.input.num_customers(),
                    vehicles = parsed.input.vehicle_count(),
                    capacity = parsed.input.capacity(),
                    "instance loaded"
                );
                Some(parsed.input)
            }
            Err(e) => {
                warn!(source = %self.origin(), error = %e, "malformed instance file");
                None
            }
        }
    }
}
