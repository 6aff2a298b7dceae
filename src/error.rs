//! Error types.

use thiserror::Error;

/// An instance violates a data-model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("location id {0} appears more than once")]
    DuplicateLocationId(usize),
    #[error("depot id {0} also appears as a customer")]
    DepotInCustomers(usize),
    #[error("vehicle capacity must be positive")]
    ZeroCapacity,
    #[error("at least one vehicle is required")]
    NoVehicles,
}

/// An instance file could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("DIMENSION is {declared} but {found} nodes are listed")]
    DimensionMismatch { declared: usize, found: usize },
    #[error("depot {0} has no coordinates")]
    UnknownDepot(usize),
    #[error("demand given for unknown node {0}")]
    UnknownNode(usize),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Why no capacity-respecting assignment exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// A single customer does not fit in an empty vehicle.
    DemandExceedsCapacity {
        location_id: usize,
        demand: u32,
        capacity: u32,
    },
    /// The fleet cannot absorb every customer.
    InsufficientFleet { unassigned: Vec<usize> },
}

impl std::fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DemandExceedsCapacity {
                location_id,
                demand,
                capacity,
            } => write!(
                f,
                "location {location_id} demands {demand}, vehicle capacity is {capacity}"
            ),
            Self::InsufficientFleet { unassigned } => {
                write!(f, "{} location(s) left without a vehicle", unassigned.len())
            }
        }
    }
}

/// A strategy failed to produce an output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("infeasible instance: {0}")]
    Infeasible(InfeasibleReason),
}

/// A configuration value is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial temperature must be finite and positive, got {0}")]
    InitialTemperature(f64),
    #[error("minimum temperature must be finite and positive, got {0}")]
    MinTemperature(f64),
    #[error("cooling rate must lie strictly between 0 and 1, got {0}")]
    CoolingRate(f64),
    #[error("at least one move attempt per iteration is required")]
    MoveAttempts,
}

/// A solver configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
