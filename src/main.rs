//! Command-line entry point: solve one instance and print its routes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use u_dvrp::config::SolverConfig;
use u_dvrp::data::{FileDataProvider, VrpDataProvider};
use u_dvrp::distance::MetricKind;
use u_dvrp::solver::{SolverMode, VrpSolver};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Instance file (TSPLIB/CVRPLIB); the bundled instance when omitted
    paths: Vec<PathBuf>,

    /// Solver mode (default: from --config, else dynamic)
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Random seed for simulated annealing
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum annealing iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Distance metric
    #[arg(long, value_enum)]
    metric: Option<MetricArg>,

    /// Solver configuration JSON file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Default,
    Dynamic,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Euclidean,
    Rounded,
}

impl Cli {
    fn solver_config(&self) -> Result<SolverConfig, anyhow::Error> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::from_json_file(path)
                .with_context(|| format!("loading solver configuration from {}", path.display()))?,
            None => SolverConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = match mode {
                ModeArg::Default => SolverMode::Default,
                ModeArg::Dynamic => SolverMode::Dynamic,
            };
        }
        if let Some(metric) = self.metric {
            config.metric = match metric {
                MetricArg::Euclidean => MetricKind::Euclidean,
                MetricArg::Rounded => MetricKind::Rounded,
            };
        }
        if let Some(seed) = self.seed {
            config.annealing.seed = Some(seed);
        }
        if let Some(iterations) = self.iterations {
            config.annealing.max_iterations = iterations;
        }
        Ok(config)
    }

    fn data_provider(&self) -> FileDataProvider {
        match self.paths.as_slice() {
            [] => FileDataProvider::bundled(),
            [path] => FileDataProvider::new(path),
            paths => {
                warn!(
                    given = paths.len(),
                    "expected at most one instance file, using the bundled instance"
                );
                FileDataProvider::bundled()
            }
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = cli.solver_config()?;
    let data: Arc<dyn VrpDataProvider> = Arc::new(cli.data_provider());
    let solver = VrpSolver::from_config(&config, data).context("invalid solver configuration")?;

    info!(mode = %config.mode, metric = ?config.metric, "starting solve");
    match solver.solve() {
        Some(output) if cli.json => println!("{}", serde_json::to_string_pretty(&output)?),
        Some(output) => {
            for route in output.routes() {
                info!(
                    vehicle = route.vehicle_id(),
                    load = route.total_load(),
                    distance = route.total_distance(),
                    stops = ?route.location_ids(),
                    "route"
                );
            }
        }
        None => info!("no routes produced"),
    }

    Ok(())
}
