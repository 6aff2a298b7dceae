use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use u_dvrp::annealing::AnnealingConfig;
use u_dvrp::config::SolverConfig;
use u_dvrp::data::{StaticDataProvider, VrpDataProvider};
use u_dvrp::error::{InfeasibleReason, StrategyError};
use u_dvrp::evaluation::validate_output;
use u_dvrp::models::{Location, VrpInput, VrpOutput};
use u_dvrp::solver::{SolverMode, VrpSolver};
use u_dvrp::strategy::{ConstructiveStrategy, SimulatedAnnealingStrategy, SolutionStrategy};

prop_compose! {
    fn instance()
    (
        points in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, 0u32..=10), 0..20),
        capacity in 10u32..=30,
        spare in 0usize..3,
    ) -> VrpInput {
        let customers: Vec<Location> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y, demand))| Location::new(i + 1, x, y, demand))
            .collect();
        let total: u32 = customers.iter().map(|c| c.demand()).sum();
        let vehicles = (total.div_ceil(capacity) as usize).max(1) + spare;
        VrpInput::new(Location::depot(0, 0.0, 0.0), customers, vehicles, capacity).expect("generated instance is valid")
    }
}

fn annealing(seed: u64) -> SimulatedAnnealingStrategy {
    SimulatedAnnealingStrategy::new(
        ConstructiveStrategy::default(),
        AnnealingConfig::default().with_max_iterations(2_000).with_seed(seed),
    )
    .expect("valid config")
}

fn route_ids(output: &VrpOutput) -> Vec<Vec<usize>> {
    output.routes().iter().map(|r| r.location_ids()).collect()
}

/// Runs `strategy`, discarding cases the fleet cannot cover.
fn solved(strategy: &dyn SolutionStrategy, input: &VrpInput) -> Result<VrpOutput, TestCaseError> {
    match strategy.optimize(input) {
        Ok(output) => Ok(output),
        Err(StrategyError::Infeasible(InfeasibleReason::InsufficientFleet { .. })) => {
            Err(TestCaseError::reject("fleet too small"))
        }
        Err(e) => Err(TestCaseError::fail(format!("{}: {e}", strategy.name()))),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn annealed_output_partitions_customers(input in instance(), seed in any::<u64>()) {
        let output = solved(&annealing(seed), &input)?;
        prop_assert!(validate_output(&input, &output).is_empty());

        let served: HashSet<usize> = output.locations().iter().map(|l| l.id()).collect();
        let expected: HashSet<usize> = input.customers().iter().map(|c| c.id()).collect();
        prop_assert_eq!(served, expected);
        prop_assert_eq!(output.num_served(), input.num_customers());
    }

    #[test]
    fn every_route_respects_capacity(input in instance(), seed in any::<u64>()) {
        let output = solved(&annealing(seed), &input)?;
        prop_assert!(output.num_routes() <= input.vehicle_count());
        for route in output.routes() {
            prop_assert!(route.total_load() <= u64::from(input.capacity()));
            prop_assert!(!route.is_empty());
        }
    }

    #[test]
    fn tight_fleet_solutions_are_valid(input in instance(), seed in any::<u64>()) {
        let strategies: [Box<dyn SolutionStrategy>; 2] =
            [Box::new(ConstructiveStrategy::default()), Box::new(annealing(seed))];
        for strategy in &strategies {
            // Infeasible is an acceptable answer here; a returned output must be valid.
            let Ok(output) = strategy.optimize(&input) else { continue };
            for route in output.routes() {
                let load: u64 = route.stops().iter().map(|l| u64::from(l.demand())).sum();
                prop_assert_eq!(load, route.total_load());
                prop_assert!(load <= u64::from(input.capacity()), "{} overloads a route", strategy.name());
            }
            prop_assert!(validate_output(&input, &output).is_empty());
            let mut served: Vec<usize> = output.locations().iter().map(|l| l.id()).collect();
            served.sort_unstable();
            let expected: Vec<usize> = input.customers().iter().map(|c| c.id()).collect();
            prop_assert_eq!(served, expected);
        }
    }

    #[test]
    fn annealing_never_worse_than_construction(input in instance(), seed in any::<u64>()) {
        let baseline = solved(&ConstructiveStrategy::default(), &input)?;
        let improved = solved(&annealing(seed), &input)?;
        prop_assert!(improved.total_cost() <= baseline.total_cost() + 1e-6);
    }

    #[test]
    fn fixed_seed_is_reproducible(input in instance(), seed in any::<u64>()) {
        let a = solved(&annealing(seed), &input)?;
        let b = solved(&annealing(seed), &input)?;
        prop_assert_eq!(route_ids(&a), route_ids(&b));
        prop_assert_eq!(a.total_cost(), b.total_cost());
    }

    #[test]
    fn oversized_demand_yields_no_output(input in instance(), extra in 1u32..100) {
        let mut customers: Vec<Location> = input.customers().iter().map(|c| (**c).clone()).collect();
        let id = customers.len() + 1;
        customers.push(Location::new(id, 1.0, 1.0, input.capacity() + extra));
        let broken = VrpInput::new((**input.depot()).clone(), customers, input.vehicle_count(), input.capacity())
            .expect("valid");

        let data: Arc<dyn VrpDataProvider> = Arc::new(StaticDataProvider::new(broken));
        let config = SolverConfig::default().with_mode(SolverMode::Default);
        let solver = VrpSolver::from_config(&config, data).expect("valid config");
        prop_assert!(solver.solve().is_none());
    }
}
