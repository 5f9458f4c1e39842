//! Property checks over arbitrary population sizes.

use failfast_lab::{run_scenario, Fault, Outcome, ScenarioConfig, ScenarioKind};
use proptest::prelude::*;

fn config(population: usize) -> ScenarioConfig {
    ScenarioConfig {
        population,
        sample_every: 0,
        seed: 1,
    }
}

proptest! {
    #[test]
    fn descending_drain_always_empties(n in 0usize..300) {
        let report = run_scenario(ScenarioKind::DrainDescending, &config(n));
        let worker = &report.workers[0];

        prop_assert_eq!(worker.outcome, Outcome::Completed);
        prop_assert_eq!(worker.visited, n);
        prop_assert_eq!(worker.final_len, 0);
    }

    #[test]
    fn owned_drain_always_empties(n in 0usize..300) {
        let report = run_scenario(ScenarioKind::CursorOwned, &config(n));
        let worker = &report.workers[0];

        prop_assert_eq!(worker.outcome, Outcome::Completed);
        prop_assert_eq!(worker.visited, n);
        prop_assert_eq!(worker.final_len, 0);
    }

    #[test]
    fn ascending_drain_faults_exactly_at_the_halfway_point(n in 2usize..300) {
        let report = run_scenario(ScenarioKind::DrainAscending, &config(n));

        match report.workers[0].outcome {
            Outcome::Faulted { fault: Fault::BoundsViolation { index, len }, .. } => {
                prop_assert_eq!(index, n.div_ceil(2));
                prop_assert_eq!(len, n / 2);
            }
            other => prop_assert!(false, "expected a bounds violation, got {:?}", other),
        }
    }

    #[test]
    fn cursor_direct_conflicts_on_step_two(n in 2usize..300) {
        let report = run_scenario(ScenarioKind::CursorDirect, &config(n));

        match report.workers[0].outcome {
            Outcome::Faulted { fault: Fault::StructuralConflict { .. }, step } => {
                prop_assert_eq!(step, 2);
            }
            other => prop_assert!(false, "expected a structural conflict, got {:?}", other),
        }
    }
}
