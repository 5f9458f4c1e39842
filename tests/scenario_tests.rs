//! Cursor- and foreach-based scenarios, plus the exit-code contract.

use failfast_lab::{run_scenario, Fault, Outcome, ScenarioConfig, ScenarioKind};

fn config(population: usize) -> ScenarioConfig {
    ScenarioConfig {
        population,
        sample_every: 0,
        seed: 7,
    }
}

#[test]
fn cursor_direct_faults_on_the_second_visit() {
    for n in [2usize, 3, 100, 10000] {
        let report = run_scenario(ScenarioKind::CursorDirect, &config(n));
        let worker = &report.workers[0];

        match worker.outcome {
            Outcome::Faulted {
                fault: Fault::StructuralConflict { .. },
                step,
            } => assert_eq!(step, 2, "conflict right after the first removal (N={n})"),
            other => panic!("expected a structural conflict for N={n}, got {other:?}"),
        }
        assert_eq!(worker.visited, 1);
        assert_eq!(report.exit_code(), 1);
    }
}

#[test]
fn cursor_direct_completes_for_tiny_sequences() {
    for n in [0usize, 1] {
        let report = run_scenario(ScenarioKind::CursorDirect, &config(n));
        assert_eq!(report.workers[0].outcome, Outcome::Completed);
        assert_eq!(report.exit_code(), 2, "clean run contradicts the fault expectation");
    }
}

#[test]
fn foreach_direct_matches_the_cursor_variant() {
    let report = run_scenario(ScenarioKind::ForeachDirect, &config(50));
    let worker = &report.workers[0];

    match worker.outcome {
        Outcome::Faulted {
            fault: Fault::StructuralConflict { .. },
            step,
        } => assert_eq!(step, 2),
        other => panic!("expected a structural conflict, got {other:?}"),
    }

    let tiny = run_scenario(ScenarioKind::ForeachDirect, &config(1));
    assert_eq!(tiny.workers[0].outcome, Outcome::Completed);
}

#[test]
fn owned_drain_visits_everything_and_empties() {
    for n in [0usize, 1, 1000] {
        let report = run_scenario(ScenarioKind::CursorOwned, &config(n));
        let worker = &report.workers[0];

        assert_eq!(worker.outcome, Outcome::Completed, "owned drain is clean (N={n})");
        assert_eq!(worker.visited, n, "exactly N elements visited (N={n})");
        assert_eq!(worker.final_len, 0);
        assert_eq!(report.exit_code(), 0);
    }
}

#[test]
fn reports_render_the_fault_position() {
    let report = run_scenario(ScenarioKind::CursorDirect, &config(10));
    let text = report.generate_text();

    assert!(text.contains("fault observed: structural-conflict at step 2"));
    assert!(text.contains("=== Result: AS EXPECTED ==="));
}

#[test]
fn reports_serialize_to_json() {
    let report = run_scenario(ScenarioKind::DrainDescending, &config(10));
    let json = serde_json::to_string(&report).expect("report must serialize");

    assert!(json.contains("\"DrainDescending\""));
    assert!(json.contains("\"Completed\""));
}
