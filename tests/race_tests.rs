//! Two-worker scenarios. Individual interleavings are non-deterministic, so
//! these tests only assert the contractual fault/no-fault classes and the
//! probe's frequency accounting.

use failfast_lab::{
    run_probe, run_scenario, Outcome, ProbeConfig, ScenarioConfig, ScenarioKind,
};

#[test]
fn cursor_race_surfaces_conflicts_across_repeated_runs() {
    let report = run_probe(ProbeConfig {
        kind: ScenarioKind::RaceCursor,
        runs: 100,
        population: 1000,
        seed: 42,
    });

    // Zero faults across 100 runs would mean the hazard got masked.
    assert!(
        report.fault_runs > 0,
        "no fault observed across {} runs: the hazard looks masked",
        report.config.runs
    );
    assert!(!report.suspicious);
    assert!(report.conflict_faults > 0);
    assert_eq!(report.fault_runs + report.clean_runs, 100);
}

#[test]
fn remover_always_completes_its_own_drain() {
    for run in 0..20 {
        let report = run_scenario(
            ScenarioKind::RaceCursor,
            &ScenarioConfig {
                population: 500,
                sample_every: 0,
                seed: run,
            },
        );
        let remover = report
            .workers
            .iter()
            .find(|w| w.label == "remover")
            .expect("remover report");

        assert_eq!(
            remover.outcome,
            Outcome::Completed,
            "cursor-owned removal must never conflict with itself (run {run})"
        );
        assert_eq!(remover.visited, 500);
        assert_eq!(remover.final_len, 0);
    }
}

#[test]
fn foreach_race_surfaces_conflicts() {
    let report = run_probe(ProbeConfig {
        kind: ScenarioKind::RaceForeach,
        runs: 50,
        population: 500,
        seed: 7,
    });

    // The writer desynchronizes its own traversal, so faults show up even
    // when the reader happens to win every race.
    assert!(report.fault_runs > 0);
    assert!(!report.suspicious);
}

#[test]
fn race_reports_carry_both_workers() {
    let report = run_scenario(
        ScenarioKind::RaceCursor,
        &ScenarioConfig {
            population: 200,
            sample_every: 0,
            seed: 3,
        },
    );

    let mut labels: Vec<_> = report.workers.iter().map(|w| w.label).collect();
    labels.sort_unstable();
    assert_eq!(labels, ["reader", "remover"]);
}

#[test]
fn guarded_variant_never_faults() {
    for run in 0..20 {
        let report = run_scenario(
            ScenarioKind::Guarded,
            &ScenarioConfig {
                population: 500,
                sample_every: 0,
                seed: run,
            },
        );

        assert!(
            !report.faulted(),
            "guarded traversals cannot conflict (run {run})"
        );
        assert_eq!(report.exit_code(), 0);

        let drainer = report
            .workers
            .iter()
            .find(|w| w.label == "drainer")
            .expect("drainer report");
        assert_eq!(drainer.visited, 500, "the drainer always gets everything");
    }
}
