//! Repeated-run probe for the racy scenarios.
//!
//! A single racy run proves nothing either way; the probe runs a scenario
//! many times with derived seeds and tallies how often each fault kind
//! shows up. Zero faults across every run of a racy scenario means the
//! hazard has been masked somewhere, which the report flags as suspicious
//! rather than celebrating as success.

use crate::error::FaultKind;
use crate::scenario::{run_scenario, Expectation, Outcome, ScenarioConfig, ScenarioKind};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProbeConfig {
    pub kind: ScenarioKind,
    pub runs: u32,
    pub population: usize,
    pub seed: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::RaceCursor,
            runs: 100,
            population: 1000,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub config: ProbeConfig,
    pub fault_runs: u32,
    pub clean_runs: u32,
    pub bounds_faults: u64,
    pub conflict_faults: u64,
    /// Set when a racy scenario produced no fault in any run.
    pub suspicious: bool,
}

impl ProbeReport {
    pub fn passed(&self) -> bool {
        !self.suspicious
    }

    pub fn generate_text(&self) -> String {
        let mut out = String::new();

        out.push_str("=== Race Probe Report ===\n\n");
        out.push_str(&format!("Scenario: {}\n", self.config.kind.name()));
        out.push_str(&format!(
            "Runs: {} (population {}, seed {})\n",
            self.config.runs, self.config.population, self.config.seed
        ));
        out.push_str(&format!("Fault runs: {}\n", self.fault_runs));
        out.push_str(&format!("Clean runs: {}\n", self.clean_runs));
        out.push_str(&format!("Bounds violations: {}\n", self.bounds_faults));
        out.push_str(&format!("Structural conflicts: {}\n", self.conflict_faults));

        out.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.suspicious {
                "SUSPICIOUS: no fault observed; the hazard looks masked"
            } else {
                "HAZARD OBSERVED"
            }
        ));

        out
    }
}

/// Run the scenario `config.runs` times with derived seeds and tally
/// per-kind fault counts across all workers.
pub fn run_probe(config: ProbeConfig) -> ProbeReport {
    let mut fault_runs = 0;
    let mut clean_runs = 0;
    let mut bounds_faults = 0;
    let mut conflict_faults = 0;

    for run in 0..config.runs {
        let scenario_config = ScenarioConfig {
            population: config.population,
            sample_every: 0,
            seed: config.seed.wrapping_add(u64::from(run)),
        };
        let report = run_scenario(config.kind, &scenario_config);

        let mut run_faulted = false;
        for worker in &report.workers {
            if let Outcome::Faulted { fault, .. } = worker.outcome {
                run_faulted = true;
                match fault.kind() {
                    FaultKind::BoundsViolation => bounds_faults += 1,
                    FaultKind::StructuralConflict => conflict_faults += 1,
                }
            }
        }

        if run_faulted {
            fault_runs += 1;
        } else {
            clean_runs += 1;
        }
        tracing::debug!(run, run_faulted, "probe run finished");
    }

    let suspicious = config.kind.expectation() == Expectation::Racy && fault_runs == 0;

    ProbeReport {
        config,
        fault_runs,
        clean_runs,
        bounds_faults,
        conflict_faults,
        suspicious,
    }
}
