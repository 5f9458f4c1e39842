//! The scenario catalog: one operation per traversal/mutation hazard.
//!
//! Every scenario builds a fresh population of decimal strings, runs one
//! traversal strategy against it, and reports per-worker outcomes. Faults
//! are captured and classified here; they never escape as panics.

mod race;

pub(crate) use race::collect_workers;

use crate::collection::SharedSeq;
use crate::error::Fault;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The scenario catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScenarioKind {
    /// Remove by index from `N-1` down to `0`. Always completes.
    DrainDescending,
    /// Remove by index from `0` up to `N-1`. Walks off the shrinking
    /// sequence by design; do not fix.
    DrainAscending,
    /// Cursor traversal with direct (non-cursor) removal per element.
    CursorDirect,
    /// Cursor traversal removing through the cursor itself. A clean drain.
    CursorOwned,
    /// Implicit for-each traversal with direct removal per element.
    ForeachDirect,
    /// Two workers, two cursors, one of them removing.
    RaceCursor,
    /// Two implicit traversals, one of them removing.
    RaceForeach,
    /// Safe contrast: whole traversals under one exclusive guard.
    Guarded,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 8] = [
        ScenarioKind::DrainDescending,
        ScenarioKind::DrainAscending,
        ScenarioKind::CursorDirect,
        ScenarioKind::CursorOwned,
        ScenarioKind::ForeachDirect,
        ScenarioKind::RaceCursor,
        ScenarioKind::RaceForeach,
        ScenarioKind::Guarded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioKind::DrainDescending => "drain-descending",
            ScenarioKind::DrainAscending => "drain-ascending",
            ScenarioKind::CursorDirect => "cursor-direct",
            ScenarioKind::CursorOwned => "cursor-owned",
            ScenarioKind::ForeachDirect => "foreach-direct",
            ScenarioKind::RaceCursor => "race-cursor",
            ScenarioKind::RaceForeach => "race-foreach",
            ScenarioKind::Guarded => "guarded",
        }
    }

    pub fn about(self) -> &'static str {
        match self {
            ScenarioKind::DrainDescending => {
                "Remove by index from the top down; completes cleanly"
            }
            ScenarioKind::DrainAscending => {
                "Remove by index from the bottom up; walks off the shrinking sequence"
            }
            ScenarioKind::CursorDirect => {
                "Advance a cursor while removing elements behind its back"
            }
            ScenarioKind::CursorOwned => "Drain through the cursor's own removal operation",
            ScenarioKind::ForeachDirect => {
                "For-each traversal while removing elements behind its back"
            }
            ScenarioKind::RaceCursor => {
                "Two threads, two cursors over one sequence, one thread removing"
            }
            ScenarioKind::RaceForeach => {
                "Two threads running for-each traversals, one thread removing"
            }
            ScenarioKind::Guarded => {
                "Safe contrast: each traversal holds an exclusive guard throughout"
            }
        }
    }

    pub fn expectation(self) -> Expectation {
        match self {
            ScenarioKind::DrainDescending | ScenarioKind::CursorOwned | ScenarioKind::Guarded => {
                Expectation::Completes
            }
            ScenarioKind::DrainAscending
            | ScenarioKind::CursorDirect
            | ScenarioKind::ForeachDirect => Expectation::Faults,
            ScenarioKind::RaceCursor | ScenarioKind::RaceForeach => Expectation::Racy,
        }
    }

    pub fn default_population(self) -> usize {
        match self {
            ScenarioKind::RaceCursor | ScenarioKind::RaceForeach | ScenarioKind::Guarded => 1000,
            _ => 10000,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown scenario: {s}"))
    }
}

/// What outcome class a scenario is contracted to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expectation {
    Completes,
    Faults,
    Racy,
}

impl Expectation {
    pub fn describe(self) -> &'static str {
        match self {
            Expectation::Completes => "completes cleanly",
            Expectation::Faults => "faults by design",
            Expectation::Racy => "racy; only the fault class is contractual",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioConfig {
    /// Number of elements to populate before the scenario starts.
    pub population: usize,
    /// Record a trace entry every this many steps. `0` disables sampling.
    pub sample_every: usize,
    /// Seed for worker start staggering in the racy scenarios.
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            population: 10000,
            sample_every: 1000,
            seed: 42,
        }
    }
}

/// How a single worker's run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Completed,
    Faulted { fault: Fault, step: usize },
}

impl Outcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Faulted { .. })
    }

    pub fn fault(&self) -> Option<Fault> {
        match self {
            Outcome::Faulted { fault, .. } => Some(*fault),
            Outcome::Completed => None,
        }
    }
}

/// Observed size after a given step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TraceEvent {
    pub step: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerReport {
    pub label: &'static str,
    pub visited: usize,
    pub final_len: usize,
    pub outcome: Outcome,
    pub trace: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub kind: ScenarioKind,
    pub population: usize,
    pub workers: Vec<WorkerReport>,
}

impl ScenarioReport {
    pub fn faulted(&self) -> bool {
        self.workers.iter().any(|w| w.outcome.is_fault())
    }

    /// Exit-code contract: `0` clean completion where expected, `1` fault
    /// where a fault is the expected outcome, `2` when the outcome
    /// contradicts the scenario's expectation class. Racy scenarios never
    /// return `2`; only their fault class is contractual.
    pub fn exit_code(&self) -> i32 {
        match (self.kind.expectation(), self.faulted()) {
            (Expectation::Completes, false) => 0,
            (Expectation::Completes, true) => 2,
            (Expectation::Faults, true) => 1,
            (Expectation::Faults, false) => 2,
            (Expectation::Racy, false) => 0,
            (Expectation::Racy, true) => 1,
        }
    }

    pub fn generate_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("=== Scenario Report: {} ===\n\n", self.kind.name()));
        out.push_str(&format!("Population: {}\n", self.population));
        out.push_str(&format!(
            "Expectation: {}\n",
            self.kind.expectation().describe()
        ));

        for worker in &self.workers {
            out.push_str(&format!(
                "\nWorker {}: visited {}, final length {}\n",
                worker.label, worker.visited, worker.final_len
            ));
            match &worker.outcome {
                Outcome::Completed => out.push_str("  outcome: completed\n"),
                Outcome::Faulted { fault, step } => out.push_str(&format!(
                    "  outcome: fault observed: {} at step {} ({})\n",
                    fault.kind(),
                    step,
                    fault
                )),
            }
            for event in &worker.trace {
                out.push_str(&format!("  step {:>6}: len {}\n", event.step, event.len));
            }
        }

        out.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.exit_code() == 2 {
                "UNEXPECTED"
            } else {
                "AS EXPECTED"
            }
        ));

        out
    }
}

/// Populate a fresh shared sequence with the decimal strings `"0".."n-1"`.
pub fn build_population(n: usize) -> SharedSeq<String> {
    let seq = SharedSeq::new();
    for i in 0..n {
        seq.push(i.to_string());
    }
    seq
}

/// Run one scenario against a freshly built population.
pub fn run_scenario(kind: ScenarioKind, config: &ScenarioConfig) -> ScenarioReport {
    tracing::debug!(
        scenario = kind.name(),
        population = config.population,
        "running scenario"
    );

    let workers = match kind {
        ScenarioKind::DrainDescending => vec![drain_descending(config)],
        ScenarioKind::DrainAscending => vec![drain_ascending(config)],
        ScenarioKind::CursorDirect => vec![cursor_direct(config)],
        ScenarioKind::CursorOwned => vec![cursor_owned(config)],
        ScenarioKind::ForeachDirect => vec![foreach_direct(config)],
        ScenarioKind::RaceCursor => race::race_cursor(config),
        ScenarioKind::RaceForeach => race::race_foreach(config),
        ScenarioKind::Guarded => crate::guarded::guarded_scenario(config),
    };

    ScenarioReport {
        kind,
        population: config.population,
        workers,
    }
}

fn sample(trace: &mut Vec<TraceEvent>, config: &ScenarioConfig, step: usize, len: usize) {
    if config.sample_every != 0 && step % config.sample_every == 0 {
        trace.push(TraceEvent { step, len });
    }
}

/// Removing the highest remaining index never shifts not-yet-visited lower
/// indices, so every removal stays valid.
fn drain_descending(config: &ScenarioConfig) -> WorkerReport {
    let seq = build_population(config.population);
    let mut trace = Vec::new();

    for (step, index) in (0..config.population).rev().enumerate() {
        match seq.remove_at(index) {
            Ok(_) => {
                let len = seq.len();
                tracing::trace!(index, len, "removed");
                sample(&mut trace, config, step + 1, len);
            }
            Err(fault) => {
                return WorkerReport {
                    label: "main",
                    visited: step,
                    final_len: seq.len(),
                    outcome: Outcome::Faulted {
                        fault,
                        step: step + 1,
                    },
                    trace,
                };
            }
        }
    }

    WorkerReport {
        label: "main",
        visited: config.population,
        final_len: seq.len(),
        outcome: Outcome::Completed,
        trace,
    }
}

/// After `k` removals only `N-k` elements remain, so the ascending index
/// catches up with the shrinking length halfway through. The bug is the
/// scenario; it stays unfixed.
fn drain_ascending(config: &ScenarioConfig) -> WorkerReport {
    let seq = build_population(config.population);
    let mut trace = Vec::new();

    for index in 0..config.population {
        match seq.remove_at(index) {
            Ok(_) => {
                let len = seq.len();
                tracing::trace!(index, len, "removed");
                sample(&mut trace, config, index + 1, len);
            }
            Err(fault) => {
                return WorkerReport {
                    label: "main",
                    visited: index,
                    final_len: seq.len(),
                    outcome: Outcome::Faulted {
                        fault,
                        step: index + 1,
                    },
                    trace,
                };
            }
        }
    }

    WorkerReport {
        label: "main",
        visited: config.population,
        final_len: seq.len(),
        outcome: Outcome::Completed,
        trace,
    }
}

/// The first direct removal desynchronizes the cursor; the very next
/// advancement faults.
fn cursor_direct(config: &ScenarioConfig) -> WorkerReport {
    let seq = build_population(config.population);
    let mut cursor = seq.cursor();
    let mut trace = Vec::new();
    let mut visited = 0;

    loop {
        match cursor.try_next() {
            Ok(Some(item)) => {
                visited += 1;
                seq.remove_item(&item);
                let len = seq.len();
                tracing::trace!(item = %item, len, "removed directly");
                sample(&mut trace, config, visited, len);
            }
            Ok(None) => {
                return WorkerReport {
                    label: "main",
                    visited,
                    final_len: seq.len(),
                    outcome: Outcome::Completed,
                    trace,
                };
            }
            Err(fault) => {
                return WorkerReport {
                    label: "main",
                    visited,
                    final_len: seq.len(),
                    outcome: Outcome::Faulted {
                        fault,
                        step: visited + 1,
                    },
                    trace,
                };
            }
        }
    }
}

/// Cursor-owned removal keeps the captured version in sync: the traversal
/// drains every original element exactly once. A fault here is a
/// regression, not a hazard.
fn cursor_owned(config: &ScenarioConfig) -> WorkerReport {
    let seq = build_population(config.population);
    let mut cursor = seq.cursor();
    let mut trace = Vec::new();
    let mut visited = 0;

    loop {
        match cursor.try_next() {
            Ok(Some(item)) => {
                visited += 1;
                if let Err(fault) = cursor.remove_current() {
                    return WorkerReport {
                        label: "main",
                        visited,
                        final_len: seq.len(),
                        outcome: Outcome::Faulted {
                            fault,
                            step: visited,
                        },
                        trace,
                    };
                }
                let len = seq.len();
                tracing::trace!(item = %item, len, "removed through cursor");
                sample(&mut trace, config, visited, len);
            }
            Ok(None) => {
                return WorkerReport {
                    label: "main",
                    visited,
                    final_len: seq.len(),
                    outcome: Outcome::Completed,
                    trace,
                };
            }
            Err(fault) => {
                return WorkerReport {
                    label: "main",
                    visited,
                    final_len: seq.len(),
                    outcome: Outcome::Faulted {
                        fault,
                        step: visited + 1,
                    },
                    trace,
                };
            }
        }
    }
}

/// Same hazard as [`cursor_direct`], expressed through the implicit
/// per-element traversal sugar.
fn foreach_direct(config: &ScenarioConfig) -> WorkerReport {
    let seq = build_population(config.population);
    let handle = seq.clone();
    let mut trace = Vec::new();
    let mut visited = 0;

    let result = seq.try_for_each(|item| {
        visited += 1;
        handle.remove_item(item);
        let len = handle.len();
        tracing::trace!(item = %item, len, "removed directly");
        sample(&mut trace, config, visited, len);
    });

    match result {
        Ok(count) => WorkerReport {
            label: "main",
            visited: count,
            final_len: seq.len(),
            outcome: Outcome::Completed,
            trace,
        },
        Err(fault) => WorkerReport {
            label: "main",
            visited,
            final_len: seq.len(),
            outcome: Outcome::Faulted {
                fault,
                step: visited + 1,
            },
            trace,
        },
    }
}
