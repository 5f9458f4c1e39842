//! Two-worker hazard scenarios.
//!
//! Workers are plain OS threads started without coordination and never
//! joined; the join handles are dropped on the spot. The only channel back
//! to the driver is trace emission: each worker sends its report and exits.
//! The driver drains the channel until every sender is gone.

use super::{Outcome, ScenarioConfig, WorkerReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Worker A holds a read-only cursor; Worker B drains through cursor-owned
/// removals. B's first removal bumps the shared version, so A's cursor is
/// invalidated at whatever point A's scheduling interleaves after it. B
/// itself never conflicts.
pub(super) fn race_cursor(config: &ScenarioConfig) -> Vec<WorkerReport> {
    let seq = super::build_population(config.population);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (tx, rx) = mpsc::channel();

    {
        let seq = seq.clone();
        let tx = tx.clone();
        let start_delay = stagger(&mut rng);
        thread::spawn(move || {
            thread::sleep(start_delay);
            tracing::debug!("reader worker starting");
            let mut cursor = seq.cursor();
            let mut visited = 0;
            let outcome = loop {
                match cursor.try_next() {
                    Ok(Some(_)) => {
                        visited += 1;
                        thread::yield_now();
                    }
                    Ok(None) => break Outcome::Completed,
                    Err(fault) => {
                        break Outcome::Faulted {
                            fault,
                            step: visited + 1,
                        }
                    }
                }
            };
            let _ = tx.send(WorkerReport {
                label: "reader",
                visited,
                final_len: seq.len(),
                outcome,
                trace: Vec::new(),
            });
        });
    }

    {
        let seq = seq.clone();
        let tx = tx.clone();
        let start_delay = stagger(&mut rng);
        thread::spawn(move || {
            thread::sleep(start_delay);
            tracing::debug!("remover worker starting");
            let mut cursor = seq.cursor();
            let mut visited = 0;
            let outcome = loop {
                match cursor.try_next() {
                    Ok(Some(_)) => {
                        visited += 1;
                        if let Err(fault) = cursor.remove_current() {
                            break Outcome::Faulted {
                                fault,
                                step: visited,
                            };
                        }
                        thread::yield_now();
                    }
                    Ok(None) => break Outcome::Completed,
                    Err(fault) => {
                        break Outcome::Faulted {
                            fault,
                            step: visited + 1,
                        }
                    }
                }
            };
            let _ = tx.send(WorkerReport {
                label: "remover",
                visited,
                final_len: seq.len(),
                outcome,
                trace: Vec::new(),
            });
        });
    }

    drop(tx);
    collect_workers(rx)
}

/// Two implicit traversals over one sequence; the writer removes each of
/// its elements directly, which desynchronizes both traversals.
pub(super) fn race_foreach(config: &ScenarioConfig) -> Vec<WorkerReport> {
    let seq = super::build_population(config.population);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (tx, rx) = mpsc::channel();

    {
        let seq = seq.clone();
        let tx = tx.clone();
        let start_delay = stagger(&mut rng);
        thread::spawn(move || {
            thread::sleep(start_delay);
            tracing::debug!("reader worker starting");
            let mut visited = 0;
            let outcome = match seq.try_for_each(|_| {
                visited += 1;
                thread::yield_now();
            }) {
                Ok(count) => {
                    visited = count;
                    Outcome::Completed
                }
                Err(fault) => Outcome::Faulted {
                    fault,
                    step: visited + 1,
                },
            };
            let _ = tx.send(WorkerReport {
                label: "reader",
                visited,
                final_len: seq.len(),
                outcome,
                trace: Vec::new(),
            });
        });
    }

    {
        let seq = seq.clone();
        let tx = tx.clone();
        let start_delay = stagger(&mut rng);
        thread::spawn(move || {
            thread::sleep(start_delay);
            tracing::debug!("writer worker starting");
            let handle = seq.clone();
            let mut visited = 0;
            let outcome = match seq.try_for_each(|item| {
                visited += 1;
                handle.remove_item(item);
                thread::yield_now();
            }) {
                Ok(count) => {
                    visited = count;
                    Outcome::Completed
                }
                Err(fault) => Outcome::Faulted {
                    fault,
                    step: visited + 1,
                },
            };
            let _ = tx.send(WorkerReport {
                label: "writer",
                visited,
                final_len: seq.len(),
                outcome,
                trace: Vec::new(),
            });
        });
    }

    drop(tx);
    collect_workers(rx)
}

/// A few microseconds of seeded start-up jitter varies the interleavings
/// between runs while keeping a probe run reproducible.
fn stagger(rng: &mut StdRng) -> Duration {
    Duration::from_micros(rng.gen_range(0..200))
}

/// Drain the report channel until every worker has dropped its sender. The
/// worker threads themselves are never joined.
pub(crate) fn collect_workers(rx: mpsc::Receiver<WorkerReport>) -> Vec<WorkerReport> {
    let mut workers: Vec<WorkerReport> = rx.iter().collect();
    workers.sort_by_key(|w| w.label);
    workers
}
