//! Opt-in safe contrast to the hazard scenarios.
//!
//! Kept separate from [`SharedSeq`](crate::collection::SharedSeq) so the
//! hazard paths never pick up a guard by accident: a lock around the shared
//! sequence would mask exactly the races the sandbox exists to exhibit.

use crate::scenario::{collect_workers, Outcome, ScenarioConfig, WorkerReport};
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Sequence whose traversals each run under one exclusive guard held for
/// the whole traversal. No version counter is needed: nothing can mutate
/// mid-traversal.
#[derive(Debug)]
pub struct GuardedSeq<T> {
    inner: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for GuardedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> GuardedSeq<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, item: T) {
        self.inner.lock().push(item);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Visit every element while holding the guard for the whole traversal.
    /// Returns the number of elements visited.
    pub fn traverse<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&T),
    {
        let items = self.inner.lock();
        for item in items.iter() {
            f(item);
        }
        items.len()
    }

    /// Drain every element under one guard. Returns the number drained.
    pub fn drain_all<F>(&self, mut f: F) -> usize
    where
        F: FnMut(T),
    {
        let mut items = self.inner.lock();
        let count = items.len();
        for item in items.drain(..) {
            f(item);
        }
        count
    }
}

impl<T> Default for GuardedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two workers over one guarded sequence: a reader and a drainer. Whichever
/// wins the guard runs its whole traversal first; both always complete.
pub(crate) fn guarded_scenario(config: &ScenarioConfig) -> Vec<WorkerReport> {
    let seq = GuardedSeq::new();
    for i in 0..config.population {
        seq.push(i.to_string());
    }

    let (tx, rx) = mpsc::channel();

    {
        let seq = seq.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            tracing::debug!("guarded reader starting");
            let visited = seq.traverse(|_| {});
            let _ = tx.send(WorkerReport {
                label: "reader",
                visited,
                final_len: seq.len(),
                outcome: Outcome::Completed,
                trace: Vec::new(),
            });
        });
    }

    {
        let seq = seq.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            tracing::debug!("guarded drainer starting");
            let visited = seq.drain_all(|_| {});
            let _ = tx.send(WorkerReport {
                label: "drainer",
                visited,
                final_len: seq.len(),
                outcome: Outcome::Completed,
                trace: Vec::new(),
            });
        });
    }

    drop(tx);
    collect_workers(rx)
}
