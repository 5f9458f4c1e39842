//! Mutation-hazard sandbox for ordered collections.
//!
//! Builds an insertion-ordered sequence of string elements, exercises one of
//! several traversal/mutation strategies against it (optionally from two
//! uncoordinated OS threads), and reports the outcome: clean completion, the
//! sizes observed along the way, or a classified fault. The hazards are the
//! point; nothing here tries to prevent them. For the deliberately safe
//! contrast, see [`guarded`].

pub mod collection;
pub mod cursor;
pub mod error;
pub mod guarded;
pub mod harness;
pub mod scenario;

pub use collection::{SharedSeq, VersionedSeq};
pub use cursor::{CursorState, SeqCursor};
pub use error::{Fault, FaultKind};
pub use guarded::GuardedSeq;
pub use harness::{run_probe, ProbeConfig, ProbeReport};
pub use scenario::{
    build_population, run_scenario, Expectation, Outcome, ScenarioConfig, ScenarioKind,
    ScenarioReport, TraceEvent, WorkerReport,
};
