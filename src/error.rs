use serde::Serialize;
use thiserror::Error;

/// The two fault kinds the sandbox can surface.
///
/// Both are expected, documented outcomes of specific scenarios. Scenario
/// runners capture and classify them; they are reported, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum Fault {
    /// An index-based access or removal referenced a position at or beyond
    /// the current size.
    #[error("index {index} out of bounds for length {len}")]
    BoundsViolation { index: usize, len: usize },

    /// A traversal observed that the structural version changed since its
    /// cursor was created, via an operation not issued through that cursor.
    #[error("cursor captured version {captured}, collection now at {observed}")]
    StructuralConflict { captured: u64, observed: u64 },
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::BoundsViolation { .. } => FaultKind::BoundsViolation,
            Fault::StructuralConflict { .. } => FaultKind::StructuralConflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FaultKind {
    BoundsViolation,
    StructuralConflict,
}

impl FaultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::BoundsViolation => "bounds-violation",
            FaultKind::StructuralConflict => "structural-conflict",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
