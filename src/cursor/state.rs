use serde::Serialize;

/// Lifecycle of a [`SeqCursor`](super::SeqCursor).
///
/// `Invalidated` and `Exhausted` are terminal. An invalidated cursor faults
/// on every further operation; an exhausted cursor answers every further
/// operation with an end-of-sequence signal, never a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorState {
    Fresh,
    Advancing,
    Invalidated,
    Exhausted,
}

pub fn allowed_transitions(from: CursorState) -> Vec<CursorState> {
    use CursorState::*;
    match from {
        Fresh => vec![Advancing, Invalidated, Exhausted],
        Advancing => vec![Advancing, Invalidated, Exhausted],
        Invalidated => vec![],
        Exhausted => vec![],
    }
}

pub(crate) fn is_allowed(from: CursorState, to: CursorState) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
