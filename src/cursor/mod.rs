pub mod state;

pub use state::{allowed_transitions, CursorState};

use crate::collection::SharedSeq;
use crate::error::Fault;

/// Fail-fast traversal cursor over a [`SharedSeq`].
///
/// The cursor captures the sequence's structural version at creation. Every
/// operation compares the captured version against the live one and faults
/// with [`Fault::StructuralConflict`] on mismatch. Removing elements through
/// [`SeqCursor::remove_current`] resynchronizes the captured version, so a
/// traversal that only mutates through its own cursor never conflicts.
pub struct SeqCursor<T> {
    seq: SharedSeq<T>,
    captured_version: u64,
    pos: usize,
    last: Option<usize>,
    state: CursorState,
    fault: Option<Fault>,
}

impl<T: Clone> SeqCursor<T> {
    pub(crate) fn new(seq: SharedSeq<T>) -> Self {
        let captured_version = seq.version();
        Self {
            seq,
            captured_version,
            pos: 0,
            last: None,
            state: CursorState::Fresh,
            fault: None,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn captured_version(&self) -> u64 {
        self.captured_version
    }

    /// Advance to the next element.
    ///
    /// `Ok(None)` signals end of sequence; once `Exhausted` the cursor stays
    /// a no-op. Once `Invalidated` every call keeps returning the conflict
    /// that killed it. An emptied sequence ends the traversal before the
    /// version comparison: with nothing left to visit there is no step for a
    /// conflict to protect.
    pub fn try_next(&mut self) -> Result<Option<T>, Fault> {
        match self.state {
            CursorState::Invalidated => Err(self.conflict()),
            CursorState::Exhausted => Ok(None),
            CursorState::Fresh | CursorState::Advancing => {
                let guard = self.seq.lock();
                if guard.is_empty() {
                    drop(guard);
                    self.transition(CursorState::Exhausted);
                    return Ok(None);
                }
                let observed = guard.version();
                if observed != self.captured_version {
                    drop(guard);
                    return Err(self.invalidate(observed));
                }
                let Some(item) = guard.get(self.pos).cloned() else {
                    drop(guard);
                    self.transition(CursorState::Exhausted);
                    return Ok(None);
                };
                drop(guard);
                self.last = Some(self.pos);
                self.pos += 1;
                self.transition(CursorState::Advancing);
                Ok(Some(item))
            }
        }
    }

    /// Remove the element most recently returned by [`SeqCursor::try_next`].
    ///
    /// `Ok(None)` when there is no current element (nothing returned yet,
    /// already removed, or the cursor is exhausted).
    pub fn remove_current(&mut self) -> Result<Option<T>, Fault> {
        match self.state {
            CursorState::Invalidated => Err(self.conflict()),
            CursorState::Exhausted | CursorState::Fresh => Ok(None),
            CursorState::Advancing => {
                let Some(index) = self.last else {
                    return Ok(None);
                };
                let mut guard = self.seq.lock();
                let observed = guard.version();
                if observed != self.captured_version {
                    drop(guard);
                    return Err(self.invalidate(observed));
                }
                // In bounds: the version matched, so the length is unchanged
                // since `index` was read.
                let removed = guard.remove_at(index)?;
                self.captured_version = guard.version();
                drop(guard);
                self.pos = index;
                self.last = None;
                Ok(Some(removed))
            }
        }
    }

    fn invalidate(&mut self, observed: u64) -> Fault {
        let fault = Fault::StructuralConflict {
            captured: self.captured_version,
            observed,
        };
        self.transition(CursorState::Invalidated);
        self.fault = Some(fault);
        fault
    }

    fn conflict(&self) -> Fault {
        self.fault.unwrap_or(Fault::StructuralConflict {
            captured: self.captured_version,
            observed: self.captured_version,
        })
    }

    fn transition(&mut self, to: CursorState) {
        debug_assert!(
            state::is_allowed(self.state, to),
            "illegal cursor transition: {:?} -> {:?}",
            self.state,
            to
        );
        self.state = to;
    }
}
