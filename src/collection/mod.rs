use crate::cursor::SeqCursor;
use crate::error::Fault;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Insertion-ordered, indexable sequence with a structural version counter.
///
/// Every structural mutation (append, positional removal, value removal)
/// bumps `version`. Cursors capture the version at creation and compare it
/// on every operation; that comparison is the fail-fast mechanism the whole
/// sandbox revolves around.
#[derive(Debug)]
pub struct VersionedSeq<T> {
    items: Vec<T>,
    version: u64,
}

impl<T> VersionedSeq<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.version += 1;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Positional removal, bounds-checked against the current length.
    pub fn remove_at(&mut self, index: usize) -> Result<T, Fault> {
        if index >= self.items.len() {
            return Err(Fault::BoundsViolation {
                index,
                len: self.items.len(),
            });
        }
        self.version += 1;
        Ok(self.items.remove(index))
    }
}

impl<T: PartialEq> VersionedSeq<T> {
    /// Remove the first element equal to `item`. Structural only when it hits.
    pub fn remove_item(&mut self, item: &T) -> bool {
        match self.items.iter().position(|x| x == item) {
            Some(index) => {
                self.items.remove(index);
                self.version += 1;
                true
            }
            None => false,
        }
    }
}

impl<T> Default for VersionedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle over a [`VersionedSeq`].
///
/// Each operation is one short critical section; nothing coordinates
/// operations with each other, and nothing may hold the lock across
/// traversal steps in the hazard scenarios. That absence of coordination is
/// the subject under test. The deliberately safe alternative lives in
/// [`crate::guarded`].
#[derive(Debug)]
pub struct SharedSeq<T> {
    inner: Arc<Mutex<VersionedSeq<T>>>,
}

impl<T> Clone for SharedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedSeq<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VersionedSeq::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn version(&self) -> u64 {
        self.inner.lock().version()
    }

    pub fn push(&self, item: T) {
        self.inner.lock().push(item);
    }

    pub fn remove_at(&self, index: usize) -> Result<T, Fault> {
        self.inner.lock().remove_at(index)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, VersionedSeq<T>> {
        self.inner.lock()
    }
}

impl<T: PartialEq> SharedSeq<T> {
    pub fn remove_item(&self, item: &T) -> bool {
        self.inner.lock().remove_item(item)
    }
}

impl<T: Clone> SharedSeq<T> {
    pub fn get_cloned(&self, index: usize) -> Option<T> {
        self.inner.lock().get(index).cloned()
    }

    /// Fail-fast cursor capturing the current structural version.
    pub fn cursor(&self) -> SeqCursor<T> {
        SeqCursor::new(self.clone())
    }

    /// Implicit per-element traversal over a fresh cursor.
    ///
    /// Returns the number of elements visited, or the fault that ended the
    /// traversal early. The closure sees each element by reference; any
    /// mutation it performs through another handle desynchronizes the
    /// cursor exactly as it would in an explicit loop.
    pub fn try_for_each<F>(&self, mut f: F) -> Result<usize, Fault>
    where
        F: FnMut(&T),
    {
        let mut cursor = self.cursor();
        let mut visited = 0;
        while let Some(item) = cursor.try_next()? {
            f(&item);
            visited += 1;
        }
        Ok(visited)
    }
}

impl<T> Default for SharedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}
