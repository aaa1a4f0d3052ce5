//! Ordered, append-only log of call payloads.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Records the payload of every call to one operation, in call order.
///
/// Recording goes through `&self` so a recorder can sit behind a shared
/// dispatcher. Readers get snapshots; the lock is never held while caller
/// code runs.
pub struct Invocations<T> {
    entries: Mutex<Vec<T>>,
}

impl<T> Default for Invocations<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Invocations<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, payload: T) {
        self.entries().push(payload);
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl<T: Clone> Invocations<T> {
    /// Snapshot of every payload in call order.
    #[must_use]
    pub fn all(&self) -> Vec<T> {
        self.entries().clone()
    }

    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.entries().first().cloned()
    }

    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.entries().last().cloned()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.entries().get(index).cloned()
    }

    /// Number of recorded payloads matching `predicate`.
    ///
    /// Evaluated against a snapshot, so the predicate may use this recorder.
    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.all().iter().filter(|entry| predicate(entry)).count()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Invocations<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.all().iter()).finish()
    }
}
