use std::fmt;
use std::sync::Once;

use crate::Task;

/// Identity of a run-at-most-once guard.
///
/// Production dispatchers route tasks through [`OnceGate::run_once`]. A
/// recording dispatcher is free to ignore the gate entirely.
pub struct OnceGate {
    once: Once,
}

impl OnceGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { once: Once::new() }
    }

    /// `true` until a task has run to completion through this gate.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.once.is_completed()
    }

    /// Runs `task` if the gate is still open. Returns whether it ran.
    ///
    /// Concurrent callers block until the winning task finishes. A task that
    /// panics leaves the gate open, so the next caller runs its task.
    pub fn run_once(&self, task: &Task) -> bool {
        let mut ran = false;
        self.once.call_once_force(|_| {
            task.run();
            ran = true;
        });
        ran
    }
}

impl Default for OnceGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OnceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceGate")
            .field("open", &self.is_open())
            .finish()
    }
}
