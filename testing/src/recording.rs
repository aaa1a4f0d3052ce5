//! Recording dispatcher for tests.
//!
//! [`RecordingDispatcher`] implements [`Dispatch`] without any concurrency:
//! every task either runs on the calling thread before the call returns, or
//! is parked in an ordered log until the test replays it. Each entry point
//! records what it was given so tests can assert on call counts and
//! arguments.
//!
//! | call               | recorded in            | runs                                 |
//! |--------------------|------------------------|--------------------------------------|
//! | `dispatch_async`   | `dispatch_async_calls` | immediately                          |
//! | `dispatch_on_main` | `main_invocations`     | immediately if `run_on_main` says so |
//! | `dispatch_after`   | `after_invocations`    | on `replay_deferred()`               |
//! | `dispatch_once`    | `dispatch_once_calls`  | immediately, gate ignored            |

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dispatch_config::RecorderConfig;
use dispatch_types::{Dispatch, DispatchTime, OnceGate, Task};

use crate::Invocations;

type MainPredicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// A task handed to `dispatch_after`, with the time it asked for.
#[derive(Debug, Clone)]
pub struct DeferredTask {
    pub when: DispatchTime,
    pub task: Task,
}

pub struct RecordingDispatcher {
    dispatch_async_calls: AtomicUsize,
    dispatch_once_calls: AtomicUsize,
    main_invocations: Invocations<Task>,
    after_invocations: Invocations<DeferredTask>,
    /// Main-queue tasks held back by `run_on_main`, oldest first.
    pending_main: Mutex<Vec<Task>>,
    run_on_main: Mutex<MainPredicate>,
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDispatcher {
    /// A dispatcher that runs main-queue tasks inline.
    #[must_use]
    pub fn new() -> Self {
        let always: MainPredicate = Arc::new(|| true);
        Self {
            dispatch_async_calls: AtomicUsize::new(0),
            dispatch_once_calls: AtomicUsize::new(0),
            main_invocations: Invocations::new(),
            after_invocations: Invocations::new(),
            pending_main: Mutex::new(Vec::new()),
            run_on_main: Mutex::new(always),
        }
    }

    #[must_use]
    pub fn with_config(config: &RecorderConfig) -> Self {
        let dispatcher = Self::new();
        if !config.run_on_main_inline {
            dispatcher.set_run_on_main(|| false);
        }
        dispatcher
    }

    pub fn with_run_on_main<P>(self, predicate: P) -> Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        self.set_run_on_main(predicate);
        self
    }

    /// Decide, per call, whether `dispatch_on_main` runs its task inline.
    ///
    /// The predicate is consulted after the task is recorded.
    pub fn set_run_on_main<P>(&self, predicate: P)
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        let predicate: MainPredicate = Arc::new(predicate);
        *lock(&self.run_on_main) = predicate;
    }

    #[must_use]
    pub fn dispatch_async_calls(&self) -> usize {
        self.dispatch_async_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn dispatch_once_calls(&self) -> usize {
        self.dispatch_once_calls.load(Ordering::SeqCst)
    }

    /// Every task passed to `dispatch_on_main`, whether or not it ran.
    #[must_use]
    pub fn main_invocations(&self) -> &Invocations<Task> {
        &self.main_invocations
    }

    #[must_use]
    pub fn after_invocations(&self) -> &Invocations<DeferredTask> {
        &self.after_invocations
    }

    /// Number of main-queue tasks waiting for `replay_pending_main`.
    #[must_use]
    pub fn pending_main_count(&self) -> usize {
        lock(&self.pending_main).len()
    }

    /// Run every task recorded by `dispatch_after`, in submission order.
    ///
    /// The requested times are ignored. Entries stay recorded, so a second
    /// replay runs them all again. Returns how many tasks ran.
    pub fn replay_deferred(&self) -> usize {
        let deferred = self.after_invocations.all();
        tracing::trace!(count = deferred.len(), "Replaying deferred tasks");
        for entry in &deferred {
            entry.task.run();
        }
        deferred.len()
    }

    /// Run the main-queue tasks that `run_on_main` held back, oldest first.
    ///
    /// Each held-back task runs once; tasks dispatched while replaying wait
    /// for the next replay. Returns how many tasks ran.
    pub fn replay_pending_main(&self) -> usize {
        let pending = mem::take(&mut *lock(&self.pending_main));
        tracing::trace!(count = pending.len(), "Replaying pending main-queue tasks");
        for task in &pending {
            task.run();
        }
        pending.len()
    }

    fn should_run_on_main(&self) -> bool {
        let predicate = Arc::clone(&lock(&self.run_on_main));
        predicate()
    }
}

impl Dispatch for RecordingDispatcher {
    fn dispatch_async(&self, task: Task) {
        self.dispatch_async_calls.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("dispatch_async");
        task.run();
    }

    fn dispatch_on_main(&self, task: Task) {
        self.main_invocations.record(task.clone());
        if self.should_run_on_main() {
            tracing::trace!("dispatch_on_main: running inline");
            task.run();
        } else {
            tracing::trace!("dispatch_on_main: held for replay");
            lock(&self.pending_main).push(task);
        }
    }

    fn dispatch_after(&self, when: DispatchTime, task: Task) {
        tracing::trace!(%when, "dispatch_after: recorded");
        self.after_invocations.record(DeferredTask { when, task });
    }

    fn dispatch_once(&self, _gate: &OnceGate, task: Task) {
        self.dispatch_once_calls.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("dispatch_once: gate ignored");
        task.run();
    }
}

impl fmt::Debug for RecordingDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingDispatcher")
            .field("dispatch_async_calls", &self.dispatch_async_calls())
            .field("dispatch_once_calls", &self.dispatch_once_calls())
            .field("main_invocations", &self.main_invocations.count())
            .field("after_invocations", &self.after_invocations.count())
            .field("pending_main", &self.pending_main_count())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
