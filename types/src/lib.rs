//! Core types for the task-dispatch capability.
//!
//! This crate contains the capability trait and its vocabulary types, with no
//! IO and no async. Application code depends on [`Dispatch`] alone; concrete
//! dispatchers live in `dispatch-runtime` (tokio-backed) and
//! `dispatch-testing` (recording stub) and are injected by the caller.

mod gate;
mod task;
mod time;

pub use gate::OnceGate;
pub use task::Task;
pub use time::DispatchTime;

use std::sync::Arc;

/// The set of ways application code can hand work to a dispatcher.
///
/// Pass an instance explicitly (`Arc<dyn Dispatch>` or a generic parameter)
/// instead of reaching for a shared global queue.
pub trait Dispatch: Send + Sync {
    /// Run `task` in the background.
    fn dispatch_async(&self, task: Task);

    /// Run `task` on the main queue.
    fn dispatch_on_main(&self, task: Task);

    /// Run `task` on the main queue once `when` is due.
    fn dispatch_after(&self, when: DispatchTime, task: Task);

    /// Run `task` synchronously unless `gate` has already let a task through.
    fn dispatch_once(&self, gate: &OnceGate, task: Task);
}

impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    fn dispatch_async(&self, task: Task) {
        (**self).dispatch_async(task);
    }

    fn dispatch_on_main(&self, task: Task) {
        (**self).dispatch_on_main(task);
    }

    fn dispatch_after(&self, when: DispatchTime, task: Task) {
        (**self).dispatch_after(when, task);
    }

    fn dispatch_once(&self, gate: &OnceGate, task: Task) {
        (**self).dispatch_once(gate, task);
    }
}

impl<D: Dispatch + ?Sized> Dispatch for Box<D> {
    fn dispatch_async(&self, task: Task) {
        (**self).dispatch_async(task);
    }

    fn dispatch_on_main(&self, task: Task) {
        (**self).dispatch_on_main(task);
    }

    fn dispatch_after(&self, when: DispatchTime, task: Task) {
        (**self).dispatch_after(when, task);
    }

    fn dispatch_once(&self, gate: &OnceGate, task: Task) {
        (**self).dispatch_once(gate, task);
    }
}
