//! The main queue: tasks that must run on the application's main loop.
//!
//! Dispatchers only enqueue. Whoever owns the [`MainQueue`] decides when
//! queued tasks run, either by polling with [`MainQueue::drain`] from an
//! existing loop or by handing the queue to [`MainQueue::run`].

use std::sync::Arc;

use tokio::sync::mpsc;

use dispatch_types::Task;

/// Receiving end of the main queue.
///
/// Constructed together with its dispatcher; see `TokioDispatcher::new`.
#[derive(Debug)]
pub struct MainQueue {
    rx: mpsc::UnboundedReceiver<Task>,
    label: Arc<str>,
}

impl MainQueue {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Task>, label: Arc<str>) -> Self {
        Self { rx, label }
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Run the tasks queued right now, oldest first, without waiting.
    ///
    /// Tasks enqueued while draining are left for the next drain, so a task
    /// that re-dispatches itself cannot stall the caller. Returns how many
    /// tasks ran.
    pub fn drain(&mut self) -> usize {
        let queued = self.rx.len();
        let mut ran = 0;
        while ran < queued {
            match self.rx.try_recv() {
                Ok(task) => {
                    task.run();
                    ran += 1;
                }
                Err(_) => break,
            }
        }
        if ran > 0 {
            tracing::trace!(label = %self.label, ran, "Drained main queue");
        }
        ran
    }

    /// Wait for the next task and run it.
    ///
    /// Returns `false` once every dispatcher (and every pending timer) is
    /// gone and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task.run();
                true
            }
            None => false,
        }
    }

    /// Run tasks as they arrive until no sender remains. Returns the total.
    pub async fn run(mut self) -> usize {
        let mut ran = 0;
        while self.run_next().await {
            ran += 1;
        }
        tracing::debug!(label = %self.label, ran, "Main queue closed");
        ran
    }
}
