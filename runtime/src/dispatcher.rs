use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use dispatch_config::RuntimeConfig;
use dispatch_types::{Dispatch, DispatchTime, OnceGate, Task};

use crate::{DispatchError, MainQueue};

/// [`Dispatch`] backed by a tokio runtime.
///
/// - `dispatch_async` runs on the runtime's blocking pool.
/// - `dispatch_on_main` enqueues onto the paired [`MainQueue`].
/// - `dispatch_after` arms a runtime timer that enqueues onto the main queue.
/// - `dispatch_once` runs inline through the gate.
///
/// Clones share the same runtime and main queue.
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
    main_tx: mpsc::UnboundedSender<Task>,
    label: Arc<str>,
}

impl TokioDispatcher {
    pub fn new(handle: Handle, config: &RuntimeConfig) -> (Self, MainQueue) {
        let (main_tx, main_rx) = mpsc::unbounded_channel();
        let label: Arc<str> = Arc::from(config.label.as_str());
        tracing::debug!(label = %label, "Dispatcher created");
        let dispatcher = Self {
            handle,
            main_tx,
            label: Arc::clone(&label),
        };
        (dispatcher, MainQueue::new(main_rx, label))
    }

    /// Bind to the runtime the caller is running on.
    pub fn current(config: &RuntimeConfig) -> Result<(Self, MainQueue), DispatchError> {
        let handle = Handle::try_current()?;
        Ok(Self::new(handle, config))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn send_to_main(&self, task: Task) {
        if self.main_tx.send(task).is_err() {
            tracing::warn!(label = %self.label, "Main queue is gone; dropping task");
        }
    }
}

impl Dispatch for TokioDispatcher {
    fn dispatch_async(&self, task: Task) {
        let join = self.handle.spawn_blocking(move || task.run());
        let label = Arc::clone(&self.label);
        self.handle.spawn(async move {
            if let Err(err) = join.await {
                if err.is_panic() {
                    tracing::error!(label = %label, "Background task panicked");
                } else {
                    tracing::warn!(label = %label, "Background task cancelled: {err}");
                }
            }
        });
    }

    fn dispatch_on_main(&self, task: Task) {
        self.send_to_main(task);
    }

    fn dispatch_after(&self, when: DispatchTime, task: Task) {
        let Some(delay) = when.delay() else {
            tracing::debug!(label = %self.label, "Task scheduled for {when}; it will never run");
            return;
        };
        if delay.is_zero() {
            self.send_to_main(task);
            return;
        }

        // Deadline is fixed at dispatch time, not when the timer task is first polled.
        let Some(deadline) = Instant::now().checked_add(delay) else {
            tracing::debug!(label = %self.label, "Task scheduled for {when}; it will never run");
            return;
        };
        let main_tx = self.main_tx.clone();
        let label = Arc::clone(&self.label);
        self.handle.spawn(async move {
            time::sleep_until(deadline).await;
            if main_tx.send(task).is_err() {
                tracing::warn!(label = %label, "Main queue is gone; dropping delayed task");
            }
        });
    }

    fn dispatch_once(&self, gate: &OnceGate, task: Task) {
        if !gate.run_once(&task) {
            tracing::trace!(label = %self.label, "Once-gate already closed");
        }
    }
}
