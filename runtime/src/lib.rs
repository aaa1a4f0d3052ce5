//! Tokio-backed implementation of the task-dispatch capability.
//!
//! The dispatcher owns no threads of its own. Background work goes to the
//! runtime's blocking pool, delays use the runtime's timers, and main-queue
//! work is delivered to a [`MainQueue`] that the application's main loop
//! drains.
//!
//! ```no_run
//! use dispatch_config::RuntimeConfig;
//! use dispatch_runtime::TokioDispatcher;
//! use dispatch_types::{Dispatch, Task};
//!
//! # async fn demo() -> Result<(), dispatch_runtime::DispatchError> {
//! let (dispatcher, main) = TokioDispatcher::current(&RuntimeConfig::default())?;
//! dispatcher.dispatch_on_main(Task::new(|| println!("on main")));
//! drop(dispatcher);
//! main.run().await;
//! # Ok(())
//! # }
//! ```

mod dispatcher;
mod main_queue;

pub use dispatcher::TokioDispatcher;
pub use main_queue::MainQueue;

use thiserror::Error;
use tokio::runtime::TryCurrentError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no tokio runtime is running on this thread")]
    NoRuntime(#[from] TryCurrentError),
}
