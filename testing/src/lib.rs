//! Test doubles for code that hands work to a [`Dispatch`] implementation.
//!
//! - **`Invocations`**: ordered, append-only log of call payloads
//! - **`RecordingDispatcher`**: a [`Dispatch`] that runs tasks inline or
//!   parks them for explicit replay, recording every call
//!
//! [`Dispatch`]: dispatch_types::Dispatch

mod invocations;
mod recording;

pub use invocations::Invocations;
pub use recording::{DeferredTask, RecordingDispatcher};
