//! Managed worker threads with cooperative shutdown.
//!
//! A [`Worker`] runs a caller-supplied repeating step on a dedicated OS
//! thread. The controlling thread starts the worker with a requested
//! scheduling [`Priority`] and stops it cooperatively: [`Worker::stop`] sets
//! a cancellation flag, wakes the worker out of its idle wait, and joins the
//! thread before returning — so once `stop` returns, no further step
//! invocation can occur for that lifecycle.
//!
//! ```
//! use lilt_worker::Worker;
//!
//! let mut ticks = 0u32;
//! let mut worker = Worker::new(move || {
//!     ticks += 1;
//!     true
//! });
//! worker.start().expect("start worker");
//! worker.stop().expect("stop worker");
//! ```

#![deny(clippy::wildcard_imports)]

pub mod config;
pub mod error;
mod run_step;
mod signal;
mod worker;

pub use config::{DEFAULT_STACK_SIZE, DEFAULT_WORKER_NAME, WorkerConfig};
pub use error::{StartError, StopError};
pub use lilt_runtime::Priority;
pub use run_step::RunStep;
pub use worker::{LifecycleState, Worker};
