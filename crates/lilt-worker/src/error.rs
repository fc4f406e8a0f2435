//! Typed errors for worker lifecycle operations.
//!
//! [`StartError`] and [`StopError`] cover the recoverable failures of the
//! two lifecycle calls. Priority-assignment failure is deliberately absent:
//! it is swallowed after a debug log and the worker runs at the platform
//! default.

use std::thread::ThreadId;

use thiserror::Error;

use lilt_runtime::handle::SpawnError;

/// Errors returned by [`Worker::start`](crate::Worker::start).
#[derive(Debug, Error)]
pub enum StartError {
    /// Start was called while a previous lifecycle is still running.
    #[error("worker '{name}' is already running")]
    AlreadyRunning {
        /// Worker display name.
        name: String,
    },
    /// Start was called from a thread other than the owning controller.
    #[error("worker '{name}' must be started from its owner thread (owner {owner:?}, caller {caller:?})")]
    NotOwnerThread {
        /// Worker display name.
        name: String,
        /// Thread that constructed the worker.
        owner: ThreadId,
        /// Thread that made the call.
        caller: ThreadId,
    },
    /// The run step was lost to a panicked lifecycle and cannot run again.
    #[error("worker '{name}' lost its run step to a panicked lifecycle")]
    StepLost {
        /// Worker display name.
        name: String,
    },
    /// The underlying OS thread could not be created.
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// Errors returned by [`Worker::stop`](crate::Worker::stop).
#[derive(Debug, Error)]
pub enum StopError {
    /// Stop was called from a thread other than the owning controller.
    #[error("worker '{name}' must be stopped from its owner thread (owner {owner:?}, caller {caller:?})")]
    NotOwnerThread {
        /// Worker display name.
        name: String,
        /// Thread that constructed the worker.
        owner: ThreadId,
        /// Thread that made the call.
        caller: ThreadId,
    },
    /// The worker thread panicked outside the contained run loop.
    #[error("worker '{name}' panicked")]
    Panicked {
        /// Worker display name.
        name: String,
    },
}
