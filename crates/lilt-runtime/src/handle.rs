//! Owning handle for one spawned worker thread.

use std::io;
use std::thread::{self, JoinHandle, ThreadId};

use thiserror::Error;
use tracing::trace;

use crate::priority::Priority;

/// Options applied when spawning a worker thread.
#[derive(Debug, Clone)]
pub struct SpawnOptions {
    /// Thread display name, visible to debuggers and log output.
    pub name: String,
    /// Scheduling hint applied from inside the new thread, best-effort.
    pub priority: Priority,
    /// Reserved stack size in bytes; `None` uses the platform default.
    pub stack_size: Option<usize>,
}

/// The underlying OS thread could not be created.
#[derive(Debug, Error)]
#[error("failed to spawn thread '{name}'")]
pub struct SpawnError {
    /// Requested thread name.
    pub name: String,
    /// I/O error returned by the spawn call.
    #[source]
    pub source: io::Error,
}

/// Errors surfaced by [`ThreadHandle::join`].
#[derive(Debug, Error)]
pub enum JoinError {
    /// The thread was already joined; a second join has nothing to wait on.
    #[error("thread '{name}' was already joined")]
    AlreadyJoined {
        /// Thread display name.
        name: String,
    },
    /// The thread function panicked instead of returning.
    #[error("thread '{name}' panicked")]
    Panicked {
        /// Thread display name.
        name: String,
    },
}

/// Owning wrapper around one spawned OS thread.
///
/// Records the platform identity assigned at spawn and enforces the
/// join-at-most-once discipline: a second join is rejected with a typed
/// error instead of waiting on a thread that no longer exists.
pub struct ThreadHandle<T> {
    join: Option<JoinHandle<T>>,
    id: ThreadId,
    name: String,
}

impl<T: Send + 'static> ThreadHandle<T> {
    /// Spawns `f` on a new thread with the given options.
    ///
    /// The priority is applied from inside the new thread before `f` runs;
    /// a scheduler refusal is logged there and never fails the spawn.
    pub fn spawn<F>(options: SpawnOptions, f: F) -> Result<Self, SpawnError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let SpawnOptions {
            name,
            priority,
            stack_size,
        } = options;
        let mut builder = thread::Builder::new().name(name.clone());
        if let Some(stack_size) = stack_size {
            builder = builder.stack_size(stack_size);
        }
        let join = builder
            .spawn(move || {
                priority.apply_to_current_thread();
                f()
            })
            .map_err(|source| SpawnError {
                name: name.clone(),
                source,
            })?;
        let id = join.thread().id();
        trace!(thread = %name, ?id, "thread spawned");
        Ok(Self {
            join: Some(join),
            id,
            name,
        })
    }

    /// Platform identity assigned at spawn.
    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Thread display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once [`join`](Self::join) has consumed the thread.
    pub fn is_joined(&self) -> bool {
        self.join.is_none()
    }

    /// Blocks until the thread function returns and yields its result.
    pub fn join(&mut self) -> Result<T, JoinError> {
        let Some(join) = self.join.take() else {
            return Err(JoinError::AlreadyJoined {
                name: self.name.clone(),
            });
        };
        join.join().map_err(|_| JoinError::Panicked {
            name: self.name.clone(),
        })
    }
}
