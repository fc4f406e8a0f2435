//! Worker construction parameters.

use std::time::Duration;

use lilt_runtime::handle::SpawnOptions;
use lilt_runtime::priority::Priority;

/// Reserved stack size applied when the caller does not choose one: 1 MiB,
/// the common platform default reservation.
pub const DEFAULT_STACK_SIZE: usize = 1024 * 1024;

/// Name given to worker threads when the caller does not supply one.
pub const DEFAULT_WORKER_NAME: &str = "worker";

/// Construction-time parameters for a [`Worker`](crate::Worker).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Display name of the worker thread.
    pub name: String,
    /// Scheduling hint applied once after spawn, best-effort.
    pub priority: Priority,
    /// How long the run loop idles between steps.
    ///
    /// `None` parks the worker indefinitely until the stop wake arrives;
    /// use it for steps that do all their blocking internally. A short
    /// interval keeps a polling step ticking.
    pub idle_wait: Option<Duration>,
    /// Reserved stack size for the worker thread, in bytes.
    pub stack_size: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_WORKER_NAME.to_string(),
            priority: Priority::Normal,
            idle_wait: Some(Duration::from_millis(2)),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl WorkerConfig {
    /// Default configuration under a caller-chosen thread name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn spawn_options(&self) -> SpawnOptions {
        SpawnOptions {
            name: self.name.clone(),
            priority: self.priority,
            stack_size: Some(self.stack_size),
        }
    }
}
