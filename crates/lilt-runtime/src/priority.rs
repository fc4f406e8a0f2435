//! Best-effort scheduling priority for worker threads.

use thread_priority::{ThreadPriority, ThreadPriorityValue};
use tracing::debug;

/// Requested scheduling priority for a spawned thread.
///
/// Stored once at construction and applied once after spawn. This is a hint
/// to the OS scheduler, not a deadline guarantee; a scheduler that refuses
/// the request leaves the thread at its default priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Realtime,
}

impl Priority {
    /// Applies this priority to the calling thread, best-effort.
    ///
    /// A refusal is logged at debug level and otherwise ignored: the worker
    /// still runs, at whatever priority the platform granted.
    pub fn apply_to_current_thread(self) {
        let Some(os_priority) = self.as_os_priority() else {
            return;
        };
        if let Err(error) = thread_priority::set_current_thread_priority(os_priority) {
            debug!(priority = ?self, ?error, "thread priority not applied");
        }
    }

    /// `None` for [`Priority::Normal`]: spawned threads already run at the
    /// platform default, so no syscall is issued.
    fn as_os_priority(self) -> Option<ThreadPriority> {
        let value: u8 = match self {
            Self::Normal => return None,
            Self::Low => 20,
            Self::High => 60,
            Self::Highest => 80,
            Self::Realtime => 99,
        };
        // The crossplatform range is 0..=99, so the conversion always holds.
        ThreadPriorityValue::try_from(value)
            .ok()
            .map(ThreadPriority::Crossplatform)
    }
}
