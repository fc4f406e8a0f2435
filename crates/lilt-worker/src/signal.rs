//! Cooperative cancellation: a shared flag plus a wake channel.
//!
//! A polled flag alone leaves shutdown latency unbounded when the worker is
//! parked in a wait with no timeout. Pairing the flag with an asynchronous
//! wake closes that gap: [`CancellationSignal::request`] publishes the flag
//! and then interrupts the wait, so the worker observes the stop promptly
//! without ever busy-polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use lilt_runtime::wait::{ChannelWait, ChannelWaker, IdleWait, WaitOutcome, Waker, wake_channel};

/// Controller-side cancellation signal, one per manager instance.
///
/// The flag only ever moves false → true within a lifecycle; repeated
/// requests are harmless. [`reset`](Self::reset) rearms the signal for the
/// next lifecycle and must only run while no worker thread is alive — the
/// owning manager enforces that by resetting inside `start`.
pub(crate) struct CancellationSignal {
    flag: Arc<AtomicBool>,
    waker: ChannelWaker,
    wait: ChannelWait,
}

impl CancellationSignal {
    pub(crate) fn new() -> Self {
        let (waker, wait) = wake_channel();
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            waker,
            wait,
        }
    }

    /// Sets the flag, then fires the wake at the worker so a blocked wait
    /// returns immediately even with no timeout pending.
    ///
    /// The store happens before the wake: a worker woken by this call must
    /// observe the flag as set.
    pub(crate) fn request(&self) {
        self.flag.store(true, Ordering::Release);
        self.waker.wake();
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Clears the flag and any stale wake token from the previous lifecycle.
    pub(crate) fn reset(&self) {
        self.flag.store(false, Ordering::Release);
        self.wait.drain();
    }

    /// Worker-side view of this signal, moved onto the worker thread.
    pub(crate) fn token(&self) -> StopToken {
        StopToken {
            flag: Arc::clone(&self.flag),
            wait: self.wait.clone(),
        }
    }
}

/// Worker-side observer of a [`CancellationSignal`].
pub(crate) struct StopToken {
    flag: Arc<AtomicBool>,
    wait: ChannelWait,
}

impl StopToken {
    /// Observes a completed [`CancellationSignal::request`] with acquire
    /// ordering; never reads a torn or stale flag.
    pub(crate) fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Parks the worker until the wake fires or `timeout` elapses.
    pub(crate) fn idle_wait(&self, timeout: Option<Duration>) -> WaitOutcome {
        self.wait.wait(timeout)
    }
}

#[cfg(test)]
#[path = "tests/signal.rs"]
mod tests;
