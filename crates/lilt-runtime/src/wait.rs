//! Interruptible idle waiting.
//!
//! A worker with nothing to do must not busy-poll its stop flag; it parks in
//! [`IdleWait::wait`] until either the timeout elapses or the controller
//! fires the paired [`Waker`]. The channel behind [`wake_channel`] holds a
//! single token, so a wake issued while the worker is still busy in its step
//! is consumed by the next wait instead of being lost.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

/// Outcome of one [`IdleWait::wait`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The paired waker fired.
    Woken,
    /// The timeout elapsed without a wake.
    TimedOut,
    /// Every paired waker is gone; no wake can ever arrive.
    Disconnected,
}

/// Blocking, cancellable wait capability handed to a worker thread.
pub trait IdleWait: Send {
    /// Parks the calling thread until a wake arrives or `timeout` elapses.
    ///
    /// `None` waits indefinitely; only a wake (or waker disconnect) returns.
    fn wait(&self, timeout: Option<Duration>) -> WaitOutcome;
}

/// Controller-side handle that interrupts a paired [`IdleWait`].
pub trait Waker: Send + Sync {
    /// Wakes the paired waiter, even one blocked with no timeout pending.
    fn wake(&self);
}

/// Creates a connected waker/waiter pair.
pub fn wake_channel() -> (ChannelWaker, ChannelWait) {
    let (tx, rx) = crossbeam_channel::bounded::<()>(1);
    (ChannelWaker { tx }, ChannelWait { rx })
}

/// [`Waker`] half of [`wake_channel`].
#[derive(Clone)]
pub struct ChannelWaker {
    tx: Sender<()>,
}

impl Waker for ChannelWaker {
    fn wake(&self) {
        match self.tx.try_send(()) {
            // Full means a wake is already pending; one token is enough.
            Ok(()) | Err(TrySendError::Full(())) => {},
            // Waiter already gone; nothing left to interrupt.
            Err(TrySendError::Disconnected(())) => {},
        }
    }
}

/// [`IdleWait`] half of [`wake_channel`].
#[derive(Clone)]
pub struct ChannelWait {
    rx: Receiver<()>,
}

impl ChannelWait {
    /// Discards a pending wake token, if any.
    ///
    /// Called between lifecycles so a wake fired after the previous worker
    /// exited cannot cut the next worker's first wait short.
    pub fn drain(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

impl IdleWait for ChannelWait {
    fn wait(&self, timeout: Option<Duration>) -> WaitOutcome {
        match timeout {
            Some(timeout) => match self.rx.recv_timeout(timeout) {
                Ok(()) => WaitOutcome::Woken,
                Err(RecvTimeoutError::Timeout) => WaitOutcome::TimedOut,
                Err(RecvTimeoutError::Disconnected) => WaitOutcome::Disconnected,
            },
            None => match self.rx.recv() {
                Ok(()) => WaitOutcome::Woken,
                Err(_) => WaitOutcome::Disconnected,
            },
        }
    }
}
