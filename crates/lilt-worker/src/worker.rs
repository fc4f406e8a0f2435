//! Worker lifecycle management: start, cooperative stop, teardown.
//!
//! A [`Worker`] owns at most one OS thread at a time. [`Worker::start`]
//! spawns the thread and hands it the run step; [`Worker::stop`] requests
//! cancellation, wakes an idling thread, and joins it before returning, so
//! once `stop` returns no further step invocation can occur for that
//! lifecycle. Both calls are owner-thread-affine: they must come from the
//! thread that constructed the worker.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use lilt_runtime::handle::{JoinError, ThreadHandle};
use lilt_runtime::wait::WaitOutcome;

use crate::config::WorkerConfig;
use crate::error::{StartError, StopError};
use crate::run_step::RunStep;
use crate::signal::{CancellationSignal, StopToken};

/// Lifecycle phase of a [`Worker`], as seen by the controller thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, never started.
    Idle,
    /// A worker thread is running the step loop.
    Running,
    /// Stop has begun: cancellation is requested, the join is pending.
    StopRequested,
    /// The last lifecycle has fully exited.
    Stopped,
}

/// How a finished worker thread left its run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    /// The cancellation signal was observed.
    Cancelled,
    /// The step returned `false`.
    Voluntary,
    /// The step panicked; the loop was abandoned.
    StepPanicked,
    /// The step slot was empty at thread start.
    StepMissing,
}

/// Manages one dedicated worker thread running a [`RunStep`] in a loop.
///
/// The constructing thread becomes the owner; [`start`](Self::start) and
/// [`stop`](Self::stop) must be called from it. The step value is owned by
/// the manager between lifecycles and by the worker thread while one is
/// running; a stopped worker can be started again with the same step.
///
/// Dropping a running worker performs a full stop first, so the OS thread
/// never outlives the manager.
pub struct Worker {
    config: WorkerConfig,
    owner: ThreadId,
    state: LifecycleState,
    signal: CancellationSignal,
    step: Arc<Mutex<Option<Box<dyn RunStep>>>>,
    handle: Option<ThreadHandle<ExitReason>>,
}

impl Worker {
    /// Creates a manager bound to `step` with the default configuration.
    pub fn new(step: impl RunStep + 'static) -> Self {
        Self::with_config(step, WorkerConfig::default())
    }

    /// Creates a manager bound to `step`.
    pub fn with_config(step: impl RunStep + 'static, config: WorkerConfig) -> Self {
        Self {
            config,
            owner: thread::current().id(),
            state: LifecycleState::Idle,
            signal: CancellationSignal::new(),
            step: Arc::new(Mutex::new(Some(Box::new(step)))),
            handle: None,
        }
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Worker display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Identity of the worker thread, present only while a lifecycle is
    /// running.
    pub fn thread_id(&self) -> Option<ThreadId> {
        match self.state {
            LifecycleState::Running | LifecycleState::StopRequested => {
                self.handle.as_ref().map(|handle| handle.id())
            },
            LifecycleState::Idle | LifecycleState::Stopped => None,
        }
    }

    /// Spawns the worker thread and enters the step loop.
    ///
    /// Valid from `Idle` and `Stopped` only; starting a running worker fails
    /// with [`StartError::AlreadyRunning`] and leaves it undisturbed. On
    /// success the cancellation signal is rearmed, the configured priority
    /// is applied after spawn (best-effort, never fails the start), and the
    /// worker performs at least one step before any stop check.
    pub fn start(&mut self) -> Result<(), StartError> {
        if let Some((owner, caller)) = self.owner_violation() {
            return Err(StartError::NotOwnerThread {
                name: self.config.name.clone(),
                owner,
                caller,
            });
        }
        match self.state {
            LifecycleState::Running | LifecycleState::StopRequested => {
                return Err(StartError::AlreadyRunning {
                    name: self.config.name.clone(),
                });
            },
            LifecycleState::Idle | LifecycleState::Stopped => {},
        }
        if self.step.lock().is_none() {
            return Err(StartError::StepLost {
                name: self.config.name.clone(),
            });
        }

        self.signal.reset();
        let token = self.signal.token();
        let idle_wait = self.config.idle_wait;
        let step_slot = Arc::clone(&self.step);
        // The step stays in its slot until the new thread takes it, so a
        // failed spawn loses nothing and the start can be retried.
        let handle = ThreadHandle::spawn(self.config.spawn_options(), move || {
            let Some(mut step) = step_slot.lock().take() else {
                return ExitReason::StepMissing;
            };
            let reason = run_loop(step.as_mut(), &token, idle_wait);
            *step_slot.lock() = Some(step);
            reason
        })?;
        debug!(worker = %self.config.name, id = ?handle.id(), "worker started");
        self.handle = Some(handle);
        self.state = LifecycleState::Running;
        Ok(())
    }

    /// Requests cancellation, wakes an idling worker, and joins the thread.
    ///
    /// Idempotent: stopping a worker that never ran, or that was already
    /// stopped, succeeds without touching anything. When a lifecycle is
    /// running the call blocks until the worker thread has fully exited;
    /// the join is unbounded by design — a step that must honor a shutdown
    /// deadline encodes it internally.
    pub fn stop(&mut self) -> Result<(), StopError> {
        if let Some((owner, caller)) = self.owner_violation() {
            return Err(StopError::NotOwnerThread {
                name: self.config.name.clone(),
                owner,
                caller,
            });
        }
        match self.state {
            LifecycleState::Idle | LifecycleState::Stopped => Ok(()),
            LifecycleState::Running | LifecycleState::StopRequested => {
                self.state = LifecycleState::StopRequested;
                self.signal.request();
                self.join_worker()
            },
        }
    }

    fn join_worker(&mut self) -> Result<(), StopError> {
        let result = match self.handle.take() {
            Some(mut handle) => handle.join(),
            None => {
                self.state = LifecycleState::Stopped;
                return Ok(());
            },
        };
        self.state = LifecycleState::Stopped;
        match result {
            Ok(reason) => {
                debug!(worker = %self.config.name, ?reason, "worker stopped");
                Ok(())
            },
            // The handle is taken exactly once; nothing left to wait on.
            Err(JoinError::AlreadyJoined { .. }) => Ok(()),
            Err(JoinError::Panicked { .. }) => {
                warn!(worker = %self.config.name, "worker thread panicked outside the run loop");
                Err(StopError::Panicked {
                    name: self.config.name.clone(),
                })
            },
        }
    }

    fn owner_violation(&self) -> Option<(ThreadId, ThreadId)> {
        let caller = thread::current().id();
        (caller != self.owner).then_some((self.owner, caller))
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if matches!(
            self.state,
            LifecycleState::Running | LifecycleState::StopRequested
        ) {
            // Drop may run off the owner thread; join regardless so the OS
            // thread never outlives its manager.
            self.signal.request();
            if let Err(error) = self.join_worker() {
                warn!(worker = %self.config.name, %error, "worker teardown join failed");
            }
        }
    }
}

/// Executes on the worker thread until cancellation, voluntary exit, or a
/// panicked step.
///
/// The step runs before the first cancellation check: the start/stop
/// contract promises at least one unit of work per lifecycle.
fn run_loop(step: &mut dyn RunStep, token: &StopToken, idle_wait: Option<Duration>) -> ExitReason {
    loop {
        let keep_going = match catch_unwind(AssertUnwindSafe(|| step.run_step())) {
            Ok(keep_going) => keep_going,
            Err(_) => {
                warn!("run step panicked, abandoning loop");
                return ExitReason::StepPanicked;
            },
        };
        if !keep_going {
            return ExitReason::Voluntary;
        }
        match token.idle_wait(idle_wait) {
            WaitOutcome::Woken | WaitOutcome::TimedOut => {},
            // Every waker is gone: no stop can ever arrive, only exit.
            WaitOutcome::Disconnected => return ExitReason::Cancelled,
        }
        if token.is_requested() {
            return ExitReason::Cancelled;
        }
    }
}

#[cfg(test)]
#[path = "tests/worker/lifecycle.rs"]
mod lifecycle_tests;

#[cfg(test)]
#[path = "tests/worker/cancellation.rs"]
mod cancellation_tests;
