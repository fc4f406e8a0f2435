use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::WorkerConfig;
use crate::worker::{LifecycleState, Worker};

fn wait_for(condition: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}

#[test]
fn stop_interrupts_an_indefinite_idle_wait() {
    let counter = Arc::new(AtomicUsize::new(0));
    let step = {
        let counter = Arc::clone(&counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }
    };
    // No timeout at all: without the wake, this worker would park forever.
    let mut worker = Worker::with_config(
        step,
        WorkerConfig {
            idle_wait: None,
            ..WorkerConfig::named("parked-worker")
        },
    );
    worker.start().expect("start worker");
    assert!(wait_for(
        || counter.load(Ordering::SeqCst) >= 1,
        Duration::from_secs(2)
    ));

    let stop_started = Instant::now();
    worker.stop().expect("stop parked worker");
    assert!(
        stop_started.elapsed() < Duration::from_secs(2),
        "stop must be bounded by the wake, not by any polling interval"
    );
    assert_eq!(worker.state(), LifecycleState::Stopped);
}

#[test]
fn stop_latency_is_bounded_by_the_wake_not_the_idle_interval() {
    let counter = Arc::new(AtomicUsize::new(0));
    let step = {
        let counter = Arc::clone(&counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }
    };
    // A ten-second poll interval: only the asynchronous wake can make stop
    // return inside the test deadline.
    let mut worker = Worker::with_config(
        step,
        WorkerConfig {
            idle_wait: Some(Duration::from_secs(10)),
            ..WorkerConfig::named("slow-poll-worker")
        },
    );
    worker.start().expect("start worker");
    assert!(wait_for(
        || counter.load(Ordering::SeqCst) >= 1,
        Duration::from_secs(2)
    ));

    let stop_started = Instant::now();
    worker.stop().expect("stop slow-poll worker");
    assert!(stop_started.elapsed() < Duration::from_secs(2));
}

#[test]
fn a_thousand_start_stop_cycles_never_hang_or_run_a_stale_lifecycle() {
    let counter = Arc::new(AtomicUsize::new(0));
    let step = {
        let counter = Arc::clone(&counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }
    };
    let mut worker = Worker::with_config(
        step,
        WorkerConfig {
            idle_wait: Some(Duration::from_millis(1)),
            ..WorkerConfig::named("cycle-worker")
        },
    );

    for cycle in 0..1000 {
        let before = counter.load(Ordering::SeqCst);
        worker
            .start()
            .unwrap_or_else(|error| panic!("cycle {cycle}: start failed: {error}"));
        worker
            .stop()
            .unwrap_or_else(|error| panic!("cycle {cycle}: stop failed: {error}"));
        assert_eq!(worker.state(), LifecycleState::Stopped);
        assert!(
            counter.load(Ordering::SeqCst) > before,
            "cycle {cycle} finished without running a step"
        );
    }
}
