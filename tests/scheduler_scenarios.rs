//! Host integration tests for the scheduler's observable behaviour
//!
//! Main-loop scenarios run on `MockTime` for exact timing. Threaded
//! scenarios use real `std` threads and a wall clock, so they only assert
//! bounds and are serialized.

#![cfg(feature = "std")]

use pico_tasks::platform::{StdClock, StdThreads};
use pico_tasks::{
    ExecutionMode, MockTime, Scheduler, SchedulerConfig, TaskId, TaskSpec, TimeSource,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn counter() -> (Arc<AtomicU32>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&count);
    (count, move || {
        seen.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn interval_task_runs_every_500ms_over_two_seconds() {
    let time = MockTime::new();
    let mut scheduler = Scheduler::main_loop_only(time.clone());

    let stamps = Arc::new(Mutex::new(Vec::new()));
    let clock = time.clone();
    let seen = Arc::clone(&stamps);
    scheduler
        .add_task(move || seen.lock().unwrap().push(clock.now_ms()), 500, false)
        .unwrap();

    for _ in 0..20 {
        time.advance(100);
        scheduler.update();
    }

    assert_eq!(*stamps.lock().unwrap(), [500, 1_000, 1_500, 2_000]);
}

#[test]
fn zero_interval_task_runs_on_every_update() {
    let mut scheduler = Scheduler::main_loop_only(MockTime::new());
    let (count, callback) = counter();
    scheduler.add_task(callback, 0, false).unwrap();

    for _ in 0..10 {
        scheduler.update();
    }

    assert_eq!(count.load(Ordering::SeqCst), 10);
}

#[test]
fn disabling_unknown_handle_changes_nothing() {
    let time = MockTime::new();
    let mut scheduler = Scheduler::main_loop_only(time.clone());
    let (first, first_cb) = counter();
    let (second, second_cb) = counter();
    let a = scheduler.add_task(first_cb, 100, false).unwrap();
    let b = scheduler.add_task(second_cb, 0, false).unwrap();

    scheduler.disable_task(TaskId(999));

    assert_eq!(scheduler.task_count(), 2);
    assert_eq!(scheduler.is_enabled(a), Some(true));
    assert_eq!(scheduler.is_enabled(b), Some(true));

    time.set(100);
    scheduler.update();
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn mixed_intervals_over_250ms() {
    let time = MockTime::new();
    let mut scheduler = Scheduler::main_loop_only(time.clone());
    let (every_100, cb_100) = counter();
    let (every_200, cb_200) = counter();
    let (every_tick, cb_tick) = counter();
    scheduler.add_task(cb_100, 100, false).unwrap();
    scheduler.add_task(cb_200, 200, false).unwrap();
    scheduler.add_task(cb_tick, 0, false).unwrap();

    for _ in 0..5 {
        time.advance(50);
        scheduler.update();
    }

    assert_eq!(every_tick.load(Ordering::SeqCst), 5);
    assert_eq!(every_100.load(Ordering::SeqCst), 2);
    assert_eq!(every_200.load(Ordering::SeqCst), 1);
}

#[test]
#[serial_test::serial]
fn threaded_task_pauses_while_disabled() {
    let threads = StdThreads::from_config(&SchedulerConfig::default());
    let mut scheduler = Scheduler::new(StdClock::new(), threads.clone());
    let (count, callback) = counter();

    let id = scheduler.add_task(callback, 300, true).unwrap();
    // first due at 300 ms, so nothing can have run yet
    scheduler.disable_task(id);

    thread::sleep(Duration::from_millis(1_000));
    assert_eq!(count.load(Ordering::SeqCst), 0);

    scheduler.enable_task(id);
    thread::sleep(Duration::from_millis(800));
    assert!(count.load(Ordering::SeqCst) >= 1);

    scheduler.shutdown();
    assert_eq!(threads.join_all(), 1);
}

#[test]
#[serial_test::serial]
fn threaded_task_runs_on_its_own_thread() {
    let threads = StdThreads::new(64 * 1024, "worker");
    let mut scheduler = Scheduler::new(StdClock::new(), threads.clone());

    let names = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&names);
    let id = scheduler
        .register(
            TaskSpec::new(move || {
                let name = thread::current().name().map(str::to_owned);
                seen.lock().unwrap().push(name);
            })
            .named("probe")
            .every(20)
            .threaded(),
        )
        .unwrap();

    for _ in 0..20 {
        scheduler.update();
        thread::sleep(Duration::from_millis(10));
    }
    scheduler.shutdown();
    threads.join_all();

    let names = names.lock().unwrap();
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| n.as_deref() == Some("worker-0")));

    let info = scheduler.task_info(id).unwrap();
    assert!(matches!(info.mode, ExecutionMode::Threaded(_)));
    assert_eq!(info.stats.invocations as usize, names.len());
}

#[test]
#[serial_test::serial]
fn shutdown_lets_main_loop_tasks_continue() {
    let threads = StdThreads::from_config(&SchedulerConfig::default());
    let mut scheduler = Scheduler::new(StdClock::new(), threads.clone());
    let (worker_runs, worker_cb) = counter();
    let (main_runs, main_cb) = counter();
    scheduler.add_task(worker_cb, 0, true).unwrap();
    scheduler.add_task(main_cb, 0, false).unwrap();

    thread::sleep(Duration::from_millis(20));
    scheduler.shutdown();
    assert_eq!(threads.join_all(), 1);

    let stopped_at = worker_runs.load(Ordering::SeqCst);
    scheduler.update();
    scheduler.update();

    assert_eq!(worker_runs.load(Ordering::SeqCst), stopped_at);
    assert_eq!(main_runs.load(Ordering::SeqCst), 2);
}
