//! Thread entry routine for offloaded tasks
//!
//! A `TaskRunner` is bound to exactly one task at spawn time and advances it
//! on a dedicated thread. Each iteration checks the stop signal, polls the
//! task through the same path `Scheduler::update()` uses, then gives the CPU
//! back to the thread provider:
//!
//! - after running an interval task with `IdlePolicy::SleepAfterRun`, sleep
//!   for the rest of the interval (callback duration subtracted)
//! - in every other case (not due, disabled, every-tick task, `BusyPoll`),
//!   yield once and re-check on the next scheduling slot

use super::task::{Poll, Task};
use alloc::boxed::Box;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};
use pico_tasks_core::scheduler::IdlePolicy;
use pico_tasks_core::traits::{ThreadEntry, ThreadProvider, TimeSource};

/// Cooperative shutdown request shared by the scheduler and its workers
///
/// Workers check it once per iteration, so a worker stops at the next
/// scheduling slot after `request()` and never in the middle of a callback.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Signal in the not-requested state
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this signal to stop
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether stop has been requested
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// What a runner does after one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerStep {
    /// Yield once, then re-check
    Yield,
    /// Sleep for the given milliseconds, then re-check
    Sleep(u32),
    /// Stop was requested, leave the loop
    Stop,
}

/// Loop body of a dedicated task thread
pub struct TaskRunner<T: TimeSource, P: ThreadProvider> {
    task: Arc<Task>,
    time: T,
    threads: P,
    stop: StopSignal,
}

impl<T: TimeSource, P: ThreadProvider> TaskRunner<T, P> {
    pub(crate) fn new(task: Arc<Task>, time: T, threads: P, stop: StopSignal) -> Self {
        Self {
            task,
            time,
            threads,
            stop,
        }
    }

    /// Name of the bound task
    pub fn task_name(&self) -> &'static str {
        self.task.name()
    }

    /// Run one iteration and report how the thread should idle
    pub fn step(&self) -> RunnerStep {
        if self.stop.is_requested() {
            return RunnerStep::Stop;
        }

        let now_ms = self.time.now_ms();
        match self.task.poll(now_ms, &self.time) {
            Poll::Ran { execution_ms } => self.idle_after_run(execution_ms),
            Poll::Disabled | Poll::Waiting { .. } | Poll::Busy => RunnerStep::Yield,
        }
    }

    fn idle_after_run(&self, execution_ms: u32) -> RunnerStep {
        match self.task.idle_policy() {
            IdlePolicy::SleepAfterRun => {
                match self.task.interval_ms().saturating_sub(execution_ms) {
                    0 => RunnerStep::Yield,
                    rest_ms => RunnerStep::Sleep(rest_ms),
                }
            }
            IdlePolicy::BusyPoll => RunnerStep::Yield,
        }
    }

    /// Loop until stop is requested
    pub fn run(self) {
        crate::log_debug!("task '{}' worker started", self.task.name());

        loop {
            match self.step() {
                RunnerStep::Yield => self.threads.yield_now(),
                RunnerStep::Sleep(ms) => self.threads.delay_ms(ms),
                RunnerStep::Stop => break,
            }
        }

        crate::log_debug!("task '{}' worker stopped", self.task.name());
    }

    /// Box the loop as a thread entry
    pub(crate) fn into_entry(self) -> ThreadEntry {
        Box::new(move || self.run())
    }
}
