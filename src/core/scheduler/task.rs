//! Task record and the single invocation path shared by both executors
//!
//! A `Task` is created once at registration and lives behind an `Arc` for the
//! rest of the program. The main-loop poll and a worker thread both go
//! through `Task::poll`, which owns the due-ness check, the callback call and
//! the bookkeeping, so the two execution modes cannot drift apart.

use super::stats::TaskCounters;
use alloc::boxed::Box;
use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use pico_tasks_core::scheduler::{
    is_due, remaining_ms, ExecutionMode, IdlePolicy, SpawnFallback, TaskInfo, TaskState,
};
use pico_tasks_core::traits::TimeSource;

/// Zero-argument task body
pub type TaskCallback = Box<dyn FnMut() + Send + 'static>;

/// Registration request for one task
///
/// # Example
///
/// ```
/// use pico_tasks::{IdlePolicy, SpawnFallback, TaskSpec};
///
/// let spec = TaskSpec::new(|| {})
///     .named("debug")
///     .every(300)
///     .threaded()
///     .idle_policy(IdlePolicy::SleepAfterRun)
///     .on_spawn_failure(SpawnFallback::RunInMainLoop);
/// ```
pub struct TaskSpec {
    pub(crate) callback: TaskCallback,
    pub(crate) name: &'static str,
    pub(crate) interval_ms: u32,
    pub(crate) use_thread: bool,
    pub(crate) idle_policy: Option<IdlePolicy>,
    pub(crate) on_spawn_failure: SpawnFallback,
    pub(crate) enabled: bool,
}

impl TaskSpec {
    /// Every-tick, main-loop, enabled task running `callback`
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            callback: Box::new(callback),
            name: "task",
            interval_ms: 0,
            use_thread: false,
            idle_policy: None,
            on_spawn_failure: SpawnFallback::Reject,
            enabled: true,
        }
    }

    /// Name used in logs and by `Scheduler::find_task_by_name`
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Run at most once per `interval_ms` (0 = every check)
    pub fn every(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Offload the task onto a dedicated thread
    pub fn threaded(mut self) -> Self {
        self.use_thread = true;
        self
    }

    /// Idle policy of the dedicated thread (ignored for main-loop tasks)
    pub fn idle_policy(mut self, policy: IdlePolicy) -> Self {
        self.idle_policy = Some(policy);
        self
    }

    /// What to do if the dedicated thread cannot be started
    pub fn on_spawn_failure(mut self, fallback: SpawnFallback) -> Self {
        self.on_spawn_failure = fallback;
        self
    }

    /// Register the task in the disabled state
    pub fn start_disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Outcome of one due-ness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Task is disabled, nothing ran
    Disabled,
    /// Task is enabled but not due yet
    Waiting {
        /// Milliseconds until the task becomes due
        remaining_ms: u32,
    },
    /// Callback is already running on another executor
    Busy,
    /// Callback ran to completion
    Ran {
        /// Callback duration in milliseconds
        execution_ms: u32,
    },
}

/// One registered unit of work
///
/// `enabled`, `last_run_ms` and the counters are atomics because the main
/// loop toggles and inspects tasks that a worker thread is advancing. The
/// callback itself is only reachable through the `busy` claim.
pub struct Task {
    name: &'static str,
    interval_ms: u32,
    idle_policy: IdlePolicy,
    enabled: AtomicBool,
    last_run_ms: AtomicU32,
    busy: AtomicBool,
    counters: TaskCounters,
    callback: UnsafeCell<TaskCallback>,
}

// SAFETY: every access to `callback` happens inside `Task::invoke` while the
// `busy` flag is held, and the flag is acquired with a compare-exchange, so
// at most one thread touches the callback at a time. All other fields are
// atomics or immutable.
unsafe impl Sync for Task {}

/// Releases the `busy` claim, also when the callback unwinds
struct Claim<'a>(&'a AtomicBool);

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Task {
    /// Build a task record
    ///
    /// `last_run_ms` starts at the clock epoch (0), so an interval task first
    /// becomes due once the clock reaches its interval.
    pub(crate) fn new(
        name: &'static str,
        callback: TaskCallback,
        interval_ms: u32,
        idle_policy: IdlePolicy,
        enabled: bool,
    ) -> Self {
        Self {
            name,
            interval_ms,
            idle_policy,
            enabled: AtomicBool::new(enabled),
            last_run_ms: AtomicU32::new(0),
            busy: AtomicBool::new(false),
            counters: TaskCounters::new(),
            callback: UnsafeCell::new(callback),
        }
    }

    /// Task name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Minimum milliseconds between invocations
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Idle policy used by a worker thread
    pub fn idle_policy(&self) -> IdlePolicy {
        self.idle_policy
    }

    /// Whether invocation is gated on
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Timestamp of the most recent interval-tracked invocation
    pub fn last_run_ms(&self) -> u32 {
        self.last_run_ms.load(Ordering::Acquire)
    }

    /// Current state machine position
    pub fn state(&self) -> TaskState {
        if self.busy.load(Ordering::Acquire) {
            TaskState::Executing
        } else if self.is_enabled() {
            TaskState::Waiting
        } else {
            TaskState::Disabled
        }
    }

    /// Gate invocation on
    ///
    /// Re-enabling a disabled interval task restarts its interval at
    /// `now_ms`, so it runs one full interval later instead of at once.
    /// Returns true if the task was disabled before.
    pub(crate) fn enable(&self, now_ms: u32) -> bool {
        if self.is_enabled() {
            return false;
        }
        if self.interval_ms > 0 {
            self.last_run_ms.store(now_ms, Ordering::Release);
        }
        self.enabled.store(true, Ordering::Release);
        true
    }

    /// Gate invocation off. Returns true if the task was enabled before.
    pub(crate) fn disable(&self) -> bool {
        self.enabled.swap(false, Ordering::AcqRel)
    }

    /// Check due-ness at `now_ms` and run the callback if due
    ///
    /// `now_ms` is the tick the due-ness check and `last_run_ms` use; `time`
    /// is read around the callback to measure its duration.
    pub(crate) fn poll<T: TimeSource>(&self, now_ms: u32, time: &T) -> Poll {
        if !self.is_enabled() {
            return Poll::Disabled;
        }

        let last_run_ms = self.last_run_ms();
        if !is_due(now_ms, last_run_ms, self.interval_ms) {
            return Poll::Waiting {
                remaining_ms: remaining_ms(now_ms, last_run_ms, self.interval_ms),
            };
        }

        match self.invoke(now_ms, last_run_ms, time) {
            Some(execution_ms) => Poll::Ran { execution_ms },
            None => Poll::Busy,
        }
    }

    fn invoke<T: TimeSource>(
        &self,
        now_ms: u32,
        observed_last_run_ms: u32,
        time: &T,
    ) -> Option<u32> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return None;
        }
        let _claim = Claim(&self.busy);

        // SAFETY: the busy claim above is held until `_claim` drops, so this
        // is the only live reference to the callback.
        let callback = unsafe { &mut *self.callback.get() };
        let started_ms = time.now_ms();
        callback();

        let execution_ms = time.elapsed_since(started_ms);
        if self.interval_ms > 0 {
            // an `enable` that restarted the interval during the callback wins
            let _ = self.last_run_ms.compare_exchange(
                observed_last_run_ms,
                now_ms,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
        self.counters.record(execution_ms);
        Some(execution_ms)
    }

    /// Snapshot for introspection
    pub(crate) fn info(&self, mode: ExecutionMode) -> TaskInfo {
        TaskInfo {
            name: self.name,
            interval_ms: self.interval_ms,
            enabled: self.is_enabled(),
            state: self.state(),
            mode,
            idle_policy: self.idle_policy,
            last_run_ms: self.last_run_ms(),
            stats: self.counters.snapshot(),
        }
    }
}
