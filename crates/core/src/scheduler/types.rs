//! Core types for the task scheduler
//!
//! This module defines the fundamental types used by the task scheduler:
//! - Task handles and registration policies
//! - Task state and statistics snapshots (runtime monitoring)
//! - Scheduler statistics (global metrics)

use crate::traits::ThreadId;
use core::fmt;

/// Stable handle of a registered task.
///
/// Handles are registration indices. Tasks are never removed, so a handle
/// stays valid for the lifetime of the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub usize);

impl TaskId {
    /// Registration index of the task
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// How a dedicated thread idles between invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdlePolicy {
    /// After a successful invocation of an interval task, sleep for the rest
    /// of the interval. Otherwise yield once and re-check.
    #[default]
    SleepAfterRun,
    /// Yield after every iteration and re-check on the next scheduling slot.
    BusyPoll,
}

impl IdlePolicy {
    /// Parses the build-time spelling (`sleep` / `busy`).
    pub const fn from_config(value: &str) -> Option<Self> {
        match value.as_bytes() {
            b"sleep" => Some(IdlePolicy::SleepAfterRun),
            b"busy" => Some(IdlePolicy::BusyPoll),
            _ => None,
        }
    }
}

/// What to do when a threaded task cannot get its thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnFallback {
    /// Do not register the task and report the spawn error
    #[default]
    Reject,
    /// Register the task anyway and let the main-loop poll advance it
    RunInMainLoop,
}

/// Which executor advances a task.
///
/// Exactly one executor ever advances a given task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Advanced by `Scheduler::update()`
    MainLoop,
    /// Advanced by its own dedicated thread
    Threaded(ThreadId),
    /// A thread was requested, spawning failed and the task fell back to the
    /// main-loop poll
    Fallback,
}

impl ExecutionMode {
    /// True when `Scheduler::update()` is responsible for this task
    #[inline]
    pub const fn is_polled(&self) -> bool {
        !matches!(self, ExecutionMode::Threaded(_))
    }

    /// Thread bound to the task, if any
    #[inline]
    pub const fn thread(&self) -> Option<ThreadId> {
        match self {
            ExecutionMode::Threaded(id) => Some(*id),
            _ => None,
        }
    }

    /// Short label for log output
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::MainLoop => "main-loop",
            ExecutionMode::Threaded(_) => "threaded",
            ExecutionMode::Fallback => "main-loop fallback",
        }
    }
}

/// Per-task state machine.
///
/// `Waiting -> Executing` when enabled and due, `Executing -> Waiting` when
/// the callback returns, any state `-> Disabled` on disable and
/// `Disabled -> Waiting` on enable. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Invocation is gated off
    Disabled,
    /// Enabled, waiting to become due
    Waiting,
    /// Callback is running right now
    Executing,
}

/// Runtime statistics for a single task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Total number of invocations (wraps)
    pub invocations: u32,

    /// Duration of the most recent invocation in milliseconds
    pub last_execution_ms: u32,

    /// Longest invocation observed in milliseconds
    pub max_execution_ms: u32,
}

/// Snapshot of one registered task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskInfo {
    /// Human-readable task name for logging and debugging
    pub name: &'static str,

    /// Minimum milliseconds between invocations, 0 for every tick
    pub interval_ms: u32,

    /// Whether invocation is currently gated on
    pub enabled: bool,

    /// Current state machine position
    pub state: TaskState,

    /// Executor advancing the task
    pub mode: ExecutionMode,

    /// Idle policy used when the task runs on a thread
    pub idle_policy: IdlePolicy,

    /// Timestamp of the most recent interval-tracked invocation
    pub last_run_ms: u32,

    /// Invocation statistics
    pub stats: TaskStats,
}

/// Global scheduler statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Number of registered tasks
    pub task_count: usize,

    /// Tasks bound to a dedicated thread
    pub threaded_count: usize,

    /// Tasks currently enabled
    pub enabled_count: usize,

    /// Sum of invocations across all tasks (wraps)
    pub total_invocations: u32,
}

impl SchedulerStats {
    /// Fold one task snapshot into the totals
    pub fn record(&mut self, info: &TaskInfo) {
        self.task_count += 1;
        if info.mode.thread().is_some() {
            self.threaded_count += 1;
        }
        if info.enabled {
            self.enabled_count += 1;
        }
        self.total_invocations = self.total_invocations.wrapping_add(info.stats.invocations);
    }
}
