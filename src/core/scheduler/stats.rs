//! Task statistics tracking
//!
//! Counters live inside each task record and are updated by whichever
//! executor runs the task (main loop or worker thread). They are plain
//! atomics, so reading a snapshot from the main loop never blocks a worker.

use core::sync::atomic::{AtomicU32, Ordering};
use pico_tasks_core::scheduler::{SchedulerStats, TaskInfo, TaskStats};

/// Lock-free invocation counters for one task
#[derive(Debug, Default)]
pub struct TaskCounters {
    invocations: AtomicU32,
    last_execution_ms: AtomicU32,
    max_execution_ms: AtomicU32,
}

impl TaskCounters {
    /// Creates zeroed counters
    pub const fn new() -> Self {
        Self {
            invocations: AtomicU32::new(0),
            last_execution_ms: AtomicU32::new(0),
            max_execution_ms: AtomicU32::new(0),
        }
    }

    /// Record one completed invocation
    ///
    /// Only the executor that owns the task calls this, so the three stores
    /// never race with each other.
    pub fn record(&self, execution_ms: u32) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        self.last_execution_ms.store(execution_ms, Ordering::Relaxed);
        self.max_execution_ms.fetch_max(execution_ms, Ordering::Relaxed);
    }

    /// Copy of the current counters
    pub fn snapshot(&self) -> TaskStats {
        TaskStats {
            invocations: self.invocations.load(Ordering::Relaxed),
            last_execution_ms: self.last_execution_ms.load(Ordering::Relaxed),
            max_execution_ms: self.max_execution_ms.load(Ordering::Relaxed),
        }
    }
}

/// Fold task snapshots into global scheduler statistics
pub fn collect_stats<I>(tasks: I) -> SchedulerStats
where
    I: IntoIterator<Item = TaskInfo>,
{
    let mut stats = SchedulerStats::default();
    for info in tasks {
        stats.record(&info);
    }
    stats
}
