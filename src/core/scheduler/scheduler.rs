//! Scheduler façade
//!
//! Owns the task registry and decides, once per task at registration, which
//! executor advances it: `update()` on the main loop, or a dedicated thread
//! running a `TaskRunner`. The choice never changes afterwards, so a task is
//! never advanced by both.

use super::registry::TaskRegistry;
use super::runner::{StopSignal, TaskRunner};
use super::stats::collect_stats;
use super::task::{Task, TaskSpec};
use crate::core::config::SchedulerConfig;
use crate::{log_debug, log_error, log_info, log_warn};
use alloc::sync::Arc;
use pico_tasks_core::scheduler::{
    ExecutionMode, SchedulerError, SchedulerStats, SpawnFallback, TaskId, TaskInfo,
};
use pico_tasks_core::traits::{NoThreads, ThreadProvider, TimeSource};

/// Task scheduler
///
/// # Example
///
/// ```
/// use pico_tasks::{MockTime, Scheduler};
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// let time = MockTime::new();
/// let mut scheduler = Scheduler::main_loop_only(time.clone());
///
/// let blinks = Arc::new(AtomicU32::new(0));
/// let counter = Arc::clone(&blinks);
/// scheduler
///     .add_task(move || { counter.fetch_add(1, Ordering::Relaxed); }, 500, false)
///     .unwrap();
///
/// for _ in 0..20 {
///     time.advance(100);
///     scheduler.update();
/// }
/// assert_eq!(blinks.load(Ordering::Relaxed), 4);
/// ```
pub struct Scheduler<T: TimeSource, P: ThreadProvider = NoThreads> {
    registry: TaskRegistry,
    time: T,
    threads: P,
    config: SchedulerConfig,
    stop: StopSignal,
}

impl<T: TimeSource> Scheduler<T, NoThreads> {
    /// Scheduler without thread support
    ///
    /// Threaded registrations fail unless they opt into
    /// `SpawnFallback::RunInMainLoop`.
    pub fn main_loop_only(time: T) -> Self {
        Self::new(time, NoThreads)
    }
}

impl<T: TimeSource, P: ThreadProvider> Scheduler<T, P> {
    /// Scheduler with the build-time default configuration
    pub fn new(time: T, threads: P) -> Self {
        Self::with_config(time, threads, SchedulerConfig::default())
    }

    /// Scheduler with an explicit configuration
    pub fn with_config(time: T, threads: P, config: SchedulerConfig) -> Self {
        Self {
            registry: TaskRegistry::with_capacity(config.max_tasks),
            time,
            threads,
            config,
            stop: StopSignal::new(),
        }
    }

    /// Register an enabled task with the default policies
    ///
    /// `interval_ms == 0` runs the callback on every poll. With `use_thread`
    /// the task gets its own thread, which starts evaluating due-ness at once.
    pub fn add_task<F>(
        &mut self,
        callback: F,
        interval_ms: u32,
        use_thread: bool,
    ) -> Result<TaskId, SchedulerError>
    where
        F: FnMut() + Send + 'static,
    {
        let mut spec = TaskSpec::new(callback).every(interval_ms);
        if use_thread {
            spec = spec.threaded();
        }
        self.register(spec)
    }

    /// Register a task described by `spec`
    ///
    /// On error nothing is registered and the task count is unchanged.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::RegistryFull` when `config.max_tasks` is reached
    /// - `SchedulerError::Spawn` when the thread could not be started and the
    ///   spec keeps `SpawnFallback::Reject`
    pub fn register(&mut self, spec: TaskSpec) -> Result<TaskId, SchedulerError> {
        if self.registry.is_full() {
            log_warn!(
                "task '{}' rejected: registry full ({} tasks)",
                spec.name,
                self.registry.capacity()
            );
            return Err(SchedulerError::RegistryFull {
                capacity: self.registry.capacity(),
            });
        }

        let TaskSpec {
            callback,
            name,
            interval_ms,
            use_thread,
            idle_policy,
            on_spawn_failure,
            enabled,
        } = spec;

        let idle_policy = idle_policy.unwrap_or(self.config.default_idle_policy);
        let task = Arc::new(Task::new(name, callback, interval_ms, idle_policy, enabled));

        let mode = if use_thread {
            self.spawn_worker(&task, on_spawn_failure)?
        } else {
            ExecutionMode::MainLoop
        };

        let id = self.registry.append(task, mode)?;
        log_info!(
            "registered task '{}' as #{} ({} ms, {})",
            name,
            id.index(),
            interval_ms,
            mode.as_str()
        );
        Ok(id)
    }

    fn spawn_worker(
        &self,
        task: &Arc<Task>,
        fallback: SpawnFallback,
    ) -> Result<ExecutionMode, SchedulerError> {
        let runner = TaskRunner::new(
            Arc::clone(task),
            self.time.clone(),
            self.threads.clone(),
            self.stop.clone(),
        );

        match self.threads.spawn(runner.into_entry()) {
            Ok(thread) => Ok(ExecutionMode::Threaded(thread)),
            Err(error) => match fallback {
                SpawnFallback::Reject => {
                    log_error!("task '{}' thread spawn failed: {}", task.name(), error.as_str());
                    Err(SchedulerError::Spawn(error))
                }
                SpawnFallback::RunInMainLoop => {
                    log_warn!(
                        "task '{}' thread spawn failed ({}), running in main loop",
                        task.name(),
                        error.as_str()
                    );
                    Ok(ExecutionMode::Fallback)
                }
            },
        }
    }

    /// Advance every main-loop task once, in registration order
    ///
    /// Call once per main-loop iteration. Tasks bound to a thread are
    /// skipped. The clock is read once per call, so every task due in this
    /// pass records the same `last_run_ms`.
    pub fn update(&self) {
        let now_ms = self.time.now_ms();

        for (_, entry) in self.registry.iter() {
            if entry.mode().is_polled() {
                entry.task().poll(now_ms, &self.time);
            }
        }
    }

    /// Gate a task on; out-of-range ids are ignored
    ///
    /// A disabled interval task restarts its interval from now.
    pub fn enable_task(&self, id: TaskId) {
        if let Some(entry) = self.registry.get(id) {
            if entry.task().enable(self.time.now_ms()) {
                log_debug!("task '{}' enabled", entry.task().name());
            }
        }
    }

    /// Gate a task off; out-of-range ids are ignored
    ///
    /// A threaded task keeps its thread, which idles until re-enabled.
    pub fn disable_task(&self, id: TaskId) {
        if let Some(entry) = self.registry.get(id) {
            if entry.task().disable() {
                log_debug!("task '{}' disabled", entry.task().name());
            }
        }
    }

    /// Ask every worker thread to leave its loop
    ///
    /// Workers stop at their next iteration. Tasks stay registered and
    /// main-loop tasks keep running through `update()`.
    pub fn shutdown(&self) {
        if !self.stop.is_requested() {
            log_info!("scheduler shutdown requested");
        }
        self.stop.request();
    }

    /// Whether a task is enabled, `None` for an unknown id
    pub fn is_enabled(&self, id: TaskId) -> Option<bool> {
        self.registry.get(id).map(|entry| entry.task().is_enabled())
    }

    /// Number of registered tasks
    pub fn task_count(&self) -> usize {
        self.registry.count()
    }

    /// Snapshot of one task
    pub fn task_info(&self, id: TaskId) -> Option<TaskInfo> {
        self.registry.get(id).map(|entry| entry.info())
    }

    /// Snapshots of all tasks in registration order
    pub fn iter_tasks(&self) -> impl Iterator<Item = (TaskId, TaskInfo)> + '_ {
        self.registry.iter().map(|(id, entry)| (id, entry.info()))
    }

    /// First task registered under `name`
    pub fn find_task_by_name(&self, name: &str) -> Option<TaskId> {
        self.registry.find_by_name(name).map(|(id, _)| id)
    }

    /// Aggregate statistics over all tasks
    pub fn stats(&self) -> SchedulerStats {
        collect_stats(self.iter_tasks().map(|(_, info)| info))
    }

    /// Stop signal shared with the worker threads
    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Clock used for due-ness checks
    pub fn time(&self) -> &T {
        &self.time
    }

    /// Thread provider used for offloaded tasks
    pub fn threads(&self) -> &P {
        &self.threads
    }

    /// Active configuration
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}
