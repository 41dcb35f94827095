//! Task registry with stable task storage
//!
//! Every task record is heap-allocated on its own behind an `Arc`; the
//! registry's vector only stores the pointers. Growing the vector moves the
//! pointers, never the records, so a worker thread bound to a task keeps a
//! valid reference no matter how many tasks are registered afterwards.
//!
//! The registry is append-only: tasks are never removed and a `TaskId` is the
//! registration index.

use super::task::Task;
use alloc::sync::Arc;
use alloc::vec::Vec;
use pico_tasks_core::scheduler::{ExecutionMode, SchedulerError, TaskId, TaskInfo};

/// One registry slot: the shared task record and who advances it
pub struct TaskEntry {
    task: Arc<Task>,
    mode: ExecutionMode,
}

impl TaskEntry {
    /// Shared task record
    pub fn task(&self) -> &Arc<Task> {
        &self.task
    }

    /// Executor responsible for the task
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Snapshot for introspection
    pub fn info(&self) -> TaskInfo {
        self.task.info(self.mode)
    }
}

/// Owning, append-only collection of tasks
pub struct TaskRegistry {
    entries: Vec<TaskEntry>,
    capacity: usize,
}

impl TaskRegistry {
    /// Empty registry accepting at most `capacity` tasks
    ///
    /// `capacity` is only a limit; storage grows as tasks are appended.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of tasks
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no further task can be appended
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Append a task and return its handle
    pub fn append(
        &mut self,
        task: Arc<Task>,
        mode: ExecutionMode,
    ) -> Result<TaskId, SchedulerError> {
        if self.is_full() {
            return Err(SchedulerError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let id = TaskId(self.entries.len());
        self.entries.push(TaskEntry { task, mode });
        Ok(id)
    }

    /// Bounds-checked lookup
    pub fn get(&self, id: TaskId) -> Option<&TaskEntry> {
        self.entries.get(id.index())
    }

    /// Number of registered tasks
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &TaskEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (TaskId(index), entry))
    }

    /// Linear search by name, first match wins
    ///
    /// Not meant for hot paths - keep the `TaskId` for runtime lookups.
    pub fn find_by_name(&self, name: &str) -> Option<(TaskId, &TaskEntry)> {
        self.iter().find(|(_, entry)| entry.task.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use pico_tasks_core::scheduler::IdlePolicy;
    use pico_tasks_core::traits::ThreadId;

    fn task(name: &'static str, interval_ms: u32) -> Arc<Task> {
        Arc::new(Task::new(
            name,
            Box::new(|| {}),
            interval_ms,
            IdlePolicy::SleepAfterRun,
            true,
        ))
    }

    #[test]
    fn test_append_and_get() {
        let mut registry = TaskRegistry::with_capacity(4);

        let id = registry
            .append(task("test_task", 100), ExecutionMode::MainLoop)
            .unwrap();
        assert_eq!(id, TaskId(0));

        let entry = registry.get(id).expect("task registered");
        assert_eq!(entry.task().name(), "test_task");
        assert_eq!(entry.task().interval_ms(), 100);
        assert_eq!(entry.mode(), ExecutionMode::MainLoop);
    }

    #[test]
    fn test_multiple_registrations() {
        let mut registry = TaskRegistry::with_capacity(4);

        let id1 = registry
            .append(task("task1", 500), ExecutionMode::MainLoop)
            .unwrap();
        let id2 = registry
            .append(task("task2", 100), ExecutionMode::Threaded(ThreadId(0)))
            .unwrap();

        assert_eq!(id1, TaskId(0));
        assert_eq!(id2, TaskId(1));
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get(id2).unwrap().mode().thread(), Some(ThreadId(0)));
    }

    #[test]
    fn test_find_by_name() {
        let mut registry = TaskRegistry::with_capacity(4);
        registry
            .append(task("blink", 500), ExecutionMode::MainLoop)
            .unwrap();
        registry
            .append(task("debug", 300), ExecutionMode::MainLoop)
            .unwrap();

        let (id, entry) = registry.find_by_name("debug").expect("task not found");
        assert_eq!(id, TaskId(1));
        assert_eq!(entry.task().interval_ms(), 300);

        assert!(registry.find_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_iter_in_registration_order() {
        let mut registry = TaskRegistry::with_capacity(4);
        for name in ["a", "b", "c"] {
            registry.append(task(name, 0), ExecutionMode::MainLoop).unwrap();
        }

        let names: Vec<_> = registry.iter().map(|(_, e)| e.task().name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_get_invalid_index() {
        let mut registry = TaskRegistry::with_capacity(4);
        registry.append(task("task1", 0), ExecutionMode::MainLoop).unwrap();

        assert!(registry.get(TaskId(0)).is_some());
        assert!(registry.get(TaskId(1)).is_none());
        assert!(registry.get(TaskId(999)).is_none());
    }

    #[test]
    fn test_registry_full() {
        let mut registry = TaskRegistry::with_capacity(2);
        registry.append(task("t0", 0), ExecutionMode::MainLoop).unwrap();
        registry.append(task("t1", 0), ExecutionMode::MainLoop).unwrap();

        assert!(registry.is_full());
        let err = registry
            .append(task("t2", 0), ExecutionMode::MainLoop)
            .unwrap_err();
        assert_eq!(err, SchedulerError::RegistryFull { capacity: 2 });
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_task_address_stable_across_growth() {
        let mut registry = TaskRegistry::with_capacity(64);

        let first = task("first", 0);
        let held_by_worker = Arc::clone(&first);
        registry.append(first, ExecutionMode::MainLoop).unwrap();
        let before = Arc::as_ptr(registry.get(TaskId(0)).unwrap().task());

        for _ in 0..40 {
            registry.append(task("filler", 0), ExecutionMode::MainLoop).unwrap();
        }

        let after = Arc::as_ptr(registry.get(TaskId(0)).unwrap().task());
        assert_eq!(before, after);
        assert_eq!(Arc::as_ptr(&held_by_worker), after);
        assert_eq!(held_by_worker.name(), "first");
    }

    #[test]
    fn test_unbounded_capacity_does_not_preallocate() {
        let mut registry = TaskRegistry::with_capacity(usize::MAX);
        assert_eq!(registry.capacity(), usize::MAX);
        assert!(!registry.is_full());

        let id = registry.append(task("only", 10), ExecutionMode::MainLoop).unwrap();
        assert_eq!(id, TaskId(0));
        assert_eq!(registry.count(), 1);
    }
}
