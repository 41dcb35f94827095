//! Hosted (std) clock and thread provider
//!
//! `StdClock` and `StdThreads` run the scheduler on a desktop OS for demos
//! and integration tests. Worker threads are preemptive here, which is a
//! superset of the cooperative behaviour expected on a microcontroller.

use crate::core::config::SchedulerConfig;
use pico_tasks_core::traits::{SpawnError, ThreadEntry, ThreadId, ThreadProvider, TimeSource};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Millisecond clock measured from its creation
///
/// Clones share the epoch.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    epoch: Instant,
}

impl StdClock {
    /// Clock reading 0 now
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for StdClock {
    fn now_ms(&self) -> u32 {
        // truncation wraps like a hardware counter
        self.epoch.elapsed().as_millis() as u32
    }
}

struct Workers {
    next_id: AtomicU32,
    handles: Mutex<Vec<JoinHandle<()>>>,
    stack_bytes: usize,
    name_prefix: &'static str,
}

/// `std::thread` backed provider
///
/// Threads are named `<prefix>-<id>` and keep their join handles so a host
/// program can wait for workers after `Scheduler::shutdown()`.
#[derive(Clone)]
pub struct StdThreads {
    workers: Arc<Workers>,
}

impl StdThreads {
    /// Provider with an explicit stack size and thread name prefix
    pub fn new(stack_bytes: usize, name_prefix: &'static str) -> Self {
        Self {
            workers: Arc::new(Workers {
                next_id: AtomicU32::new(0),
                handles: Mutex::new(Vec::new()),
                stack_bytes,
                name_prefix,
            }),
        }
    }

    /// Provider using the stack size and name prefix of `config`
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.thread_stack_bytes, config.thread_name_prefix)
    }

    /// Number of threads started and not joined yet
    pub fn running(&self) -> usize {
        self.handles().len()
    }

    /// Wait for every started thread to return
    ///
    /// Only returns once the workers observe a stop request, so call it after
    /// `Scheduler::shutdown()`. Returns the number of threads joined.
    pub fn join_all(&self) -> usize {
        let handles: Vec<_> = self.handles().drain(..).collect();
        let joined = handles.len();

        for handle in handles {
            let name = handle.thread().name().map(str::to_owned);
            if handle.join().is_err() {
                crate::log_error!(
                    "worker '{}' panicked",
                    name.as_deref().unwrap_or("unnamed")
                );
            }
        }

        joined
    }

    fn handles(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.workers
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StdThreads {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}

impl ThreadProvider for StdThreads {
    fn spawn(&self, entry: ThreadEntry) -> Result<ThreadId, SpawnError> {
        let id = self.workers.next_id.fetch_add(1, Ordering::Relaxed);

        let handle = thread::Builder::new()
            .name(format!("{}-{}", self.workers.name_prefix, id))
            .stack_size(self.workers.stack_bytes)
            .spawn(entry)
            .map_err(|_| SpawnError::OutOfResources)?;

        self.handles().push(handle);
        Ok(ThreadId(id))
    }

    fn yield_now(&self) {
        thread::yield_now();
    }

    fn delay_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_std_clock_starts_near_zero() {
        let clock = StdClock::new();
        assert!(clock.now_ms() < 1_000);
    }

    #[test]
    fn test_std_clock_advances() {
        let clock = StdClock::new();
        let start = clock.now_ms();
        thread::sleep(Duration::from_millis(20));
        assert!(clock.elapsed_since(start) >= 20);
    }

    #[test]
    #[serial_test::serial]
    fn test_std_threads_spawn_and_join() {
        let threads = StdThreads::new(64 * 1024, "test");
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        let first = threads
            .spawn(Box::new(move || {
                let name = thread::current().name().map(str::to_owned);
                assert_eq!(name.as_deref(), Some("test-0"));
                flag.store(true, Ordering::SeqCst);
            }))
            .unwrap();
        let second = threads.spawn(Box::new(|| {})).unwrap();

        assert_eq!(first, ThreadId(0));
        assert_eq!(second, ThreadId(1));
        assert_eq!(threads.join_all(), 2);
        assert_eq!(threads.running(), 0);
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    #[serial_test::serial]
    fn test_std_threads_join_survives_worker_panic() {
        let threads = StdThreads::from_config(&SchedulerConfig::default());
        threads.spawn(Box::new(|| panic!("worker fault"))).unwrap();

        assert_eq!(threads.join_all(), 1);
    }
}
