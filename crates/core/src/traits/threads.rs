//! Thread provider abstraction for offloading tasks onto worker threads.
//!
//! The scheduler does not implement threads itself. A lightweight cooperative
//! thread library (or `std::thread` on host) supplies creation, yielding and
//! delays through `ThreadProvider`. The provider has no scheduling policy of
//! its own as far as the scheduler is concerned.

use alloc::boxed::Box;
use core::fmt;

/// Entry routine handed to `ThreadProvider::spawn`.
///
/// The closure owns everything the thread needs (the bound task, a clock and
/// a provider clone), so no raw argument pointer crosses the boundary.
pub type ThreadEntry = Box<dyn FnOnce() + Send + 'static>;

/// Identifier of a thread started by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadId(pub u32);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread#{}", self.0)
    }
}

/// Reasons a provider could not start a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// The provider cannot create threads at all
    Unsupported,
    /// No stack memory or thread slots left
    OutOfResources,
    /// The provider declined the request
    Refused,
}

impl SpawnError {
    /// Static description, usable with log transports that only take `&str`
    pub const fn as_str(&self) -> &'static str {
        match self {
            SpawnError::Unsupported => "thread provider does not support spawning",
            SpawnError::OutOfResources => "thread provider out of resources",
            SpawnError::Refused => "thread provider refused to spawn",
        }
    }
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cooperative thread primitives.
///
/// Providers are cloned into every worker so the worker can yield and sleep
/// through the same provider that started it.
pub trait ThreadProvider: Clone + Send + Sync + 'static {
    /// Starts a thread running `entry` and returns its identifier.
    fn spawn(&self, entry: ThreadEntry) -> Result<ThreadId, SpawnError>;

    /// Relinquishes the CPU until the provider reschedules the caller.
    fn yield_now(&self);

    /// Sleeps the calling thread for roughly `ms` milliseconds.
    fn delay_ms(&self, ms: u32);
}

/// Provider for builds without any thread support.
///
/// Every spawn fails with `SpawnError::Unsupported`, so only main-loop tasks
/// (or tasks registered with a main-loop fallback) can be scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThreads;

impl ThreadProvider for NoThreads {
    fn spawn(&self, _entry: ThreadEntry) -> Result<ThreadId, SpawnError> {
        Err(SpawnError::Unsupported)
    }

    fn yield_now(&self) {
        core::hint::spin_loop();
    }

    fn delay_ms(&self, _ms: u32) {}
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn no_threads_rejects_spawn() {
        let provider = NoThreads;
        let result = provider.spawn(Box::new(|| {}));
        assert_eq!(result, Err(SpawnError::Unsupported));
    }

    #[test]
    fn thread_id_display() {
        assert_eq!(ThreadId(3).to_string(), "thread#3");
    }
}
