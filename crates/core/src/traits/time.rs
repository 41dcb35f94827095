//! Time abstraction traits for platform-agnostic timing operations.
//!
//! This module provides the `TimeSource` trait that abstracts over different
//! millisecond counters (Embassy, `std::time`, mock) so the scheduler can be
//! tested on host with fully controlled time.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

/// Monotonic millisecond counter used for due-ness checks.
///
/// The counter is 32 bits wide and is allowed to wrap (after ~49.7 days).
/// Every elapsed-time computation must go through modular subtraction, which
/// `elapsed_since` does, so a wrap corrects itself.
///
/// Implementations:
/// - `EmbassyTime` (in `pico_tasks`, `embassy` feature)
/// - `StdClock` (in `pico_tasks`, `std` feature)
/// - `MockTime` for host testing with controllable time
///
/// # Example
///
/// ```
/// use pico_tasks_core::traits::{MockTime, TimeSource};
///
/// fn poll<T: TimeSource>(time: &T, last_run: &mut u32) -> bool {
///     if time.elapsed_since(*last_run) >= 20 {
///         *last_run = time.now_ms();
///         return true;
///     }
///     false
/// }
///
/// let time = MockTime::new();
/// let mut last = 0;
/// assert!(!poll(&time, &mut last));
/// time.advance(20);
/// assert!(poll(&time, &mut last));
/// ```
pub trait TimeSource: Clone + Send + Sync + 'static {
    /// Returns the current counter value in milliseconds.
    fn now_ms(&self) -> u32;

    /// Returns milliseconds elapsed since `reference_ms`.
    ///
    /// Uses wrapping subtraction so a counter wrap between the two readings
    /// still yields the true distance.
    fn elapsed_since(&self, reference_ms: u32) -> u32 {
        self.now_ms().wrapping_sub(reference_ms)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source with manual time advancement.
///
/// Clones share a single counter, so a test can hand a clone to a worker
/// thread and still move time forward from the test body.
///
/// # Example
///
/// ```
/// use pico_tasks_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let seen_by_worker = time.clone();
///
/// time.advance(250);
/// assert_eq!(seen_by_worker.now_ms(), 250);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockTime {
    current_ms: Arc<AtomicU32>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self::with_initial(0)
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(ms: u32) -> Self {
        Self {
            current_ms: Arc::new(AtomicU32::new(ms)),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u32) {
        self.current_ms.store(ms, Ordering::SeqCst);
    }

    /// Advances the current time, wrapping like a hardware counter.
    pub fn advance(&self, ms: u32) {
        // fetch_add wraps on overflow
        self.current_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u32 {
        self.current_ms.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
