//! Embassy time source
//!
//! Wraps `embassy_time::Instant` so the scheduler reads the same tick counter
//! as the rest of an Embassy firmware. Embassy executors are async and have
//! no blocking spawn/yield/delay primitives, so there is no Embassy
//! `ThreadProvider`; pair `EmbassyTime` with a cooperative thread library's
//! provider or with `NoThreads`.

use pico_tasks_core::traits::TimeSource;

/// Millisecond clock backed by the Embassy time driver
///
/// # Note
///
/// The driver counts in 64-bit ticks. The scheduler only needs a 32-bit
/// millisecond counter, so the value is truncated and wraps after ~49.7 days,
/// which the due-ness arithmetic handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTime;

impl EmbassyTime {
    /// Create a new Embassy time source
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
