//! Due-ness arithmetic on a wrapping millisecond counter.
//!
//! All comparisons are made on the elapsed distance `now - last_run` computed
//! with modular subtraction, never on absolute timestamps. A counter wrap
//! between two readings therefore neither hides a due task nor produces a
//! burst of invocations.

/// Returns true when a task with `interval_ms` last run at `last_run_ms` is
/// due at `now_ms`.
///
/// An interval of 0 is always due.
#[inline]
pub const fn is_due(now_ms: u32, last_run_ms: u32, interval_ms: u32) -> bool {
    interval_ms == 0 || now_ms.wrapping_sub(last_run_ms) >= interval_ms
}

/// Milliseconds left until the task becomes due, 0 if it already is.
#[inline]
pub const fn remaining_ms(now_ms: u32, last_run_ms: u32, interval_ms: u32) -> u32 {
    interval_ms.saturating_sub(now_ms.wrapping_sub(last_run_ms))
}
