//! Scheduler configuration
//!
//! Defaults are baked in at build time from environment variables read by
//! `build.rs`:
//!
//! - `PICO_TASKS_MAX_TASKS` - registry capacity (default 32)
//! - `PICO_TASKS_IDLE_POLICY` - `sleep` or `busy` (default `sleep`)
//! - `PICO_TASKS_STACK_BYTES` - host worker thread stack (default 65536)
//!
//! # Example
//!
//! ```
//! use pico_tasks::{IdlePolicy, SchedulerConfig};
//!
//! let config = SchedulerConfig {
//!     max_tasks: 8,
//!     default_idle_policy: IdlePolicy::BusyPoll,
//!     ..SchedulerConfig::default()
//! };
//! assert_eq!(config.max_tasks, 8);
//! ```

use pico_tasks_core::scheduler::IdlePolicy;

/// Registry capacity from the build environment
pub const DEFAULT_MAX_TASKS: usize = {
    const S: &str = env!("PICO_TASKS_MAX_TASKS");
    const_parse_usize(S, 32)
};

/// Idle policy applied to threaded tasks that do not choose one
pub const DEFAULT_IDLE_POLICY: IdlePolicy = {
    const S: &str = env!("PICO_TASKS_IDLE_POLICY");
    match IdlePolicy::from_config(S) {
        Some(policy) => policy,
        None => IdlePolicy::SleepAfterRun,
    }
};

/// Stack size for host worker threads
pub const DEFAULT_STACK_BYTES: usize = {
    const S: &str = env!("PICO_TASKS_STACK_BYTES");
    const_parse_usize(S, 64 * 1024)
};

/// Runtime configuration of a `Scheduler`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Maximum number of tasks the registry accepts
    pub max_tasks: usize,

    /// Idle policy for threaded tasks registered without an explicit one
    pub default_idle_policy: IdlePolicy,

    /// Stack size requested for host worker threads
    pub thread_stack_bytes: usize,

    /// Prefix for worker thread names (`<prefix>-<thread id>`)
    pub thread_name_prefix: &'static str,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_tasks: DEFAULT_MAX_TASKS,
            default_idle_policy: DEFAULT_IDLE_POLICY,
            thread_stack_bytes: DEFAULT_STACK_BYTES,
            thread_name_prefix: "task",
        }
    }
}

/// Parse a decimal usize at compile time, `fallback` on empty or bad input
const fn const_parse_usize(s: &str, fallback: usize) -> usize {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return fallback;
    }

    let mut value: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return fallback;
        }
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as usize) {
                Some(v) => v,
                None => return fallback,
            },
            None => return fallback,
        };
        i += 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_usize_digits() {
        assert_eq!(const_parse_usize("32", 0), 32);
        assert_eq!(const_parse_usize("16384", 0), 16384);
    }

    #[test]
    fn parse_usize_falls_back() {
        assert_eq!(const_parse_usize("", 7), 7);
        assert_eq!(const_parse_usize("12a", 7), 7);
        assert_eq!(const_parse_usize("-1", 7), 7);
        assert_eq!(const_parse_usize("99999999999999999999999", 7), 7);
    }

    #[test]
    fn default_config_uses_build_values() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_tasks, DEFAULT_MAX_TASKS);
        assert_eq!(config.default_idle_policy, DEFAULT_IDLE_POLICY);
        assert_eq!(config.thread_stack_bytes, DEFAULT_STACK_BYTES);
        assert!(config.max_tasks > 0);
    }
}
