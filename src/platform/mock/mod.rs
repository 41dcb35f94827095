//! Mock platform implementation for testing
//!
//! Provides a thread provider that never starts real threads, for driving
//! the scheduler deterministically together with `MockTime`.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use pico_tasks::platform::mock::MockThreads;
//! use pico_tasks::{MockTime, Scheduler};
//!
//! let threads = MockThreads::new();
//! let mut scheduler = Scheduler::new(MockTime::new(), threads.clone());
//! scheduler.add_task(|| {}, 300, true).unwrap();
//! assert_eq!(threads.spawned(), 1);
//! ```

#![cfg(any(test, feature = "mock"))]

mod threads;

pub use threads::MockThreads;
