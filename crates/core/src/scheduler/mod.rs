//! Task scheduler types and timing rules
//!
//! This module provides the plain data types shared by both execution modes
//! (main-loop poll and dedicated thread) without any runtime dependencies.
//! The registry, the thread entry routine and the `Scheduler` façade live in
//! the `pico_tasks` crate.
//!
//! # Components
//!
//! - [`types`]: Handles, policies, state and statistics snapshots
//! - [`timing`]: Wraparound-safe due-ness arithmetic
//! - [`error`]: Registration errors
//!
//! # Example
//!
//! ```rust
//! use pico_tasks_core::scheduler::timing::is_due;
//!
//! // 500 ms task last run at t=1000 is due again from t=1500
//! assert!(!is_due(1_499, 1_000, 500));
//! assert!(is_due(1_500, 1_000, 500));
//! ```

pub mod error;
pub mod timing;
pub mod types;

pub use error::SchedulerError;
pub use timing::{is_due, remaining_ms};
pub use types::*;
