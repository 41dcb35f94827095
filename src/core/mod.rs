//! Core scheduler functionality
//!
//! This module contains the task registry, the two execution paths and the
//! ambient infrastructure (logging, configuration, shared state).

pub mod config;
pub mod logging;
pub mod scheduler;
pub mod traits;
