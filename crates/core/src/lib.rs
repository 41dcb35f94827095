//! pico_tasks_core - Pure no_std building blocks for the pico_tasks scheduler
//!
//! This crate contains the platform-agnostic pieces of the scheduler that can
//! be tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **no_std + alloc**: Only `core` and `alloc` are used
//! - **Trait abstractions**: Clocks and thread providers are injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Collaborator abstractions (`TimeSource`, `ThreadProvider`)
//! - [`scheduler`]: Task types, wraparound-safe timing and error types

#![no_std]

extern crate alloc;

pub mod scheduler;
pub mod traits;
