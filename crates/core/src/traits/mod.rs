//! Collaborator traits consumed by the scheduler.
//!
//! The scheduler never talks to hardware timers or a threading library
//! directly. It is handed a clock and a thread provider through these traits.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock/null implementations are always available for host testing
//! - Platform implementations (std, Embassy) live in the `pico_tasks` crate

pub mod threads;
pub mod time;

pub use threads::{NoThreads, SpawnError, ThreadEntry, ThreadId, ThreadProvider};
pub use time::{MockTime, TimeSource};
