//! Platform implementations of the scheduler's collaborator traits
//!
//! The scheduler core only sees `TimeSource` and `ThreadProvider`. This module
//! provides the concrete clocks and thread providers for each target.
//!
//! - `host` (`std` feature): `StdClock`, `StdThreads`
//! - `embassy` (`embassy` feature): `EmbassyTime`
//! - `mock` (tests or `mock` feature): `MockThreads`
//!
//! `MockTime` and `NoThreads` are always available from `pico_tasks_core`.

#[cfg(feature = "std")]
pub mod host;

#[cfg(feature = "embassy")]
pub mod embassy;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(feature = "std")]
pub use host::{StdClock, StdThreads};

#[cfg(feature = "embassy")]
pub use embassy::EmbassyTime;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockThreads;
