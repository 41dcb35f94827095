//! Core traits for platform-agnostic scheduling.
//!
//! The clock and thread traits live in `pico_tasks_core` and are re-exported
//! here next to the shared-state abstraction callbacks use to reach common
//! resources.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Application callbacks                        │
//! │         (capture an explicit context, never globals)            │
//! │                           │                                     │
//! │                           ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Core Traits (no feature gates)             │   │
//! │  │  ┌──────────────┐ ┌────────────────┐ ┌───────────────┐ │   │
//! │  │  │ TimeSource   │ │ ThreadProvider │ │ SharedState<T>│ │   │
//! │  │  │ + now_ms()   │ │ + spawn()      │ │ + with()      │ │   │
//! │  │  │              │ │ + yield_now()  │ │ + with_mut()  │ │   │
//! │  │  │              │ │ + delay_ms()   │ │               │ │   │
//! │  │  └──────────────┘ └────────────────┘ └───────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                           │                                     │
//! │        ┌──────────────────┼──────────────────┐                 │
//! │        ▼                  ▼                  ▼                 │
//! │  ┌────────────┐   ┌───────────────┐   ┌─────────────────┐     │
//! │  │ Embassy    │   │ std           │   │ Mock            │     │
//! │  │ EmbassyTime│   │ StdClock      │   │ MockTime        │     │
//! │  │ Embassy-   │   │ StdThreads    │   │ MockThreads     │     │
//! │  │ State<T>   │   │ StdState<T>   │   │ MockState<T>    │     │
//! │  └────────────┘   └───────────────┘   └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Features
//!
//! - **`embassy`**: Enables `EmbassyState<T>` (and `EmbassyTime` in `platform`)
//! - **`std`**: Enables `StdState<T>` (and `StdClock`/`StdThreads` in `platform`)
//! - `MockTime` is always available; `MockState<T>` and `MockThreads` need
//!   test builds or the **`mock`** feature

pub mod sync;

pub use pico_tasks_core::traits::{
    MockTime, NoThreads, SpawnError, ThreadEntry, ThreadId, ThreadProvider, TimeSource,
};
pub use sync::SharedState;

#[cfg(any(test, feature = "mock"))]
pub use sync::MockState;

#[cfg(feature = "embassy")]
pub use sync::EmbassyState;

#[cfg(feature = "std")]
pub use sync::StdState;
