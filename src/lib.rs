#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! pico_tasks - Periodic and perpetual task scheduler for microcontrollers
//!
//! Tasks are driven either cooperatively from the main control loop
//! (`Scheduler::update()`) or offloaded onto dedicated lightweight threads
//! supplied by a `ThreadProvider`. Both execution modes share one task record
//! and never advance the same task.

extern crate alloc;

// Platform implementations of the collaborator traits
pub mod platform;

// Scheduler, logging, configuration and shared state
pub mod core;

pub use crate::core::config::SchedulerConfig;
pub use crate::core::scheduler::{RunnerStep, Scheduler, StopSignal, TaskRunner, TaskSpec};
pub use pico_tasks_core::scheduler::{
    ExecutionMode, IdlePolicy, SchedulerError, SchedulerStats, SpawnFallback, TaskId, TaskInfo,
    TaskState, TaskStats,
};
pub use pico_tasks_core::traits::{
    MockTime, NoThreads, SpawnError, ThreadEntry, ThreadId, ThreadProvider, TimeSource,
};
