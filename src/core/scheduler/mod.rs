//! Task scheduler
//!
//! Runs periodic and perpetual tasks either from the main control loop or
//! on dedicated cooperative threads.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!  register() ──▶ │          Scheduler           │ ◀── enable_task / disable_task
//!                 │  TaskRegistry: Vec<Arc<Task>>│
//!                 └──────┬─────────────────┬─────┘
//!                        │                 │ spawn(TaskRunner)
//!        update() once   │                 ▼
//!        per main loop   │        ┌─────────────────┐
//!                        ▼        │ worker thread   │
//!               MainLoop/Fallback │ step → yield or │
//!               tasks, in order   │ sleep, until    │
//!                                 │ StopSignal      │
//!                                 └─────────────────┘
//! ```
//!
//! Both paths go through `Task::poll`, which checks due-ness with
//! wraparound-safe arithmetic and holds the task's busy claim while the
//! callback runs.
//!
//! # Components
//!
//! - [`scheduler`]: `Scheduler` façade (registration, poll step, control)
//! - [`registry`]: append-only task storage with stable addresses
//! - [`task`]: task record and `TaskSpec` builder
//! - [`runner`]: thread entry routine and stop signal
//! - [`stats`]: per-task counters and aggregate statistics

pub mod registry;
pub mod runner;
#[allow(clippy::module_inception)]
pub mod scheduler;
pub mod stats;
pub mod task;

pub use registry::{TaskEntry, TaskRegistry};
pub use runner::{RunnerStep, StopSignal, TaskRunner};
pub use scheduler::Scheduler;
pub use task::{Task, TaskCallback, TaskSpec};
