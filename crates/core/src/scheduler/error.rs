//! Scheduler error types

use crate::traits::SpawnError;
use core::fmt;

/// Errors from task registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// Registry already holds `capacity` tasks
    RegistryFull {
        /// Configured maximum number of tasks
        capacity: usize,
    },
    /// A dedicated thread was requested but could not be started
    Spawn(SpawnError),
}

impl From<SpawnError> for SchedulerError {
    fn from(err: SpawnError) -> Self {
        SchedulerError::Spawn(err)
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::RegistryFull { capacity } => {
                write!(f, "task registry full ({} tasks)", capacity)
            }
            SchedulerError::Spawn(e) => write!(f, "task thread spawn failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn spawn_error_converts() {
        let err: SchedulerError = SpawnError::OutOfResources.into();
        assert_eq!(err, SchedulerError::Spawn(SpawnError::OutOfResources));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            SchedulerError::RegistryFull { capacity: 4 }.to_string(),
            "task registry full (4 tasks)"
        );
        assert_eq!(
            SchedulerError::Spawn(SpawnError::Unsupported).to_string(),
            "task thread spawn failed: thread provider does not support spawning"
        );
    }
}
