//! Error types for task domain validation and parsing.

use super::TaskStatus;
use thiserror::Error;

/// Errors returned while constructing or placing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// Key spacing leaves no room for a key between two neighbours.
    #[error("position spacing must be at least 2, got {0}")]
    InvalidSpacing(i64),

    /// Renumbering a column would overflow the position key space.
    #[error("position space exhausted renumbering {len} tasks in the {status} column")]
    PositionSpaceExhausted {
        /// Column whose keys could not be assigned.
        status: TaskStatus,
        /// Number of tasks the column would hold after placement.
        len: usize,
    },
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
