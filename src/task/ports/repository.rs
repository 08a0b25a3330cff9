//! Repository port for task persistence and atomic relocation.

use crate::task::domain::{
    Partition, ProjectId, Task, TaskDomainError, TaskId, TaskStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Parameters for one atomic relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// Task being moved.
    pub task_id: TaskId,
    /// Destination column.
    pub target_status: TaskStatus,
    /// Index among the destination column's other members.
    pub target_index: usize,
    /// Key spacing used for appends and renumbering passes.
    pub spacing: i64,
    /// Timestamp recorded on the moved task.
    pub moved_at: DateTime<Utc>,
}

/// Result of a relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationOutcome {
    /// The moved task as persisted.
    pub task: Task,
    /// Number of sibling keys rewritten by a renumbering pass.
    pub renumbered: usize,
    /// `false` when the task already sat at the requested place.
    pub changed: bool,
}

/// Task persistence contract.
///
/// Only [`TaskRepository::relocate`] may change a stored task's status or
/// position.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::PositionTaken`] when another task in
    /// the partition holds the same key.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Stores a new task at the end of its column.
    ///
    /// The key is chosen from the column's last key with
    /// [`crate::task::domain::plan_append`] in the same atomic step as the
    /// insert, replacing whatever key `task` carried. Returns the task as
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists, [`TaskRepositoryError::Conflict`] when a concurrent writer took
    /// the same key first, or a domain error when no key can be assigned.
    async fn append(&self, task: Task, spacing: i64) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the members of a partition sorted by key.
    async fn list_partition(&self, partition: Partition) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task of a project.
    async fn list_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Moves a task to an index of a column in one atomic step.
    ///
    /// Reads the destination column, plans keys with
    /// [`crate::task::domain::plan_placement`] and writes the moved task plus
    /// any renumbered siblings. No reader observes a partially renumbered
    /// column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist,
    /// [`TaskRepositoryError::Conflict`] when a concurrent writer forced the
    /// transaction to abort, or a domain error when keys cannot be assigned.
    async fn relocate(&self, relocation: Relocation) -> TaskRepositoryResult<RelocationOutcome>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Another task of the partition already holds the key.
    #[error("position already taken in {0}")]
    PositionTaken(Partition),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Key planning failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A concurrent writer caused the operation to abort; safe to retry.
    #[error("write conflict: {0}")]
    Conflict(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when re-issuing the same operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Persistence(_))
    }
}
