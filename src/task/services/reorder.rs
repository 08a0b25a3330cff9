//! Position resolver: turns a move intent into persisted ordering keys.

use crate::config::{ReorderConfig, ReorderConfigError};
use crate::task::{
    domain::{MoveIntent, ParseTaskStatusError, Task, TaskId, TaskStatus},
    ports::{Relocation, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for moving a task within or across columns.
///
/// The status arrives as a string so that unknown columns are rejected by
/// the resolver rather than by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    target_status: String,
    target_index: usize,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>, target_index: usize) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
            target_index,
        }
    }

    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

impl From<MoveIntent> for MoveTaskRequest {
    fn from(intent: MoveIntent) -> Self {
        Self::new(
            intent.task_id,
            intent.target_status.as_str(),
            intent.target_index,
        )
    }
}

/// Service-level errors for move resolution.
#[derive(Debug, Error)]
pub enum TaskReorderError {
    /// The requested status is not a known column.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The task does not exist, possibly deleted by another session.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskReorderError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl TaskReorderError {
    /// Returns `true` when re-issuing the same move may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Repository(err) => err.is_transient(),
            Self::InvalidStatus(_) | Self::NotFound(_) => false,
        }
    }
}

/// Result type for move resolution.
pub type TaskReorderResult<T> = Result<T, TaskReorderError>;

/// Resolves move intents into persisted status and position changes.
///
/// Re-issuing a move that has already been applied is a no-op, so callers
/// may retry transient failures safely.
#[derive(Clone)]
pub struct TaskReorderService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    spacing: i64,
}

impl<R, C> TaskReorderService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new resolver with default key spacing.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            spacing: ReorderConfig::default().position_spacing,
        }
    }

    /// Applies the key spacing from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderConfigError`] when `config` fails validation.
    pub fn with_config(mut self, config: &ReorderConfig) -> Result<Self, ReorderConfigError> {
        config.validate()?;
        self.spacing = config.position_spacing;
        Ok(self)
    }

    /// Moves a task to `target_index` of the `target_status` column.
    ///
    /// The index counts the destination column without the moved task, as
    /// it stands when the move is resolved. Indices past the end append.
    ///
    /// # Errors
    ///
    /// Returns [`TaskReorderError::InvalidStatus`] before any write when the
    /// status is unknown, [`TaskReorderError::NotFound`] when the task is
    /// gone, and [`TaskReorderError::Repository`] for persistence failures.
    pub async fn move_task(&self, request: MoveTaskRequest) -> TaskReorderResult<Task> {
        let target_status = TaskStatus::try_from(request.target_status.as_str())?;
        debug!(
            task_id = %request.task_id,
            %target_status,
            target_index = request.target_index,
            "resolving move"
        );

        let outcome = self
            .repository
            .relocate(Relocation {
                task_id: request.task_id,
                target_status,
                target_index: request.target_index,
                spacing: self.spacing,
                moved_at: self.clock.utc(),
            })
            .await?;

        if outcome.renumbered > 0 {
            info!(
                partition = %outcome.task.partition(),
                renumbered = outcome.renumbered,
                "renumbered column to restore key gaps"
            );
        }
        if !outcome.changed {
            debug!(task_id = %request.task_id, "task already at requested place");
        }
        Ok(outcome.task)
    }
}
