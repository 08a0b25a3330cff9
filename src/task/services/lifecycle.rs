//! Service layer for task creation and board retrieval.

use crate::config::{ReorderConfig, ReorderConfigError};
use crate::task::{
    domain::{
        Board, ParseTaskStatusError, Position, ProjectId, Task, TaskDomainError, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Attempts at appending before a write conflict is reported.
const APPEND_ATTEMPTS: usize = 3;

/// Request payload for creating a task at the end of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    status: String,
}

impl CreateTaskRequest {
    /// Creates a request for a `todo` task.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            status: TaskStatus::Todo.as_str().to_owned(),
        }
    }

    /// Sets the column the task starts in.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not a known column.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task creation and lookup service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    spacing: i64,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with default key spacing.
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

    /// Creates a task at the end of its column.
    ///
    /// The key is assigned by the repository in the same step as the insert.
    /// A write conflict with a concurrent append is retried a bounded number
    /// of times.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the title or status is invalid,
    /// the column's key space is exhausted, or the repository rejects the
    /// write.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let status = TaskStatus::try_from(request.status.as_str())?;
        let draft = Task::new(
            request.project_id,
            title,
            status,
            Position::new(0),
            &*self.clock,
        );

        let mut attempt = 1;
        loop {
            match self.repository.append(draft.clone(), self.spacing).await {
                Ok(task) => {
                    debug!(
                        task_id = %task.id(),
                        partition = %task.partition(),
                        position = %task.position(),
                        "created task"
                    );
                    return Ok(task);
                }
                Err(TaskRepositoryError::Conflict(reason)) if attempt < APPEND_ATTEMPTS => {
                    warn!(task_id = %draft.id(), attempt, %reason, "append conflicted; retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Loads the authoritative board of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn board(&self, project_id: ProjectId) -> TaskLifecycleResult<Board> {
        let tasks = self.repository.list_project(project_id).await?;
        Ok(Board::from_tasks(project_id, tasks))
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
