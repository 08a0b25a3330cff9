//! In-process gateway for hosts that embed the task services.

use crate::board::ports::{BoardFeed, MoveGateway, MoveGatewayError, MoveGatewayResult};
use crate::config::{ReorderConfig, ReorderConfigError};
use crate::task::{
    domain::{Board, MoveIntent, ProjectId, Task},
    ports::{TaskRepository, TaskRepositoryError},
    services::{TaskLifecycleService, TaskReorderError, TaskReorderService},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// Gateway calling the position resolver directly instead of over a
/// network, for terminal or desktop hosts sharing a process with the store.
#[derive(Clone)]
pub struct LocalMoveGateway<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    reorder: TaskReorderService<R, C>,
    lifecycle: TaskLifecycleService<R, C>,
}

impl<R, C> LocalMoveGateway<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a gateway over a shared repository.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderConfigError`] when `config` fails validation.
    pub fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        config: &ReorderConfig,
    ) -> Result<Self, ReorderConfigError> {
        Ok(Self {
            reorder: TaskReorderService::new(Arc::clone(&repository), Arc::clone(&clock))
                .with_config(config)?,
            lifecycle: TaskLifecycleService::new(repository, clock).with_config(config)?,
        })
    }
}

impl From<TaskReorderError> for MoveGatewayError {
    fn from(err: TaskReorderError) -> Self {
        match err {
            TaskReorderError::InvalidStatus(parse) => Self::Validation(parse.to_string()),
            TaskReorderError::NotFound(id) => Self::NotFound(id),
            TaskReorderError::Repository(TaskRepositoryError::Conflict(reason)) => {
                Self::Conflict(reason)
            }
            TaskReorderError::Repository(other) => Self::transport(other),
        }
    }
}

#[async_trait]
impl<R, C> MoveGateway for LocalMoveGateway<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn move_position(&self, intent: MoveIntent) -> MoveGatewayResult<Task> {
        Ok(self.reorder.move_task(intent.into()).await?)
    }
}

#[async_trait]
impl<R, C> BoardFeed for LocalMoveGateway<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn fetch_board(&self, project_id: ProjectId) -> MoveGatewayResult<Board> {
        self.lifecycle
            .board(project_id)
            .await
            .map_err(MoveGatewayError::transport)
    }
}
