//! Network boundary to the position resolver and the task fetch.

use crate::board::domain::{Notice, Severity};
use crate::task::domain::{Board, MoveIntent, ProjectId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for gateway operations.
pub type MoveGatewayResult<T> = Result<T, MoveGatewayError>;

/// Sends move intents to the position resolver.
#[async_trait]
pub trait MoveGateway: Send + Sync {
    /// Performs one `movePosition` round trip.
    ///
    /// # Errors
    ///
    /// Returns [`MoveGatewayError`] classified per failure kind.
    async fn move_position(&self, intent: MoveIntent) -> MoveGatewayResult<Task>;
}

/// Supplies authoritative board snapshots.
#[async_trait]
pub trait BoardFeed: Send + Sync {
    /// Fetches the current board of a project.
    ///
    /// # Errors
    ///
    /// Returns [`MoveGatewayError`] when the fetch fails.
    async fn fetch_board(&self, project_id: ProjectId) -> MoveGatewayResult<Board>;
}

/// Failure of a move or fetch as seen by the client.
#[derive(Debug, Clone, Error)]
pub enum MoveGatewayError {
    /// The request was rejected before any mutation.
    #[error("invalid move: {0}")]
    Validation(String),

    /// The task no longer exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A concurrent write made the server abort the move.
    #[error("move conflicted with another change: {0}")]
    Conflict(String),

    /// No response arrived within the allowed time.
    #[error("move timed out after {0:?}")]
    Timeout(Duration),

    /// Transport or server failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MoveGatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the severity the failure is shown with.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Validation(_) | Self::NotFound(_) => Severity::Warning,
            Self::Conflict(_) | Self::Timeout(_) | Self::Transport(_) => Severity::Error,
        }
    }

    /// Returns the user-facing notice for a failed move.
    #[must_use]
    pub fn notice(&self) -> Notice {
        let message = match self {
            Self::Validation(_) => "Could not move task.",
            Self::NotFound(_) => "Could not move task: it was deleted elsewhere.",
            Self::Conflict(_) => "Could not move task: the board changed. Try again.",
            Self::Timeout(_) => "Could not move task: the server did not respond. Try again.",
            Self::Transport(_) => "Could not move task. Try again.",
        };
        Notice::new(message, self.severity())
    }
}
