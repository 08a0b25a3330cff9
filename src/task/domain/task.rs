//! Task aggregate root and its partition key.

use super::{Position, ProjectId, TaskDomainError, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty display title of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `(project, status)` pair scoping one ordered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Partition {
    /// Container the column belongs to.
    pub project_id: ProjectId,
    /// Column status.
    pub status: TaskStatus,
}

impl Partition {
    /// Creates a partition key.
    #[must_use]
    pub const fn new(project_id: ProjectId, status: TaskStatus) -> Self {
        Self { project_id, status }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_id, self.status)
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    status: TaskStatus,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted column status.
    pub status: TaskStatus,
    /// Persisted ordering key.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at the given key of its column.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        status: TaskStatus,
        position: Position,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            title,
            status,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            status: data.status,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the ordering key within the partition.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the partition the task is ordered in.
    #[must_use]
    pub const fn partition(&self) -> Partition {
        Partition::new(self.project_id, self.status)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `status` at `position` as one change.
    pub(crate) const fn place(
        &mut self,
        status: TaskStatus,
        position: Position,
        moved_at: DateTime<Utc>,
    ) {
        self.status = status;
        self.position = position;
        self.updated_at = moved_at;
    }

    /// Rewrites the ordering key during a renumbering pass.
    ///
    /// Renumbering is not a user edit, so `updated_at` is left alone.
    pub(crate) const fn renumber(&mut self, position: Position) {
        self.position = position;
    }

    /// Returns a copy shown under another column without persisting it.
    #[must_use]
    pub(crate) fn displayed_in(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}
