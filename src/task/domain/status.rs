//! Kanban column status for tasks.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status column a task is displayed in.
///
/// Declaration order is the left-to-right column order on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work not yet started.
    Todo,
    /// Work underway.
    InProgress,
    /// Work finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns the column to the left, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::InProgress => Some(Self::Todo),
            Self::Done => Some(Self::InProgress),
        }
    }

    /// Returns the column to the right, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
