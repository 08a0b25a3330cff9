//! Requested destination of a dragged task.

use super::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A request to show `task_id` at `target_index` of the `target_status`
/// column.
///
/// The index counts the column as displayed without the moved task; the
/// resolver translates it into an ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Task being moved.
    pub task_id: TaskId,
    /// Destination column.
    pub target_status: TaskStatus,
    /// Zero-based insertion index within the destination column.
    pub target_index: usize,
}

impl MoveIntent {
    /// Creates a move intent.
    #[must_use]
    pub const fn new(task_id: TaskId, target_status: TaskStatus, target_index: usize) -> Self {
        Self {
            task_id,
            target_status,
            target_index,
        }
    }
}
