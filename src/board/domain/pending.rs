//! A move applied speculatively to the displayed board.

use crate::task::domain::{MoveIntent, TaskId, TaskStatus};

/// A resolved move awaiting, or previewing, server confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    /// Task being moved.
    pub task_id: TaskId,
    /// Column the task is displayed in before the move.
    pub from_status: TaskStatus,
    /// Destination column.
    pub to_status: TaskStatus,
    /// Index in the destination column, counted without the moved task.
    pub to_index: usize,
}

impl PendingMove {
    /// Returns the intent sent to the position resolver.
    #[must_use]
    pub const fn intent(&self) -> MoveIntent {
        MoveIntent::new(self.task_id, self.to_status, self.to_index)
    }
}
