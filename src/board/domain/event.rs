//! Drag lifecycle events.

use crate::task::domain::{TaskId, TaskStatus};

/// Where a dragged task is being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Empty area or header of a column; the task goes to the end.
    Column(TaskStatus),
    /// Another task card; the dragged task takes that card's slot.
    Task(TaskId),
    /// An explicit slot, counted without the dragged task.
    Slot {
        /// Destination column.
        status: TaskStatus,
        /// Insertion index among the column's other members.
        index: usize,
    },
}

/// One step of a drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// A task was picked up.
    Start {
        /// Dragged task.
        task_id: TaskId,
    },
    /// The effective drop target changed.
    Over {
        /// Dragged task.
        task_id: TaskId,
        /// New candidate target.
        target: DropTarget,
    },
    /// The interaction finished.
    ///
    /// `target` is `None` when the drag was cancelled or released where it
    /// started.
    End {
        /// Dragged task.
        task_id: TaskId,
        /// Final target, if any.
        target: Option<DropTarget>,
    },
}

impl DragEvent {
    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match *self {
            Self::Start { task_id } | Self::Over { task_id, .. } | Self::End { task_id, .. } => {
                task_id
            }
        }
    }
}
