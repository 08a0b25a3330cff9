//! Pure derivation of the displayed board.
//!
//! The displayed board is always recomputed from the authoritative snapshot
//! and at most one pending move. Nothing here mutates the snapshot, so
//! dropping the pending move restores the authoritative view exactly.

use super::domain::{DropTarget, PendingMove};
use crate::task::domain::{Board, TaskId, TaskStatus};

/// Returns the board as it should be displayed.
///
/// With no pending move this is a copy of `authoritative`. Otherwise the
/// moved task is taken out of its column and inserted into the destination
/// column at `min(to_index, len)`. A pending move whose task is no longer
/// present leaves the board unchanged.
#[must_use]
pub fn project(authoritative: &Board, pending: Option<&PendingMove>) -> Board {
    let mut view = authoritative.clone();
    let Some(overlay) = pending else {
        return view;
    };
    if let Some((_, task)) = view.remove(overlay.task_id) {
        view.insert(
            overlay.to_status,
            overlay.to_index,
            task.displayed_in(overlay.to_status),
        );
    }
    view
}

/// Resolves a drop target against the displayed board.
///
/// Returns `None` when the task or anchor is missing, when the task is
/// dropped on itself, or when the target is the slot the task already
/// occupies.
///
/// A [`DropTarget::Task`] anchor yields the anchor's current display index,
/// so dragging down a column lands after the anchor and dragging up lands
/// before it. A [`DropTarget::Column`] target appends.
#[must_use]
pub fn resolve_drop(board: &Board, task_id: TaskId, target: DropTarget) -> Option<PendingMove> {
    let (from_status, from_index) = board.locate(task_id)?;
    let (to_status, to_index) = match target {
        DropTarget::Column(status) => (status, len_without(board, status, task_id)),
        DropTarget::Task(anchor) if anchor == task_id => return None,
        DropTarget::Task(anchor) => board.locate(anchor)?,
        DropTarget::Slot { status, index } => {
            (status, index.min(len_without(board, status, task_id)))
        }
    };

    if to_status == from_status && to_index == from_index {
        return None;
    }
    Some(PendingMove {
        task_id,
        from_status,
        to_status,
        to_index,
    })
}

/// Returns the length of a column without the given task.
#[must_use]
pub fn len_without(board: &Board, status: TaskStatus, task_id: TaskId) -> usize {
    board
        .column(status)
        .iter()
        .filter(|task| task.id() != task_id)
        .count()
}
