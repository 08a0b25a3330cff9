//! Per-status ordered columns of one project.

use super::{ProjectId, Task, TaskId, TaskStatus};
use std::collections::BTreeMap;

/// Snapshot of a project's tasks grouped into status columns.
///
/// Every status has a column, possibly empty. Columns built from
/// persisted tasks are ordered by key; projected boards keep list order
/// only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    project_id: ProjectId,
    columns: BTreeMap<TaskStatus, Vec<Task>>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new(project_id: ProjectId) -> Self {
        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| (status, Vec::new()))
            .collect();
        Self {
            project_id,
            columns,
        }
    }

    /// Groups tasks into columns sorted by key.
    ///
    /// Tasks belonging to other projects are ignored. Ties on key are
    /// broken by identifier so the order is deterministic.
    #[must_use]
    pub fn from_tasks(project_id: ProjectId, tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::new(project_id);
        for task in tasks {
            if task.project_id() == project_id {
                board.column_entry(task.status()).push(task);
            }
        }
        for column in board.columns.values_mut() {
            column.sort_by_key(|task| (task.position(), task.id()));
        }
        board
    }

    /// Returns the project the board belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tasks of one column in display order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map_or(&[], Vec::as_slice)
    }

    /// Iterates columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        self.columns
            .iter()
            .map(|(status, tasks)| (*status, tasks.as_slice()))
    }

    /// Returns the column and display index of a task.
    #[must_use]
    pub fn locate(&self, task_id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns.iter().find_map(|(status, tasks)| {
            tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|index| (*status, index))
        })
    }

    /// Returns a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.columns
            .values()
            .flat_map(|tasks| tasks.iter())
            .find(|task| task.id() == task_id)
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.values().all(Vec::is_empty)
    }

    /// Removes a task, returning it with the column it was in.
    pub(crate) fn remove(&mut self, task_id: TaskId) -> Option<(TaskStatus, Task)> {
        let (status, index) = self.locate(task_id)?;
        let column = self.columns.get_mut(&status)?;
        (index < column.len()).then(|| (status, column.remove(index)))
    }

    /// Inserts a task into a column, clamping the index to the column end.
    pub(crate) fn insert(&mut self, status: TaskStatus, index: usize, task: Task) {
        let column = self.column_entry(status);
        let slot = index.min(column.len());
        column.insert(slot, task);
    }

    fn column_entry(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        self.columns.entry(status).or_default()
    }
}
