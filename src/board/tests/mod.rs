//! Unit tests for the board client.

mod projection_tests;

use crate::task::domain::{Board, Position, ProjectId, Task, TaskStatus, TaskTitle};
use mockable::DefaultClock;

/// Builds a board whose columns hold tasks with the given titles, keyed
/// 1024, 2048, ... in listed order.
pub(super) fn board_with(columns: &[(TaskStatus, &[&str])]) -> Board {
    let project_id = ProjectId::new();
    let clock = DefaultClock;
    let mut tasks = Vec::new();
    for (status, titles) in columns {
        for (slot, title) in (1_i64..).zip(titles.iter()) {
            tasks.push(Task::new(
                project_id,
                TaskTitle::new(*title).expect("valid title"),
                *status,
                Position::new(slot * 1024),
                &clock,
            ));
        }
    }
    Board::from_tasks(project_id, tasks)
}

/// Returns the titles of one column in display order.
pub(super) fn titles(board: &Board, status: TaskStatus) -> Vec<String> {
    board
        .column(status)
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

/// Finds a task's identifier by title.
pub(super) fn id_of(board: &Board, title: &str) -> crate::task::domain::TaskId {
    board
        .columns()
        .flat_map(|(_, tasks)| tasks.iter())
        .find(|task| task.title().as_str() == title)
        .map(Task::id)
        .expect("task with title should exist")
}
