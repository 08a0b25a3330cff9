//! Tests for the displayed-board projection and drop resolution.

use super::{board_with, id_of, titles};
use crate::board::domain::{DropTarget, PendingMove};
use crate::board::projection::{len_without, project, resolve_drop};
use crate::task::domain::{Task, TaskId, TaskStatus};
use rstest::rstest;

#[rstest]
fn projection_without_pending_move_is_identity() {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B"]), (TaskStatus::Done, &["D"])]);
    assert_eq!(project(&board, None), board);
}

#[rstest]
fn projection_moves_task_across_columns() {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B", "C"]), (TaskStatus::Done, &["D"])]);
    let pending = PendingMove {
        task_id: id_of(&board, "A"),
        from_status: TaskStatus::Todo,
        to_status: TaskStatus::Done,
        to_index: 0,
    };

    let view = project(&board, Some(&pending));

    assert_eq!(titles(&view, TaskStatus::Todo), vec!["B", "C"]);
    assert_eq!(titles(&view, TaskStatus::Done), vec!["A", "D"]);
    let moved = view.task(pending.task_id).expect("moved task is displayed");
    assert_eq!(moved.status(), TaskStatus::Done);
    assert_eq!(board.task(pending.task_id).map(Task::status), Some(TaskStatus::Todo));
}

#[rstest]
fn projection_clamps_index_to_column_end() {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B"])]);
    let pending = PendingMove {
        task_id: id_of(&board, "A"),
        from_status: TaskStatus::Todo,
        to_status: TaskStatus::Todo,
        to_index: 9,
    };
    assert_eq!(titles(&project(&board, Some(&pending)), TaskStatus::Todo), vec!["B", "A"]);
}

#[rstest]
fn projection_ignores_pending_move_of_vanished_task() {
    let board = board_with(&[(TaskStatus::Todo, &["A"])]);
    let pending = PendingMove {
        task_id: TaskId::new(),
        from_status: TaskStatus::Todo,
        to_status: TaskStatus::Done,
        to_index: 0,
    };
    assert_eq!(project(&board, Some(&pending)), board);
}

#[rstest]
#[case::down_onto_last("A", "C", &["B", "C", "A"])]
#[case::up_onto_first("C", "A", &["C", "A", "B"])]
#[case::down_one("A", "B", &["B", "A", "C"])]
#[case::up_one("C", "B", &["A", "C", "B"])]
fn dropping_on_a_card_takes_its_slot(
    #[case] dragged: &str,
    #[case] anchor: &str,
    #[case] expected: &[&str],
) {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B", "C"])]);
    let pending = resolve_drop(
        &board,
        id_of(&board, dragged),
        DropTarget::Task(id_of(&board, anchor)),
    )
    .expect("drop should resolve to a move");

    assert_eq!(titles(&project(&board, Some(&pending)), TaskStatus::Todo), expected);
}

#[rstest]
fn dropping_on_card_in_other_column_lands_before_it() {
    let board = board_with(&[(TaskStatus::Todo, &["A"]), (TaskStatus::Done, &["D", "E"])]);
    let pending = resolve_drop(&board, id_of(&board, "A"), DropTarget::Task(id_of(&board, "E")))
        .expect("drop should resolve to a move");

    assert_eq!(pending.to_status, TaskStatus::Done);
    assert_eq!(pending.to_index, 1);
    assert_eq!(titles(&project(&board, Some(&pending)), TaskStatus::Done), vec!["D", "A", "E"]);
}

#[rstest]
fn dropping_on_column_appends() {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B"]), (TaskStatus::Done, &["D"])]);
    let pending = resolve_drop(&board, id_of(&board, "A"), DropTarget::Column(TaskStatus::Done))
        .expect("drop should resolve to a move");
    assert_eq!(pending.to_index, 1);

    let same_column =
        resolve_drop(&board, id_of(&board, "A"), DropTarget::Column(TaskStatus::Todo))
            .expect("moving to the end is a move");
    assert_eq!(same_column.to_index, 1);
}

#[rstest]
fn dropping_on_empty_column_uses_index_zero() {
    let board = board_with(&[(TaskStatus::Todo, &["A"])]);
    let pending =
        resolve_drop(&board, id_of(&board, "A"), DropTarget::Column(TaskStatus::InProgress))
            .expect("drop should resolve to a move");
    assert_eq!(pending.to_index, 0);
    assert_eq!(pending.from_status, TaskStatus::Todo);
}

#[rstest]
fn dropping_in_place_needs_no_move() {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B"])]);
    let a = id_of(&board, "A");
    let b = id_of(&board, "B");

    assert_eq!(resolve_drop(&board, a, DropTarget::Task(a)), None);
    assert_eq!(resolve_drop(&board, b, DropTarget::Column(TaskStatus::Todo)), None);
    assert_eq!(
        resolve_drop(
            &board,
            a,
            DropTarget::Slot {
                status: TaskStatus::Todo,
                index: 0
            }
        ),
        None
    );
}

#[rstest]
fn unknown_task_or_anchor_resolves_to_nothing() {
    let board = board_with(&[(TaskStatus::Todo, &["A"])]);
    let a = id_of(&board, "A");
    assert_eq!(resolve_drop(&board, TaskId::new(), DropTarget::Task(a)), None);
    assert_eq!(resolve_drop(&board, a, DropTarget::Task(TaskId::new())), None);
}

#[rstest]
fn slot_index_is_clamped() {
    let board = board_with(&[(TaskStatus::Todo, &["A"]), (TaskStatus::Done, &["D"])]);
    let pending = resolve_drop(
        &board,
        id_of(&board, "A"),
        DropTarget::Slot {
            status: TaskStatus::Done,
            index: 7,
        },
    )
    .expect("drop should resolve to a move");
    assert_eq!(pending.to_index, 1);
}

#[rstest]
fn column_length_excludes_dragged_task() {
    let board = board_with(&[(TaskStatus::Todo, &["A", "B", "C"])]);
    let a = id_of(&board, "A");
    assert_eq!(len_without(&board, TaskStatus::Todo, a), 2);
    assert_eq!(len_without(&board, TaskStatus::Done, a), 0);
}
