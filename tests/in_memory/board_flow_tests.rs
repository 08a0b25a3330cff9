//! End-to-end drag flows through the gesture controller, the dispatcher
//! and the in-process gateway.

use crate::in_memory::helpers::{Host, host, id_of, titles};
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::{
    board::{
        domain::{DragEvent, DropTarget, Severity},
        gesture::{DragGestureController, KeyCommand, Point},
        ports::MoveGatewayError,
        services::{DispatchError, DispatchOutcome},
    },
    config::ReorderConfig,
    task::domain::{TaskStatus, is_strictly_ascending},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pointer_drag_moves_task_to_top(host: Host) -> Result<()> {
    host.seed(TaskStatus::Todo, &["A", "B", "C"]).await?;
    let dispatcher = host.dispatcher().await?;
    let board = dispatcher.view();
    let c = id_of(&board, "C")?;
    let a = id_of(&board, "A")?;

    let mut gesture = DragGestureController::from_config(&host.config)?;
    gesture.pointer_down(c, Point::new(0, 200));
    for event in gesture.pointer_move(Point::new(0, 10), Some(DropTarget::Task(a))) {
        dispatcher.handle(event).await?;
    }
    ensure!(titles(&dispatcher.view(), TaskStatus::Todo) == ["C", "A", "B"]);

    let end = gesture
        .pointer_up(Some(DropTarget::Task(a)))
        .ok_or_else(|| eyre::eyre!("release should end the drag"))?;
    let outcome = dispatcher.handle(end).await?;

    ensure!(matches!(outcome, DispatchOutcome::Moved(ref task) if task.id() == c));
    ensure!(titles(&host.board().await?, TaskStatus::Todo) == ["C", "A", "B"]);
    ensure!(dispatcher.view() == host.board().await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn keyboard_move_crosses_columns(host: Host) -> Result<()> {
    host.seed(TaskStatus::Todo, &["A", "B", "C"]).await?;
    host.seed(TaskStatus::Done, &["D"]).await?;
    let dispatcher = host.dispatcher().await?;
    let a = id_of(&dispatcher.view(), "A")?;

    let mut gesture = DragGestureController::from_config(&host.config)?;
    for command in [
        KeyCommand::Pick(a),
        KeyCommand::Right,
        KeyCommand::Right,
        KeyCommand::Drop,
    ] {
        let view = dispatcher.view();
        if let Some(event) = gesture.key(command, &view) {
            dispatcher.handle(event).await?;
        }
    }

    let board = host.board().await?;
    ensure!(titles(&board, TaskStatus::Done) == ["A", "D"]);
    ensure!(titles(&board, TaskStatus::Todo) == ["B", "C"]);
    ensure!(board.task(a).map(|task| task.status()) == Some(TaskStatus::Done));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_deleted_elsewhere_rolls_back_and_refetches(host: Host) -> Result<()> {
    let ids = host.seed(TaskStatus::Todo, &["A", "B"]).await?;
    let dispatcher = host.dispatcher().await?;
    let a = *ids.first().ok_or_else(|| eyre::eyre!("seeded task missing"))?;
    host.repository.remove(a)?;

    let result = dispatcher
        .handle(DragEvent::End {
            task_id: a,
            target: Some(DropTarget::Column(TaskStatus::Done)),
        })
        .await;

    ensure!(matches!(
        result,
        Err(DispatchError::Move(MoveGatewayError::NotFound(id))) if id == a
    ));
    ensure!(titles(&dispatcher.view(), TaskStatus::Todo) == ["B"]);
    ensure!(dispatcher.view().column(TaskStatus::Done).is_empty());
    let notices = host.notifier.notices();
    ensure!(notices.len() == 1);
    ensure!(notices.first().map(|notice| notice.severity) == Some(Severity::Warning));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_inserts_before_an_anchor_stay_ordered() -> Result<()> {
    let host = Host::with_config(ReorderConfig::dense())?;
    host.seed(TaskStatus::Todo, &["A", "B", "C", "D"]).await?;
    let dispatcher = host.dispatcher().await?;

    for newcomer in ["N1", "N2", "N3", "N4", "N5"] {
        host.seed(TaskStatus::Done, &[newcomer]).await?;
        let fresh = host.board().await?;
        dispatcher.refresh(fresh.clone());
        let moved = id_of(&fresh, newcomer)?;
        let anchor = id_of(&fresh, "B")?;
        dispatcher
            .drop_task(moved, Some(DropTarget::Task(anchor)))
            .await?;
    }

    let board = host.board().await?;
    ensure!(titles(&board, TaskStatus::Todo) == ["A", "N1", "N2", "N3", "N4", "N5", "B", "C", "D"]);
    let keys: Vec<_> = board
        .column(TaskStatus::Todo)
        .iter()
        .map(|task| task.position())
        .collect();
    ensure!(is_strictly_ascending(&keys), "keys out of order: {keys:?}");
    Ok(())
}
