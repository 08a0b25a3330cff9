//! Then steps for task reordering BDD scenarios.

use super::world::{TaskReorderWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::{domain::TaskStatus, services::TaskReorderError};

fn column_titles(world: &TaskReorderWorld, status: &str) -> Result<Vec<String>, eyre::Report> {
    let parsed = TaskStatus::try_from(status)
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let board = run_async(world.lifecycle.board(world.project_id))
        .map_err(|err| eyre::eyre!("load board: {err}"))?;
    Ok(board
        .column(parsed)
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect())
}

#[then(r#"the "{status}" column reads "{order}""#)]
fn column_reads(
    world: &TaskReorderWorld,
    status: String,
    order: String,
) -> Result<(), eyre::Report> {
    let expected: Vec<String> = order.split(',').map(|title| title.trim().to_owned()).collect();
    let actual = column_titles(world, &status)?;
    if actual != expected {
        return Err(eyre::eyre!(
            "expected {status} column {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the "{status}" column is empty"#)]
fn column_is_empty(world: &TaskReorderWorld, status: String) -> Result<(), eyre::Report> {
    let actual = column_titles(world, &status)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected empty {status} column, found {actual:?}"));
    }
    Ok(())
}

#[then("the move fails with a not-found error")]
fn move_fails_not_found(world: &TaskReorderWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if !matches!(result, Err(TaskReorderError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}

#[then("the move fails with a validation error")]
fn move_fails_validation(world: &TaskReorderWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if !matches!(result, Err(TaskReorderError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}
