//! When steps for task reordering BDD scenarios.

use super::world::{TaskReorderWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::services::MoveTaskRequest;

#[when(r#"task "{title}" is moved to index {index:usize} of the "{status}" column"#)]
fn move_task(
    world: &mut TaskReorderWorld,
    title: String,
    index: usize,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let result = run_async(
        world
            .reorder
            .move_task(MoveTaskRequest::new(task_id, status, index)),
    );
    world.last_move_result = Some(result);
    Ok(())
}
