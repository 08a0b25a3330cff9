//! Given steps for task reordering BDD scenarios.

use super::world::{TaskReorderWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::services::CreateTaskRequest;

#[given(r#"a task "{title}" in the "{status}" column"#)]
fn task_in_column(
    world: &mut TaskReorderWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .lifecycle
            .create_task(CreateTaskRequest::new(world.project_id, title.as_str()).with_status(status)),
    )
    .wrap_err("create task for reordering scenario")?;
    world.tasks_by_title.insert(title, created.id());
    Ok(())
}

#[given(r#"task "{title}" is deleted by another session"#)]
fn task_deleted_elsewhere(world: &mut TaskReorderWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let removed = world
        .repository
        .remove(task_id)
        .wrap_err("delete task in scenario setup")?;
    if !removed {
        return Err(eyre::eyre!("task {title} was already gone"));
    }
    Ok(())
}
