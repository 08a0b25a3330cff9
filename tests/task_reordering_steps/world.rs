//! Shared world state for task reordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ProjectId, Task, TaskId},
    services::{TaskLifecycleService, TaskReorderError, TaskReorderService},
};

/// Scenario world for task reordering behaviour tests.
pub struct TaskReorderWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub lifecycle: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub reorder: TaskReorderService<InMemoryTaskRepository, DefaultClock>,
    pub project_id: ProjectId,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_move_result: Option<Result<Task, TaskReorderError>>,
}

impl TaskReorderWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            lifecycle: TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock)),
            reorder: TaskReorderService::new(Arc::clone(&repository), clock),
            repository,
            project_id: ProjectId::new(),
            tasks_by_title: HashMap::new(),
            last_move_result: None,
        }
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

impl Default for TaskReorderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskReorderWorld {
    TaskReorderWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
