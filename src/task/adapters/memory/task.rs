//! In-memory repository for task ordering tests and embedded hosts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{
        Partition, Position, ProjectId, Task, TaskId, fits_at, is_strictly_ascending,
        plan_append, plan_placement,
    },
    ports::{
        Relocation, RelocationOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
///
/// Every relocation runs under one write lock, so readers never see a
/// column midway through renumbering.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a task, as a concurrent delete from another session would.
    ///
    /// Returns `true` when a task was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.remove(&id).is_some())
    }
}

impl InMemoryTaskState {
    fn partition(&self, partition: Partition) -> Vec<Task> {
        let mut members: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.partition() == partition)
            .cloned()
            .collect();
        members.sort_by_key(|task| (task.position(), task.id()));
        members
    }

    fn keyed_column(&self, partition: Partition, excluding: TaskId) -> Vec<(TaskId, Position)> {
        self.partition(partition)
            .into_iter()
            .filter(|task| task.id() != excluding)
            .map(|task| (task.id(), task.position()))
            .collect()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let partition = task.partition();
        let key_taken = state
            .tasks
            .values()
            .any(|other| other.partition() == partition && other.position() == task.position());
        if key_taken {
            return Err(TaskRepositoryError::PositionTaken(partition));
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn append(&self, mut task: Task, spacing: i64) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let column = state.partition(task.partition());
        let key = plan_append(
            task.status(),
            column.last().map(Task::position),
            column.len(),
            spacing,
        )?;
        task.renumber(key);

        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_partition(&self, partition: Partition) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.partition(partition))
    }

    async fn list_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn relocate(&self, relocation: Relocation) -> TaskRepositoryResult<RelocationOutcome> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let mut task = state
            .tasks
            .get(&relocation.task_id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(relocation.task_id))?;
        let target = Partition::new(task.project_id(), relocation.target_status);
        let column = state.keyed_column(target, task.id());

        if task.status() == relocation.target_status
            && fits_at(task.position(), &column, relocation.target_index)
        {
            return Ok(RelocationOutcome {
                task,
                renumbered: 0,
                changed: false,
            });
        }

        let plan = plan_placement(
            relocation.target_status,
            &column,
            relocation.target_index,
            relocation.spacing,
        )?;
        for &(sibling_id, key) in plan.renumbered() {
            if let Some(sibling) = state.tasks.get_mut(&sibling_id) {
                sibling.renumber(key);
            }
        }
        task.place(relocation.target_status, plan.position(), relocation.moved_at);
        state.tasks.insert(task.id(), task.clone());

        debug_assert!(
            is_strictly_ascending(
                &state
                    .partition(target)
                    .iter()
                    .map(Task::position)
                    .collect::<Vec<_>>()
            ),
            "relocation left duplicate or unordered keys in {target}"
        );

        Ok(RelocationOutcome {
            task,
            renumbered: plan.renumbered().len(),
            changed: true,
        })
    }
}
