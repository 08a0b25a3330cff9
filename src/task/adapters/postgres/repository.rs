//! `PostgreSQL` repository implementation for task ordering storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        Partition, PersistedTaskData, Position, ProjectId, Task, TaskId, TaskStatus, TaskTitle,
        fits_at, plan_append, plan_placement,
    },
    ports::{
        Relocation, RelocationOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const PARTITION_POSITION_CONSTRAINT: &str = "tasks_partition_position_key";

/// `PostgreSQL`-backed task repository.
///
/// Relocations run in a serializable transaction that locks the moved row
/// and the destination column with `SELECT ... FOR UPDATE`. The
/// `(project_id, status, position)` unique constraint is deferred to commit
/// so a renumbering pass may pass through transient duplicates.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, ref info) => {
                Self::Conflict(info.message().to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if is_partition_position_violation(info.as_ref()) =>
            {
                Self::Conflict(info.message().to_owned())
            }
            _ => Self::persistence(err),
        }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let partition = task.partition();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_partition_position_violation(info.as_ref()) =>
                    {
                        TaskRepositoryError::PositionTaken(partition)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::from(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn append(&self, task: Task, spacing: i64) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .serializable()
                .run(|tx| append_in_transaction(tx, task, spacing))
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_partition(&self, partition: Partition) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(partition.project_id.into_inner()))
                .filter(tasks::status.eq(partition.status.as_str()))
                .order((tasks::position.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn relocate(&self, relocation: Relocation) -> TaskRepositoryResult<RelocationOutcome> {
        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .serializable()
                .run(|tx| relocate_in_transaction(tx, relocation))
        })
        .await
    }
}

fn append_in_transaction(
    tx: &mut PgConnection,
    mut task: Task,
    spacing: i64,
) -> TaskRepositoryResult<Task> {
    let partition = task.partition();
    let last = tasks::table
        .filter(tasks::project_id.eq(partition.project_id.into_inner()))
        .filter(tasks::status.eq(partition.status.as_str()))
        .order(tasks::position.desc())
        .select(tasks::position)
        .for_update()
        .first::<i64>(tx)
        .optional()?;
    let len: i64 = tasks::table
        .filter(tasks::project_id.eq(partition.project_id.into_inner()))
        .filter(tasks::status.eq(partition.status.as_str()))
        .count()
        .get_result(tx)?;

    let key = plan_append(
        partition.status,
        last.map(Position::new),
        usize::try_from(len).unwrap_or(usize::MAX),
        spacing,
    )?;
    task.renumber(key);

    // The partition key is deferred, so a racing append on an empty column
    // surfaces at commit and maps to `Conflict`.
    let task_id = task.id();
    diesel::insert_into(tasks::table)
        .values(&to_new_row(&task))
        .execute(tx)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if !is_partition_position_violation(info.as_ref()) =>
            {
                TaskRepositoryError::DuplicateTask(task_id)
            }
            _ => TaskRepositoryError::from(err),
        })?;
    Ok(task)
}

fn relocate_in_transaction(
    tx: &mut PgConnection,
    relocation: Relocation,
) -> TaskRepositoryResult<RelocationOutcome> {
    let moved_uuid = relocation.task_id.into_inner();
    let row = tasks::table
        .filter(tasks::id.eq(moved_uuid))
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(tx)
        .optional()?
        .ok_or(TaskRepositoryError::NotFound(relocation.task_id))?;
    let mut task = row_to_task(row)?;

    let column: Vec<(TaskId, Position)> = tasks::table
        .filter(tasks::project_id.eq(task.project_id().into_inner()))
        .filter(tasks::status.eq(relocation.target_status.as_str()))
        .filter(tasks::id.ne(moved_uuid))
        .order((tasks::position.asc(), tasks::id.asc()))
        .select((tasks::id, tasks::position))
        .for_update()
        .load::<(uuid::Uuid, i64)>(tx)?
        .into_iter()
        .map(|(id, key)| (TaskId::from_uuid(id), Position::new(key)))
        .collect();

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
        diesel::update(tasks::table.filter(tasks::id.eq(sibling_id.into_inner())))
            .set(tasks::position.eq(key.value()))
            .execute(tx)?;
    }
    diesel::update(tasks::table.filter(tasks::id.eq(moved_uuid)))
        .set((
            tasks::status.eq(relocation.target_status.as_str()),
            tasks::position.eq(plan.position().value()),
            tasks::updated_at.eq(relocation.moved_at),
        ))
        .execute(tx)?;

    task.place(relocation.target_status, plan.position(), relocation.moved_at);
    Ok(RelocationOutcome {
        task,
        renumbered: plan.renumbered().len(),
        changed: true,
    })
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        position: task.position().value(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title: persisted_title,
        status: persisted_status,
        position,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title,
        status,
        position: Position::new(position),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn is_partition_position_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == PARTITION_POSITION_CONSTRAINT)
}
