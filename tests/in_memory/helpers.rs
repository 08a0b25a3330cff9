//! Shared fixtures for in-memory board integration tests.

use std::sync::Arc;

use eyre::{OptionExt, Result};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::{LocalMoveGateway, RecordingNotifier},
        services::MoveDispatcher,
    },
    config::ReorderConfig,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Board, ProjectId, TaskId, TaskStatus},
        services::{CreateTaskRequest, TaskLifecycleService},
    },
};

/// Gateway wired straight to the in-memory store.
pub type LocalGateway = LocalMoveGateway<InMemoryTaskRepository, DefaultClock>;

/// Dispatcher type used by the integration tests.
pub type TestDispatcher = MoveDispatcher<LocalGateway, LocalGateway, RecordingNotifier>;

/// An in-process host: store, services and one client dispatcher.
pub struct Host {
    pub repository: Arc<InMemoryTaskRepository>,
    pub lifecycle: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub gateway: Arc<LocalGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub config: ReorderConfig,
    pub project_id: ProjectId,
}

impl Host {
    /// Creates an empty host with the given configuration.
    pub fn with_config(config: ReorderConfig) -> Result<Self> {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        Ok(Self {
            lifecycle: TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock))
                .with_config(&config)?,
            gateway: Arc::new(LocalMoveGateway::new(
                Arc::clone(&repository),
                clock,
                &config,
            )?),
            repository,
            notifier: Arc::new(RecordingNotifier::new()),
            config,
            project_id: ProjectId::new(),
        })
    }

    /// Creates tasks at the end of `status`, in order.
    pub async fn seed(&self, status: TaskStatus, titles: &[&str]) -> Result<Vec<TaskId>> {
        let mut ids = Vec::with_capacity(titles.len());
        for title in titles {
            let task = self
                .lifecycle
                .create_task(
                    CreateTaskRequest::new(self.project_id, *title).with_status(status.as_str()),
                )
                .await?;
            ids.push(task.id());
        }
        Ok(ids)
    }

    /// Loads the authoritative board.
    pub async fn board(&self) -> Result<Board> {
        Ok(self.lifecycle.board(self.project_id).await?)
    }

    /// Opens a client over the current board.
    pub async fn dispatcher(&self) -> Result<TestDispatcher> {
        Ok(MoveDispatcher::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.gateway),
            Arc::clone(&self.notifier),
            self.board().await?,
        )
        .with_config(&self.config)?)
    }
}

/// Provides a host with default configuration.
#[fixture]
pub fn host() -> Host {
    Host::with_config(ReorderConfig::default()).expect("default configuration should be valid")
}

/// Returns the titles of one column in display order.
pub fn titles(board: &Board, status: TaskStatus) -> Vec<String> {
    board
        .column(status)
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

/// Finds a task by title on a board.
pub fn id_of(board: &Board, title: &str) -> Result<TaskId> {
    board
        .columns()
        .flat_map(|(_, tasks)| tasks.iter())
        .find(|task| task.title().as_str() == title)
        .map(|task| task.id())
        .ok_or_eyre("task with title not on board")
}
