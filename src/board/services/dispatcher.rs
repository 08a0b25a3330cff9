//! Pending-move lifecycle: optimistic apply, confirm or roll back.

use crate::board::{
    domain::{DragEvent, DropTarget, PendingMove},
    ports::{BoardFeed, MoveGateway, MoveGatewayError, Notifier},
    projection::{project, resolve_drop},
};
use crate::config::{ReorderConfig, ReorderConfigError};
use crate::task::domain::{Board, Task, TaskId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the dispatcher.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// A move is still awaiting the server; the new interaction is refused.
    #[error("another move is still being saved")]
    MoveInFlight,
    /// The move failed and the view was rolled back.
    #[error("could not move task: {0}")]
    Move(#[from] MoveGatewayError),
}

/// Result of handling one drag event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The drag is in progress; the view may show a preview.
    Tracking,
    /// The drop needed no move.
    Unchanged,
    /// The server confirmed the move.
    Moved(Task),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    None,
    Hover(PendingMove),
    InFlight(PendingMove),
}

impl Overlay {
    const fn pending(&self) -> Option<&PendingMove> {
        match self {
            Self::None => None,
            Self::Hover(pending) | Self::InFlight(pending) => Some(pending),
        }
    }
}

#[derive(Debug)]
struct DispatcherState {
    authoritative: Board,
    overlay: Overlay,
}

/// Owns the displayed board and the single pending move.
///
/// States are `Idle` (no overlay or a hover preview) and `Pending` (one
/// move awaiting the server). The state lock is never held across an
/// await, so the host can keep rendering [`MoveDispatcher::view`] while a
/// move is in flight.
pub struct MoveDispatcher<G, F, N>
where
    G: MoveGateway,
    F: BoardFeed,
    N: Notifier,
{
    gateway: Arc<G>,
    feed: Arc<F>,
    notifier: Arc<N>,
    timeout: Duration,
    state: Mutex<DispatcherState>,
}

impl<G, F, N> MoveDispatcher<G, F, N>
where
    G: MoveGateway,
    F: BoardFeed,
    N: Notifier,
{
    /// Creates an idle dispatcher over an authoritative snapshot.
    #[must_use]
    pub fn new(gateway: Arc<G>, feed: Arc<F>, notifier: Arc<N>, authoritative: Board) -> Self {
        Self {
            gateway,
            feed,
            notifier,
            timeout: ReorderConfig::default().move_timeout(),
            state: Mutex::new(DispatcherState {
                authoritative,
                overlay: Overlay::None,
            }),
        }
    }

    /// Applies the move timeout from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderConfigError`] when `config` fails validation.
    pub fn with_config(mut self, config: &ReorderConfig) -> Result<Self, ReorderConfigError> {
        config.validate()?;
        self.timeout = config.move_timeout();
        Ok(self)
    }

    fn lock(&self) -> MutexGuard<'_, DispatcherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the board to render: authoritative data plus the overlay.
    #[must_use]
    pub fn view(&self) -> Board {
        let state = self.lock();
        project(&state.authoritative, state.overlay.pending())
    }

    /// Returns the last authoritative snapshot.
    #[must_use]
    pub fn authoritative(&self) -> Board {
        self.lock().authoritative.clone()
    }

    /// Returns the move awaiting the server, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<PendingMove> {
        match self.lock().overlay {
            Overlay::InFlight(pending) => Some(pending),
            Overlay::None | Overlay::Hover(_) => None,
        }
    }

    /// Replaces the authoritative snapshot after a host refetch.
    ///
    /// A hover preview or in-flight move keeps being applied on top of the
    /// new snapshot.
    pub fn refresh(&self, board: Board) {
        self.lock().authoritative = board;
    }

    /// Routes one drag event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MoveInFlight`] when a move is still pending,
    /// or [`DispatchError::Move`] when a drop failed and was rolled back.
    pub async fn handle(&self, event: DragEvent) -> Result<DispatchOutcome, DispatchError> {
        match event {
            DragEvent::Start { task_id } => {
                self.begin(task_id)?;
                Ok(DispatchOutcome::Tracking)
            }
            DragEvent::Over { task_id, target } => {
                self.preview(task_id, target)?;
                Ok(DispatchOutcome::Tracking)
            }
            DragEvent::End { task_id, target } => self.drop_task(task_id, target).await,
        }
    }

    /// Starts tracking a drag, discarding any stale preview.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MoveInFlight`] while a move is pending.
    pub fn begin(&self, task_id: TaskId) -> Result<(), DispatchError> {
        let mut state = self.lock();
        reject_in_flight(&state, task_id)?;
        state.overlay = Overlay::None;
        Ok(())
    }

    /// Shows where the task would land if dropped on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MoveInFlight`] while a move is pending.
    pub fn preview(&self, task_id: TaskId, target: DropTarget) -> Result<(), DispatchError> {
        let mut state = self.lock();
        reject_in_flight(&state, task_id)?;
        state.overlay = resolve_drop(&state.authoritative, task_id, target)
            .map_or(Overlay::None, Overlay::Hover);
        Ok(())
    }

    /// Drops a task on `target` and waits for the server.
    ///
    /// The move is shown immediately. On success the view switches to
    /// refreshed authoritative data; on failure or timeout the overlay is
    /// discarded, the host is notified once and the error is returned.
    /// Failed moves are never retried automatically.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MoveInFlight`] while another move is
    /// pending, or [`DispatchError::Move`] when this move failed.
    pub async fn drop_task(
        &self,
        task_id: TaskId,
        target: Option<DropTarget>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let pending = {
            let mut state = self.lock();
            reject_in_flight(&state, task_id)?;
            let resolved =
                target.and_then(|drop| resolve_drop(&state.authoritative, task_id, drop));
            let Some(pending) = resolved else {
                state.overlay = Overlay::None;
                debug!(%task_id, "drop needs no move");
                return Ok(DispatchOutcome::Unchanged);
            };
            state.overlay = Overlay::InFlight(pending);
            pending
        };

        debug!(
            %task_id,
            to_status = %pending.to_status,
            to_index = pending.to_index,
            "dispatching move"
        );
        let response = tokio::time::timeout(
            self.timeout,
            self.gateway.move_position(pending.intent()),
        )
        .await
        .unwrap_or_else(|_| Err(MoveGatewayError::Timeout(self.timeout)));

        match response {
            Ok(task) => {
                self.confirm(pending, task.clone()).await;
                info!(%task_id, status = %task.status(), "move confirmed");
                Ok(DispatchOutcome::Moved(task))
            }
            Err(err) => {
                self.roll_back(&err).await;
                Err(DispatchError::Move(err))
            }
        }
    }

    async fn confirm(&self, pending: PendingMove, task: Task) {
        let project_id = self.lock().authoritative.project_id();
        let fetched = self.feed.fetch_board(project_id).await;

        let mut state = self.lock();
        match fetched {
            Ok(board) => state.authoritative = board,
            Err(err) => {
                warn!(error = %err, "refetch after move failed; keeping confirmed placement");
                let mut board = state.authoritative.clone();
                board.remove(task.id());
                board.insert(pending.to_status, pending.to_index, task);
                state.authoritative = board;
            }
        }
        state.overlay = Overlay::None;
    }

    async fn roll_back(&self, err: &MoveGatewayError) {
        let project_id = {
            let mut state = self.lock();
            state.overlay = Overlay::None;
            state.authoritative.project_id()
        };
        warn!(error = %err, "move failed; view rolled back");
        self.notifier.notify(err.notice());

        if matches!(err, MoveGatewayError::NotFound(_)) {
            match self.feed.fetch_board(project_id).await {
                Ok(board) => self.refresh(board),
                Err(fetch_err) => warn!(error = %fetch_err, "refetch after missing task failed"),
            }
        }
    }
}

fn reject_in_flight(state: &DispatcherState, task_id: TaskId) -> Result<(), DispatchError> {
    if let Overlay::InFlight(current) = state.overlay {
        warn!(
            %task_id,
            pending_task_id = %current.task_id,
            "interaction rejected while a move is pending"
        );
        return Err(DispatchError::MoveInFlight);
    }
    Ok(())
}
