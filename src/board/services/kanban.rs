//! Board loading, drag reconciliation, status management and task saves.

use super::{KanbanError, KanbanResult};
use crate::board::{
    domain::{
        BoardConfig, BoardDomainError, DragEnd, DraftMode, KanbanBoard, PendingMove, ProjectId,
        RollbackOutcome, Status, StatusColor, StatusId, Task, TaskDraftSession, TaskId,
    },
    ports::ProjectBackend,
};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;

/// Result of a drag gesture once the backend has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The gesture did not change the board and no request was sent.
    NoOp,
    /// The backend accepted the move.
    Confirmed,
    /// A newer move or edit of the same card replaced this one before the
    /// backend answered. The board is left alone; an accepted result only
    /// changes where a later rollback of the newer move puts the card.
    Superseded,
    /// The view was closed before the backend answered; the result was
    /// dropped.
    Discarded,
}

/// Opens kanban views over a project backend.
#[derive(Clone)]
pub struct KanbanService<B>
where
    B: ProjectBackend,
{
    backend: Arc<B>,
    config: BoardConfig,
}

impl<B> KanbanService<B>
where
    B: ProjectBackend,
{
    /// Creates a service with the default board configuration.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_config(backend, BoardConfig::default())
    }

    /// Creates a service with a custom board configuration.
    #[must_use]
    pub const fn with_config(backend: Arc<B>, config: BoardConfig) -> Self {
        Self { backend, config }
    }

    /// Returns the board configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Loads a project and opens its board.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Load`] when the backend cannot supply the
    /// project; no partial board is produced. Returns
    /// [`KanbanError::Domain`] when the configured statuses are invalid.
    pub async fn open(&self, project_id: &ProjectId) -> KanbanResult<KanbanView<B>> {
        let project = self
            .backend
            .get_project(project_id)
            .await
            .map_err(|source| {
                tracing::warn!(%project_id, error = %source, "failed to load project");
                KanbanError::Load {
                    project_id: project_id.clone(),
                    source,
                }
            })?;
        let task_count = project.tasks.len();
        let board = KanbanBoard::from_project(project, &self.config)?;
        tracing::info!(%project_id, task_count, "opened kanban board");
        Ok(KanbanView {
            board: Arc::new(Mutex::new(board)),
            backend: Arc::clone(&self.backend),
            palette: self.config.palette.clone(),
        })
    }
}

/// One open kanban board and the operations the UI triggers on it.
///
/// The view owns the board state. Backend calls are awaited without holding
/// the state lock, so further gestures may start while a confirmation is
/// still in flight.
pub struct KanbanView<B>
where
    B: ProjectBackend,
{
    board: Arc<Mutex<KanbanBoard>>,
    backend: Arc<B>,
    palette: Vec<StatusColor>,
}

impl<B> KanbanView<B>
where
    B: ProjectBackend,
{
    /// Returns a copy of the current board state for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn board(&self) -> KanbanResult<KanbanBoard> {
        Ok(lock(&self.board)?.clone())
    }

    /// Runs `read` against the current board state.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn with_board<R>(&self, read: impl FnOnce(&KanbanBoard) -> R) -> KanbanResult<R> {
        let board = lock(&self.board)?;
        Ok(read(&board))
    }

    /// Returns the statuses in column order.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn list_statuses(&self) -> KanbanResult<Vec<Status>> {
        self.with_board(|board| board.statuses().to_vec())
    }

    /// Returns the number of cards in a column.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn count_in_status(&self, status_id: &StatusId) -> KanbanResult<usize> {
        self.with_board(|board| board.count_in_status(status_id))
    }

    /// Returns the colors offered by the status color picker.
    #[must_use]
    pub fn palette(&self) -> &[StatusColor] {
        &self.palette
    }

    /// Handles the end of a drag gesture and waits for the backend.
    ///
    /// The board reflects the move before the backend is called. When the
    /// backend rejects it, the move is rolled back before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] when the gesture targets an unknown
    /// card or column (nothing changes), or [`KanbanError::StatusUpdate`]
    /// after a rollback.
    pub async fn drag_end(&self, event: &DragEnd) -> KanbanResult<MoveOutcome> {
        let Some(pending) = self.begin_move(event)? else {
            return Ok(MoveOutcome::NoOp);
        };
        confirm_move(self.backend.as_ref(), &Arc::downgrade(&self.board), pending).await
    }

    /// Handles the end of a drag gesture without waiting for the backend.
    ///
    /// The move is applied before this returns; the confirmation runs on the
    /// Tokio runtime and is dropped silently if the view is closed first.
    /// Returns `None` when the gesture does not change the board.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] when the gesture targets an unknown
    /// card or column.
    pub fn spawn_drag_end(
        &self,
        event: &DragEnd,
    ) -> KanbanResult<Option<JoinHandle<KanbanResult<MoveOutcome>>>>
    where
        B: 'static,
    {
        let Some(pending) = self.begin_move(event)? else {
            return Ok(None);
        };
        let backend = Arc::clone(&self.backend);
        let board = Arc::downgrade(&self.board);
        Ok(Some(tokio::spawn(async move {
            confirm_move(backend.as_ref(), &board, pending).await
        })))
    }

    /// Adds a status column.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] for blank or duplicate titles.
    pub fn add_status(&self, title: &str, color: StatusColor) -> KanbanResult<Status> {
        Ok(lock(&self.board)?.add_status(title, color)?)
    }

    /// Renames or recolors a status column.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] for unknown statuses or blank titles.
    pub fn edit_status(
        &self,
        id: &StatusId,
        title: &str,
        color: StatusColor,
    ) -> KanbanResult<Status> {
        Ok(lock(&self.board)?.edit_status(id, title, color)?)
    }

    /// Deletes a status column.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] when it is the last column, still
    /// holds cards or has moves awaiting confirmation.
    pub fn delete_status(&self, id: &StatusId) -> KanbanResult<Status> {
        Ok(lock(&self.board)?.delete_status(id)?)
    }

    /// Moves a status column to another position.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] for unknown statuses.
    pub fn move_status(&self, id: &StatusId, index: usize) -> KanbanResult<()> {
        Ok(lock(&self.board)?.move_status(id, index)?)
    }

    /// Opens a blank task draft in `status_id`.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] when the status is not on the board.
    pub fn open_create(&self, status_id: &StatusId) -> KanbanResult<TaskDraftSession> {
        let board = lock(&self.board)?;
        if !board.registry().contains(status_id) {
            return Err(BoardDomainError::UnknownStatus(status_id.clone()).into());
        }
        Ok(TaskDraftSession::open_create(status_id.clone()))
    }

    /// Opens a draft pre-filled from a task on the board.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] when the task is not on the board.
    pub fn open_edit(&self, task_id: &TaskId) -> KanbanResult<TaskDraftSession> {
        let board = lock(&self.board)?;
        let task = board
            .task(task_id)
            .ok_or_else(|| BoardDomainError::UnknownTask(task_id.clone()))?;
        Ok(TaskDraftSession::open_edit(task))
    }

    /// Saves a draft and applies the result to the board.
    ///
    /// New tasks and tasks moved to another status land at the top of their
    /// column; tasks that keep their status keep their position. The session
    /// is closed on success and left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Domain`] when the draft is invalid or closed
    /// and [`KanbanError::Save`] when the backend rejects it.
    pub async fn save(&self, session: &mut TaskDraftSession) -> KanbanResult<Task> {
        session.validate()?;
        let draft = session.prepared();
        let project_id = {
            let board = lock(&self.board)?;
            if !board.registry().contains(&draft.status_id) {
                return Err(BoardDomainError::UnknownStatus(draft.status_id.clone()).into());
            }
            board.project().id.clone()
        };

        let saved = match session.mode() {
            DraftMode::Create => self.backend.create_task(&project_id, &draft).await,
            DraftMode::Edit(task_id) => self.backend.update_task(task_id, &draft).await,
        }
        .map_err(|err| {
            tracing::warn!(%project_id, error = %err, "failed to save task draft");
            KanbanError::Save(err)
        })?;

        {
            let mut board = lock(&self.board)?;
            match session.mode() {
                DraftMode::Create => board.apply_created(saved.clone()),
                DraftMode::Edit(_) => board.apply_updated(saved.clone())?,
            }
        }
        session.finish();
        Ok(saved)
    }

    /// Closes the view; confirmations still in flight are dropped.
    pub fn close(self) {
        tracing::debug!("closing kanban view");
        drop(self);
    }

    fn begin_move(&self, event: &DragEnd) -> KanbanResult<Option<PendingMove>> {
        let pending = lock(&self.board)?.begin_move(event)?;
        if let Some(applied) = &pending {
            tracing::debug!(
                task_id = %applied.task_id(),
                status_id = %applied.destination_status(),
                generation = applied.generation(),
                "applied optimistic move"
            );
        }
        Ok(pending)
    }
}

fn lock(board: &Mutex<KanbanBoard>) -> KanbanResult<MutexGuard<'_, KanbanBoard>> {
    board.lock().map_err(|_| KanbanError::StatePoisoned)
}

async fn confirm_move<B>(
    backend: &B,
    board: &Weak<Mutex<KanbanBoard>>,
    pending: PendingMove,
) -> KanbanResult<MoveOutcome>
where
    B: ProjectBackend + ?Sized,
{
    let result = backend
        .update_task_status(pending.task_id(), pending.destination_status())
        .await;

    let Some(shared) = board.upgrade() else {
        tracing::debug!(
            task_id = %pending.task_id(),
            "view closed before the move was confirmed"
        );
        return Ok(MoveOutcome::Discarded);
    };
    let mut state = lock(&shared)?;

    match result {
        Ok(canonical) => {
            if state.confirm_move(&pending, canonical) {
                Ok(MoveOutcome::Confirmed)
            } else {
                Ok(MoveOutcome::Superseded)
            }
        }
        Err(source) => {
            let task_id = pending.task_id().clone();
            match state.rollback_move(pending) {
                RollbackOutcome::Superseded => Ok(MoveOutcome::Superseded),
                RollbackOutcome::Restored | RollbackOutcome::Reverted => {
                    Err(KanbanError::StatusUpdate { task_id, source })
                }
            }
        }
    }
}
