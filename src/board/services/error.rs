//! Service-level errors for board operations.

use crate::board::{
    domain::{BoardDomainError, ProjectId, TaskId},
    ports::BackendError,
};
use thiserror::Error;

/// Errors returned by board services.
///
/// Every variant is scoped to the operation that raised it; none of them
/// leaves the board in a partially applied state.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// The project could not be loaded; no board is available.
    #[error("failed to load project {project_id}: {source}")]
    Load {
        /// Project that was requested.
        project_id: ProjectId,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// A validation rule rejected the operation before anything changed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The backend rejected a move; the board was rolled back.
    #[error("failed to move task {task_id}: {source}")]
    StatusUpdate {
        /// Task whose move was undone.
        task_id: TaskId,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// The backend rejected a create or update; the draft is kept open.
    #[error("failed to save task: {0}")]
    Save(#[source] BackendError),

    /// The board state lock was poisoned by a panic elsewhere.
    #[error("board state is unavailable")]
    StatePoisoned,
}

impl KanbanError {
    /// Returns a short message suitable for an alert or toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Load { .. } => {
                "The project could not be loaded. Try again or go back.".to_owned()
            }
            Self::Domain(BoardDomainError::LastStatus) => {
                "At least one status must exist.".to_owned()
            }
            Self::Domain(BoardDomainError::StatusInUse { task_count, .. }) => format!(
                "Move the {task_count} task(s) out of this status before deleting it."
            ),
            Self::Domain(err) => {
                let mut message = err.to_string();
                if let Some(first) = message.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                format!("{message}.")
            }
            Self::StatusUpdate { .. } => {
                "The task could not be moved and was put back. Try again.".to_owned()
            }
            Self::Save(_) => "The task could not be saved. Your changes are kept.".to_owned(),
            Self::StatePoisoned => "The board stopped responding. Reload the page.".to_owned(),
        }
    }
}

/// Result type for board service operations.
pub type KanbanResult<T> = Result<T, KanbanError>;
