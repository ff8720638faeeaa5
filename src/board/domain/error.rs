//! Error types for board domain validation and parsing.

use super::{StatusId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A status identifier was empty after trimming.
    #[error("status identifier must not be empty")]
    EmptyStatusId,

    /// A task identifier was empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// A project identifier was empty after trimming.
    #[error("project identifier must not be empty")]
    EmptyProjectId,

    /// A status title was empty after trimming.
    #[error("status title must not be empty")]
    EmptyStatusTitle,

    /// A task name was empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A color value is not a `#RGB` or `#RRGGBB` hex color.
    #[error("invalid status color '{0}', expected #RGB or #RRGGBB")]
    InvalidColor(String),

    /// The registry already holds a status with this identifier.
    #[error("a status with id {0} already exists")]
    DuplicateStatus(StatusId),

    /// The status registry would become empty.
    #[error("at least one status must exist")]
    LastStatus,

    /// Tasks still reference the status being deleted.
    #[error("status {id} still holds {task_count} task(s)")]
    StatusInUse {
        /// Status that was targeted for deletion.
        id: StatusId,
        /// Number of tasks currently in the column.
        task_count: usize,
    },

    /// An unconfirmed move could still return a card to the status.
    #[error("status {0} has moves awaiting confirmation")]
    StatusHasPendingMoves(StatusId),

    /// The status is not part of the registry.
    #[error("unknown status: {0}")]
    UnknownStatus(StatusId),

    /// The task is not present on the board.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// A registry was constructed without statuses.
    #[error("a status registry requires at least one status")]
    EmptyRegistry,

    /// The draft session was already saved or cancelled.
    #[error("the task draft is no longer open")]
    DraftClosed,
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
