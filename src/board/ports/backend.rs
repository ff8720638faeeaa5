//! Backend port for loading projects and persisting task changes.

use crate::board::domain::{Project, ProjectId, StatusId, Task, TaskDetails, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// REST backend contract consumed by the board.
#[async_trait]
pub trait ProjectBackend: Send + Sync {
    /// Loads a project together with its flat task list.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the project does not exist.
    async fn get_project(&self, project_id: &ProjectId) -> BackendResult<Project>;

    /// Records a new status for a task after a drag.
    ///
    /// Backends that answer with the updated task return it so the board can
    /// merge canonical field values; others return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the change is rejected or the backend
    /// cannot be reached.
    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status_id: &StatusId,
    ) -> BackendResult<Option<Task>>;

    /// Creates a task and returns it with its backend-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the task is rejected or the backend
    /// cannot be reached.
    async fn create_task(
        &self,
        project_id: &ProjectId,
        draft: &TaskDetails,
    ) -> BackendResult<Task>;

    /// Replaces the fields of an existing task and returns the saved task.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the task does not exist.
    async fn update_task(&self, task_id: &TaskId, draft: &TaskDetails) -> BackendResult<Task>;
}

/// Errors returned by backend implementations.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The requested project or task does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend answered with an error status.
    #[error("backend rejected the request with status {status}: {message}")]
    Rejected {
        /// HTTP-like status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The response could not be decoded into board types.
    #[error("malformed backend response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend could not be reached.
    #[error("backend unavailable: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    /// Wraps a decoding error.
    #[must_use]
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Creates a rejection with the given status code.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
