//! Project data supplied by the backend when a board is opened.

use super::{ProjectId, Task};

/// Display metadata of the project that owns the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Backend project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Name of the client the project belongs to, if any.
    pub client_name: Option<String>,
}

/// A project with its flat task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Display metadata.
    pub summary: ProjectSummary,
    /// Tasks in backend order.
    pub tasks: Vec<Task>,
}

impl Project {
    /// Creates a project without tasks.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            summary: ProjectSummary {
                id,
                name: name.into(),
                client_name: None,
            },
            tasks: Vec::new(),
        }
    }

    /// Sets the client name.
    #[must_use]
    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.summary.client_name = Some(client_name.into());
        self
    }

    /// Sets the task list.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.summary.id
    }
}
