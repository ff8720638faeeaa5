//! Shared test helpers for in-memory backend integration tests.

use std::sync::Arc;

use quadro::board::{
    adapters::memory::InMemoryProjectBackend,
    domain::{
        BoardDomainError, CardPosition, DragEnd, KanbanBoard, Project, ProjectId, StatusId, Task,
        TaskDetails, TaskId, TaskPriority,
    },
    ports::BackendError,
    services::{KanbanService, KanbanView},
};
use rstest::fixture;

/// Identifier of the seeded project.
pub const PROJECT_ID: &str = "p-100";

/// Builds a task with the given name and status.
///
/// # Errors
///
/// Returns an error if either identifier is blank.
pub fn task(id: &str, name: &str, status: &str) -> Result<Task, BoardDomainError> {
    Ok(Task::new(
        TaskId::new(id)?,
        TaskDetails::new(name, StatusId::new(status)?),
    ))
}

/// Builds the seeded project: two cards in `TODO`, one in progress and one
/// in an unregistered `BLOCKED` status.
///
/// # Errors
///
/// Returns an error if a fixture identifier is blank.
pub fn seeded_project() -> Result<Project, BoardDomainError> {
    Ok(Project::new(ProjectId::new(PROJECT_ID)?, "Mobile app")
        .with_client("Globex")
        .with_tasks([
            task("t1", "Sketch onboarding", "TODO")?,
            task("t2", "Pick push provider", "TODO")?,
            Task::new(
                TaskId::new("t3")?,
                TaskDetails::new("Build login", StatusId::new("IN_PROGRESS")?)
                    .with_priority(TaskPriority::High),
            ),
            task("t4", "Wait for store approval", "BLOCKED")?,
        ]))
}

/// Provides a backend seeded with [`seeded_project`].
///
/// # Errors
///
/// Returns an error if seeding fails.
#[fixture]
pub fn backend() -> Result<Arc<InMemoryProjectBackend>, BackendError> {
    let backend = InMemoryProjectBackend::new();
    backend.insert_project(seeded_project().map_err(BackendError::decode)?)?;
    Ok(Arc::new(backend))
}

/// Opens the seeded project's board.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded.
pub async fn open(
    backend: &Arc<InMemoryProjectBackend>,
) -> eyre::Result<KanbanView<InMemoryProjectBackend>> {
    let service = KanbanService::new(Arc::clone(backend));
    Ok(service.open(&ProjectId::new(PROJECT_ID)?).await?)
}

/// Builds a drag gesture.
///
/// # Errors
///
/// Returns an error if an identifier is blank.
pub fn drag(task_id: &str, from: (&str, usize), to: (&str, usize)) -> eyre::Result<DragEnd> {
    Ok(DragEnd::dropped(
        TaskId::new(task_id)?,
        CardPosition::new(StatusId::new(from.0)?, from.1),
        CardPosition::new(StatusId::new(to.0)?, to.1),
    ))
}

/// Returns the task ids of a column in order.
///
/// # Errors
///
/// Returns an error if `status_id` is blank.
pub fn column_ids(board: &KanbanBoard, status_id: &str) -> eyre::Result<Vec<String>> {
    Ok(board
        .column(&StatusId::new(status_id)?)
        .iter()
        .map(|entry| entry.id().as_str().to_owned())
        .collect())
}
