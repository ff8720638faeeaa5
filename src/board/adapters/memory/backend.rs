//! In-memory project backend for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::board::{
    domain::{Project, ProjectId, ProjectSummary, StatusId, Task, TaskDetails, TaskId},
    ports::{BackendError, BackendResult, ProjectBackend},
};

/// Status code reported for injected failures.
const INJECTED_FAILURE_STATUS: u16 = 503;

/// Thread-safe in-memory backend with failure injection.
///
/// Task identifiers are assigned on create, like a real backend would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    projects: HashMap<ProjectId, StoredProject>,
    tasks: HashMap<TaskId, Task>,
    faults: FaultPlan,
    status_updates: Vec<(TaskId, StatusId)>,
}

#[derive(Debug)]
struct StoredProject {
    summary: ProjectSummary,
    task_ids: Vec<TaskId>,
}

/// Number of upcoming calls of each kind that fail.
#[derive(Debug, Default)]
struct FaultPlan {
    loads: usize,
    status_updates: usize,
    saves: usize,
}

fn take_fault(remaining: &mut usize, operation: &str) -> BackendResult<()> {
    if *remaining == 0 {
        return Ok(());
    }
    *remaining -= 1;
    tracing::debug!(operation, "injecting backend failure");
    Err(BackendError::rejected(
        INJECTED_FAILURE_STATUS,
        format!("{operation} failed"),
    ))
}

fn poisoned(err: impl std::fmt::Display) -> BackendError {
    BackendError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryProjectBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a project and its tasks, replacing any project with the same
    /// id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the state lock is poisoned.
    pub fn insert_project(&self, project: Project) -> BackendResult<()> {
        let mut state = self.write()?;
        let task_ids = project.tasks.iter().map(|task| task.id().clone()).collect();
        for task in project.tasks {
            state.tasks.insert(task.id().clone(), task);
        }
        state.projects.insert(
            project.summary.id.clone(),
            StoredProject {
                summary: project.summary,
                task_ids,
            },
        );
        Ok(())
    }

    /// Makes the next `count` project loads fail.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the state lock is poisoned.
    pub fn fail_next_loads(&self, count: usize) -> BackendResult<()> {
        self.write()?.faults.loads = count;
        Ok(())
    }

    /// Makes the next `count` status updates fail.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the state lock is poisoned.
    pub fn fail_next_status_updates(&self, count: usize) -> BackendResult<()> {
        self.write()?.faults.status_updates = count;
        Ok(())
    }

    /// Makes the next `count` task creates or updates fail.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the state lock is poisoned.
    pub fn fail_next_saves(&self, count: usize) -> BackendResult<()> {
        self.write()?.faults.saves = count;
        Ok(())
    }

    /// Returns the persisted copy of a task.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the state lock is poisoned.
    pub fn stored_task(&self, task_id: &TaskId) -> BackendResult<Option<Task>> {
        Ok(self.read()?.tasks.get(task_id).cloned())
    }

    /// Returns every accepted status update in call order.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the state lock is poisoned.
    pub fn status_updates(&self) -> BackendResult<Vec<(TaskId, StatusId)>> {
        Ok(self.read()?.status_updates.clone())
    }

    fn read(&self) -> BackendResult<RwLockReadGuard<'_, InMemoryBackendState>> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> BackendResult<RwLockWriteGuard<'_, InMemoryBackendState>> {
        self.state.write().map_err(poisoned)
    }
}

#[async_trait]
impl ProjectBackend for InMemoryProjectBackend {
    async fn get_project(&self, project_id: &ProjectId) -> BackendResult<Project> {
        let mut state = self.write()?;
        take_fault(&mut state.faults.loads, "project load")?;
        let stored = state
            .projects
            .get(project_id)
            .ok_or_else(|| BackendError::NotFound(format!("project {project_id}")))?;
        let tasks = stored
            .task_ids
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect();
        Ok(Project {
            summary: stored.summary.clone(),
            tasks,
        })
    }

    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status_id: &StatusId,
    ) -> BackendResult<Option<Task>> {
        let mut state = self.write()?;
        take_fault(&mut state.faults.status_updates, "status update")?;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| BackendError::NotFound(format!("task {task_id}")))?;
        task.set_status(status_id.clone());
        let updated = task.clone();
        state
            .status_updates
            .push((task_id.clone(), status_id.clone()));
        Ok(Some(updated))
    }

    async fn create_task(
        &self,
        project_id: &ProjectId,
        draft: &TaskDetails,
    ) -> BackendResult<Task> {
        let mut state = self.write()?;
        take_fault(&mut state.faults.saves, "task create")?;
        let id = TaskId::new(Uuid::new_v4().to_string()).map_err(BackendError::decode)?;
        let task = Task::new(id.clone(), draft.clone());
        state
            .projects
            .get_mut(project_id)
            .ok_or_else(|| BackendError::NotFound(format!("project {project_id}")))?
            .task_ids
            .push(id.clone());
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: &TaskId, draft: &TaskDetails) -> BackendResult<Task> {
        let mut state = self.write()?;
        take_fault(&mut state.faults.saves, "task update")?;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| BackendError::NotFound(format!("task {task_id}")))?;
        *task = Task::new(task_id.clone(), draft.clone());
        Ok(task.clone())
    }
}
