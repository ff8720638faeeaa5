//! Shared world state for kanban board BDD scenarios.

use std::sync::Arc;

use eyre::OptionExt;
use quadro::board::{
    adapters::memory::InMemoryProjectBackend,
    domain::{BoardConfig, KanbanBoard, Project, ProjectId, Status, Task},
    services::{KanbanResult, KanbanService, KanbanView, MoveOutcome},
};
use rstest::fixture;
use tracing_subscriber::EnvFilter;

/// Identifier of the project every scenario works on.
pub const PROJECT_ID: &str = "scenario-project";

/// Scenario world for kanban board behaviour tests.
pub struct KanbanWorld {
    /// Backend shared by every view opened in the scenario.
    pub backend: Arc<InMemoryProjectBackend>,
    /// Board configuration used when the board is opened.
    pub config: BoardConfig,
    /// Tasks seeded into the project before it is opened.
    pub tasks: Vec<Task>,
    /// The open board, once a step opened it.
    pub view: Option<KanbanView<InMemoryProjectBackend>>,
    /// Result of the last drag gesture.
    pub last_move: Option<KanbanResult<MoveOutcome>>,
    /// Result of the last status deletion.
    pub last_deletion: Option<KanbanResult<Status>>,
}

impl KanbanWorld {
    /// Creates a world with an empty backend and the default columns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Arc::new(InMemoryProjectBackend::new()),
            config: BoardConfig::default(),
            tasks: Vec::new(),
            view: None,
            last_move: None,
            last_deletion: None,
        }
    }

    /// Stores the seeded project in the backend and opens its board.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be stored or loaded.
    pub fn open_board(&mut self) -> eyre::Result<()> {
        let project_id = ProjectId::new(PROJECT_ID)?;
        let project =
            Project::new(project_id.clone(), "Scenario project").with_tasks(self.tasks.clone());
        self.backend.insert_project(project)?;
        let service = KanbanService::with_config(Arc::clone(&self.backend), self.config.clone());
        self.view = Some(run_async(service.open(&project_id))?);
        Ok(())
    }

    /// Returns the open board.
    ///
    /// # Errors
    ///
    /// Returns an error if no step opened the board.
    pub fn view(&self) -> eyre::Result<&KanbanView<InMemoryProjectBackend>> {
        self.view.as_ref().ok_or_eyre("board is not open in scenario world")
    }

    /// Returns a copy of the open board's state.
    ///
    /// # Errors
    ///
    /// Returns an error if no step opened the board.
    pub fn board(&self) -> eyre::Result<KanbanBoard> {
        Ok(self.view()?.board()?)
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    let _installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
