//! Application services for the kanban board.

mod error;
mod kanban;

pub use error::{KanbanError, KanbanResult};
pub use kanban::{KanbanService, KanbanView, MoveOutcome};
