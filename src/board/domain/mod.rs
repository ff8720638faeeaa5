//! Domain model for the project kanban board.
//!
//! Statuses define the columns, the task store partitions cards into them
//! and the board aggregate applies drags, edits and status changes while
//! keeping both in step. Nothing here performs I/O.

mod board;
mod config;
mod draft;
mod drag;
mod error;
mod ids;
mod project;
mod registry;
mod status;
mod store;
mod task;

pub use board::KanbanBoard;
pub use config::{BoardConfig, BoardConfigError};
pub use draft::{DraftMode, TaskDraftSession};
pub use drag::{DragEnd, PendingMove, RollbackOutcome};
pub use error::{BoardDomainError, ParsePriorityError};
pub use ids::{ProjectId, StatusId, TaskId};
pub use project::{Project, ProjectSummary};
pub use registry::StatusRegistry;
pub use status::{
    DEFAULT_STATUS_COLOR, STATUS_PALETTE, Status, StatusColor, default_statuses, palette,
};
pub use store::{CardPosition, TaskStore};
pub use task::{Task, TaskDetails, TaskPriority};
