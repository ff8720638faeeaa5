//! Project kanban board.
//!
//! Models the columns of a project's task board, the partitioning of tasks
//! into those columns, drag-and-drop moves applied optimistically and
//! confirmed by the backend, task create/edit drafts and status column
//! management. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
