//! Quadro: project kanban board core.
//!
//! This crate holds the state and rules behind a project's task board:
//! configurable status columns, the partitioning of a project's tasks into
//! those columns, drag-and-drop moves applied optimistically and reconciled
//! with a remote backend, and the create/edit flow for task cards.
//!
//! # Architecture
//!
//! Quadro follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the project backend
//! - **Adapters**: Concrete backends (in-memory and REST/JSON over HTTP)
//! - **Services**: Orchestration of board state and backend calls
//!
//! # Modules
//!
//! - [`board`]: Status registry, task store, drag reconciliation and drafts

pub mod board;
