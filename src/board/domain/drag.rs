//! Drag-and-drop gestures and the moves they leave in flight.

use super::{CardPosition, StatusId, TaskId, TaskStore};

/// A finished drag gesture as reported by the board UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    /// Identifier of the dragged card.
    pub task_id: TaskId,
    /// Where the card was picked up.
    pub source: CardPosition,
    /// Where the card was dropped; `None` when the drag was cancelled.
    pub destination: Option<CardPosition>,
}

impl DragEnd {
    /// Creates a drag gesture that ended over `destination`.
    #[must_use]
    pub const fn dropped(task_id: TaskId, source: CardPosition, destination: CardPosition) -> Self {
        Self {
            task_id,
            source,
            destination: Some(destination),
        }
    }

    /// Creates a drag gesture that was cancelled.
    #[must_use]
    pub const fn cancelled(task_id: TaskId, source: CardPosition) -> Self {
        Self {
            task_id,
            source,
            destination: None,
        }
    }

    /// Returns whether the gesture leaves the board unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.destination
            .as_ref()
            .is_none_or(|destination| destination == &self.source)
    }
}

/// An optimistic move waiting for backend confirmation.
///
/// Carries the board state captured right before the move so a rejected
/// confirmation can restore it.
#[derive(Debug, Clone)]
pub struct PendingMove {
    pub(crate) task_id: TaskId,
    pub(crate) from: CardPosition,
    pub(crate) to: CardPosition,
    pub(crate) generation: u64,
    pub(crate) applied_revision: u64,
    pub(crate) snapshot: TaskStore,
}

impl PendingMove {
    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns where the card was before the move.
    #[must_use]
    pub const fn from(&self) -> &CardPosition {
        &self.from
    }

    /// Returns where the card was placed.
    #[must_use]
    pub const fn to(&self) -> &CardPosition {
        &self.to
    }

    /// Returns the status the backend is asked to record.
    #[must_use]
    pub const fn destination_status(&self) -> &StatusId {
        &self.to.status_id
    }

    /// Returns the per-board sequence number of this move.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the board state captured before the move.
    #[must_use]
    pub const fn snapshot(&self) -> &TaskStore {
        &self.snapshot
    }
}

/// How a rejected move was undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The whole board was restored to the pre-move snapshot.
    Restored,
    /// Other changes happened meanwhile; only the moved card went back.
    Reverted,
    /// A newer move of the same card replaced this one; nothing changed.
    Superseded,
}
