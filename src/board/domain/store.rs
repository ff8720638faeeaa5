//! Board state: tasks partitioned into per-status columns.

use super::{StatusColor, StatusId, StatusRegistry, Task, TaskId};
use std::collections::HashMap;

/// Position of a card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardPosition {
    /// Column holding the card.
    pub status_id: StatusId,
    /// Zero-based index within the column.
    pub index: usize,
}

impl CardPosition {
    /// Creates a card position.
    #[must_use]
    pub const fn new(status_id: StatusId, index: usize) -> Self {
        Self { status_id, index }
    }
}

/// Mapping from status id to the ordered cards of that column.
///
/// The key set mirrors the [`StatusRegistry`] it was derived from, and every
/// task appears in exactly one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    columns: HashMap<StatusId, Vec<Task>>,
}

impl TaskStore {
    /// Groups a flat task list into columns.
    ///
    /// Status values missing from `registry` are collected first and appended
    /// to it once, in first-seen order, using `color`. Tasks keep their
    /// relative order from `tasks` inside each column.
    pub fn partition(
        tasks: Vec<Task>,
        registry: &mut StatusRegistry,
        color: &StatusColor,
    ) -> Self {
        for task in &tasks {
            if registry.ensure(task.status_id(), color) {
                tracing::info!(status_id = %task.status_id(), "synthesized unknown status");
            }
        }

        let mut store = Self::default();
        store.sync_keys(registry);
        for task in tasks {
            store
                .columns
                .entry(task.status_id().clone())
                .or_default()
                .push(task);
        }
        store
    }

    /// Aligns the key set with `registry`.
    ///
    /// Existing columns keep their cards, new statuses get empty columns and
    /// columns of removed statuses are dropped.
    pub fn sync_keys(&mut self, registry: &StatusRegistry) {
        self.columns.retain(|id, _| registry.contains(id));
        for id in registry.ids() {
            self.columns.entry(id.clone()).or_default();
        }
    }

    /// Returns the cards of a column, or an empty slice for unknown ids.
    #[must_use]
    pub fn column(&self, status_id: &StatusId) -> &[Task] {
        self.columns
            .get(status_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of cards in a column, shown in the column header.
    #[must_use]
    pub fn count_in_status(&self, status_id: &StatusId) -> usize {
        self.column(status_id).len()
    }

    /// Returns the number of cards on the whole board.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Returns whether a column exists for `status_id`.
    #[must_use]
    pub fn has_column(&self, status_id: &StatusId) -> bool {
        self.columns.contains_key(status_id)
    }

    /// Iterates the column ids in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &StatusId> {
        self.columns.keys()
    }

    /// Finds the current position of a task by id.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<CardPosition> {
        self.columns.iter().find_map(|(status_id, tasks)| {
            tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|index| CardPosition::new(status_id.clone(), index))
        })
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.columns
            .values()
            .flat_map(|tasks| tasks.iter())
            .find(|task| task.id() == task_id)
    }

    pub(crate) fn remove(&mut self, task_id: &TaskId) -> Option<(CardPosition, Task)> {
        let position = self.locate(task_id)?;
        let column = self.columns.get_mut(&position.status_id)?;
        if position.index >= column.len() {
            return None;
        }
        let task = column.remove(position.index);
        Some((position, task))
    }

    /// Inserts at `index` (clamped to the column length), stamping the
    /// column's status onto the task.
    pub(crate) fn insert(&mut self, status_id: &StatusId, index: usize, mut task: Task) {
        task.set_status(status_id.clone());
        let column = self.columns.entry(status_id.clone()).or_default();
        let target = index.min(column.len());
        column.insert(target, task);
    }

    pub(crate) fn prepend(&mut self, task: Task) {
        let status_id = task.status_id().clone();
        self.insert(&status_id, 0, task);
    }

    /// Replaces a task in place, keeping its position.
    ///
    /// Returns `false` when the task is not on the board or the replacement
    /// belongs to another column.
    pub(crate) fn replace(&mut self, task: &Task) -> bool {
        let Some(position) = self.locate(task.id()) else {
            return false;
        };
        if &position.status_id != task.status_id() {
            return false;
        }
        let slot = self
            .columns
            .get_mut(&position.status_id)
            .and_then(|column| column.get_mut(position.index));
        slot.map(|current| *current = task.clone()).is_some()
    }
}
