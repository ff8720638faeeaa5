//! Kanban board aggregate: registry, columns and in-flight moves.

use super::{
    BoardConfig, BoardDomainError, CardPosition, DragEnd, PendingMove, Project, ProjectSummary,
    RollbackOutcome, Status, StatusColor, StatusId, StatusRegistry, Task, TaskId, TaskStore,
};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlightMove {
    generation: u64,
    destination: StatusId,
    /// Last position of the card the backend is known to hold.
    origin: CardPosition,
    origin_generation: u64,
    /// Older moves of the card replaced before their result arrived.
    superseded: Vec<(u64, StatusId)>,
}

impl InFlightMove {
    const fn new(generation: u64, origin: CardPosition, destination: StatusId) -> Self {
        Self {
            generation,
            destination,
            origin,
            origin_generation: 0,
            superseded: Vec::new(),
        }
    }

    fn superseded_by(mut self, generation: u64, destination: StatusId) -> Self {
        let previous = std::mem::replace(&mut self.destination, destination);
        self.superseded.push((self.generation, previous));
        self.generation = generation;
        self
    }

    /// Settles an older move of the chain. An accepted one becomes the
    /// position a later rejection returns the card to.
    fn settle(&mut self, pending: &PendingMove, accepted: bool) {
        let Some(slot) = self
            .superseded
            .iter()
            .position(|(generation, _)| *generation == pending.generation)
        else {
            return;
        };
        self.superseded.swap_remove(slot);
        if accepted && pending.generation > self.origin_generation {
            self.origin = pending.to.clone();
            self.origin_generation = pending.generation;
        }
    }

    fn references(&self, status_id: &StatusId) -> bool {
        &self.origin.status_id == status_id
            || self
                .superseded
                .iter()
                .any(|(_, destination)| destination == status_id)
    }
}

/// State of one project's kanban board.
///
/// All mutations go through this type so the store's key set always matches
/// the registry and every task sits in exactly one column.
#[derive(Debug, Clone)]
pub struct KanbanBoard {
    project: ProjectSummary,
    registry: StatusRegistry,
    store: TaskStore,
    synthesized_color: StatusColor,
    revision: u64,
    next_generation: u64,
    in_flight: HashMap<TaskId, InFlightMove>,
}

impl KanbanBoard {
    /// Builds a board from a freshly loaded project.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardDomainError`] when the configured seed statuses do
    /// not form a valid registry.
    pub fn from_project(
        project: Project,
        config: &BoardConfig,
    ) -> Result<Self, BoardDomainError> {
        let mut registry = config.registry()?;
        let store =
            TaskStore::partition(project.tasks, &mut registry, &config.synthesized_color);
        Ok(Self {
            project: project.summary,
            registry,
            store,
            synthesized_color: config.synthesized_color.clone(),
            revision: 0,
            next_generation: 1,
            in_flight: HashMap::new(),
        })
    }

    /// Returns the project metadata.
    #[must_use]
    pub const fn project(&self) -> &ProjectSummary {
        &self.project
    }

    /// Returns the status registry.
    #[must_use]
    pub const fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    /// Returns the statuses in column order.
    #[must_use]
    pub fn statuses(&self) -> &[Status] {
        self.registry.list()
    }

    /// Returns the board state.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the cards of a column.
    #[must_use]
    pub fn column(&self, status_id: &StatusId) -> &[Task] {
        self.store.column(status_id)
    }

    /// Returns the number of cards in a column.
    #[must_use]
    pub fn count_in_status(&self, status_id: &StatusId) -> usize {
        self.store.count_in_status(status_id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.store.task(task_id)
    }

    /// Returns a counter bumped by every state change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the number of moves awaiting backend confirmation.
    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.in_flight.len()
    }

    /// Applies a drag gesture optimistically.
    ///
    /// The card is located by id, so a stale `source` index is tolerated.
    /// Returns `None` when the gesture does not change the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownStatus`] when the drop column is
    /// not registered or [`BoardDomainError::UnknownTask`] when the card is
    /// not on the board. The board is unchanged on error.
    pub fn begin_move(
        &mut self,
        event: &DragEnd,
    ) -> Result<Option<PendingMove>, BoardDomainError> {
        let Some(destination) = event.destination.as_ref().filter(|_| !event.is_noop()) else {
            tracing::debug!(task_id = %event.task_id, "drag ended without a move");
            return Ok(None);
        };
        if !self.registry.contains(&destination.status_id) {
            return Err(BoardDomainError::UnknownStatus(
                destination.status_id.clone(),
            ));
        }

        let snapshot = self.store.clone();
        let Some((from, task)) = self.store.remove(&event.task_id) else {
            return Err(BoardDomainError::UnknownTask(event.task_id.clone()));
        };
        if from != event.source {
            tracing::debug!(
                task_id = %event.task_id,
                reported = ?event.source,
                located = ?from,
                "drag source was stale, using located position"
            );
        }

        let index = destination
            .index
            .min(self.store.count_in_status(&destination.status_id));
        let to = CardPosition::new(destination.status_id.clone(), index);
        if to == from {
            self.store = snapshot;
            return Ok(None);
        }
        self.store.insert(&to.status_id, to.index, task);
        self.revision += 1;

        let generation = self.next_generation;
        self.next_generation += 1;
        let entry = self.in_flight.remove(&event.task_id).map_or_else(
            || InFlightMove::new(generation, from.clone(), to.status_id.clone()),
            |previous| {
                tracing::debug!(
                    task_id = %event.task_id,
                    previous = previous.generation,
                    generation,
                    "move supersedes an unconfirmed move"
                );
                previous.superseded_by(generation, to.status_id.clone())
            },
        );
        self.in_flight.insert(event.task_id.clone(), entry);

        Ok(Some(PendingMove {
            task_id: event.task_id.clone(),
            from,
            to,
            generation,
            applied_revision: self.revision,
            snapshot,
        }))
    }

    /// Records a backend confirmation.
    ///
    /// When the backend returns its canonical copy of the task, its fields
    /// are merged in place. Returns `false` when a newer move or edit of the
    /// same card superseded `pending`; the board is left as it is, but a
    /// later rejection of the newer move returns the card to where this one
    /// put it.
    pub fn confirm_move(&mut self, pending: &PendingMove, canonical: Option<Task>) -> bool {
        if !self.is_current(pending) {
            if let Some(current) = self.in_flight.get_mut(&pending.task_id) {
                current.settle(pending, true);
            }
            tracing::debug!(
                task_id = %pending.task_id,
                generation = pending.generation,
                "ignoring confirmation of superseded move"
            );
            return false;
        }
        self.in_flight.remove(&pending.task_id);

        let merged = canonical.filter(|task| {
            task.id() == &pending.task_id && task.status_id() == pending.destination_status()
        });
        if let Some(task) = merged
            && self.store.replace(&task)
        {
            self.revision += 1;
        }
        true
    }

    /// Undoes a move the backend rejected.
    ///
    /// If nothing else changed since the move, the pre-move snapshot is
    /// restored as a whole. Otherwise only the moved card returns so
    /// unrelated changes survive. Either way the card goes back to the last
    /// position the backend accepted, which is earlier than `pending.from()`
    /// when this move replaced moves that were never confirmed.
    ///
    /// A superseded move changes nothing; the newest move of the card
    /// settles its position.
    pub fn rollback_move(&mut self, pending: PendingMove) -> RollbackOutcome {
        if !self.is_current(&pending) {
            if let Some(current) = self.in_flight.get_mut(&pending.task_id) {
                current.settle(&pending, false);
            }
            tracing::warn!(
                task_id = %pending.task_id,
                generation = pending.generation,
                "superseded move was rejected, newer move decides the card position"
            );
            return RollbackOutcome::Superseded;
        }
        let origin = self
            .in_flight
            .remove(&pending.task_id)
            .map_or_else(|| pending.from.clone(), |entry| entry.origin);

        let outcome = if self.revision == pending.applied_revision {
            self.store = pending.snapshot;
            if origin != pending.from {
                self.relocate(&pending.task_id, &origin);
            }
            RollbackOutcome::Restored
        } else {
            self.relocate(&pending.task_id, &origin);
            RollbackOutcome::Reverted
        };
        self.revision += 1;
        tracing::warn!(
            task_id = %pending.task_id,
            status_id = %origin.status_id,
            ?outcome,
            "rolled back rejected move"
        );
        outcome
    }

    /// Places a task the backend just created at the top of its column.
    ///
    /// Unknown statuses are synthesized so the card stays reachable.
    pub fn apply_created(&mut self, task: Task) {
        self.ensure_status(task.status_id());
        self.store.remove(task.id());
        tracing::info!(task_id = %task.id(), status_id = %task.status_id(), "task created");
        self.store.prepend(task);
        self.revision += 1;
    }

    /// Applies the saved version of an edited task.
    ///
    /// A task that stays in its column keeps its position; a task whose
    /// status changed moves to the top of its new column. Any unconfirmed
    /// drag of the task is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is no longer
    /// on the board.
    pub fn apply_updated(&mut self, task: Task) -> Result<(), BoardDomainError> {
        let current = self
            .store
            .locate(task.id())
            .ok_or_else(|| BoardDomainError::UnknownTask(task.id().clone()))?;
        self.ensure_status(task.status_id());
        self.in_flight.remove(task.id());

        if &current.status_id == task.status_id() {
            self.store.replace(&task);
        } else {
            self.store.remove(task.id());
            self.store.prepend(task);
        }
        self.revision += 1;
        Ok(())
    }

    /// Adds a user-defined status column.
    ///
    /// # Errors
    ///
    /// See [`StatusRegistry::add`].
    pub fn add_status(
        &mut self,
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<Status, BoardDomainError> {
        let status = self.registry.add(title, color)?;
        self.registry_changed();
        tracing::info!(status_id = %status.id(), "status added");
        Ok(status)
    }

    /// Renames or recolors a status column.
    ///
    /// # Errors
    ///
    /// See [`StatusRegistry::edit`].
    pub fn edit_status(
        &mut self,
        id: &StatusId,
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<Status, BoardDomainError> {
        let status = self.registry.edit(id, title, color)?;
        self.registry_changed();
        tracing::info!(status_id = %id, "status edited");
        Ok(status)
    }

    /// Deletes a status column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::LastStatus`] when it is the only column,
    /// [`BoardDomainError::UnknownStatus`] when it does not exist,
    /// [`BoardDomainError::StatusInUse`] while it still holds cards and
    /// [`BoardDomainError::StatusHasPendingMoves`] while an unconfirmed move
    /// could return a card to it. The board is unchanged on error.
    pub fn delete_status(&mut self, id: &StatusId) -> Result<Status, BoardDomainError> {
        let result = self.check_deletable(id).and_then(|()| self.registry.remove(id));
        match result {
            Ok(status) => {
                self.registry_changed();
                tracing::info!(status_id = %id, "status deleted");
                Ok(status)
            }
            Err(err) => {
                tracing::warn!(status_id = %id, error = %err, "status deletion blocked");
                Err(err)
            }
        }
    }

    /// Moves a status column to another position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownStatus`] when it does not exist.
    pub fn move_status(&mut self, id: &StatusId, index: usize) -> Result<(), BoardDomainError> {
        self.registry.move_to(id, index)?;
        self.registry_changed();
        Ok(())
    }

    fn check_deletable(&self, id: &StatusId) -> Result<(), BoardDomainError> {
        if self.registry.status_count() <= 1 {
            return Err(BoardDomainError::LastStatus);
        }
        if !self.registry.contains(id) {
            return Err(BoardDomainError::UnknownStatus(id.clone()));
        }
        let task_count = self.store.count_in_status(id);
        if task_count > 0 {
            return Err(BoardDomainError::StatusInUse {
                id: id.clone(),
                task_count,
            });
        }
        if self.in_flight.values().any(|entry| entry.references(id)) {
            return Err(BoardDomainError::StatusHasPendingMoves(id.clone()));
        }
        Ok(())
    }

    fn is_current(&self, pending: &PendingMove) -> bool {
        self.in_flight
            .get(&pending.task_id)
            .is_some_and(|current| current.generation == pending.generation)
    }

    fn relocate(&mut self, task_id: &TaskId, position: &CardPosition) {
        if let Some((_, task)) = self.store.remove(task_id) {
            self.store.insert(&position.status_id, position.index, task);
        }
    }

    fn ensure_status(&mut self, id: &StatusId) {
        if self.registry.ensure(id, &self.synthesized_color) {
            tracing::info!(status_id = %id, "synthesized unknown status");
            self.store.sync_keys(&self.registry);
        }
    }

    fn registry_changed(&mut self) {
        self.store.sync_keys(&self.registry);
        self.revision += 1;
    }
}
