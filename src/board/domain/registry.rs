//! Ordered, never-empty list of status columns.

use super::{BoardDomainError, Status, StatusColor, StatusId, default_statuses};

/// Ordered status definitions; the order is the column order on the board.
///
/// A registry always holds at least one status and never holds two statuses
/// with the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry {
    statuses: Vec<Status>,
}

impl StatusRegistry {
    /// Creates a registry from an ordered list of statuses.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyRegistry`] when `statuses` is empty
    /// or [`BoardDomainError::DuplicateStatus`] when two entries share an id.
    pub fn new(statuses: Vec<Status>) -> Result<Self, BoardDomainError> {
        if statuses.is_empty() {
            return Err(BoardDomainError::EmptyRegistry);
        }
        for (position, status) in statuses.iter().enumerate() {
            let repeated = statuses
                .iter()
                .take(position)
                .any(|earlier| earlier.id() == status.id());
            if repeated {
                return Err(BoardDomainError::DuplicateStatus(status.id().clone()));
            }
        }
        Ok(Self { statuses })
    }

    /// Returns the statuses in column order.
    #[must_use]
    pub fn list(&self) -> &[Status] {
        &self.statuses
    }

    /// Returns the number of statuses.
    #[must_use]
    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }

    /// Returns the first column, used as the fallback destination.
    #[must_use]
    pub fn first(&self) -> Option<&Status> {
        self.statuses.first()
    }

    /// Looks up a status by identifier.
    #[must_use]
    pub fn get(&self, id: &StatusId) -> Option<&Status> {
        self.statuses.iter().find(|status| status.id() == id)
    }

    /// Returns whether the registry holds `id`.
    #[must_use]
    pub fn contains(&self, id: &StatusId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates the status identifiers in column order.
    pub fn ids(&self) -> impl Iterator<Item = &StatusId> {
        self.statuses.iter().map(Status::id)
    }

    /// Appends a user-defined status derived from `title`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStatusTitle`] for blank titles and
    /// [`BoardDomainError::DuplicateStatus`] when the derived id is taken.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<Status, BoardDomainError> {
        let status = Status::from_title(title, color)?;
        if self.contains(status.id()) {
            return Err(BoardDomainError::DuplicateStatus(status.id().clone()));
        }
        self.statuses.push(status.clone());
        Ok(status)
    }

    /// Updates the title and color of an existing status, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownStatus`] when `id` is not present
    /// or [`BoardDomainError::EmptyStatusTitle`] for a blank title.
    pub fn edit(
        &mut self,
        id: &StatusId,
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<Status, BoardDomainError> {
        let status = self
            .statuses
            .iter_mut()
            .find(|status| status.id() == id)
            .ok_or_else(|| BoardDomainError::UnknownStatus(id.clone()))?;
        status.relabel(title, color)?;
        Ok(status.clone())
    }

    /// Removes a status.
    ///
    /// Callers are responsible for checking that no task still references
    /// the status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::LastStatus`] when only one status is left
    /// or [`BoardDomainError::UnknownStatus`] when `id` is not present.
    pub fn remove(&mut self, id: &StatusId) -> Result<Status, BoardDomainError> {
        if self.statuses.len() <= 1 {
            return Err(BoardDomainError::LastStatus);
        }
        let position = self
            .position(id)
            .ok_or_else(|| BoardDomainError::UnknownStatus(id.clone()))?;
        Ok(self.statuses.remove(position))
    }

    /// Moves a status to a new column position, clamped to the end.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownStatus`] when `id` is not present.
    pub fn move_to(&mut self, id: &StatusId, index: usize) -> Result<(), BoardDomainError> {
        let position = self
            .position(id)
            .ok_or_else(|| BoardDomainError::UnknownStatus(id.clone()))?;
        let status = self.statuses.remove(position);
        let target = index.min(self.statuses.len());
        self.statuses.insert(target, status);
        Ok(())
    }

    /// Appends a synthesized status for `id` unless it already exists.
    ///
    /// Returns `true` when a status was added.
    pub fn ensure(&mut self, id: &StatusId, color: &StatusColor) -> bool {
        if self.contains(id) {
            return false;
        }
        self.statuses
            .push(Status::synthesized(id.clone(), color.clone()));
        true
    }

    fn position(&self, id: &StatusId) -> Option<usize> {
        self.statuses.iter().position(|status| status.id() == id)
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self {
            statuses: default_statuses(),
        }
    }
}
