//! Create/edit sessions for a single task.

use super::{BoardDomainError, StatusId, Task, TaskDetails, TaskId};

/// Whether a draft creates a new task or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    /// The draft becomes a new task on save.
    Create,
    /// The draft replaces the fields of an existing task on save.
    Edit(TaskId),
}

/// An in-progress, uncommitted task form.
///
/// The session stays open until a save succeeds or the user cancels, so a
/// failed save never loses what was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraftSession {
    mode: DraftMode,
    draft: TaskDetails,
    open: bool,
}

impl TaskDraftSession {
    /// Starts a blank draft in `status_id` with medium priority and no dates.
    #[must_use]
    pub fn open_create(status_id: StatusId) -> Self {
        Self {
            mode: DraftMode::Create,
            draft: TaskDetails::new(String::new(), status_id),
            open: true,
        }
    }

    /// Starts a draft pre-filled from an existing task.
    #[must_use]
    pub fn open_edit(task: &Task) -> Self {
        Self {
            mode: DraftMode::Edit(task.id().clone()),
            draft: task.details().clone(),
            open: true,
        }
    }

    /// Returns the session mode.
    #[must_use]
    pub const fn mode(&self) -> &DraftMode {
        &self.mode
    }

    /// Returns the draft fields.
    #[must_use]
    pub const fn draft(&self) -> &TaskDetails {
        &self.draft
    }

    /// Returns the draft fields for editing.
    pub const fn draft_mut(&mut self) -> &mut TaskDetails {
        &mut self.draft
    }

    /// Returns whether the session still accepts edits and saves.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Returns whether the save action should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks the draft before it is sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DraftClosed`] after save or cancel and
    /// [`BoardDomainError::EmptyTaskName`] when the name is blank.
    pub fn validate(&self) -> Result<(), BoardDomainError> {
        if !self.open {
            return Err(BoardDomainError::DraftClosed);
        }
        if self.draft.name.trim().is_empty() {
            return Err(BoardDomainError::EmptyTaskName);
        }
        Ok(())
    }

    /// Returns the fields to send to the backend, with the name trimmed.
    #[must_use]
    pub fn prepared(&self) -> TaskDetails {
        let mut details = self.draft.clone();
        details.name = details.name.trim().to_owned();
        details
    }

    /// Discards the session.
    pub const fn cancel(&mut self) {
        self.open = false;
    }

    pub(crate) const fn finish(&mut self) {
        self.open = false;
    }
}
