//! Task cards shown on the board.

use super::{ParsePriorityError, StatusId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Regular work; the default for new drafts.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Needs attention now.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    /// Parses a priority, falling back to [`TaskPriority::Medium`] for
    /// values the board does not recognize.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::try_from(value).unwrap_or_default()
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_uppercase();
        match normalized.as_str() {
            "LOW" | "BAIXA" => Ok(Self::Low),
            "MEDIUM" | "MEDIA" | "MÉDIA" => Ok(Self::Medium),
            "HIGH" | "ALTA" => Ok(Self::High),
            "URGENT" | "URGENTE" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Editable fields of a task, shared by committed tasks and drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Short task name shown on the card.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Task urgency.
    pub priority: TaskPriority,
    /// Column the task belongs to.
    pub status_id: StatusId,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskDetails {
    /// Creates details with the given name and status and defaults
    /// elsewhere.
    #[must_use]
    pub fn new(name: impl Into<String>, status_id: StatusId) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            priority: TaskPriority::default(),
            status_id,
            start_date: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }
}

/// A task card with its backend identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    details: TaskDetails,
}

impl Task {
    /// Creates a task from its identifier and fields.
    #[must_use]
    pub const fn new(id: TaskId, details: TaskDetails) -> Self {
        Self { id, details }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the editable fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.details.priority
    }

    /// Returns the column the task belongs to.
    #[must_use]
    pub const fn status_id(&self) -> &StatusId {
        &self.details.status_id
    }

    pub(crate) fn set_status(&mut self, status_id: StatusId) {
        self.details.status_id = status_id;
    }
}
