//! Status column definitions and their colors.

use super::{BoardDomainError, StatusId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color given to statuses synthesized from unknown backend values.
pub const DEFAULT_STATUS_COLOR: &str = "#6B7280";

/// Colors offered by the status color picker.
pub const STATUS_PALETTE: [&str; 8] = [
    "#3B82F6", "#F59E0B", "#8B5CF6", "#10B981", "#EF4444", "#EC4899", "#14B8A6", "#6B7280",
];

/// CSS hex color of a status column, normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusColor(String);

impl StatusColor {
    /// Creates a validated color.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColor`] unless the value is `#`
    /// followed by exactly three or six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or_default();
        let is_valid =
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
        if !is_valid {
            return Err(BoardDomainError::InvalidColor(raw));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the color used for synthesized statuses.
    #[must_use]
    pub fn synthesized() -> Self {
        Self(DEFAULT_STATUS_COLOR.to_owned())
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StatusColor {
    fn default() -> Self {
        Self::synthesized()
    }
}

impl TryFrom<String> for StatusColor {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatusColor> for String {
    fn from(value: StatusColor) -> Self {
        value.0
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A kanban column: stable id, display title and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StatusRecord")]
pub struct Status {
    id: StatusId,
    title: String,
    color: StatusColor,
}

/// Unvalidated status as read from configuration.
#[derive(Deserialize)]
struct StatusRecord {
    id: StatusId,
    title: String,
    color: StatusColor,
}

impl TryFrom<StatusRecord> for Status {
    type Error = BoardDomainError;

    fn try_from(record: StatusRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.title, record.color)
    }
}

impl Status {
    /// Creates a status with an explicit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStatusTitle`] when the title is blank.
    pub fn new(
        id: StatusId,
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id,
            title: normalize_title(title)?,
            color,
        })
    }

    /// Creates a user-defined status whose identifier is derived from the
    /// title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStatusTitle`] when the title is blank.
    pub fn from_title(
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<Self, BoardDomainError> {
        let normalized = normalize_title(title)?;
        let id = StatusId::from_title(&normalized)?;
        Ok(Self {
            id,
            title: normalized,
            color,
        })
    }

    /// Creates a placeholder for a status value the registry does not know.
    ///
    /// The raw identifier doubles as the title so the column stays readable.
    #[must_use]
    pub fn synthesized(id: StatusId, color: StatusColor) -> Self {
        let title = id.as_str().to_owned();
        Self { id, title, color }
    }

    /// Returns the status identifier.
    #[must_use]
    pub const fn id(&self) -> &StatusId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the column color.
    #[must_use]
    pub const fn color(&self) -> &StatusColor {
        &self.color
    }

    pub(crate) fn relabel(
        &mut self,
        title: impl Into<String>,
        color: StatusColor,
    ) -> Result<(), BoardDomainError> {
        self.title = normalize_title(title)?;
        self.color = color;
        Ok(())
    }
}

fn normalize_title(title: impl Into<String>) -> Result<String, BoardDomainError> {
    let raw = title.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyStatusTitle);
    }
    Ok(trimmed.to_owned())
}

/// Returns the four statuses every board starts with.
#[must_use]
pub fn default_statuses() -> Vec<Status> {
    [
        ("TODO", "To Do", "#3B82F6"),
        ("IN_PROGRESS", "In Progress", "#F59E0B"),
        ("REVIEW", "Review", "#8B5CF6"),
        ("DONE", "Done", "#10B981"),
    ]
    .into_iter()
    .map(|(id, title, color)| Status {
        id: StatusId::from_static(id),
        title: title.to_owned(),
        color: StatusColor(color.to_owned()),
    })
    .collect()
}

/// Returns the color picker palette.
#[must_use]
pub fn palette() -> Vec<StatusColor> {
    STATUS_PALETTE
        .iter()
        .map(|color| StatusColor((*color).to_owned()))
        .collect()
}
