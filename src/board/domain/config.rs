//! Board configuration.

use super::{
    BoardDomainError, Status, StatusColor, StatusRegistry, default_statuses, palette,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings applied when a board is opened.
///
/// # Examples
///
/// ```
/// use quadro::board::domain::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.statuses.len(), 4);
///
/// let parsed = BoardConfig::from_json(r##"{"synthesizedColor": "#111111"}"##)
///     .expect("valid configuration");
/// assert_eq!(parsed.synthesized_color.as_str(), "#111111");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Columns every board starts with, in order.
    pub statuses: Vec<Status>,
    /// Color given to statuses synthesized from unknown backend values.
    pub synthesized_color: StatusColor,
    /// Colors offered by the status color picker.
    pub palette: Vec<StatusColor>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            statuses: default_statuses(),
            synthesized_color: StatusColor::synthesized(),
            palette: palette(),
        }
    }
}

/// Errors returned while loading a board configuration.
#[derive(Debug, Error)]
pub enum BoardConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse board configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configured statuses do not form a valid registry.
    #[error("invalid board configuration: {0}")]
    Invalid(#[from] BoardDomainError),
}

impl BoardConfig {
    /// Creates a configuration with a custom seed column list.
    #[must_use]
    pub fn with_statuses(statuses: Vec<Status>) -> Self {
        Self {
            statuses,
            ..Self::default()
        }
    }

    /// Parses a JSON configuration; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Parse`] for malformed JSON, invalid
    /// colors or blank status titles, and [`BoardConfigError::Invalid`] when the status list is empty
    /// or repeats an id.
    pub fn from_json(json: &str) -> Result<Self, BoardConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.registry()?;
        Ok(config)
    }

    /// Builds the seed registry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyRegistry`] or
    /// [`BoardDomainError::DuplicateStatus`] for an invalid status list.
    pub fn registry(&self) -> Result<StatusRegistry, BoardDomainError> {
        StatusRegistry::new(self.statuses.clone())
    }
}
