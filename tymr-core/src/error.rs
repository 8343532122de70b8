//! Error types for tymr.

use chrono::NaiveDate;
use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in tymr operations.
///
/// The scheduling functions themselves (grid, recurrence, conflicts,
/// suggestions) never fail; these cover parsing, configuration and
/// collection lookups and storing series.
#[derive(Error, Debug)]
pub enum TymrError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid time '{0}'. Expected HH:MM between 00:00 and 23:59")]
    InvalidTime(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("No event ids left after {0}")]
    IdsExhausted(EventId),

    #[error("Series repeats more than {limit} times before {until}")]
    SeriesTooLong { limit: usize, until: NaiveDate },

    #[error("Invalid event: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Validation(Vec<crate::validation::ValidationIssue>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tymr operations.
pub type TymrResult<T> = Result<T, TymrError>;
