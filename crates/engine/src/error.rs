// ABOUTME: Error types for the TEI extraction engine.
// ABOUTME: Provides TeiError with DateFormat, InvalidUrl and Config variants plus the Result alias.

use std::fmt;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, TeiError>;

/// Errors surfaced by the engine.
///
/// Missing article roots and missing optional fields are not errors: the
/// first is reported as `None`/[`Outcome::NotArticle`](crate::Outcome), the
/// second is logged and left at the record default.
#[derive(Debug, Error)]
pub enum TeiError {
    /// A raw date string did not match the portal's format pattern.
    #[error("date {raw:?} does not match format {format:?}: {source}")]
    DateFormat {
        raw: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The canonical article URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Portal configuration could not be loaded or compiled.
    #[error("invalid portal configuration: {0}")]
    Config(String),
}

impl TeiError {
    /// Creates a Config error from any displayable cause.
    pub fn config(err: impl fmt::Display) -> Self {
        TeiError::Config(err.to_string())
    }

    /// Returns true if this is a DateFormat error.
    pub fn is_date_format(&self) -> bool {
        matches!(self, TeiError::DateFormat { .. })
    }
}
