//! Error types for the callback-guard library.
//!
//! This module provides the error hierarchy for all operations in the
//! callback-guard library, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a callback-guard error.
///
/// # Examples
///
/// ```
/// use callback_guard::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(1_700_000_000)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the callback-guard library.
///
/// This enum encompasses all possible error conditions that can occur
/// while reserving or releasing callbacks.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration setting is absent.
    ///
    /// This is a fatal precondition failure: it is raised while resolving
    /// configuration, before any request is processed, and is never folded
    /// into a handler response.
    #[error("missing required setting: {setting}")]
    MissingSetting {
        /// The name of the absent setting.
        setting: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error reports an absent required setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use callback_guard::Error;
    ///
    /// let err = Error::MissingSetting { setting: "CALLBACK_TABLE".to_string() };
    /// assert!(err.is_missing_setting());
    /// ```
    #[must_use]
    pub fn is_missing_setting(&self) -> bool {
        matches!(self, Self::MissingSetting { .. })
    }

    /// Check if the error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
