//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer, wrapping
//! library errors and providing appropriate exit codes. Exit code 1 is
//! reserved for handler responses with a FAIL result, which are printed as
//! normal output rather than raised as errors.

use std::fmt;

use callback_guard::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// The contact event could not be parsed.
    InvalidEvent(String),

    /// I/O error.
    Io(std::io::Error),

    /// JSON serialization error.
    Json(serde_json::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: The printed handler response carried a FAIL result
    /// - 4: The contact event was malformed
    /// - 5: I/O error
    /// - 6: Other library or JSON error
    /// - 7: Configuration error (missing or invalid settings)
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::MissingSetting { .. } | LibError::ConfigFile(_) => 7,
                _ => 6,
            },
            CliError::InvalidEvent(_) => 4,
            CliError::Io(_) => 5,
            CliError::Json(_) => 6,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidEvent(msg) => write!(f, "Invalid contact event: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::InvalidEvent(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
