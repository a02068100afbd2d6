//! Database configuration and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for opening the reservations database.
///
/// Carries the database file path, the identifier of the reservations table
/// inside it, and the busy timeout applied to lock contention.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use callback_guard::database::DatabaseConfig;
///
/// let config = DatabaseConfig::new("/tmp/callbacks.db", "callbacks")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.table, "callbacks");
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Identifier of the reservations table.
    pub table: String,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with the default busy timeout
    /// of 5000ms.
    #[must_use]
    pub fn new(path: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
            busy_timeout: Duration::from_millis(5000),
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}
