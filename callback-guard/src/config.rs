//! Layered configuration for the callback-guard store.
//!
//! Settings are resolved from three layers, lowest precedence first:
//! built-in defaults, an optional `config.yaml` in the data directory, and
//! `CALLBACK_*` environment variables. Explicit builder overrides (CLI
//! flags) sit above all three.
//!
//! Exactly one setting is required: the reservations table identifier.
//! Resolving configuration without it fails with a distinct
//! [`Error::MissingSetting`] before any request can be processed.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable naming the reservations table. Required.
pub const TABLE_VAR: &str = "CALLBACK_TABLE";

/// Environment variable overriding the data directory. Optional.
pub const DATA_DIR_VAR: &str = "CALLBACK_DATA_DIR";

/// Environment variable overriding the database busy timeout, in seconds.
pub const BUSY_TIMEOUT_VAR: &str = "CALLBACK_BUSY_TIMEOUT";

/// Name of the optional configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the database file inside the data directory.
const DATABASE_FILE_NAME: &str = "callbacks.db";

const DEFAULT_BUSY_TIMEOUT_SECONDS: u64 = 5;

/// Resolved configuration.
///
/// # Examples
///
/// ```no_run
/// use callback_guard::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_table(Some("callbacks".to_string()))
///     .build()
///     .unwrap();
/// assert_eq!(config.table, "callbacks");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier of the reservations table inside the database.
    pub table: String,
    /// Directory holding the database file and optional `config.yaml`.
    pub data_dir: PathBuf,
    /// How long the backend waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Config {
    /// Returns the path of the database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    /// Returns the database-layer configuration derived from these settings.
    #[must_use]
    pub fn database_config(&self) -> crate::database::DatabaseConfig {
        crate::database::DatabaseConfig::new(self.database_path(), &self.table)
            .with_busy_timeout(self.busy_timeout)
    }
}

/// Shape of the optional `config.yaml` file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    table: Option<String>,
    busy_timeout_seconds: Option<u64>,
}

/// Builder resolving configuration from overrides, environment, and file.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    table: Option<String>,
    data_dir: Option<PathBuf>,
    busy_timeout_seconds: Option<u64>,
}

impl ConfigBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the table identifier (highest precedence).
    #[must_use]
    pub fn with_table(mut self, table: Option<String>) -> Self {
        self.table = table;
        self
    }

    /// Overrides the data directory (highest precedence).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Overrides the busy timeout in seconds (highest precedence).
    #[must_use]
    pub fn with_busy_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.busy_timeout_seconds = seconds;
        self
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if no layer supplies the table
    /// identifier, [`Error::Validation`] if the busy-timeout variable is not
    /// a number, and file/parse errors if `config.yaml` exists but cannot be
    /// read.
    pub fn build(self) -> Result<Config> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => match non_empty_env(DATA_DIR_VAR) {
                Some(dir) => PathBuf::from(dir),
                None => default_data_dir(),
            },
        };

        let file = load_file_config(&data_dir)?;

        let table = self
            .table
            .filter(|t| !t.trim().is_empty())
            .or_else(|| non_empty_env(TABLE_VAR))
            .or(file.table)
            .ok_or_else(|| Error::MissingSetting {
                setting: TABLE_VAR.to_string(),
            })?;

        let busy_timeout_seconds = match self.busy_timeout_seconds {
            Some(seconds) => seconds,
            None => match non_empty_env(BUSY_TIMEOUT_VAR) {
                Some(raw) => raw.parse().map_err(|_| Error::Validation {
                    field: BUSY_TIMEOUT_VAR.into(),
                    message: format!("must be a whole number of seconds, got '{raw}'"),
                })?,
                None => file
                    .busy_timeout_seconds
                    .unwrap_or(DEFAULT_BUSY_TIMEOUT_SECONDS),
            },
        };

        Ok(Config {
            table,
            data_dir,
            busy_timeout: Duration::from_secs(busy_timeout_seconds),
        })
    }
}

/// Returns the default data directory, `~/.callback-guard`.
///
/// Falls back to the current directory when no home directory can be
/// determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    home::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".callback-guard")
}

fn load_file_config(data_dir: &std::path::Path) -> Result<FileConfig> {
    let path = data_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Reads an environment variable, treating empty or whitespace-only values
/// as unset.
fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(TABLE_VAR);
        env::remove_var(DATA_DIR_VAR);
        env::remove_var(BUSY_TIMEOUT_VAR);
    }

    #[test]
    #[serial]
    fn test_missing_table_is_distinct_error() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigBuilder::new()
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build();

        let err = result.unwrap_err();
        assert!(err.is_missing_setting());
        assert!(format!("{err}").contains(TABLE_VAR));
    }

    #[test]
    #[serial]
    fn test_empty_table_env_counts_as_missing() {
        clear_env();
        env::set_var(TABLE_VAR, "   ");
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigBuilder::new()
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build();
        clear_env();

        assert!(result.unwrap_err().is_missing_setting());
    }

    #[test]
    #[serial]
    fn test_table_from_env() {
        clear_env();
        env::set_var(TABLE_VAR, "callbacks");
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build()
            .unwrap();
        clear_env();

        assert_eq!(config.table, "callbacks");
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(config.database_path().ends_with("callbacks.db"));
    }

    #[test]
    #[serial]
    fn test_table_from_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "table: from_file\nbusy_timeout_seconds: 9\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build()
            .unwrap();

        assert_eq!(config.table, "from_file");
        assert_eq!(config.busy_timeout, Duration::from_secs(9));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "table: from_file\n").unwrap();
        env::set_var(TABLE_VAR, "from_env");

        let config = ConfigBuilder::new()
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build()
            .unwrap();
        clear_env();

        assert_eq!(config.table, "from_env");
    }

    #[test]
    #[serial]
    fn test_builder_override_beats_env() {
        clear_env();
        env::set_var(TABLE_VAR, "from_env");
        let dir = tempfile::tempdir().unwrap();

        let config = ConfigBuilder::new()
            .with_table(Some("from_flag".to_string()))
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build()
            .unwrap();
        clear_env();

        assert_eq!(config.table, "from_flag");
    }

    #[test]
    #[serial]
    fn test_invalid_busy_timeout_rejected() {
        clear_env();
        env::set_var(BUSY_TIMEOUT_VAR, "soon");
        let dir = tempfile::tempdir().unwrap();

        let result = ConfigBuilder::new()
            .with_table(Some("callbacks".to_string()))
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build();
        clear_env();

        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    #[serial]
    fn test_malformed_config_file_rejected() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "table: [not, a, string\n").unwrap();

        let result = ConfigBuilder::new()
            .with_data_dir(Some(dir.path().to_path_buf()))
            .build();

        assert!(matches!(result, Err(Error::ConfigFile(_))));
    }

    #[test]
    fn test_default_data_dir_suffix() {
        assert!(default_data_dir().ends_with(".callback-guard"));
    }
}
