//! Utility functions for CLI operations.
//!
//! This module provides the common plumbing shared by the commands:
//! configuration loading, store opening, and contact-event input.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use callback_guard::handler::ContactEvent;
use callback_guard::{Config, ConfigBuilder, ReservationStore};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the reservations table identifier.
    pub table: Option<String>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_table(global.table.clone())
        .with_data_dir(global.data_dir.clone())
        .with_busy_timeout_seconds(global.busy_timeout)
        .build()
        .map_err(CliError::from)
}

/// Open the reservation store for the configured table.
pub fn open_store(config: &Config) -> Result<ReservationStore, CliError> {
    ReservationStore::open(config.database_config()).map_err(CliError::from)
}

/// Read a contact event from a file, or from stdin when no path (or `-`)
/// is given.
pub fn read_event(path: Option<&Path>) -> Result<ContactEvent, CliError> {
    let contents = match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    serde_json::from_str(&contents).map_err(|e| CliError::InvalidEvent(e.to_string()))
}
