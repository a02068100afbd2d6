//! Release command implementation.
//!
//! Reads a contact event, runs the release handler against the configured
//! store, and prints the handler's JSON response on stdout. The exit code
//! mirrors the response: 0 for SUCCESS, 1 for FAIL.

use clap::Args;
use std::path::PathBuf;

use callback_guard::{handle_release, init_logger, HandlerResult};

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, read_event, GlobalOptions};

/// Clear a callback reservation from a contact event.
#[derive(Args)]
pub struct ReleaseCommand {
    /// Path to the contact event JSON (default: stdin)
    #[arg(long, value_name = "PATH")]
    pub event: Option<PathBuf>,
}

impl ReleaseCommand {
    /// Execute the release command.
    pub fn execute(self, global: &GlobalOptions) -> Result<i32, CliError> {
        let logger = init_logger(global.verbose, global.quiet);

        let config = load_configuration(global)?;
        let mut store = open_store(&config)?;

        let event = read_event(self.event.as_deref())?;

        let response = handle_release(&mut store, &logger, &event);
        println!("{}", serde_json::to_string(&response)?);

        Ok(i32::from(response.result == HandlerResult::Fail))
    }
}
