//! Reserve command implementation.
//!
//! Reads a contact event, runs the reserve handler against the configured
//! store, and prints the handler's JSON response on stdout. The exit code
//! mirrors the response: 0 for SUCCESS, 1 for FAIL.

use clap::Args;
use std::path::PathBuf;

use callback_guard::{handle_reserve, init_logger, HandlerResult};

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, read_event, GlobalOptions};

/// Record a callback reservation from a contact event.
#[derive(Args)]
pub struct ReserveCommand {
    /// Path to the contact event JSON (default: stdin)
    #[arg(long, value_name = "PATH")]
    pub event: Option<PathBuf>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<i32, CliError> {
        let logger = init_logger(global.verbose, global.quiet);

        // Configuration must resolve before any event is examined; a missing
        // table identifier aborts here rather than producing a response.
        let config = load_configuration(global)?;
        let mut store = open_store(&config)?;

        let event = read_event(self.event.as_deref())?;

        let response = handle_reserve(&mut store, &logger, &event);
        println!("{}", serde_json::to_string(&response)?);

        Ok(i32::from(response.result == HandlerResult::Fail))
    }
}
