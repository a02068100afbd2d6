//! Purge command implementation.
//!
//! Runs the expiry sweep: every reservation whose expiry instant has passed
//! is deleted. This talks to the database layer directly so the reported
//! count reflects exactly what this invocation removed.

use clap::Args;

use callback_guard::clock::epoch_now;
use callback_guard::Database;

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};

/// Remove expired reservations.
#[derive(Args)]
pub struct PurgeCommand {}

impl PurgeCommand {
    /// Execute the purge command.
    pub fn execute(self, global: &GlobalOptions) -> Result<i32, CliError> {
        let config = load_configuration(global)?;
        let db = Database::open(config.database_config())?;

        let removed = Database::purge_expired(db.connection(), db.table(), epoch_now())?;

        if !global.quiet {
            eprintln!("Removed {removed} expired reservation(s)");
        }

        Ok(0)
    }
}
