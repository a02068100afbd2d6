//! Main entry point for the callback-guard CLI.
//!
//! This is the command-line interface for the callback deduplication store.
//! It provides commands for driving the store from a contact-flow
//! integration or by hand:
//! - `reserve`: check-and-record a callback reservation from an event
//! - `release`: clear a reservation from an event
//! - `purge`: remove expired reservations

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        table: cli.table,
        busy_timeout: cli.busy_timeout,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Release(cmd) => cmd.execute(&global),
        cli::Command::Purge(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
