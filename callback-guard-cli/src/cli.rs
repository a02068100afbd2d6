//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{PurgeCommand, ReleaseCommand, ReserveCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for deduplicating telephony callback requests.
#[derive(Parser)]
#[command(name = "callback-guard")]
#[command(version, about = "Deduplicate telephony callback requests", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "CALLBACK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reservations table identifier
    #[arg(long, value_name = "NAME", global = true, env = "CALLBACK_TABLE")]
    pub table: Option<String>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "CALLBACK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Record a callback reservation from a contact event
    Reserve(ReserveCommand),

    /// Clear a callback reservation from a contact event
    Release(ReleaseCommand),

    /// Remove expired reservations
    Purge(PurgeCommand),
}
