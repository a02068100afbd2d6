//! Build script for callback-guard-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("callback-guard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Deduplicate telephony callback requests")
        .long_about(
            "Command-line tool for recording, clearing, and expiring callback reservations",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("CALLBACK_DATA_DIR"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .help("Reservations table identifier")
                .value_name("NAME")
                .global(true)
                .env("CALLBACK_TABLE"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("CALLBACK_BUSY_TIMEOUT"),
        )
        .subcommands(vec![
            Command::new("reserve")
                .about("Record a callback reservation from a contact event")
                .long_about(
                    "Check whether a callback is already lodged for the event's number \
                     and record a reservation if not",
                ),
            Command::new("release")
                .about("Clear a callback reservation from a contact event")
                .long_about("Remove the reservation for the event's number once serviced"),
            Command::new("purge")
                .about("Remove expired reservations")
                .long_about("Delete every reservation whose expiry instant has passed"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main callback-guard.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("callback-guard.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
