//! Common test utilities for CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Table identifier used throughout the CLI tests.
#[allow(dead_code)]
pub const TEST_TABLE: &str = "callbacks";

/// Test environment with an isolated data directory.
pub struct TestEnv {
    data_dir: TempDir,
}

impl TestEnv {
    /// Creates a fresh environment backed by a temporary data directory.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Builds a command with the environment's data directory and table
    /// configured, and inherited `CALLBACK_*` variables cleared.
    #[allow(dead_code)]
    pub fn command(&self) -> Command {
        let mut cmd = self.command_without_table();
        cmd.env("CALLBACK_TABLE", TEST_TABLE);
        cmd
    }

    /// Builds a command with no table configured, for exercising the
    /// missing-setting failure.
    #[allow(dead_code)]
    pub fn command_without_table(&self) -> Command {
        let mut cmd = Command::cargo_bin("callback-guard").unwrap();
        cmd.env_remove("CALLBACK_TABLE")
            .env_remove("CALLBACK_BUSY_TIMEOUT")
            .env_remove("CALLBACK_LOG_MODE")
            .env("CALLBACK_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Path of the database file inside the data directory.
    #[allow(dead_code)]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.path().join("callbacks.db")
    }

    /// Writes a contact event file and returns its path.
    #[allow(dead_code)]
    pub fn write_event(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.data_dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a voice-channel reserve event for `number`.
    #[allow(dead_code)]
    pub fn reserve_event_file(&self, number: &str) -> PathBuf {
        self.write_event(
            &format!("reserve_{}.json", number.trim_start_matches('+')),
            &format!(
                r#"{{"Details": {{"ContactData": {{"Channel": "VOICE", "ContactId": "contact-1"}},
                    "Parameters": {{"callback_number": "{number}"}}}}}}"#
            ),
        )
    }

    /// Writes a parameters-only release event for `number`.
    #[allow(dead_code)]
    pub fn release_event_file(&self, number: &str) -> PathBuf {
        self.write_event(
            &format!("release_{}.json", number.trim_start_matches('+')),
            &format!(r#"{{"Details": {{"Parameters": {{"callback_number": "{number}"}}}}}}"#),
        )
    }
}
