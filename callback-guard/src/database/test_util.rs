//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};

/// Table identifier used throughout the unit tests.
pub const TEST_TABLE: &str = "callbacks";

/// Creates a temporary test database that is cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created. This is
/// acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path, TEST_TABLE);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}
