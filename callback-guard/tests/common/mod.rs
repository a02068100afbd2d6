//! Common test utilities for integration tests.

use callback_guard::database::DatabaseConfig;
use callback_guard::handler::ContactEvent;
use callback_guard::{LogLevel, Logger, ReservationStore};
use serde_json::json;
use tempfile::TempDir;

/// Table identifier used throughout the integration tests.
#[allow(dead_code)]
pub const TEST_TABLE: &str = "callbacks";

/// Opens a store on a fresh temporary database.
///
/// The returned `TempDir` keeps the database alive for the duration of the
/// test.
#[allow(dead_code)]
pub fn create_test_store() -> (TempDir, ReservationStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db"), TEST_TABLE);
    let store = ReservationStore::open(config).unwrap();
    (dir, store)
}

/// A logger that stays silent during tests.
#[allow(dead_code)]
pub fn quiet_logger() -> Logger {
    Logger::new(LogLevel::Quiet)
}

/// Builds a voice-channel reserve event for `number`.
#[allow(dead_code)]
pub fn reserve_event(number: &str) -> ContactEvent {
    serde_json::from_value(json!({
        "Details": {
            "ContactData": { "Channel": "VOICE", "ContactId": "contact-flow-1" },
            "Parameters": { "callback_number": number }
        }
    }))
    .unwrap()
}

/// Builds a parameters-only release event for `number`.
#[allow(dead_code)]
pub fn release_event(number: &str) -> ContactEvent {
    serde_json::from_value(json!({
        "Details": { "Parameters": { "callback_number": number } }
    }))
    .unwrap()
}
