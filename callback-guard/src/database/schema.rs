//! Schema definitions and SQL construction.
//!
//! The reservations table is named at runtime, so most statements are built
//! by these helpers rather than kept as constants. Every identifier (the
//! table, the index, each column) is double-quoted, which makes the
//! statements safe for reserved-word identifiers.

use crate::update::UpdateStatement;

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Column holding the primary key (the E.164 callback number).
pub const KEY_COLUMN: &str = "callback_number";

/// Named parameter binding the key in keyed statements.
pub const KEY_PARAM: &str = ":number";

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Quotes an identifier for safe interpolation into SQL.
///
/// Doubles any embedded quote, so even hostile identifiers cannot break out
/// of the quoted position.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQL creating the reservations table.
///
/// One row per callback number; `ttl` holds the expiry instant in epoch
/// seconds and drives the purge sweep.
pub fn create_reservations_table_sql(table: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {table} (
            "callback_number" TEXT PRIMARY KEY NOT NULL,
            "original_request_id" TEXT NOT NULL,
            "created_at" INTEGER NOT NULL,
            "ttl" INTEGER NOT NULL
        )"#,
        table = quote_identifier(table),
    )
}

/// SQL creating the index that backs the purge sweep.
pub fn create_ttl_index_sql(table: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {index} ON {table}(\"ttl\")",
        index = quote_identifier(&format!("idx_{table}_ttl")),
        table = quote_identifier(table),
    )
}

/// SQL selecting the reservation row for one callback number.
pub fn select_reservation_sql(table: &str) -> String {
    format!(
        r#"SELECT "callback_number", "original_request_id", "created_at", "ttl"
           FROM {table} WHERE "callback_number" = {key}"#,
        table = quote_identifier(table),
        key = KEY_PARAM,
    )
}

/// SQL deleting the reservation row for one callback number.
pub fn delete_reservation_sql(table: &str) -> String {
    format!(
        r#"DELETE FROM {table} WHERE "callback_number" = {key}"#,
        table = quote_identifier(table),
        key = KEY_PARAM,
    )
}

/// SQL deleting every row whose expiry instant is in the past.
pub fn purge_expired_sql(table: &str) -> String {
    format!(
        r#"DELETE FROM {table} WHERE "ttl" < :now"#,
        table = quote_identifier(table),
    )
}

/// SQL applying an [`UpdateStatement`] as a keyed upsert.
///
/// The statement's alias table is resolved to quoted column names; its
/// placeholders are reused both in the VALUES list and in the conflict
/// branch, so inserting a fresh row and updating an existing one bind the
/// same parameters.
pub fn upsert_reservation_sql(table: &str, statement: &UpdateStatement) -> String {
    let mut columns = String::from(quote_identifier(KEY_COLUMN));
    let mut placeholders = String::from(KEY_PARAM);
    let mut assignments = String::new();

    for ((_, name), (placeholder, _)) in statement.names().iter().zip(statement.values()) {
        columns.push_str(", ");
        columns.push_str(&quote_identifier(name));
        placeholders.push_str(", ");
        placeholders.push_str(placeholder);

        if !assignments.is_empty() {
            assignments.push_str(", ");
        }
        assignments.push_str(&quote_identifier(name));
        assignments.push_str(" = ");
        assignments.push_str(placeholder);
    }

    format!(
        "INSERT INTO {table} ({columns}) VALUES ({placeholders}) \
         ON CONFLICT({key}) DO UPDATE SET {assignments}",
        table = quote_identifier(table),
        key = quote_identifier(KEY_COLUMN),
    )
}
