//! Database schema management and migrations.
//!
//! This module handles schema initialization and version checking for the
//! reservations database.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    create_reservations_table_sql, create_ttl_index_sql, CREATE_METADATA_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates the metadata table, the reservations table named by `table`, the
/// ttl index, and records the current schema version. Safe to call on a
/// database where the objects already exist.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use callback_guard::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn, "callbacks").unwrap();
/// ```
pub fn initialize_schema(conn: &Connection, table: &str) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(&create_reservations_table_sql(table), [])?;
    conn.execute(&create_ttl_index_sql(table), [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than the metadata
/// table not existing yet (which reads as version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table" surfaces as a generic SQLite error
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database (version 0) is initialized in place. A database written
/// by a newer client is rejected; so is one left behind by an older schema,
/// until a migration exists for it. On a current-version database the
/// reservations table is still created if absent, since one database file
/// can host several reservation tables.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] on a version mismatch, or a
/// database error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection, table: &str) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn, table)?;
    } else if version == CURRENT_SCHEMA_VERSION {
        conn.execute(&create_reservations_table_sql(table), [])?;
        conn.execute(&create_ttl_index_sql(table), [])?;
    } else {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
