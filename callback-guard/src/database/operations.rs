//! Keyed read/write/delete operations for reservation rows.
//!
//! All operations are associated functions taking a connection, so they can
//! run either on the long-lived connection or inside a transaction.

use rusqlite::{Connection, ToSql};

use crate::error::Result;
use crate::reservation::Reservation;
use crate::update::UpdateStatement;

use super::connection::Database;
use super::schema::{
    delete_reservation_sql, purge_expired_sql, select_reservation_sql, upsert_reservation_sql,
    KEY_PARAM,
};

/// Deserializes a reservation from a database row.
///
/// Expects row fields in this order: `callback_number`,
/// `original_request_id`, `created_at`, `ttl`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let callback_number: String = row.get(0)?;
    let original_request_id: String = row.get(1)?;
    let created_at: i64 = row.get(2)?;
    let expires_at: i64 = row.get(3)?;

    Ok(Reservation::from_stored(
        callback_number,
        original_request_id,
        created_at,
        expires_at,
    ))
}

impl Database {
    /// Retrieves the reservation row for a callback number.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if a row exists
    /// - `Ok(None)` if no row exists
    /// - `Err(_)` if a database error occurs
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "no rows").
    pub fn get_reservation(
        conn: &Connection,
        table: &str,
        number: &str,
    ) -> Result<Option<Reservation>> {
        let sql = select_reservation_sql(table);
        let params: &[(&str, &dyn ToSql)] = &[(KEY_PARAM, &number)];

        match conn.query_row(&sql, params, row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial-update statement to the row keyed by `number`.
    ///
    /// Creates the row when absent and overwrites the named attributes when
    /// present, binding the statement's placeholders in both branches.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn apply_reservation_update(
        conn: &Connection,
        table: &str,
        number: &str,
        statement: &UpdateStatement,
    ) -> Result<()> {
        let sql = upsert_reservation_sql(table, statement);
        let mut params = statement.params();
        params.push((KEY_PARAM, &number));
        conn.execute(&sql, params.as_slice())?;

        Ok(())
    }

    /// Deletes the reservation row for a callback number.
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation(conn: &Connection, table: &str, number: &str) -> Result<bool> {
        let sql = delete_reservation_sql(table);
        let params: &[(&str, &dyn ToSql)] = &[(KEY_PARAM, &number)];
        let deleted = conn.execute(&sql, params)?;

        Ok(deleted > 0)
    }

    /// Deletes every row whose expiry instant is before `now`.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_expired(conn: &Connection, table: &str, now: i64) -> Result<usize> {
        let sql = purge_expired_sql(table);
        let params: &[(&str, &dyn ToSql)] = &[(":now", &now)];

        Ok(conn.execute(&sql, params)?)
    }
}
