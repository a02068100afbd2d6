//! Database connection management.
//!
//! Provides the main database connection type with PRAGMA settings suitable
//! for a long-lived, process-wide connection.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// One `Database` is opened per process and reused for every invocation;
/// the connection is closed implicitly when the process exits.
///
/// # Examples
///
/// ```no_run
/// use callback_guard::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/callbacks.db", "callbacks");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if it does not exist
    /// - Open (creating if necessary) the database file
    /// - Set WAL mode for concurrent access
    /// - Configure the busy timeout
    /// - Initialize or verify the schema for the configured table
    ///
    /// # Errors
    ///
    /// Returns an error if the file or directory cannot be created, PRAGMA
    /// settings cannot be applied, or the schema version is incompatible.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // PRAGMA journal_mode returns a result row, so it needs query_row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn, &config.table)?;

        Ok(Self { conn, config })
    }

    /// Returns the configured reservations table identifier.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.config.table
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Begins an IMMEDIATE transaction.
    ///
    /// IMMEDIATE mode takes the write lock up front, so a read inside the
    /// transaction cannot be invalidated by a concurrent writer before the
    /// transaction's own write commits.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let config = DatabaseConfig::new(&path, "callbacks");

        let db = Database::open(config).unwrap();
        assert!(path.exists());
        assert_eq!(db.table(), "callbacks");

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_database_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");
        let config = DatabaseConfig::new(&path, "callbacks");

        assert!(!path.parent().unwrap().exists());

        let _db = Database::open(config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_begin_transaction() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("test.db"), "callbacks");
        let mut db = Database::open(config).unwrap();

        let tx = db.begin_transaction().unwrap();
        tx.commit().unwrap();
    }
}
