//! The reservation store: first-writer-wins deduplication per callback
//! number.
//!
//! The store wraps the process-wide database connection and exposes the two
//! operations the contact-flow needs, try-reserve and release, plus the
//! expiry sweep that removes stale rows. The reserve path runs its read and
//! conditional write inside one IMMEDIATE transaction, so concurrent
//! reserves for the same number cannot both observe an absent record:
//! exactly one writes, the rest see the committed row.

use crate::clock::epoch_now;
use crate::database::{Database, DatabaseConfig};
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::update::UpdateBuilder;

/// Outcome of a reserve attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// No reservation existed; a new record was written.
    Reserved(Reservation),
    /// A reservation already exists for the number; nothing was written.
    AlreadyReserved,
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The record existed and was removed.
    Released,
    /// No record existed; nothing to do.
    NotFound,
}

/// Deduplication store for pending callback requests.
///
/// One store is opened per process and reused across invocations; handlers
/// receive it by explicit injection.
///
/// # Examples
///
/// ```no_run
/// use callback_guard::database::DatabaseConfig;
/// use callback_guard::{ReservationStore, ReserveOutcome};
///
/// let config = DatabaseConfig::new("/tmp/callbacks.db", "callbacks");
/// let mut store = ReservationStore::open(config).unwrap();
///
/// let outcome = store.try_reserve("+642101234567", "contact-1").unwrap();
/// assert!(matches!(outcome, ReserveOutcome::Reserved(_)));
/// ```
#[derive(Debug)]
pub struct ReservationStore {
    db: Database,
}

impl ReservationStore {
    /// Opens the store, initializing the schema if needed and sweeping
    /// expired rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the sweep fails.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        let mut store = Self {
            db: Database::open(config)?,
        };

        let removed = store.purge_expired()?;
        if removed > 0 {
            log::debug!("purged {removed} expired reservation(s) on open");
        }

        Ok(store)
    }

    /// Attempts to reserve a callback for `number`.
    ///
    /// Reads the record for the number and, when none exists, writes a fresh
    /// one stamped with the current time, a one-week expiry, and
    /// `request_id` as the originating correlation id. At most one write is
    /// performed per call, only on the absent-record path. Read and write
    /// share one IMMEDIATE transaction, so either the whole reservation
    /// lands or nothing does.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `number` or `request_id` is empty after
    /// trimming, or a database error if the backend fails.
    pub fn try_reserve(&mut self, number: &str, request_id: &str) -> Result<ReserveOutcome> {
        let number = non_empty("callback_number", number)?;
        let request_id = non_empty("request_id", request_id)?;

        let table = self.db.table().to_string();
        let tx = self.db.begin_transaction()?;

        if Database::get_reservation(&tx, &table, &number)?.is_some() {
            log::debug!("reservation already present for {number}");
            return Ok(ReserveOutcome::AlreadyReserved);
        }

        let reservation = Reservation::new(&number, &request_id, epoch_now())?;
        let statement = UpdateBuilder::new()
            .set(
                "original_request_id",
                reservation.original_request_id().to_string(),
            )
            .set("created_at", reservation.created_at())
            .set("ttl", reservation.expires_at())
            .build()?;

        Database::apply_reservation_update(&tx, &table, reservation.callback_number(), &statement)?;
        tx.commit()?;

        Ok(ReserveOutcome::Reserved(reservation))
    }

    /// Releases the reservation for `number`, if one exists.
    ///
    /// Absence is not an error: the contact-flow is expected to call release
    /// on branches where no reservation was ever taken.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `number` is empty after trimming, or a
    /// database error if the backend fails.
    pub fn release(&mut self, number: &str) -> Result<ReleaseOutcome> {
        let number = non_empty("callback_number", number)?;

        let table = self.db.table().to_string();
        let tx = self.db.begin_transaction()?;

        if Database::get_reservation(&tx, &table, &number)?.is_none() {
            return Ok(ReleaseOutcome::NotFound);
        }

        Database::delete_reservation(&tx, &table, &number)?;
        tx.commit()?;

        Ok(ReleaseOutcome::Released)
    }

    /// Looks up the stored record for `number` without interpreting its
    /// expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn get(&self, number: &str) -> Result<Option<Reservation>> {
        Database::get_reservation(self.db.connection(), self.db.table(), number.trim())
    }

    /// Removes every record whose expiry instant has passed.
    ///
    /// This sweep is the store's expiry mechanism; the reserve and release
    /// paths never inspect expiry themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_expired(&mut self) -> Result<usize> {
        let table = self.db.table().to_string();
        Database::purge_expired(self.db.connection(), &table, epoch_now())
    }
}

fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: field.into(),
            message: "must be non-empty after trimming whitespace".into(),
        });
    }
    Ok(trimmed.to_string())
}
