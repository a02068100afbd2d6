//! Reservation records for pending callback requests.
//!
//! A reservation asserts that a callback is already queued for a phone
//! number. Exactly one live record may exist per number; the record is
//! created when the number is first seen, never mutated, and removed either
//! explicitly (the callback was serviced) or by the store's expiry sweep.

use serde::{Deserialize, Serialize};

use crate::clock::SECONDS_PER_HOUR;

/// Lifetime of a reservation, in whole hours (one week).
///
/// A reservation whose age exceeds this bound no longer blocks a new
/// callback request; the store removes such rows in its expiry sweep.
pub const RESERVATION_TTL_HOURS: i64 = 24 * 7;

/// Lifetime of a reservation, in seconds.
pub const RESERVATION_TTL_SECONDS: i64 = RESERVATION_TTL_HOURS * SECONDS_PER_HOUR;

/// A pending-callback reservation.
///
/// Records are keyed by the callback number (E.164 format, e.g.
/// `+642101234567`) and carry the correlation id of the contact-flow
/// invocation that created them, plus creation and expiry timestamps in
/// epoch seconds.
///
/// # Examples
///
/// ```
/// use callback_guard::Reservation;
///
/// let reservation =
///     Reservation::new("+642101234567", "contact-1", 1_700_000_000).unwrap();
/// assert_eq!(reservation.callback_number(), "+642101234567");
/// assert_eq!(reservation.expires_at() - reservation.created_at(), 7 * 24 * 3600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    callback_number: String,
    original_request_id: String,
    created_at: i64,
    expires_at: i64,
}

impl Reservation {
    /// Creates a reservation taken at `created_at`, expiring one week later.
    ///
    /// Both strings are trimmed of surrounding whitespace before storage so
    /// that lookups with and without stray whitespace address the same
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if `callback_number` or `original_request_id` is
    /// empty after trimming whitespace.
    pub fn new(
        callback_number: &str,
        original_request_id: &str,
        created_at: i64,
    ) -> Result<Self, ValidationError> {
        let callback_number = non_empty("callback_number", callback_number)?;
        let original_request_id = non_empty("original_request_id", original_request_id)?;

        Ok(Self {
            callback_number,
            original_request_id,
            created_at,
            expires_at: created_at + RESERVATION_TTL_SECONDS,
        })
    }

    /// Reassembles a reservation from stored fields, trusting the stored
    /// expiry instead of recomputing it.
    pub(crate) fn from_stored(
        callback_number: String,
        original_request_id: String,
        created_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            callback_number,
            original_request_id,
            created_at,
            expires_at,
        }
    }

    /// Returns the phone number the reservation is keyed by.
    #[must_use]
    pub fn callback_number(&self) -> &str {
        &self.callback_number
    }

    /// Returns the correlation id of the invocation that created the record.
    #[must_use]
    pub fn original_request_id(&self) -> &str {
        &self.original_request_id
    }

    /// Returns the creation timestamp in epoch seconds.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Returns the expiry timestamp in epoch seconds.
    #[must_use]
    pub const fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

fn non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: "must be non-empty after trimming whitespace".into(),
        });
    }
    Ok(trimmed.to_string())
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
