#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # callback-guard
//!
//! A library for deduplicating outbound-callback requests from a telephony
//! contact-flow.
//!
//! Contact-flow engines have no standard duplicate prevention, so a caller
//! can enqueue the same number for a callback over and over. This library
//! keeps one reservation record per phone number in a SQLite-backed store:
//! the first request wins, repeats are reported as duplicates, and the
//! record disappears when the callback is serviced or after a week.
//!
//! ## Core Types
//!
//! - [`ReservationStore`]: the dedup engine (try-reserve, release, purge)
//! - [`Reservation`]: the per-number record with its one-week expiry
//! - [`UpdateBuilder`] and [`UpdateStatement`]: the generic keyed-update path
//! - [`handler`]: the contact-flow entry points and response contract
//! - [`Config`] and [`ConfigBuilder`]: layered settings resolution
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```no_run
//! use callback_guard::database::DatabaseConfig;
//! use callback_guard::{ReservationStore, ReserveOutcome};
//!
//! let config = DatabaseConfig::new("/tmp/callbacks.db", "callbacks");
//! let mut store = ReservationStore::open(config).unwrap();
//!
//! match store.try_reserve("+642101234567", "contact-1").unwrap() {
//!     ReserveOutcome::Reserved(reservation) => {
//!         println!("callback lodged until {}", reservation.expires_at());
//!     }
//!     ReserveOutcome::AlreadyReserved => println!("duplicate request"),
//! }
//! ```

pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod logging;
pub mod reservation;
pub mod store;
pub mod update;

// Re-export key types at crate root for convenience
pub use config::{default_data_dir, Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use handler::{
    handle_release, handle_reserve, ContactEvent, HandlerResult, ReleaseMessage, ReleaseResponse,
    ReserveMessage, ReserveResponse,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::Reservation;
pub use store::{ReleaseOutcome, ReservationStore, ReserveOutcome};
pub use update::{UpdateBuilder, UpdateStatement};
