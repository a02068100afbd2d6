//! Contact-flow entry points.
//!
//! Two handlers are exposed to the telephony contact-flow: reserve (check
//! whether a callback is already lodged for a number and record one if not)
//! and release (clear the record once the callback is serviced). Each
//! validates the inbound event envelope, delegates to the
//! [`ReservationStore`], and maps the outcome onto the small JSON response
//! contract the contact-flow branches on.
//!
//! Recoverable failures (a malformed event, a backend error) are folded
//! into the `ERROR_ENCOUNTERED` response rather than propagated: the
//! contact-flow only branches on coarse result/message values and decides
//! itself whether to retry. The one failure that does propagate is missing
//! configuration, which surfaces before a handler can ever run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::store::{ReleaseOutcome, ReservationStore, ReserveOutcome};

/// The only channel that can lodge callbacks.
///
/// Any other channel value on a reserve event means the contact-flow is
/// miswired, and the event is rejected.
pub const VOICE_CHANNEL: &str = "VOICE";

/// Name of the event parameter carrying the E.164 callback number.
pub const CALLBACK_NUMBER_PARAMETER: &str = "callback_number";

/// Inbound contact-flow event envelope.
///
/// Only the fields the handlers read are modeled; the parameter bag keeps
/// whatever else the flow sends.
///
/// # Examples
///
/// ```
/// use callback_guard::handler::ContactEvent;
///
/// let event: ContactEvent = serde_json::from_str(
///     r#"{"Details": {"ContactData": {"Channel": "VOICE", "ContactId": "c-1"},
///         "Parameters": {"callback_number": "+642101234567"}}}"#,
/// ).unwrap();
/// assert_eq!(event.parameter("callback_number"), Some("+642101234567"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactEvent {
    /// Event payload.
    #[serde(default)]
    pub details: EventDetails,
}

/// Payload of a contact-flow event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDetails {
    /// Contact metadata; absent on events that carry parameters only.
    #[serde(default)]
    pub contact_data: Option<ContactData>,
    /// Free-form parameter bag set by the flow.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// Contact metadata attached to a contact-flow event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactData {
    /// Channel the contact arrived on.
    #[serde(default)]
    pub channel: String,
    /// Correlation id of the contact-flow invocation.
    #[serde(default)]
    pub contact_id: String,
}

impl ContactEvent {
    /// Looks up a parameter from the event's parameter bag.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.details.parameters.get(name).map(String::as_str)
    }
}

/// Coarse invocation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlerResult {
    /// The requested action took effect.
    Success,
    /// The action did not take effect.
    Fail,
}

/// Message values a reserve response can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReserveMessage {
    /// A fresh reservation was recorded.
    TableUpdated,
    /// A callback is already lodged for this number.
    CallbackExists,
    /// Validation or storage failed.
    ErrorEncountered,
}

/// Message values a release response can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseMessage {
    /// The reservation was removed.
    NumberCleared,
    /// No reservation existed for the number.
    NoAction,
    /// Validation or storage failed.
    ErrorEncountered,
}

/// Response of the reserve handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveResponse {
    /// Coarse result.
    pub result: HandlerResult,
    /// Whether the number already had a callback lodged.
    pub duplicate: bool,
    /// Outcome detail the flow branches on.
    pub message: ReserveMessage,
}

/// Response of the release handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseResponse {
    /// Coarse result.
    pub result: HandlerResult,
    /// Outcome detail the flow branches on.
    pub message: ReleaseMessage,
}

/// Handles a reserve event.
///
/// Validates that the event arrived on the voice channel and carries a
/// `callback_number` parameter, then attempts the reservation with the
/// event's contact id as the originating correlation id.
pub fn handle_reserve(
    store: &mut ReservationStore,
    logger: &Logger,
    event: &ContactEvent,
) -> ReserveResponse {
    logger.debug("reserve invocation started");

    let response = match reserve_outcome(store, event) {
        Ok(ReserveOutcome::Reserved(reservation)) => {
            logger.debug(&format!(
                "reservation recorded for {}",
                reservation.callback_number()
            ));
            ReserveResponse {
                result: HandlerResult::Success,
                duplicate: false,
                message: ReserveMessage::TableUpdated,
            }
        }
        Ok(ReserveOutcome::AlreadyReserved) => {
            logger.debug("callback already lodged for this number");
            ReserveResponse {
                result: HandlerResult::Fail,
                duplicate: true,
                message: ReserveMessage::CallbackExists,
            }
        }
        Err(e) => {
            logger.error(&format!("reserve failed: {e}"));
            ReserveResponse {
                result: HandlerResult::Fail,
                duplicate: false,
                message: ReserveMessage::ErrorEncountered,
            }
        }
    };

    logger.info(&format!("reserve completed: {response:?}"));
    response
}

fn reserve_outcome(store: &mut ReservationStore, event: &ContactEvent) -> Result<ReserveOutcome> {
    let contact = event
        .details
        .contact_data
        .as_ref()
        .ok_or_else(|| Error::Validation {
            field: "ContactData".into(),
            message: "missing from event".into(),
        })?;

    if contact.channel != VOICE_CHANNEL {
        return Err(Error::Validation {
            field: "Channel".into(),
            message: format!(
                "only {VOICE_CHANNEL} channels can lodge callbacks, got '{}'",
                contact.channel
            ),
        });
    }

    let number = event
        .parameter(CALLBACK_NUMBER_PARAMETER)
        .ok_or_else(|| Error::Validation {
            field: CALLBACK_NUMBER_PARAMETER.into(),
            message: "parameter missing from event".into(),
        })?;

    store.try_reserve(number, &contact.contact_id)
}

/// Handles a release event.
///
/// Only the `callback_number` parameter is required; release events carry no
/// channel check so any flow branch may clear a number. A release for a
/// number with no record is a success with `NO_ACTION`; the flow must not
/// stall just because there was nothing to clear.
pub fn handle_release(
    store: &mut ReservationStore,
    logger: &Logger,
    event: &ContactEvent,
) -> ReleaseResponse {
    logger.debug("release invocation started");

    let response = match release_outcome(store, event) {
        Ok(ReleaseOutcome::Released) => {
            logger.debug("reservation cleared");
            ReleaseResponse {
                result: HandlerResult::Success,
                message: ReleaseMessage::NumberCleared,
            }
        }
        Ok(ReleaseOutcome::NotFound) => {
            logger.debug("no reservation to clear");
            ReleaseResponse {
                result: HandlerResult::Success,
                message: ReleaseMessage::NoAction,
            }
        }
        Err(e) => {
            logger.error(&format!("release failed: {e}"));
            ReleaseResponse {
                result: HandlerResult::Fail,
                message: ReleaseMessage::ErrorEncountered,
            }
        }
    };

    logger.info(&format!("release completed: {response:?}"));
    response
}

fn release_outcome(store: &mut ReservationStore, event: &ContactEvent) -> Result<ReleaseOutcome> {
    let number = event
        .parameter(CALLBACK_NUMBER_PARAMETER)
        .ok_or_else(|| Error::Validation {
            field: CALLBACK_NUMBER_PARAMETER.into(),
            message: "parameter missing from event".into(),
        })?;

    store.release(number)
}
