//! End-to-end handler tests: the full reserve/duplicate/release cycle and
//! the wire format of every response the contact-flow can receive.

mod common;

use common::{create_test_store, quiet_logger, release_event, reserve_event};

use callback_guard::handler::ContactEvent;
use callback_guard::{handle_release, handle_reserve};
use serde_json::json;

#[test]
fn test_full_callback_cycle() {
    // A caller asks for a callback, asks again before it happens, gets the
    // callback, and the number is cleared. Exercises every branch the flow
    // takes in normal operation.

    let (_dir, mut store) = create_test_store();
    let logger = quiet_logger();
    let number = "+642101234567";

    // First request: the number is unseen, so the reservation is recorded.
    let response = handle_reserve(&mut store, &logger, &reserve_event(number));
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "SUCCESS", "duplicate": false, "message": "TABLE_UPDATED" })
    );

    // Second request for the same number is reported as a duplicate.
    let response = handle_reserve(&mut store, &logger, &reserve_event(number));
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "FAIL", "duplicate": true, "message": "CALLBACK_EXISTS" })
    );

    // The callback is serviced and the number cleared.
    let response = handle_release(&mut store, &logger, &release_event(number));
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "SUCCESS", "message": "NUMBER_CLEARED" })
    );

    // Clearing again is harmless.
    let response = handle_release(&mut store, &logger, &release_event(number));
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "SUCCESS", "message": "NO_ACTION" })
    );

    // After the release the number can be reserved again.
    let response = handle_reserve(&mut store, &logger, &reserve_event(number));
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "SUCCESS", "duplicate": false, "message": "TABLE_UPDATED" })
    );
}

#[test]
fn test_distinct_numbers_do_not_collide() {
    let (_dir, mut store) = create_test_store();
    let logger = quiet_logger();

    let first = handle_reserve(&mut store, &logger, &reserve_event("+642101234567"));
    let second = handle_reserve(&mut store, &logger, &reserve_event("+15551230000"));

    assert!(!first.duplicate);
    assert!(!second.duplicate);
}

#[test]
fn test_reserve_rejects_event_without_number() {
    let (_dir, mut store) = create_test_store();
    let event: ContactEvent = serde_json::from_value(json!({
        "Details": {
            "ContactData": { "Channel": "VOICE", "ContactId": "contact-flow-1" },
            "Parameters": { "unrelated": "value" }
        }
    }))
    .unwrap();

    let response = handle_reserve(&mut store, &quiet_logger(), &event);
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "FAIL", "duplicate": false, "message": "ERROR_ENCOUNTERED" })
    );
}

#[test]
fn test_reserve_rejects_non_voice_channel() {
    let (_dir, mut store) = create_test_store();
    let event: ContactEvent = serde_json::from_value(json!({
        "Details": {
            "ContactData": { "Channel": "CHAT", "ContactId": "contact-flow-1" },
            "Parameters": { "callback_number": "+642101234567" }
        }
    }))
    .unwrap();

    let response = handle_reserve(&mut store, &quiet_logger(), &event);
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "FAIL", "duplicate": false, "message": "ERROR_ENCOUNTERED" })
    );

    // The rejected event left no record behind.
    assert!(store.get("+642101234567").unwrap().is_none());
}

#[test]
fn test_release_rejects_event_without_number() {
    let (_dir, mut store) = create_test_store();
    let event: ContactEvent =
        serde_json::from_value(json!({ "Details": { "Parameters": {} } })).unwrap();

    let response = handle_release(&mut store, &quiet_logger(), &event);
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({ "result": "FAIL", "message": "ERROR_ENCOUNTERED" })
    );
}

#[test]
fn test_failed_release_does_not_disturb_reservation() {
    let (_dir, mut store) = create_test_store();
    let logger = quiet_logger();
    let number = "+642101234567";

    handle_reserve(&mut store, &logger, &reserve_event(number));

    // A malformed release leaves the record in place.
    let event: ContactEvent =
        serde_json::from_value(json!({ "Details": { "Parameters": {} } })).unwrap();
    handle_release(&mut store, &logger, &event);

    assert!(store.get(number).unwrap().is_some());
}
