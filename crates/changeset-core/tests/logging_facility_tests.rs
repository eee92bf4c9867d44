#![allow(clippy::unwrap_used, clippy::expect_used)]

use changeset_core::errors::{ExError, ExErrorKind};
use changeset_core::logging_facility::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use changeset_core::logging_facility::test_capture::init_test_capture;
use changeset_core::logging_facility::{init, Profile};
use changeset_core::{log_op_end, log_op_error, log_op_start};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, dry_run = true);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].fields.get("dry_run").map(String::as_str), Some("true"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].fields.get("duration_ms").map(String::as_str), Some("42"));
}

#[test]
fn test_log_op_error_macro_records_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::MalformedRecord).with_record_id("abc");
    log_op_error!(op_name, err, duration_ms = 7);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(
        events[0].fields.get("err_code").map(String::as_str),
        Some("ERR_MALFORMED_RECORD")
    );
}

#[test]
fn test_benign_error_logged_at_info() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    log_op_error!(op_name, ExError::new(ExErrorKind::NoPendingChanges), duration_ms = 1);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::INFO);
}

#[test]
fn test_test_profile_init_after_capture() {
    let capture = init_test_capture();
    let op_name = "test_init_after_capture_unique_5";

    init(Profile::Test);
    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}
