//! Tests for domain error construction.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_identifier(), ErrorCode::InvalidIdentifier, "Invalid user ID")]
#[case(Error::user_not_found(), ErrorCode::NotFound, "User not found")]
#[case(Error::conflict(EMAIL_TAKEN_MESSAGE), ErrorCode::Conflict, "Email already registered")]
#[case(Error::internal("boom"), ErrorCode::InternalError, "boom")]
fn constructors_set_code_and_message(
    #[case] err: Error,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
    assert_eq!(err.to_string(), message);
    assert!(err.details().is_none());
}

#[test]
fn with_details_attaches_payload() {
    let details = json!([{ "type": "missing" }]);
    let err = Error::new(ErrorCode::ValidationFailure, "invalid body").with_details(details.clone());
    assert_eq!(err.details(), Some(&details));
}

#[test]
fn new_without_scope_has_no_trace_id() {
    assert!(Error::user_not_found().trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let err = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(err.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
}

#[test]
fn with_trace_id_overrides_captured_value() {
    let err = Error::user_not_found().with_trace_id("abc");
    assert_eq!(err.trace_id(), Some("abc"));
}
