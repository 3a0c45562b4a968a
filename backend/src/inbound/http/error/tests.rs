//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection refused by 10.0.0.5")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("header is UTF-8").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, trace_id, body)
}

#[rstest]
#[case(Error::new(ErrorCode::MalformedIdentifier, "bad"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::invalid_identifier(), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::new(ErrorCode::InvalidPageParams, "bad"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::new(ErrorCode::ValidationFailure, "bad"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::user_not_found(), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[case(Error::invalid_identifier(), json!({"detail": "Invalid user ID"}))]
#[case(Error::user_not_found(), json!({"detail": "User not found"}))]
#[case(
    Error::new(ErrorCode::InvalidPageParams, "size").with_details(json!([{"type": "less_than_equal"}])),
    json!({"detail": [{"type": "less_than_equal"}]})
)]
#[actix_web::test]
async fn detail_is_details_or_message(#[case] err: Error, #[case] expected: Value) {
    let (_, trace_id, body) = render(&err).await;
    assert_eq!(body, expected);
    assert!(trace_id.is_none());
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let (status, trace_id, body) = render(&internal_error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
    assert_eq!(body, json!({"detail": "Internal server error"}));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[test]
fn from_actix_error_keeps_wrapped_domain_error() {
    let original = Error::new(ErrorCode::ValidationFailure, "body.email: bad").with_details(json!([{"type": "x"}]));
    let actix_err: actix_web::Error = original.clone().into();
    let err: Error = actix_err.into();

    assert_eq!(err, original);
}
