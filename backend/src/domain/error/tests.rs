//! Tests for the error payload, trace capture, and wire shape.

use super::*;
use crate::domain::trace_id::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no auth"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::duplicate("already taken"), ErrorCode::Duplicate)]
#[case(Error::service_unavailable("starting"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn try_from_error_dto_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_string(),
        trace_id: None,
        details: None,
    };

    let error = TraceId::scope(trace_id, async move {
        Error::try_from(dto).expect("conversion succeeds for valid payload without trace")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn dto_carried_trace_id_survives_the_round_trip(expected_trace_id: String) {
    let dto = ErrorDto {
        code: ErrorCode::Forbidden,
        message: "denied".to_string(),
        trace_id: Some(expected_trace_id.clone()),
        details: None,
    };
    let error = Error::try_from(dto).expect("payload is valid");
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn wire_shape_uses_camel_case_and_snake_case_codes(expected_trace_id: String) {
    let error = Error::duplicate("Email already registered").with_trace_id(expected_trace_id);
    let value = serde_json::to_value(&error).expect("serialisation succeeds");
    assert_eq!(
        value,
        json!({
            "code": "duplicate",
            "message": "Email already registered",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
fn absent_optionals_are_omitted_from_the_wire(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("serialisation succeeds");
    let object = value.as_object().expect("errors serialise to objects");
    assert!(!object.contains_key("traceId"));
    assert!(!object.contains_key("details"));
}
