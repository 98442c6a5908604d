//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request-validation failures carry `{ "field", "code" }` details so
//! clients can react per field without parsing English text. Handlers build
//! those payloads through [`field_error`] to keep the shape in one place.

use serde_json::json;

use crate::domain::Error;

/// Build an invalid-request error with the shared field details shape.
pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Reject a payload that left a required field out.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    field_error(
        field,
        "missing_field",
        format!("missing required field: {field}"),
    )
}
