//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field is reported the same way: `400 invalid_request` with
//! `details.field` naming the form field and `details.code` the rule.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, FieldViolation};

/// Turn a domain form violation into a client error.
pub(crate) fn field_error(violation: &impl FieldViolation) -> Error {
    field_error_parts(violation.field(), violation.code(), violation.to_string())
}

fn field_error_parts(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_uuid",
        }))
    })
}

/// A choice field whose value is outside the accepted set.
pub(crate) fn invalid_choice(field: &'static str, value: &str, expected: &str) -> Error {
    Error::invalid_request(format!("{field} must be one of {expected}")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_choice",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingError, ErrorCode};
    use rstest::rstest;

    #[rstest]
    fn field_errors_carry_field_and_code() {
        let error = field_error(&BookingError::EmptyPickup);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "pickupAddress", "code": "empty_pickup_address" }))
        );
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn bad_uuids_are_rejected(#[case] raw: &str) {
        let error = parse_uuid(raw, "id").expect_err("invalid uuid");
        assert_eq!(
            error.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_uuid"))
        );
    }
}
