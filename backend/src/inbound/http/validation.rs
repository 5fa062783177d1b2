//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are deserialised with optional fields so that a missing
//! field produces the same `{field, code}` details as a blank one instead of
//! a framework-level JSON error.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{BookingId, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidTimestamp,
    InvalidBookingId,
    InvalidVehicleType,
    InvalidDistance,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidBookingId => "invalid_booking_id",
            ErrorCode::InvalidVehicleType => "invalid_vehicle_type",
            ErrorCode::InvalidDistance => "invalid_distance",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Build a `400 invalid_request` carrying `{field, code}` details.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn coded(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    field_error(field.as_str(), code.as_str(), message)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    coded(field, ErrorCode::MissingField, format!("{name} is required"))
}

/// Unwrap an optional string field, treating blank values as missing.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Unwrap an optional non-string field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let name = field.as_str();
            coded(
                field,
                ErrorCode::InvalidTimestamp,
                format!("{name} must be an RFC 3339 timestamp"),
            )
        })
}

const BOOKING_ID_FIELD: FieldName = FieldName::new("bookingId");

/// Parse a booking identifier from a body field or path segment.
pub(crate) fn parse_booking_id(value: Option<String>) -> Result<BookingId, Error> {
    let raw = value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| coded(BOOKING_ID_FIELD, ErrorCode::MissingField, "Booking ID is required"))?;
    BookingId::new(raw.trim()).map_err(|err| {
        coded(BOOKING_ID_FIELD, ErrorCode::InvalidBookingId, err.to_string())
    })
}

pub(crate) fn invalid_vehicle_type_error(field: FieldName, value: &str) -> Error {
    coded(
        field,
        ErrorCode::InvalidVehicleType,
        format!("unknown vehicle type: {value}; expected taxi or bus"),
    )
}

pub(crate) fn invalid_distance_error(field: FieldName) -> Error {
    let name = field.as_str();
    coded(
        field,
        ErrorCode::InvalidDistance,
        format!("{name} must be a number between 0 and 20000"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail(error: &Error, key: &str) -> Option<String> {
        error
            .details()
            .and_then(|details| details.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    fn blank_text_counts_as_missing(#[case] value: Option<String>) {
        let error = require_text(value, FieldName::new("pickupLocation")).expect_err("missing");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&error, "field").as_deref(), Some("pickupLocation"));
        assert_eq!(detail(&error, "code").as_deref(), Some("missing_field"));
    }

    #[rstest]
    fn timestamps_are_normalised_to_utc() {
        let parsed = parse_rfc3339_timestamp(
            "2026-03-18T17:30:00+05:30".to_owned(),
            FieldName::new("pickupTime"),
        )
        .expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2026-03-18T12:00:00+00:00");
    }

    #[rstest]
    fn malformed_timestamps_are_rejected() {
        let error = parse_rfc3339_timestamp("tomorrow".to_owned(), FieldName::new("pickupTime"))
            .expect_err("invalid");
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_timestamp"));
    }

    #[rstest]
    #[case(None, "missing_field", "Booking ID is required")]
    #[case(Some(String::new()), "missing_field", "Booking ID is required")]
    #[case(Some("ride-7".to_owned()), "invalid_booking_id", "booking id must be a valid UUID")]
    fn booking_ids_are_checked(
        #[case] value: Option<String>,
        #[case] code: &str,
        #[case] message: &str,
    ) {
        let error = parse_booking_id(value).expect_err("rejected");
        assert_eq!(error.message(), message);
        assert_eq!(detail(&error, "code").as_deref(), Some(code));
    }
}
