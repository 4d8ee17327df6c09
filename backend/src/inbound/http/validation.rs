//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form and query fields arrive as optional strings so that a missing field,
//! a blank field and a malformed field each produce a distinct
//! `invalid_request` error naming the offending field.

use serde_json::json;

use crate::domain::{
    Description, Error, ExerciseDate, ExerciseValidationError, MAX_DURATION_MINUTES, Minutes,
    UserValidationError, Username,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    TooLong,
    InvalidInteger,
    OutOfRange,
    InvalidDate,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::MalformedBody => "malformed_body",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const DURATION: FieldName = FieldName::new("duration");
pub(crate) const DATE: FieldName = FieldName::new("date");
pub(crate) const FROM: FieldName = FieldName::new("from");
pub(crate) const TO: FieldName = FieldName::new("to");
pub(crate) const LIMIT: FieldName = FieldName::new("limit");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not be empty"))
        .with_code(ErrorCode::BlankField)
}

pub(crate) fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a whole number"))
        .with_value(ErrorCode::InvalidInteger, value)
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a date in yyyy-mm-dd format"))
        .with_value(ErrorCode::InvalidDate, value)
}

/// Error for request bodies or query strings the extractor could not decode.
pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("request could not be decoded: {reason}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}

pub(crate) fn parse_username(value: Option<String>) -> Result<Username, Error> {
    let raw = value.ok_or_else(|| missing_field_error(USERNAME))?;
    Username::new(raw).map_err(|err| match err {
        UserValidationError::UsernameTooLong { max } => ValidationError::new(
            USERNAME.as_str(),
            format!("username must be at most {max} characters"),
        )
        .with_code(ErrorCode::TooLong),
        _ => blank_field_error(USERNAME),
    })
}

pub(crate) fn parse_description(value: Option<String>) -> Result<Description, Error> {
    let raw = value.ok_or_else(|| missing_field_error(DESCRIPTION))?;
    Description::new(raw).map_err(|_| blank_field_error(DESCRIPTION))
}

/// Parse a duration in whole minutes within the stored range.
pub(crate) fn parse_duration(value: Option<String>) -> Result<Minutes, Error> {
    let raw = present(value).ok_or_else(|| missing_field_error(DURATION))?;
    let minutes: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid_integer_error(DURATION, &raw))?;
    u32::try_from(minutes)
        .map_err(|_| ExerciseValidationError::DurationTooLong {
            max: MAX_DURATION_MINUTES,
        })
        .and_then(Minutes::new)
        .map_err(|err| {
            ValidationError::new(DURATION.as_str(), err.to_string())
                .with_value(ErrorCode::OutOfRange, raw.as_str())
        })
}

/// Parse an optional `yyyy-mm-dd` date; an empty value counts as absent.
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<ExerciseDate>, Error> {
    present(value)
        .map(|raw| {
            raw.parse::<ExerciseDate>()
                .map_err(|_| invalid_date_error(field, &raw))
        })
        .transpose()
}

/// Parse an optional non-negative entry cap; values beyond `u32` saturate.
pub(crate) fn parse_optional_limit(value: Option<String>) -> Result<Option<u32>, Error> {
    present(value)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(|limit| u32::try_from(limit).unwrap_or(u32::MAX))
                .map_err(|_| invalid_integer_error(LIMIT, &raw))
        })
        .transpose()
}
