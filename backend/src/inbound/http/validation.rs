//! Shared validation helpers for inbound HTTP adapters.

use actix_web::web;
use pagination::{MAX_LIMIT, PageRequest, PaginationError};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    NotAnInteger,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing",
            ErrorCode::NotAnInteger => "not_an_integer",
            ErrorCode::OutOfRange => "out_of_range",
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

const PAGE: FieldName = FieldName::new("page");
const LIMIT: FieldName = FieldName::new("limit");

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
    ValidationError::new(field, format!("{field} is required")).with_code(ErrorCode::MissingField)
}

/// JSON extractor configuration reporting malformed bodies as domain
/// validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request("request body must be valid JSON matching the schema")
            .with_details(json!({ "code": "malformed_body" }))
            .into()
    })
}

fn parse_integer(raw: &str, field: FieldName) -> Result<u64, Error> {
    let name = field.as_str();
    raw.trim().parse().map_err(|_| {
        ValidationError::new(name, format!("{name} must be a positive integer"))
            .with_value(ErrorCode::NotAnInteger, raw)
    })
}

/// Build a [`PageRequest`] from optional raw query values.
///
/// Absent values take the defaults; present values must be integers within
/// range.
pub(crate) fn parse_page_request(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<PageRequest, Error> {
    let defaults = PageRequest::default();
    let page_value = page
        .map(|raw| parse_integer(raw, PAGE))
        .transpose()?
        .unwrap_or(defaults.page());
    let limit_value = limit
        .map(|raw| parse_integer(raw, LIMIT))
        .transpose()?
        .unwrap_or(defaults.limit());

    PageRequest::new(page_value, limit_value)
        .map_err(|err| pagination_error(err, page_value, limit_value))
}

/// Attach field and value details to a pagination rule violation.
fn pagination_error(error: PaginationError, page: u64, limit: u64) -> Error {
    let (field, value, message) = match error {
        PaginationError::PageTooSmall => (PAGE, page, error.to_string()),
        PaginationError::LimitTooSmall | PaginationError::LimitTooLarge { .. } => (
            LIMIT,
            limit,
            format!("limit must be between 1 and {MAX_LIMIT}"),
        ),
    };
    ValidationError::new(field.as_str(), message)
        .with_value(ErrorCode::OutOfRange, value.to_string())
}
