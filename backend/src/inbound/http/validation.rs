//! Shared validation helpers for inbound HTTP adapters.
//!
//! Maps domain validation failures onto `invalid_request` errors whose
//! `details` name the offending field and a stable code.

use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, SearchValidationError};

pub use crate::domain::INVALID_QUERY_MESSAGE;

/// Message for any unusable registration or login payload.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
/// Message for a search without an offence.
pub const MISSING_OFFENCE_MESSAGE: &str = "missing offence query";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyEmail,
    EmptyPassword,
    MissingOffence,
    DuplicateOffence,
    UnknownFilter,
    InvalidYear,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::EmptyPassword => "empty_password",
            Self::MissingOffence => "missing_offence",
            Self::DuplicateOffence => "duplicate_offence",
            Self::UnknownFilter => "unknown_filter",
            Self::InvalidYear => "invalid_year",
        }
    }
}

fn field_error(message: &str, field: &str, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn field_value_error(message: &str, field: &str, code: ValidationCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Map a credential validation failure to an HTTP error.
pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => {
            field_error(INVALID_CREDENTIALS_MESSAGE, "email", ValidationCode::EmptyEmail)
        }
        CredentialsValidationError::EmptyPassword => field_error(
            INVALID_CREDENTIALS_MESSAGE,
            "password",
            ValidationCode::EmptyPassword,
        ),
    }
}

/// Map a search parameter failure to an HTTP error.
pub(crate) fn map_search_error(err: SearchValidationError) -> Error {
    let field = err.field().to_owned();
    match err {
        SearchValidationError::MissingOffence => {
            field_error(MISSING_OFFENCE_MESSAGE, &field, ValidationCode::MissingOffence)
        }
        SearchValidationError::DuplicateOffence => {
            field_error(INVALID_QUERY_MESSAGE, &field, ValidationCode::DuplicateOffence)
        }
        SearchValidationError::UnknownFilter { .. } => {
            field_error(INVALID_QUERY_MESSAGE, &field, ValidationCode::UnknownFilter)
        }
        SearchValidationError::InvalidYear { value } => field_value_error(
            INVALID_QUERY_MESSAGE,
            &field,
            ValidationCode::InvalidYear,
            &value,
        ),
    }
}
