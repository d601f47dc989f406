//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form failures become `400 invalid_request` errors whose details carry a
//! `fields` object mapping each offending field to its message, alongside
//! machine-readable `codes`.

use pagination::PageSizeError;
use serde_json::{Map, Value, json};

use crate::domain::{Error, LoginValidationError, ParseThemeError, UserValidationErrors};

fn field_error(field: &str, code: &str, message: String) -> Error {
    Error::invalid_request(message.clone()).with_details(json!({
        "fields": { field: message },
        "codes": { field: code },
    }))
}

/// Map every failed user form field into one error.
pub(crate) fn user_form_error(errors: &UserValidationErrors) -> Error {
    let mut fields = Map::new();
    let mut codes = Map::new();
    for error in errors.errors() {
        fields
            .entry(error.field())
            .or_insert_with(|| Value::String(error.to_string()));
        codes
            .entry(error.field())
            .or_insert_with(|| Value::String(error.code().to_owned()));
    }
    Error::invalid_request(errors.to_string()).with_details(json!({
        "fields": fields,
        "codes": codes,
    }))
}

pub(crate) fn login_form_error(error: &LoginValidationError) -> Error {
    match error {
        LoginValidationError::EmptyUsername => {
            field_error("username", "empty_username", error.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", error.to_string())
        }
    }
}

pub(crate) fn theme_error(error: &ParseThemeError) -> Error {
    field_error("theme", "invalid_theme", error.to_string())
}

pub(crate) fn page_size_error(error: &PageSizeError) -> Error {
    field_error("pageSize", "invalid_page_size", error.to_string())
}
