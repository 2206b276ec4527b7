//! Parsing of raw path segments and form fields.
//!
//! Form values arrive as optional strings. Everything here turns them into
//! domain values or a domain [`Error`] with `{field, code}` details, matching
//! the payload produced by domain validation.

use serde_json::json;

use crate::domain::{Error, LoginValidationError, PostId};

/// Validation error codes raised by the HTTP adapter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCode {
    EmptyUsername,
    EmptyPassword,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
        }
    }
}

fn field_error(field: &str, message: &str, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Map rejected login form values to a 400 payload.
pub(crate) fn login_validation_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            field_error("username", &err.to_string(), ErrorCode::EmptyUsername)
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", &err.to_string(), ErrorCode::EmptyPassword)
        }
    }
}

/// Parse a post id path segment; anything but an integer is an unknown page.
pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("post {raw} not found")))
}
