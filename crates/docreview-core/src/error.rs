//! Error types module
//!
//! Every failure that reaches a view is an [`ApiError`]: a display string and nothing else.
//! Validation, transport, server-declared and protocol errors are all folded into it
//! before they leave the client.

use crate::validation::ValidationError;

/// Shown when a request fails and neither the body nor the status gives a better message.
pub const REQUEST_FAILED: &str = "request failed, please retry";

/// Shown when no response was received at all (connect failure, timeout, reset).
pub const NETWORK_ERROR: &str = "network error, please check your connection";

/// Shown when a successful response body is not a well-formed envelope.
pub const INVALID_RESPONSE: &str = "invalid response from server";

/// Single user-facing error type. Carries only the message to display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn network() -> Self {
        Self::new(NETWORK_ERROR)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(err.to_string())
    }
}

/// Fixed message for HTTP statuses that have one.
pub fn status_message(status: u16) -> Option<&'static str> {
    match status {
        413 => Some("file too large (max 10MB)"),
        415 => Some("unsupported file format"),
        404 => Some("resource not found"),
        503 => Some("service temporarily unavailable"),
        _ => None,
    }
}

/// Pull a server-supplied error text out of a failed response body.
///
/// `error` wins over `message`. Empty strings, non-string values and bodies that are not
/// JSON objects yield `None`.
pub fn server_error_text(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Normalize a non-success HTTP response into the message shown to the user.
pub fn failure_message(status: u16, body: &[u8]) -> String {
    server_error_text(body)
        .or_else(|| status_message(status).map(str::to_string))
        .unwrap_or_else(|| REQUEST_FAILED.to_string())
}
