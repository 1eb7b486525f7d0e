use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// `{ success, data, error }` wrapper returned by every backend endpoint.
///
/// `success = false` or a missing `data` is a failure regardless of the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn server_error(&self) -> Option<String> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Unwrap `data`, preferring the server's error text over the fallbacks.
    ///
    /// `on_failed` is used when `success` is false, `on_missing` when `data` is absent.
    pub fn into_data(self, on_failed: &str, on_missing: &str) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::new(
                self.server_error().unwrap_or_else(|| on_failed.to_string()),
            ));
        }
        let server_error = self.server_error();
        self.data
            .ok_or_else(|| ApiError::new(server_error.unwrap_or_else(|| on_missing.to_string())))
    }
}
