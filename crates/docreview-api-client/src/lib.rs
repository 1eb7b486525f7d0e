//! HTTP client for the document review API.
//!
//! Provides a thin client with a fixed base address and timeout, generic GET/POST helpers
//! that return the full response envelope, the review operations in [`api`], and the
//! upload driver in [`session`].
//! Every failure is normalized into a display-only [`ApiError`].

pub mod api;
mod progress;
pub mod session;

use anyhow::{Context, Result};
use docreview_core::error::{failure_message, INVALID_RESPONSE};
use docreview_core::{ApiError, Config, Envelope};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Successful response: transport metadata plus the envelope, not yet unwrapped.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Envelope<T>,
}

/// HTTP client for the review API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.timeout())
    }

    /// Create client from environment: DOCREVIEW_API_URL (or API_BASE_URL), DOCREVIEW_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env().context("Failed to load client configuration")?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Returns the full response with the decoded envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        let url = self.build_url(path);
        self.execute(self.client.get(&url), path).await
    }

    /// POST JSON body. Returns the full response with the decoded envelope.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.build_url(path);
        self.execute(self.client.post(&url).json(body), path).await
    }

    /// POST multipart form. The form's own content type replaces the JSON default.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.build_url(path);
        self.execute(self.client.post(&url).multipart(form), path)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_failure(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = failure_message(status.as_u16(), &body);
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                error = %message,
                "API request failed"
            );
            return Err(ApiError::new(message));
        }

        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_failure(path, e))?;

        let body: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                error = %e,
                "Response body is not a valid envelope"
            );
            ApiError::new(INVALID_RESPONSE)
        })?;

        tracing::debug!(
            path = %path,
            status = status.as_u16(),
            success = body.success,
            "API request completed"
        );

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// No response was received: connect failure, timeout, or broken stream.
fn transport_failure(path: &str, err: reqwest::Error) -> ApiError {
    tracing::warn!(
        path = %path,
        timeout = err.is_timeout(),
        error = %err,
        "API request did not receive a response"
    );
    ApiError::network()
}

pub use api::{ProgressCallback, ReviewApi};
pub use session::ReviewSession;
pub use docreview_core::{ReviewResult, SubmitReviewResponse, TemplateType};
