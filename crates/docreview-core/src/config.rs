//! Configuration module
//!
//! Client configuration read from the environment (and `.env`): backend address,
//! request timeout, upload ceiling and the accepted document types.

use std::env;
use std::time::Duration;

const API_BASE_URL: &str = "http://localhost:5000";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_FILE_SIZE_MB: u64 = 10;
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Accepted MIME types and the extension shown to users for each, in display order.
pub const DEFAULT_ALLOWED_TYPES: &[(&str, &str)] = &[
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("application/pdf", ".pdf"),
    ("text/plain", ".txt"),
    ("text/x-python", ".py"),
    ("text/x-java", ".java"),
    ("text/x-c++src", ".cpp"),
];

/// One entry of the upload allow-list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedType {
    pub content_type: String,
    pub extension: String,
}

impl AllowedType {
    pub fn new(content_type: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            extension: extension.into(),
        }
    }

    /// Build an entry for a MIME type, borrowing the extension from the default table.
    /// Types without a known extension display as the MIME type itself.
    pub fn for_content_type(content_type: &str) -> Self {
        let content_type = content_type.trim().to_lowercase();
        let extension = DEFAULT_ALLOWED_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_else(|| content_type.clone());
        Self::new(content_type, extension)
    }

    /// Label used in rejection messages.
    pub fn label(&self) -> &str {
        &self.extension
    }
}

pub fn default_allowed_types() -> Vec<AllowedType> {
    DEFAULT_ALLOWED_TYPES
        .iter()
        .map(|(ct, ext)| AllowedType::new(*ct, *ext))
        .collect()
}

/// Client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub max_file_size_bytes: u64,
    pub allowed_types: Vec<AllowedType>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            max_file_size_bytes: MAX_FILE_SIZE_MB * BYTES_PER_MB,
            allowed_types: default_allowed_types(),
        }
    }
}

impl Config {
    /// Load from DOCREVIEW_API_URL (or API_BASE_URL), DOCREVIEW_TIMEOUT_SECS,
    /// DOCREVIEW_MAX_FILE_SIZE_MB and DOCREVIEW_ALLOWED_CONTENT_TYPES.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("DOCREVIEW_API_URL")
            .or_else(|_| env::var("API_BASE_URL"))
            .unwrap_or_else(|_| API_BASE_URL.to_string());

        let timeout_secs = env::var("DOCREVIEW_TIMEOUT_SECS")
            .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        let max_file_size_mb = env::var("DOCREVIEW_MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_types = match env::var("DOCREVIEW_ALLOWED_CONTENT_TYPES") {
            Ok(list) => parse_allowed_types(&list),
            Err(_) => default_allowed_types(),
        };

        let config = Config {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            timeout_secs,
            max_file_size_bytes: mb_to_bytes(max_file_size_mb)?,
            allowed_types,
        };
        config.validate()?;

        tracing::debug!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.timeout_secs,
            max_file_size_bytes = config.max_file_size_bytes,
            allowed_types = config.allowed_types.len(),
            "Loaded client configuration"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "API base URL must start with http:// or https:// (got '{}')",
                self.api_base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Request timeout must be greater than zero"));
        }
        if self.max_file_size_bytes < BYTES_PER_MB {
            return Err(anyhow::anyhow!(
                "Maximum file size must be at least 1MB (got {} bytes)",
                self.max_file_size_bytes
            ));
        }
        if self.allowed_types.is_empty() {
            return Err(anyhow::anyhow!(
                "At least one allowed content type must be configured"
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn mb_to_bytes(mb: u64) -> Result<u64, anyhow::Error> {
    mb.checked_mul(BYTES_PER_MB)
        .ok_or_else(|| anyhow::anyhow!("Maximum file size of {}MB is too large", mb))
}

/// Parse a comma-separated MIME list, skipping blanks and duplicates.
fn parse_allowed_types(list: &str) -> Vec<AllowedType> {
    let mut types: Vec<AllowedType> = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let allowed = AllowedType::for_content_type(entry);
        if !types.iter().any(|t| t.content_type == allowed.content_type) {
            types.push(allowed);
        }
    }
    types
}
