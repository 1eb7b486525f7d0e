//! Client-side file validation
//!
//! Two independent checks run before any request is made: the declared MIME type must be
//! in the allow-list and the size must not exceed the configured ceiling.

use crate::config::{default_allowed_types, AllowedType, Config};
use crate::models::CandidateFile;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reasons a candidate file is rejected before upload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported file format, please upload {allowed} files")]
    UnsupportedType { content_type: String, allowed: String },

    #[error("file size exceeds limit (max {max_mb}MB), current: {size_mb:.2}MB")]
    FileTooLarge { max_mb: u64, size_mb: f64 },
}

/// Document validator
///
/// Holds the allow-list and size ceiling; both checks are pure and repeatable.
#[derive(Debug, Clone, PartialEq)]
pub struct FileValidator {
    max_file_size: u64,
    allowed_types: Vec<AllowedType>,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(10 * 1024 * 1024, default_allowed_types())
    }
}

impl FileValidator {
    pub fn new(max_file_size: u64, allowed_types: Vec<AllowedType>) -> Self {
        Self {
            max_file_size,
            allowed_types,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_file_size_bytes, config.allowed_types.clone())
    }

    /// Accepted extensions joined for display, e.g. ".docx, .pdf, .txt".
    pub fn allowed_labels(&self) -> String {
        self.allowed_types
            .iter()
            .map(AllowedType::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Validate the declared MIME type against the allow-list.
    pub fn validate_type(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        let normalized = normalize_mime_type(&file.content_type).to_lowercase();

        if !self
            .allowed_types
            .iter()
            .any(|t| t.content_type == normalized)
        {
            tracing::debug!(
                file = %file.name,
                content_type = %file.content_type,
                "Rejected file with unsupported content type"
            );
            return Err(ValidationError::UnsupportedType {
                content_type: file.content_type.clone(),
                allowed: self.allowed_labels(),
            });
        }

        Ok(())
    }

    /// Validate the byte size against the ceiling.
    pub fn validate_size(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        if file.size > self.max_file_size {
            tracing::debug!(
                file = %file.name,
                size = file.size,
                max = self.max_file_size,
                "Rejected file over size limit"
            );
            return Err(ValidationError::FileTooLarge {
                max_mb: self.max_file_size / 1024 / 1024,
                size_mb: file.size as f64 / BYTES_PER_MB,
            });
        }

        Ok(())
    }

    /// Run the type check, then the size check; report the first failure.
    pub fn validate(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        self.validate_type(file)?;
        self.validate_size(file)?;
        Ok(())
    }
}

/// Strip MIME parameters (e.g. "text/plain; charset=utf-8" -> "text/plain").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}
