//! Docreview Core Library
//!
//! This crate provides the domain models, error types, configuration, validation,
//! result rendering and view state shared by the API client and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod render;
pub mod state;
pub mod validation;

// Re-export commonly used types
pub use config::{AllowedType, Config};
pub use error::ApiError;
pub use models::{
    CandidateFile, Envelope, ReviewIssue, ReviewResult, ReviewStatus, ScoreDetail,
    SubmitReviewRequest, SubmitReviewResponse, TemplateType, UploadRequest,
};
pub use progress::progress_percent;
pub use render::{format_file_size, format_score, summary_line, ResultView};
pub use state::{UploadEvent, UploadState};
pub use validation::{FileValidator, ValidationError};
