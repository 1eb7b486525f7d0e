//! Review operations for the API client.
//!
//! Two protocols are exposed as separate operations on [`ReviewApi`]: a single-step upload
//! that returns the finished review, and a submit / fetch-result pair keyed by task id.

use crate::progress::progress_body;
use crate::ApiClient;
use async_trait::async_trait;
use docreview_core::models::{missing_review_fields, FILE_FIELD};
use docreview_core::{
    ApiError, CandidateFile, ReviewResult, SubmitReviewRequest, SubmitReviewResponse,
    TemplateType, UploadRequest,
};
use std::sync::Arc;

pub const REVIEW_PATH: &str = "/api/v1/review";
pub const SUBMIT_PATH: &str = "/review/submit";

/// Observer for upload progress, called with a percentage in [0, 100].
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

pub fn result_path(task_id: &str) -> String {
    format!("/review/{}/result", task_id)
}

/// Operations a review view can invoke.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Upload a document and wait for its review (single-step protocol).
    async fn review_document(
        &self,
        file: &CandidateFile,
        template: TemplateType,
        on_progress: ProgressCallback,
    ) -> Result<ReviewResult, ApiError>;

    /// Queue a review for an already stored document (two-step protocol, step 1).
    async fn submit_review(
        &self,
        document_id: &str,
        template: TemplateType,
    ) -> Result<SubmitReviewResponse, ApiError>;

    /// Fetch the result of a submitted review (two-step protocol, step 2).
    async fn get_review_result(&self, task_id: &str) -> Result<ReviewResult, ApiError>;
}

/// Build the multipart payload for an upload: the document under `file`, the template
/// under `review_type`.
pub fn build_upload_form(
    request: &UploadRequest,
    on_progress: ProgressCallback,
) -> Result<reqwest::multipart::Form, ApiError> {
    let file = &request.file;
    let part = reqwest::multipart::Part::stream_with_length(
        progress_body(file.content.clone(), on_progress),
        file.size,
    )
    .file_name(file.name.clone())
    .mime_str(&file.content_type)
    .map_err(|_| ApiError::new(format!("invalid content type: {}", file.content_type)))?;

    let mut form = reqwest::multipart::Form::new().part(FILE_FIELD, part);
    for (name, value) in request.text_fields() {
        form = form.text(name, value);
    }
    Ok(form)
}

#[async_trait]
impl ReviewApi for ApiClient {
    async fn review_document(
        &self,
        file: &CandidateFile,
        template: TemplateType,
        on_progress: ProgressCallback,
    ) -> Result<ReviewResult, ApiError> {
        let request = UploadRequest::new(file.clone(), template);
        let form = build_upload_form(&request, on_progress)?;

        tracing::info!(
            file = %file.name,
            size = file.size,
            template = %template,
            "Uploading document for review"
        );

        let response = self
            .post_multipart::<ReviewResult>(REVIEW_PATH, form)
            .await?;

        let result = response.body.into_data(
            "review failed: server returned an invalid status",
            "review failed: server returned no review result",
        )?;

        tracing::info!(
            total_score = result.total_score,
            word_count = result.word_count,
            issues = result.issues.len(),
            "Review completed"
        );

        Ok(result)
    }

    async fn submit_review(
        &self,
        document_id: &str,
        template: TemplateType,
    ) -> Result<SubmitReviewResponse, ApiError> {
        let body = SubmitReviewRequest {
            document_id: document_id.to_string(),
            template_type: template,
        };

        let response = self
            .post_json::<SubmitReviewResponse, _>(SUBMIT_PATH, &body)
            .await?;

        let receipt = response.body.into_data(
            "submit review failed: unexpected response format",
            "submit review failed: unexpected response format",
        )?;

        tracing::info!(
            document_id = %document_id,
            task_id = %receipt.task_id,
            status = %receipt.status,
            "Review task submitted"
        );

        Ok(receipt)
    }

    async fn get_review_result(&self, task_id: &str) -> Result<ReviewResult, ApiError> {
        let response = self
            .get::<serde_json::Value>(&result_path(task_id))
            .await?;

        let raw = response.body.into_data(
            "fetch review result failed: unexpected response format",
            "fetch review result failed: unexpected response format",
        )?;

        let missing = missing_review_fields(&raw);
        if !missing.is_empty() {
            tracing::warn!(task_id = %task_id, missing = ?missing, "Review result is incomplete");
            return Err(ApiError::new(format!(
                "invalid review result: missing fields {}",
                missing.join(", ")
            )));
        }

        serde_json::from_value(raw).map_err(|e| {
            tracing::warn!(task_id = %task_id, error = %e, "Review result has unexpected shape");
            ApiError::new(format!("invalid review result: {}", e))
        })
    }
}
