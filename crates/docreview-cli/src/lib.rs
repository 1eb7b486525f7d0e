use anyhow::Context;
use clap::ValueEnum;
use docreview_core::{
    format_file_size, CandidateFile, Config, ResultView, ReviewResult, ReviewStatus,
    SubmitReviewResponse,
};
use serde::Serialize;
use std::path::Path;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Read a document from disk, optionally overriding its declared MIME type.
pub fn load_candidate(
    path: &Path,
    content_type: Option<&str>,
    config: &Config,
) -> anyhow::Result<CandidateFile> {
    let file = CandidateFile::from_path(path, &config.allowed_types)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(match content_type {
        Some(content_type) => file.with_content_type(content_type.trim()),
        None => file,
    })
}

/// One-line description of a selected file: name, declared type and size.
pub fn describe_file(file: &CandidateFile) -> String {
    format!(
        "{} ({}, {})",
        file.name,
        file.content_type,
        format_file_size(file.size)
    )
}

pub fn progress_line(pct: f64) -> String {
    format!("uploading... {:>3.0}%", pct)
}

pub fn to_json(value: &impl Serialize) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Serialize output")
}

pub fn render_review(result: &ReviewResult, format: OutputFormat) -> anyhow::Result<String> {
    let view = ResultView::from(result);
    match format {
        OutputFormat::Text => Ok(view.to_string()),
        OutputFormat::Json => to_json(&view),
    }
}

pub fn render_receipt(
    receipt: &SubmitReviewResponse,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = format!(
                "task {} submitted (status: {})",
                receipt.task_id, receipt.status
            );
            if receipt.status == ReviewStatus::Pending {
                out.push_str(&format!(
                    "\nfetch it later with: docreview result {}",
                    receipt.task_id
                ));
            }
            Ok(out)
        }
        OutputFormat::Json => to_json(receipt),
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout carries only results.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
