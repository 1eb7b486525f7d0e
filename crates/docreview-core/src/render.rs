//! Result rendering
//!
//! Pure mapping from a [`ReviewResult`] to the scored, itemized structure a view shows.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::models::ReviewResult;

/// One score dimension row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionRow {
    pub key: &'static str,
    pub label: &'static str,
    pub score: f64,
}

/// One issue row, in response order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRow {
    pub category: String,
    pub range: String,
    pub message: String,
    pub suggestion: String,
}

/// Display structure of a review result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub total_score: f64,
    pub word_count: u64,
    pub dimensions: Vec<DimensionRow>,
    pub issues: Vec<IssueRow>,
}

impl From<&ReviewResult> for ResultView {
    fn from(result: &ReviewResult) -> Self {
        let detail = &result.detail_json;
        let dimensions = vec![
            DimensionRow {
                key: "grammar",
                label: "Grammar",
                score: detail.grammar,
            },
            DimensionRow {
                key: "logic",
                label: "Logic",
                score: detail.logic,
            },
            DimensionRow {
                key: "readability",
                label: "Readability",
                score: detail.readability,
            },
            DimensionRow {
                key: "innovation",
                label: "Innovation",
                score: detail.innovation.unwrap_or(0.0),
            },
            DimensionRow {
                key: "standardization",
                label: "Standardization",
                score: detail.standardization,
            },
        ];

        let issues = result
            .issues
            .iter()
            .map(|issue| IssueRow {
                category: issue.issue_type.clone(),
                range: format!("{}-{}", issue.loc_start, issue.loc_end),
                message: issue.message.clone(),
                suggestion: issue.suggestion.clone(),
            })
            .collect();

        ResultView {
            total_score: result.total_score,
            word_count: result.word_count,
            dimensions,
            issues,
        }
    }
}

impl Display for ResultView {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Total score: {}", format_score(self.total_score))?;
        writeln!(f, "Word count:  {}", self.word_count)?;

        writeln!(f, "\n--- Scores ---")?;
        for row in &self.dimensions {
            writeln!(f, "{:<16} {:>6}", row.label, format_score(row.score))?;
        }

        if !self.issues.is_empty() {
            writeln!(f, "\n--- Suggestions ---")?;
            for (i, issue) in self.issues.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                writeln!(f, "[{}] chars {}", issue.category, issue.range)?;
                writeln!(f, "  issue:      {}", issue.message)?;
                writeln!(f, "  suggestion: {}", issue.suggestion)?;
            }
        }

        Ok(())
    }
}

/// Human-readable size: "x.xxMB", "x.xxKB" or "nB".
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes >= MB {
        format!("{:.2}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Score with one decimal place.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Status line shown after a successful review.
pub fn summary_line(result: &ReviewResult) -> String {
    format!(
        "review completed, total score: {} ({} words)",
        result.total_score, result.word_count
    )
}
