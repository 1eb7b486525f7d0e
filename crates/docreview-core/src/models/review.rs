use serde::{Deserialize, Serialize};

/// Fields a fetched review result must carry before it is decoded.
pub const REQUIRED_REVIEW_FIELDS: &[&str] = &["total_score", "detail_json", "issues", "word_count"];

/// Per-dimension scores (0-100). `innovation` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub grammar: f64,
    pub logic: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innovation: Option<f64>,
    pub readability: f64,
    pub standardization: f64,
}

/// One flagged span of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub loc_start: u64,
    pub loc_end: u64,
    pub issue_type: String,
    pub message: String,
    pub suggestion: String,
}

/// Finished review of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub total_score: f64,
    pub detail_json: ScoreDetail,
    pub issues: Vec<ReviewIssue>,
    pub word_count: u64,
}

/// Names of required review fields absent from a raw result, in declaration order.
pub fn missing_review_fields(value: &serde_json::Value) -> Vec<&'static str> {
    REQUIRED_REVIEW_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(field).is_none())
        .collect()
}
