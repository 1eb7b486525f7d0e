use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Review template selecting how a document is assessed.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Academic,
    Business,
    Code,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Academic => "academic",
            TemplateType::Business => "business",
            TemplateType::Code => "code",
        }
    }
}

impl Display for TemplateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "academic" => Ok(TemplateType::Academic),
            "business" => Ok(TemplateType::Business),
            "code" => Ok(TemplateType::Code),
            _ => Err(anyhow::anyhow!(
                "Invalid template type: {} (expected academic, business or code)",
                s
            )),
        }
    }
}

/// Status of a submitted review task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Completed,
    Failed,
}

impl ReviewStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStatus::Completed | ReviewStatus::Failed)
    }
}

impl Display for ReviewStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Completed => write!(f, "completed"),
            ReviewStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "completed" => Ok(ReviewStatus::Completed),
            "failed" => Ok(ReviewStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid review status: {}", s)),
        }
    }
}

/// Body of `POST /review/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitReviewRequest {
    pub document_id: String,
    pub template_type: TemplateType,
}

/// Receipt returned by `POST /review/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitReviewResponse {
    pub task_id: String,
    pub status: ReviewStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_type_round_trip_str() {
        for template in [
            TemplateType::Academic,
            TemplateType::Business,
            TemplateType::Code,
        ] {
            assert_eq!(template.to_string().parse::<TemplateType>().unwrap(), template);
        }
        assert_eq!("  Business ".parse::<TemplateType>().unwrap(), TemplateType::Business);
        assert!("legal".parse::<TemplateType>().is_err());
        assert_eq!(TemplateType::default(), TemplateType::Academic);
    }

    #[test]
    fn test_submit_request_serialization() {
        let body = SubmitReviewRequest {
            document_id: "42".to_string(),
            template_type: TemplateType::Code,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"document_id": "42", "template_type": "code"})
        );
    }

    #[test]
    fn test_submit_response_status() {
        let receipt: SubmitReviewResponse =
            serde_json::from_str(r#"{"task_id": "t-1", "status": "pending"}"#).unwrap();
        assert_eq!(receipt.status, ReviewStatus::Pending);
        assert!(!receipt.status.is_terminal());
        assert!(ReviewStatus::Failed.is_terminal());
        assert_eq!("completed".parse::<ReviewStatus>().unwrap(), ReviewStatus::Completed);
    }
}
