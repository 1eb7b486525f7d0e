use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Processing status of an uploaded document on the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Processed,
    Failed,
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Processed => write!(f, "processed"),
            DocumentStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub file_size: u64,
}

/// Document record as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: u64,
    pub filename: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    pub review_task_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl Document {
    /// Error text for failed documents, if the backend gave one.
    pub fn failure_reason(&self) -> Option<&str> {
        match self.status {
            DocumentStatus::Failed => self.error_msg.as_deref(),
            _ => None,
        }
    }
}
