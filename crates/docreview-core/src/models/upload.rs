use bytes::Bytes;
use std::path::Path;

use crate::config::AllowedType;
use crate::models::TemplateType;

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the template kind.
pub const TEMPLATE_FIELD: &str = "review_type";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file the user picked, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub content: Bytes,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Read a file from disk, declaring its type from the extension.
    pub fn from_path(path: &Path, allowed: &[AllowedType]) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let content_type = declared_content_type(&name, allowed);
        Ok(Self::new(name, content_type, content))
    }

    /// Replace the declared MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Resolve the MIME type a file declares from its name.
///
/// Allow-list extensions win so source files map to the types the backend expects;
/// anything else goes through `mime_guess`.
pub fn declared_content_type(filename: &str, allowed: &[AllowedType]) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()));

    if let Some(ext) = extension.as_deref() {
        if let Some(entry) = allowed.iter().find(|t| t.extension == ext) {
            return entry.content_type.clone();
        }
    }

    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

/// One upload attempt: the document plus the template it is reviewed against.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: CandidateFile,
    pub template: TemplateType,
}

impl UploadRequest {
    pub fn new(file: CandidateFile, template: TemplateType) -> Self {
        Self { file, template }
    }

    /// Text fields sent next to the file part.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![(TEMPLATE_FIELD, self.template.to_string())]
    }
}
