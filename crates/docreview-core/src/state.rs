//! Upload view state
//!
//! Everything a review view tracks between user actions, advanced only through
//! [`UploadState::apply`]. Transitions are pure so a view can be driven and tested
//! without any rendering environment.

use crate::models::{CandidateFile, ReviewResult};
use crate::render::summary_line;
use crate::validation::FileValidator;

/// Inputs that move the view forward.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// The user picked a file.
    FileSelected(CandidateFile),
    /// The user cleared the selection.
    Cleared,
    /// The user pressed upload.
    UploadStarted,
    /// Transport reported progress (percentage).
    Progress(f64),
    UploadSucceeded(ReviewResult),
    UploadFailed(String),
    /// Runs after success or failure: resets progress and releases the in-flight guard.
    UploadFinished,
}

#[derive(Debug, Clone)]
pub struct UploadState {
    validator: FileValidator,
    selected_file: Option<CandidateFile>,
    file_error: Option<String>,
    progress: f64,
    in_flight: bool,
    status: Option<String>,
    last_error: Option<String>,
    last_result: Option<ReviewResult>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self::new(FileValidator::default())
    }
}

impl UploadState {
    pub fn new(validator: FileValidator) -> Self {
        Self {
            validator,
            selected_file: None,
            file_error: None,
            progress: 0.0,
            in_flight: false,
            status: None,
            last_error: None,
            last_result: None,
        }
    }

    /// In-place form of [`UploadState::apply`] for views that hold the state by `&mut`.
    pub fn advance(&mut self, event: UploadEvent) {
        let current = std::mem::take(self);
        *self = current.apply(event);
    }

    pub fn apply(self, event: UploadEvent) -> Self {
        match event {
            UploadEvent::FileSelected(file) => self.select(file),
            UploadEvent::Cleared => {
                if self.in_flight {
                    return self;
                }
                Self {
                    selected_file: None,
                    file_error: None,
                    ..self
                }
            }
            UploadEvent::UploadStarted => {
                if !self.can_upload() {
                    return self;
                }
                Self {
                    in_flight: true,
                    progress: 0.0,
                    status: None,
                    last_error: None,
                    last_result: None,
                    ..self
                }
            }
            UploadEvent::Progress(pct) => {
                if !self.in_flight {
                    return self;
                }
                Self {
                    progress: pct.clamp(0.0, 100.0),
                    ..self
                }
            }
            UploadEvent::UploadSucceeded(result) => {
                if !self.in_flight {
                    return self;
                }
                Self {
                    status: Some(summary_line(&result)),
                    last_error: None,
                    last_result: Some(result),
                    ..self
                }
            }
            UploadEvent::UploadFailed(message) => {
                if !self.in_flight {
                    return self;
                }
                Self {
                    status: Some(message.clone()),
                    last_error: Some(message),
                    last_result: None,
                    ..self
                }
            }
            UploadEvent::UploadFinished => Self {
                progress: 0.0,
                in_flight: false,
                ..self
            },
        }
    }

    fn select(self, file: CandidateFile) -> Self {
        if self.in_flight {
            return self;
        }
        match self.validator.validate(&file) {
            Ok(()) => Self {
                selected_file: Some(file),
                file_error: None,
                ..self
            },
            Err(err) => Self {
                selected_file: None,
                file_error: Some(err.to_string()),
                ..self
            },
        }
    }

    /// Whether the upload control is enabled.
    pub fn can_upload(&self) -> bool {
        self.selected_file.is_some() && self.file_error.is_none() && !self.in_flight
    }

    pub fn selected_file(&self) -> Option<&CandidateFile> {
        self.selected_file.as_ref()
    }

    pub fn file_error(&self) -> Option<&str> {
        self.file_error.as_deref()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Status line: the success summary or the last error message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_result(&self) -> Option<&ReviewResult> {
        self.last_result.as_ref()
    }
}
