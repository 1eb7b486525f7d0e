//! Review session: drives an [`UploadState`] through one upload at a time.
//!
//! The session validates locally before anything touches the network, refuses to start a
//! second upload while one is in flight, and folds transport progress into the state as
//! it arrives.

use crate::api::{ProgressCallback, ReviewApi};
use docreview_core::{
    ApiError, CandidateFile, FileValidator, ReviewResult, TemplateType, UploadEvent, UploadState,
};
use std::sync::Arc;
use tokio::sync::mpsc;

const NO_FILE_SELECTED: &str = "please select a file first";

pub struct ReviewSession<A> {
    api: A,
    state: UploadState,
}

impl<A: ReviewApi> ReviewSession<A> {
    pub fn new(api: A, validator: FileValidator) -> Self {
        Self {
            api,
            state: UploadState::new(validator),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Select a file. An invalid file is rejected here and never reaches the network.
    pub fn select(&mut self, file: CandidateFile) -> Result<(), ApiError> {
        self.state.advance(UploadEvent::FileSelected(file));
        match self.state.file_error() {
            Some(message) => Err(ApiError::new(message)),
            None => Ok(()),
        }
    }

    pub fn clear(&mut self) {
        self.state.advance(UploadEvent::Cleared);
    }

    /// Upload the selected file and wait for its review.
    ///
    /// `on_progress` observes the state's progress after each transport report. Once the
    /// call returns, the state carries the outcome and is ready for the next upload.
    pub async fn upload(
        &mut self,
        template: TemplateType,
        mut on_progress: impl FnMut(f64),
    ) -> Result<ReviewResult, ApiError> {
        if !self.state.can_upload() {
            let message = self.state.file_error().unwrap_or(NO_FILE_SELECTED);
            return Err(ApiError::new(message));
        }
        let file = match self.state.selected_file() {
            Some(file) => file.clone(),
            None => return Err(ApiError::new(NO_FILE_SELECTED)),
        };

        self.state.advance(UploadEvent::UploadStarted);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let forward: ProgressCallback = Arc::new(move |pct| {
            let _ = tx.send(pct);
        });

        let api = &self.api;
        let state = &mut self.state;
        let request = api.review_document(&file, template, forward);
        tokio::pin!(request);

        let outcome = loop {
            tokio::select! {
                Some(pct) = rx.recv() => {
                    state.advance(UploadEvent::Progress(pct));
                    on_progress(state.progress());
                }
                outcome = &mut request => break outcome,
            }
        };
        while let Ok(pct) = rx.try_recv() {
            state.advance(UploadEvent::Progress(pct));
            on_progress(state.progress());
        }

        match &outcome {
            Ok(result) => state.advance(UploadEvent::UploadSucceeded(result.clone())),
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "Review upload failed");
                state.advance(UploadEvent::UploadFailed(err.message().to_string()));
            }
        }
        state.advance(UploadEvent::UploadFinished);

        outcome
    }
}
