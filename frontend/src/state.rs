//! UI state of the upload page.
//!
//! [`UiState`] is the single source of truth for what the page shows:
//! the progress region, the result panel and the error banner. It only
//! changes through the named transitions below.
//!
//! ```text
//! Idle ──begin_upload──▶ Uploading ──complete──▶ Succeeded
//!   ▲                        │                      │
//!   │                        └──fail──▶ Failed      │
//!   └────────dismiss_result / dismiss_error─────────┘
//! ```

use crate::types::{AppError, DownloadLink, TransferProgress};

/// Phase of the current upload cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    phase: UploadPhase,
    progress: TransferProgress,
    result: Option<DownloadLink>,
    error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == UploadPhase::Uploading
    }

    pub fn progress_visible(&self) -> bool {
        self.is_uploading()
    }

    pub fn result_visible(&self) -> bool {
        self.result.is_some()
    }

    pub fn progress(&self) -> TransferProgress {
        self.progress
    }

    pub fn result(&self) -> Option<&DownloadLink> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show progress at zero, hide the previous result and error.
    ///
    /// Returns the superseded download link so its object URL can be revoked.
    pub fn begin_upload(&mut self) -> Option<DownloadLink> {
        self.phase = UploadPhase::Uploading;
        self.progress = TransferProgress::default();
        self.error = None;
        self.result.take()
    }

    /// Ignored outside of an upload.
    pub fn record_progress(&mut self, progress: TransferProgress) {
        if self.is_uploading() {
            self.progress = progress;
        }
    }

    /// Mark the progress complete and reveal the result panel.
    ///
    /// Returns any link the new one displaces.
    pub fn complete(&mut self, link: DownloadLink) -> Option<DownloadLink> {
        self.phase = UploadPhase::Succeeded;
        self.progress = TransferProgress::complete();
        self.error = None;
        self.result.replace(link)
    }

    /// Leave the upload with a visible error.
    pub fn fail(&mut self, error: &AppError) {
        self.phase = UploadPhase::Failed;
        self.progress = TransferProgress::default();
        self.error = Some(error.user_message());
    }

    /// Hide the result panel, handing back its link for release.
    pub fn dismiss_result(&mut self) -> Option<DownloadLink> {
        if self.phase == UploadPhase::Succeeded {
            self.phase = UploadPhase::Idle;
        }
        self.result.take()
    }

    pub fn dismiss_error(&mut self) {
        if self.phase == UploadPhase::Failed {
            self.phase = UploadPhase::Idle;
        }
        self.error = None;
    }
}
