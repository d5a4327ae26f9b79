//! The UI surface the upload controller drives.
//!
//! The controller never touches the DOM. It goes through [`UploadSurface`],
//! which [`UploadView`] implements on top of Leptos signals.

use leptos::*;

use crate::config::MAX_LOG_ENTRIES;
use crate::state::UiState;
use crate::types::{push_log, LogEntry, LogLevel};

/// Everything the controller may do to the page.
pub trait UploadSurface {
    /// Apply a transition to the UI state.
    ///
    /// `None` when the surface is gone (e.g. the view was unmounted).
    fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> Option<R>;

    /// Inspect the UI state without subscribing to it.
    fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> Option<R>;

    /// Blocking notification.
    fn alert(&self, message: &str);

    /// Append to the activity log.
    fn log(&self, level: LogLevel, message: &str);
}

/// Signals backing the upload page.
#[derive(Clone, Copy)]
pub struct UploadView {
    pub ui: RwSignal<UiState>,
    pub logs: RwSignal<Vec<LogEntry>>,
}

impl UploadView {
    pub fn new() -> Self {
        Self {
            ui: create_rw_signal(UiState::new()),
            logs: create_rw_signal(Vec::new()),
        }
    }
}

impl Default for UploadView {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSurface for UploadView {
    fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> Option<R> {
        self.ui.try_update(f)
    }

    fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> Option<R> {
        self.ui.try_with_untracked(f)
    }

    fn alert(&self, message: &str) {
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            log::warn!("alert() failed: {:?}", e);
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => log::error!("{}", message),
            LogLevel::Warning => log::warn!("{}", message),
            LogLevel::Info | LogLevel::Success => log::info!("{}", message),
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        };
        self.logs.update(|logs| push_log(logs, entry, MAX_LOG_ENTRIES));
    }
}
