//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Selection Types** - Files picked by the user
//! - **Request Types** - Multipart body and processing options
//! - **Response Types** - Backend response, download link, progress
//! - **Log Types** - In-page activity log
//! - **Error Types** - Frontend error handling

use std::fmt;

use crate::config::{DEFAULT_KEEP_FORMATS, DEFAULT_N_WORDS, FILES_FIELD, N_WORDS_RANGE};

// =============================================================================
// Selection Types
// =============================================================================

/// A file handle the user picked.
///
/// Implemented for `web_sys::File` in the browser and for in-memory
/// fixtures in tests.
pub trait SelectedFile {
    /// File name as shown by the picker.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
}

impl SelectedFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }
}

/// Ordered sequence of user-chosen files.
///
/// Only read by the upload cycle, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSelection<F> {
    files: Vec<F>,
}

impl<F> Default for FileSelection<F> {
    fn default() -> Self {
        Self { files: Vec::new() }
    }
}

impl<F> From<Vec<F>> for FileSelection<F> {
    fn from(files: Vec<F>) -> Self {
        Self { files }
    }
}

impl<F: SelectedFile> FileSelection<F> {
    pub fn files(&self) -> &[F] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of the selection in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(SelectedFile::size).sum()
    }

    /// Check the selection before any network effect.
    ///
    /// Only an empty selection is refused; size is left to the backend.
    pub fn validate(&self) -> AppResult<()> {
        if self.files.is_empty() {
            return Err(AppError::Validation("Select at least one file".to_string()));
        }
        Ok(())
    }
}

impl FileSelection<web_sys::File> {
    /// Snapshot the files currently held by a picker input.
    pub fn from_file_list(list: &web_sys::FileList) -> Self {
        let files = (0..list.length()).filter_map(|i| list.get(i)).collect();
        Self { files }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Processing options forwarded to the backend as form fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessOptions {
    /// How many transcribed words name a generic recording (1..=5).
    pub n_words: u8,
    /// Keep the `001-VA-1_` numbering prefix on grouped files.
    pub keep_prefix: bool,
    /// Extensions the backend keeps, with leading dot, lowercase.
    pub keep_formats: Vec<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            n_words: DEFAULT_N_WORDS,
            keep_prefix: true,
            keep_formats: default_formats(),
        }
    }
}

impl ProcessOptions {
    /// Set `n_words`, clamped to the accepted range.
    pub fn with_n_words(mut self, n_words: i64) -> Self {
        let (min, max) = (*N_WORDS_RANGE.start() as i64, *N_WORDS_RANGE.end() as i64);
        self.n_words = n_words.clamp(min, max) as u8;
        self
    }

    pub fn with_keep_prefix(mut self, keep_prefix: bool) -> Self {
        self.keep_prefix = keep_prefix;
        self
    }

    /// Set the kept formats from a comma separated list such as `"WAV, .mp3"`.
    pub fn with_keep_formats(mut self, csv: &str) -> Self {
        self.keep_formats = normalize_formats(csv);
        self
    }

    /// Form fields sent next to the file parts.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("n_words", self.n_words.to_string()),
            ("keep_prefix", if self.keep_prefix { "yes" } else { "no" }.to_string()),
            ("keep_formats", self.keep_formats.join(",")),
        ]
    }
}

fn default_formats() -> Vec<String> {
    DEFAULT_KEEP_FORMATS.iter().map(|f| f.to_string()).collect()
}

/// Normalize a comma separated extension list.
///
/// Entries are trimmed, lowercased and given a leading dot. Empty entries
/// are dropped; an empty result falls back to the default formats.
pub fn normalize_formats(csv: &str) -> Vec<String> {
    let formats: Vec<String> = csv
        .split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            let ext = ext.to_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .collect();

    if formats.is_empty() {
        default_formats()
    } else {
        formats
    }
}

/// One file part of the multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct FormPart<F> {
    pub field: &'static str,
    pub file: F,
}

/// One entry of the multipart body, in wire order.
#[derive(Clone, Debug, PartialEq)]
pub enum FormEntry<'a, F> {
    File {
        name: &'static str,
        file: &'a F,
        filename: String,
    },
    Text {
        name: &'static str,
        value: &'a str,
    },
}

/// Multipart body for one submission.
///
/// Built fresh per submit and dropped once the request completes.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadRequest<F> {
    parts: Vec<FormPart<F>>,
    fields: Vec<(&'static str, String)>,
}

impl<F: SelectedFile + Clone> UploadRequest<F> {
    /// Append every selected file under the shared `files` field, in order.
    pub fn build(selection: &FileSelection<F>, options: &ProcessOptions) -> Self {
        let parts = selection
            .files()
            .iter()
            .map(|file| FormPart {
                field: FILES_FIELD,
                file: file.clone(),
            })
            .collect();

        Self {
            parts,
            fields: options.form_fields(),
        }
    }

    pub fn parts(&self) -> &[FormPart<F>] {
        &self.parts
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Entries as appended to the form: file parts first, then option fields.
    pub fn entries(&self) -> Vec<FormEntry<'_, F>> {
        let files = self.parts.iter().map(|part| FormEntry::File {
            name: part.field,
            file: &part.file,
            filename: part.file.name(),
        });
        let fields = self
            .fields
            .iter()
            .map(|(name, value)| FormEntry::Text {
                name: *name,
                value: value.as_str(),
            });
        files.chain(fields).collect()
    }

    /// Total bytes of the file parts.
    pub fn payload_size(&self) -> u64 {
        self.parts.iter().map(|p| p.file.size()).sum()
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Upload progress reported by the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransferProgress {
    /// Bytes sent so far.
    pub loaded: u64,
    /// Total bytes, when the browser can compute it.
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// Progress once the response has arrived.
    pub fn complete() -> Self {
        Self {
            loaded: 1,
            total: Some(1),
        }
    }

    /// Percentage in `0.0..=100.0`, or `None` when indeterminate.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.loaded as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
            }
            _ => None,
        }
    }
}

/// Raw backend response.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendResponse<B> {
    pub status: u16,
    pub status_text: String,
    /// `Content-Disposition` header, when readable.
    pub content_disposition: Option<String>,
    pub body: B,
}

impl<B> BackendResponse<B> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Download target for a processed result.
///
/// `url` is an object URL owned by the UI state until revoked.
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadLink {
    pub url: String,
    pub filename: String,
    /// Size of the payload in bytes.
    pub size: u64,
}

/// Successful end of an upload cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadOutcome {
    pub link: DownloadLink,
    pub files_sent: usize,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Error message
    Error,
    /// Warning message
    Warning,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Error => "log-error",
            LogLevel::Warning => "log-warning",
        }
    }
}

/// A single activity log entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Severity level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

/// Append an entry, dropping the oldest ones past `cap`.
pub fn push_log(logs: &mut Vec<LogEntry>, entry: LogEntry, cap: usize) {
    logs.push(entry);
    if logs.len() > cap {
        let excess = logs.len() - cap;
        logs.drain(..excess);
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for the upload cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Selection rejected before any request.
    Validation(String),
    /// Transport failure, backend unreachable.
    Network(String),
    /// Backend answered with a non-success status.
    Server { status: u16, message: String },
    /// An upload is already in flight.
    Busy,
    /// A browser API call failed.
    Browser(String),
}

impl AppError {
    /// Message shown to the user, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Network(msg) => format!("Could not reach the backend: {}", msg),
            AppError::Server { status, message } => {
                format!("Processing failed ({}): {}", status, message)
            }
            AppError::Busy => "An upload is already running".to_string(),
            AppError::Browser(msg) => format!("Browser error: {}", msg),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            AppError::Busy => write!(f, "Upload already in progress"),
            AppError::Browser(msg) => write!(f, "Browser error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
