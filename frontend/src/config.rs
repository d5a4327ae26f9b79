//! Application configuration.
//!
//! Centralized configuration for the Audio Organizer frontend.
//! The backend address is a hardcoded literal; there is no runtime
//! configuration layer.

/// Backend API base URL.
///
/// The local organizer backend that groups, cleans and renames audio files.
pub const BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Path of the processing endpoint on the backend.
pub const PROCESS_PATH: &str = "/process";

/// Multipart field name shared by every uploaded file.
pub const FILES_FIELD: &str = "files";

/// Extensions offered by the file picker.
///
/// A `.zip` is extracted by the backend before processing.
pub const ACCEPTED_EXTENSIONS: &str = ".wav,.m4a,.mp3,.zip";

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Name given to the download when the response carries no filename.
pub const DEFAULT_DOWNLOAD_NAME: &str = "organized_result.zip";

/// Default number of transcribed words used to rename generic recordings.
pub const DEFAULT_N_WORDS: u8 = 5;

/// Accepted range for `n_words`.
pub const N_WORDS_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Formats kept by the backend when the user does not override them.
pub const DEFAULT_KEEP_FORMATS: &[&str] = &[".wav", ".m4a", ".mp3"];

/// Full URL of the processing endpoint.
pub fn process_url() -> String {
    format!("{}{}", BACKEND_URL, PROCESS_PATH)
}
