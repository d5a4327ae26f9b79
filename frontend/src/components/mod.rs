//! UI Components for the Audio Organizer application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Multi-file picker, options and send trigger
//! - [`ProgressSection`] - Upload progress bar
//! - [`ResultPanel`] - Download link and error banner
//! - [`ActivityLog`] - Client-side activity log

mod hero;
mod upload;
mod progress;
mod result;
mod footer;
mod logs;

pub use hero::*;
pub use upload::*;
pub use progress::*;
pub use result::*;
pub use footer::*;
pub use logs::*;
