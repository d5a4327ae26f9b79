//! Backend communication services.
//!
//! # Services
//!
//! - [`transport`] - Multipart POST to the organizer backend and object URLs
//! - [`response`] - Error body and download filename interpretation

pub mod response;
pub mod transport;

pub use response::*;
pub use transport::*;
