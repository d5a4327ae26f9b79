//! Audio Organizer - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend that uploads a batch of audio recordings to the
//! local organizer backend and offers the processed archive for download.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (picker, options, send)                  │
//! │  ├── ProgressSection (while uploading)                      │
//! │  ├── ResultPanel (download link / error banner)             │
//! │  └── ActivityLog                                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//!
//!   UploadSection ──submit──▶ UploadController ──POST /process──▶ backend
//!                                  │
//!                                  └──UploadSurface──▶ UiState signal
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (FileSelection, UploadRequest, AppError, etc.)
//! - [`state`] - UI state and its transitions
//! - [`surface`] - The UI surface driven by the controller
//! - [`controller`] - The upload cycle
//! - [`components`] - UI components
//! - [`services`] - Backend communication (transport, response parsing)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod surface;
pub mod controller;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Selection
    FileSelection, SelectedFile,
    // Request
    ProcessOptions, UploadRequest,
    // Response
    BackendResponse, DownloadLink, TransferProgress, UploadOutcome,
    // Logs
    LogEntry, LogLevel,
    // Errors
    AppError, AppResult,
};

// State & controller
pub use state::{UiState, UploadPhase};
pub use surface::{UploadSurface, UploadView};
pub use controller::{BrowserController, UploadController};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Mount the application on `<body>`.
pub fn mount() {
    log::info!("🦀 Audio Organizer - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Audio Organizer"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let view_state = UploadView::new();
    let controller: BrowserController = UploadController::new(XhrTransport, view_state);

    view! {
        <div class="container">
            <Hero/>

            <UploadSection controller=controller.clone()/>

            <ProgressSection ui=view_state.ui/>

            <ResultPanel controller=controller/>

            <ActivityLog logs=view_state.logs/>
        </div>

        <Footer/>
    }
}
