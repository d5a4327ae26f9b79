//! Upload controller: one upload-and-download cycle per user action.
//!
//! ```text
//! idle ─▶ validating ─▶ uploading ─▶ success (object URL on the result panel)
//!              │                  └─▶ failure (error banner)
//!              └─▶ alert, no request
//! ```
//!
//! The controller is generic over its [`Transport`] and [`UploadSurface`],
//! both injected at construction.

use std::rc::Rc;

use crate::config::process_url;
use crate::services::{download_filename, server_error_message, ProgressSink, Transport, XhrTransport};
use crate::state::UiState;
use crate::surface::{UploadSurface, UploadView};
use crate::types::{
    AppError, AppResult, DownloadLink, FileSelection, LogLevel, ProcessOptions, TransferProgress,
    UploadOutcome, UploadRequest,
};

/// Controller wired to the browser: XHR transport and signal-backed view.
pub type BrowserController = UploadController<XhrTransport, UploadView>;

#[derive(Clone)]
pub struct UploadController<T, S> {
    transport: T,
    surface: S,
    endpoint: String,
}

impl<T, S> UploadController<T, S>
where
    T: Transport,
    S: UploadSurface + Clone + 'static,
{
    /// Controller posting to the organizer backend's `/process` endpoint.
    pub fn new(transport: T, surface: S) -> Self {
        Self::with_endpoint(transport, surface, process_url())
    }

    pub fn with_endpoint(transport: T, surface: S, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            surface,
            endpoint: endpoint.into(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run one upload cycle for `selection`.
    ///
    /// Every outcome is reflected on the surface before returning:
    /// validation errors as an alert, other failures as the error banner.
    pub async fn submit(
        &self,
        selection: &FileSelection<T::File>,
        options: &ProcessOptions,
    ) -> AppResult<UploadOutcome> {
        if self.surface.read(UiState::is_uploading).unwrap_or(false) {
            log::warn!("Submit ignored: an upload is already in flight");
            return Err(AppError::Busy);
        }

        if let Err(e) = selection.validate() {
            self.surface.alert(&e.user_message());
            self.surface.log(LogLevel::Warning, &e.to_string());
            return Err(e);
        }

        let request = UploadRequest::build(selection, options);
        if let Some(stale) = self.surface.update(UiState::begin_upload).flatten() {
            self.transport.revoke_object_url(&stale.url);
        }
        self.surface.log(
            LogLevel::Info,
            &format!(
                "📤 Uploading {} file(s), {} bytes...",
                request.parts().len(),
                request.payload_size()
            ),
        );

        let sink: ProgressSink = {
            let surface = self.surface.clone();
            Rc::new(move |progress: TransferProgress| {
                surface.update(|ui| ui.record_progress(progress));
            })
        };

        match self.exchange(&request, sink).await {
            Ok(link) => {
                self.surface.log(
                    LogLevel::Success,
                    &format!("✅ Processing complete: {} ({} bytes)", link.filename, link.size),
                );
                match self.surface.update(|ui| ui.complete(link.clone())) {
                    Some(Some(displaced)) => self.transport.revoke_object_url(&displaced.url),
                    Some(None) => {}
                    // Nobody left to show the link.
                    None => self.transport.revoke_object_url(&link.url),
                }
                Ok(UploadOutcome {
                    link,
                    files_sent: request.parts().len(),
                })
            }
            Err(e) => {
                self.surface.update(|ui| ui.fail(&e));
                self.surface.log(LogLevel::Error, &format!("❌ Upload failed: {}", e));
                Err(e)
            }
        }
    }

    /// POST the request and turn a successful body into a download link.
    async fn exchange(
        &self,
        request: &UploadRequest<T::File>,
        sink: ProgressSink,
    ) -> AppResult<DownloadLink> {
        let response = self.transport.post(&self.endpoint, request, sink).await?;

        if !response.is_success() {
            let body = match self.transport.read_text(&response.body).await {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Could not read error body: {}", e);
                    String::new()
                }
            };
            return Err(AppError::Server {
                status: response.status,
                message: server_error_message(response.status, &response.status_text, &body),
            });
        }

        let url = self.transport.create_object_url(&response.body)?;
        Ok(DownloadLink {
            url,
            filename: download_filename(response.content_disposition.as_deref()),
            size: self.transport.body_size(&response.body),
        })
    }

    /// Hide the result panel and release its object URL.
    pub fn dismiss_result(&self) {
        if let Some(link) = self.surface.update(UiState::dismiss_result).flatten() {
            self.transport.revoke_object_url(&link.url);
            log::debug!("Released {}", link.url);
        }
    }

    pub fn dismiss_error(&self) {
        self.surface.update(UiState::dismiss_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UploadPhase;
    use crate::types::{BackendResponse, SelectedFile};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    #[derive(Clone, Debug, PartialEq)]
    struct MemFile {
        name: String,
        bytes: Vec<u8>,
        size: u64,
    }

    impl MemFile {
        fn new(name: &str, bytes: &[u8]) -> Self {
            Self {
                name: name.to_string(),
                bytes: bytes.to_vec(),
                size: bytes.len() as u64,
            }
        }

        /// A file reporting `size` bytes without holding them.
        fn sized(name: &str, size: u64) -> Self {
            Self {
                name: name.to_string(),
                bytes: Vec::new(),
                size,
            }
        }
    }

    impl SelectedFile for MemFile {
        fn name(&self) -> String {
            self.name.clone()
        }

        fn size(&self) -> u64 {
            self.size
        }
    }

    #[derive(Debug)]
    struct SentRequest {
        url: String,
        parts: Vec<(&'static str, MemFile)>,
        fields: Vec<(&'static str, String)>,
    }

    #[derive(Default)]
    struct Backend {
        responses: VecDeque<AppResult<BackendResponse<Vec<u8>>>>,
        requests: Vec<SentRequest>,
        object_urls: HashMap<String, Vec<u8>>,
        revoked: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct FakeTransport {
        backend: Rc<RefCell<Backend>>,
    }

    impl FakeTransport {
        fn respond(&self, response: AppResult<BackendResponse<Vec<u8>>>) {
            self.backend.borrow_mut().responses.push_back(response);
        }

        fn ok(&self, body: &[u8]) {
            self.respond(Ok(BackendResponse {
                status: 200,
                status_text: "OK".to_string(),
                content_disposition: None,
                body: body.to_vec(),
            }));
        }

        fn dereference(&self, url: &str) -> Option<Vec<u8>> {
            self.backend.borrow().object_urls.get(url).cloned()
        }
    }

    impl Transport for FakeTransport {
        type File = MemFile;
        type Body = Vec<u8>;

        async fn post(
            &self,
            url: &str,
            request: &UploadRequest<MemFile>,
            on_progress: ProgressSink,
        ) -> AppResult<BackendResponse<Vec<u8>>> {
            let total = request.payload_size();
            on_progress(TransferProgress::new(total / 2, Some(total)));

            let mut backend = self.backend.borrow_mut();
            backend.requests.push(SentRequest {
                url: url.to_string(),
                parts: request
                    .parts()
                    .iter()
                    .map(|p| (p.field, p.file.clone()))
                    .collect(),
                fields: request.fields().to_vec(),
            });
            backend
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Network("no scripted response".to_string())))
        }

        async fn read_text(&self, body: &Vec<u8>) -> AppResult<String> {
            Ok(String::from_utf8_lossy(body).into_owned())
        }

        fn body_size(&self, body: &Vec<u8>) -> u64 {
            body.len() as u64
        }

        fn create_object_url(&self, body: &Vec<u8>) -> AppResult<String> {
            let mut backend = self.backend.borrow_mut();
            let url = format!("blob:test/{}", backend.object_urls.len() + 1);
            backend.object_urls.insert(url.clone(), body.clone());
            Ok(url)
        }

        fn revoke_object_url(&self, url: &str) {
            self.backend.borrow_mut().revoked.push(url.to_string());
        }
    }

    #[derive(Default)]
    struct Recorded {
        ui: UiState,
        history: Vec<UiState>,
        alerts: Vec<String>,
        logs: Vec<(LogLevel, String)>,
    }

    /// Surface keeping every intermediate UI state.
    #[derive(Clone, Default)]
    struct RecordingSurface {
        recorded: Rc<RefCell<Recorded>>,
    }

    impl RecordingSurface {
        fn ui(&self) -> UiState {
            self.recorded.borrow().ui.clone()
        }

        fn history(&self) -> Vec<UiState> {
            self.recorded.borrow().history.clone()
        }

        fn alerts(&self) -> Vec<String> {
            self.recorded.borrow().alerts.clone()
        }
    }

    impl UploadSurface for RecordingSurface {
        fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> Option<R> {
            let mut recorded = self.recorded.borrow_mut();
            let out = f(&mut recorded.ui);
            let snapshot = recorded.ui.clone();
            recorded.history.push(snapshot);
            Some(out)
        }

        fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> Option<R> {
            Some(f(&self.recorded.borrow().ui))
        }

        fn alert(&self, message: &str) {
            self.recorded.borrow_mut().alerts.push(message.to_string());
        }

        fn log(&self, level: LogLevel, message: &str) {
            self.recorded
                .borrow_mut()
                .logs
                .push((level, message.to_string()));
        }
    }

    fn controller() -> (
        UploadController<FakeTransport, RecordingSurface>,
        FakeTransport,
        RecordingSurface,
    ) {
        let transport = FakeTransport::default();
        let surface = RecordingSurface::default();
        let controller = UploadController::new(transport.clone(), surface.clone());
        (controller, transport, surface)
    }

    fn selection(names: &[&str]) -> FileSelection<MemFile> {
        names
            .iter()
            .map(|name| MemFile::new(name, name.as_bytes()))
            .collect::<Vec<_>>()
            .into()
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_selection_alerts_without_request() {
        let (controller, transport, surface) = controller();

        let result = block_on(controller.submit(&FileSelection::default(), &ProcessOptions::default()));

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(surface.alerts(), vec!["Select at least one file"]);
        assert!(transport.backend.borrow().requests.is_empty());
        assert!(surface.history().is_empty());
    }

    #[test]
    fn test_single_file_posts_one_part_to_process() {
        let (controller, transport, _surface) = controller();
        transport.ok(b"zip");

        let wav = MemFile::new("a.wav", b"RIFF....WAVE");
        let selection = FileSelection::from(vec![wav.clone()]);
        block_on(controller.submit(&selection, &ProcessOptions::default())).unwrap();

        let backend = transport.backend.borrow();
        assert_eq!(backend.requests.len(), 1);
        let sent = &backend.requests[0];
        assert_eq!(sent.url, "http://127.0.0.1:8000/process");
        assert_eq!(sent.parts, vec![("files", wav)]);
        assert_eq!(sent.parts[0].1.bytes, b"RIFF....WAVE".to_vec());
        assert_eq!(sent.fields, ProcessOptions::default().form_fields());
    }

    #[test]
    fn test_large_file_is_posted() {
        let (controller, transport, surface) = controller();
        transport.ok(b"zip");

        let long_session = MemFile::sized("long_session.wav", 300 * 1024 * 1024);
        let selection = FileSelection::from(vec![long_session.clone()]);
        let outcome = block_on(controller.submit(&selection, &ProcessOptions::default())).unwrap();

        assert_eq!(outcome.files_sent, 1);
        assert!(surface.alerts().is_empty());
        let backend = transport.backend.borrow();
        assert_eq!(backend.requests.len(), 1);
        assert_eq!(backend.requests[0].parts, vec![("files", long_session)]);
    }

    #[test]
    fn test_parts_follow_selection_order() {
        let (controller, transport, _surface) = controller();
        transport.ok(b"zip");

        let outcome = block_on(controller.submit(
            &selection(&["c.mp3", "a.wav", "b.m4a"]),
            &ProcessOptions::default(),
        ))
        .unwrap();

        assert_eq!(outcome.files_sent, 3);
        let backend = transport.backend.borrow();
        let parts: Vec<_> = backend.requests[0]
            .parts
            .iter()
            .map(|(field, file)| (*field, file.name.as_str()))
            .collect();
        assert_eq!(parts, vec![("files", "c.mp3"), ("files", "a.wav"), ("files", "b.m4a")]);
    }

    #[test]
    fn test_success_links_exact_response_bytes() {
        let (controller, transport, surface) = controller();
        let body = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff];
        transport.ok(&body);

        let outcome = block_on(controller.submit(&selection(&["a.wav"]), &ProcessOptions::default())).unwrap();

        assert_eq!(transport.dereference(&outcome.link.url), Some(body.clone()));
        assert_eq!(outcome.link.filename, "organized_result.zip");
        assert_eq!(outcome.link.size, body.len() as u64);

        let ui = surface.ui();
        assert!(ui.result_visible());
        assert!(!ui.progress_visible());
        assert_eq!(ui.result(), Some(&outcome.link));
    }

    #[test]
    fn test_progress_visible_until_response() {
        let (controller, transport, surface) = controller();
        transport.ok(b"zip");

        block_on(controller.submit(&selection(&["abcd.wav"]), &ProcessOptions::default())).unwrap();

        let history = surface.history();
        let (in_flight, last) = history.split_at(history.len() - 1);
        assert!(!in_flight.is_empty());
        for state in in_flight {
            assert!(state.progress_visible());
            assert!(!state.result_visible());
        }
        assert_eq!(in_flight.last().unwrap().progress().percent(), Some(50.0));
        assert!(last[0].result_visible());
    }

    #[test]
    fn test_server_error_short_circuits_download() {
        let (controller, transport, surface) = controller();
        transport.respond(Ok(BackendResponse {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            content_disposition: None,
            body: br#"{"error":"bad format"}"#.to_vec(),
        }));

        let result = block_on(controller.submit(&selection(&["a.wav"]), &ProcessOptions::default()));

        assert_eq!(
            result,
            Err(AppError::Server {
                status: 500,
                message: "bad format".to_string(),
            })
        );
        let ui = surface.ui();
        assert!(!ui.result_visible());
        assert!(!ui.progress_visible());
        assert_eq!(ui.error(), Some("Processing failed (500): bad format"));
        assert!(transport.backend.borrow().object_urls.is_empty());
    }

    #[test]
    fn test_transport_failure_leaves_uploading_state() {
        let (controller, transport, surface) = controller();
        transport.respond(Err(AppError::Network("connection refused".to_string())));

        let result = block_on(controller.submit(&selection(&["a.wav"]), &ProcessOptions::default()));

        assert!(matches!(result, Err(AppError::Network(_))));
        let ui = surface.ui();
        assert_eq!(ui.phase(), UploadPhase::Failed);
        assert!(!ui.progress_visible());
        assert!(ui.error().is_some());
        assert!(surface
            .recorded
            .borrow()
            .logs
            .iter()
            .any(|(level, _)| *level == LogLevel::Error));
    }

    #[test]
    fn test_sequential_submits_are_independent() {
        let (controller, transport, surface) = controller();
        transport.ok(b"first");
        transport.ok(b"second");
        let files = selection(&["a.wav"]);

        let first = block_on(controller.submit(&files, &ProcessOptions::default())).unwrap();
        let second = block_on(controller.submit(&files, &ProcessOptions::default())).unwrap();

        assert_ne!(first.link.url, second.link.url);
        assert_eq!(transport.dereference(&first.link.url), Some(b"first".to_vec()));
        assert_eq!(transport.dereference(&second.link.url), Some(b"second".to_vec()));

        let backend = transport.backend.borrow();
        assert_eq!(backend.requests.len(), 2);
        assert_eq!(backend.revoked, vec![first.link.url.clone()]);
        assert_eq!(surface.ui().result(), Some(&second.link));
    }

    #[test]
    fn test_submit_while_uploading_is_refused() {
        let (controller, transport, surface) = controller();
        surface.update(UiState::begin_upload);

        let result = block_on(controller.submit(&selection(&["a.wav"]), &ProcessOptions::default()));

        assert_eq!(result, Err(AppError::Busy));
        assert!(transport.backend.borrow().requests.is_empty());
    }

    #[test]
    fn test_dismiss_result_revokes_link() {
        let (controller, transport, surface) = controller();
        transport.ok(b"zip");
        let outcome = block_on(controller.submit(&selection(&["a.wav"]), &ProcessOptions::default())).unwrap();

        controller.dismiss_result();

        assert!(!surface.ui().result_visible());
        assert_eq!(transport.backend.borrow().revoked, vec![outcome.link.url]);
    }

    #[test]
    fn test_filename_taken_from_response_header() {
        let (controller, transport, _surface) = controller();
        transport.respond(Ok(BackendResponse {
            status: 200,
            status_text: "OK".to_string(),
            content_disposition: Some(r#"attachment; filename="batch_01.zip""#.to_string()),
            body: b"zip".to_vec(),
        }));

        let outcome = block_on(controller.submit(&selection(&["a.wav"]), &ProcessOptions::default())).unwrap();
        assert_eq!(outcome.link.filename, "batch_01.zip");
    }

    #[test]
    fn test_options_are_sent_as_fields() {
        let (controller, transport, _surface) = controller();
        transport.ok(b"zip");
        let options = ProcessOptions::default()
            .with_n_words(2)
            .with_keep_prefix(false)
            .with_keep_formats("wav");

        block_on(controller.submit(&selection(&["a.wav"]), &options)).unwrap();

        let backend = transport.backend.borrow();
        assert_eq!(
            backend.requests[0].fields,
            vec![
                ("n_words", "2".to_string()),
                ("keep_prefix", "no".to_string()),
                ("keep_formats", ".wav".to_string()),
            ]
        );
    }
}
