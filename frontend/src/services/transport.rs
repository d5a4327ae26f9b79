//! HTTP transport for the upload cycle.
//!
//! [`Transport`] is the seam between the controller and the browser:
//! sending the multipart body, reading a response body and managing the
//! object URLs that back download links. [`XhrTransport`] implements it
//! with `XMLHttpRequest` so upload progress events are observable.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FormData, ProgressEvent, Url, XmlHttpRequest, XmlHttpRequestResponseType};

use crate::types::{
    AppError, AppResult, BackendResponse, FormEntry, SelectedFile, TransferProgress, UploadRequest,
};

/// Callback receiving upload progress.
pub type ProgressSink = Rc<dyn Fn(TransferProgress)>;

/// Network and object URL operations needed by an upload cycle.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// File handle type accepted in requests.
    type File: SelectedFile + Clone;
    /// Response body type.
    type Body;

    /// POST the multipart body to `url`.
    ///
    /// Resolves with any HTTP status; only transport failures are `Err`.
    async fn post(
        &self,
        url: &str,
        request: &UploadRequest<Self::File>,
        on_progress: ProgressSink,
    ) -> AppResult<BackendResponse<Self::Body>>;

    /// Read a body as text (used for error responses).
    async fn read_text(&self, body: &Self::Body) -> AppResult<String>;

    /// Size of a body in bytes.
    fn body_size(&self, body: &Self::Body) -> u64;

    /// Wrap a body in an object URL.
    fn create_object_url(&self, body: &Self::Body) -> AppResult<String>;

    /// Release an object URL created by [`Transport::create_object_url`].
    fn revoke_object_url(&self, url: &str);
}

/// Browser transport backed by `XMLHttpRequest`.
#[derive(Clone, Copy, Debug, Default)]
pub struct XhrTransport;

fn browser_error(context: &'static str) -> impl Fn(JsValue) -> AppError {
    move |e| AppError::Browser(format!("{}: {:?}", context, e))
}

/// Build the `FormData` body from the request's entries, in order.
fn build_form_data(request: &UploadRequest<File>) -> AppResult<FormData> {
    let form_data = FormData::new().map_err(browser_error("Failed to create FormData"))?;

    for entry in request.entries() {
        match entry {
            FormEntry::File { name, file, filename } => form_data
                .append_with_blob_and_filename(name, file, &filename)
                .map_err(browser_error("Failed to append file"))?,
            FormEntry::Text { name, value } => form_data
                .append_with_str(name, value)
                .map_err(browser_error("Failed to append field"))?,
        }
    }

    Ok(form_data)
}

impl Transport for XhrTransport {
    type File = File;
    type Body = Blob;

    async fn post(
        &self,
        url: &str,
        request: &UploadRequest<File>,
        on_progress: ProgressSink,
    ) -> AppResult<BackendResponse<Blob>> {
        let form_data = build_form_data(request)?;

        let xhr = XmlHttpRequest::new().map_err(browser_error("Failed to create XMLHttpRequest"))?;
        xhr.open("POST", url)
            .map_err(browser_error("Failed to open request"))?;
        xhr.set_response_type(XmlHttpRequestResponseType::Blob);

        let upload = xhr
            .upload()
            .map_err(browser_error("Upload events unavailable"))?;
        let onprogress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            let total = event.length_computable().then(|| event.total() as u64);
            on_progress(TransferProgress::new(event.loaded() as u64, total));
        });
        upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

        // Settles once: load on any HTTP status, error/abort on transport failure.
        let settled = Promise::new(&mut |resolve, reject| {
            xhr.set_onload(Some(&resolve));
            xhr.set_onerror(Some(&reject));
            xhr.set_onabort(Some(&reject));
        });

        xhr.send_with_opt_form_data(Some(&form_data))
            .map_err(browser_error("Failed to send request"))?;

        let outcome = JsFuture::from(settled).await;
        upload.set_onprogress(None);
        drop(onprogress);

        if outcome.is_err() {
            return Err(AppError::Network(format!("POST {} failed", url)));
        }

        let status = xhr.status().map_err(browser_error("Failed to read status"))?;
        if status == 0 {
            return Err(AppError::Network(format!("POST {} returned no response", url)));
        }

        let status_text = xhr.status_text().unwrap_or_default();
        let content_disposition = xhr
            .get_response_header("Content-Disposition")
            .ok()
            .flatten();
        let body = xhr
            .response()
            .map_err(browser_error("Failed to read response"))?
            .dyn_into::<Blob>()
            .map_err(|_| AppError::Browser("Response body is not a Blob".to_string()))?;

        Ok(BackendResponse {
            status,
            status_text,
            content_disposition,
            body,
        })
    }

    async fn read_text(&self, body: &Blob) -> AppResult<String> {
        let text = JsFuture::from(body.text())
            .await
            .map_err(browser_error("Failed to read response body"))?;
        Ok(text.as_string().unwrap_or_default())
    }

    fn body_size(&self, body: &Blob) -> u64 {
        body.size() as u64
    }

    fn create_object_url(&self, body: &Blob) -> AppResult<String> {
        Url::create_object_url_with_blob(body).map_err(browser_error("Failed to create object URL"))
    }

    fn revoke_object_url(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke object URL {}: {:?}", url, e);
        }
    }
}
