// ============================================================================
// BROWSER TRANSPORT - gloo-net for JSON, XMLHttpRequest for uploads
// ============================================================================
// fetch() has no upload progress, so the multipart upload goes through XHR.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use futures::channel::oneshot;
use gloo_net::http::Request;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, Event, FormData, ProgressEvent, XmlHttpRequest};

use crate::error::TransportError;
use crate::models::{TransferProgress, UploadFile};
use crate::services::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UploadRequest};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));

        let sent = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| TransportError(format!("Request build error: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::debug!("🌐 [HTTP] {:?} {} -> {}", request.method, request.url, status);

        Ok(HttpResponse { status, body })
    }

    async fn upload(
        &self,
        request: UploadRequest,
        progress: UnboundedSender<TransferProgress>,
    ) -> Result<HttpResponse, TransportError> {
        let xhr = XmlHttpRequest::new().map_err(js_error)?;
        xhr.open_with_async("POST", &request.url, true)
            .map_err(js_error)?;
        for (name, value) in &request.headers {
            xhr.set_request_header(name, value).map_err(js_error)?;
        }

        let form = FormData::new().map_err(js_error)?;
        let blob = file_to_blob(&request.file)?;
        form.append_with_blob_and_filename(&request.field_name, &blob, &request.file.name)
            .map_err(js_error)?;

        let on_progress = Closure::wrap(Box::new(move |event: ProgressEvent| {
            if event.length_computable() {
                let _ = progress.unbounded_send(TransferProgress {
                    loaded: event.loaded() as u64,
                    total: event.total() as u64,
                });
            }
        }) as Box<dyn FnMut(ProgressEvent)>);

        let (done_tx, done_rx) = oneshot::channel::<Result<(), TransportError>>();
        let done_tx: DoneSender = Rc::new(RefCell::new(Some(done_tx)));

        let on_load = {
            let done_tx = done_tx.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                settle(&done_tx, Ok(()));
            }) as Box<dyn FnMut(Event)>)
        };
        let on_error = {
            let done_tx = done_tx.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                settle(&done_tx, Err(TransportError("Network error during upload".to_string())));
            }) as Box<dyn FnMut(Event)>)
        };

        let upload = xhr.upload().map_err(js_error)?;
        upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_error.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form)).map_err(js_error)?;
        log::info!("📤 [HTTP] Uploading {} ({} bytes)", request.file.name, request.file.size());

        let outcome = done_rx
            .await
            .unwrap_or_else(|_| Err(TransportError("Upload was interrupted".to_string())));

        // Detach the handlers before the closures (and the progress sender) drop.
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        drop(on_progress);
        drop(on_load);
        drop(on_error);

        outcome?;
        let status = xhr.status().map_err(js_error)?;
        let body = xhr.response_text().map_err(js_error)?.unwrap_or_default();
        log::debug!("🌐 [HTTP] POST {} -> {}", request.url, status);

        Ok(HttpResponse { status, body })
    }
}

type DoneSender = Rc<RefCell<Option<oneshot::Sender<Result<(), TransportError>>>>>;

/// First of load/error/abort wins.
fn settle(done_tx: &DoneSender, outcome: Result<(), TransportError>) {
    if let Some(tx) = done_tx.borrow_mut().take() {
        let _ = tx.send(outcome);
    }
}

fn file_to_blob(file: &UploadFile) -> Result<Blob, TransportError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    Blob::new_with_u8_array_sequence(&parts).map_err(js_error)
}

fn js_error(err: JsValue) -> TransportError {
    TransportError(format!("{:?}", err))
}
