use std::thread;

use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::protocol::{StoreRequest, UrlsResponse};
use super::url_store::{TrimPolicy, UrlStore};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("URL store is not running")]
    Closed,

    #[error("Failed to start URL store: {0}")]
    Spawn(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

struct Envelope {
    request: StoreRequest,
    reply: Option<oneshot::Sender<UrlsResponse>>,
}

/// Starts the background worker that owns the URL list and returns the only
/// way to talk to it. The worker exits once every handle has been dropped.
pub fn spawn_background(policy: TrimPolicy) -> Result<StoreHandle> {
    let (tx, rx) = mpsc::unbounded_channel();
    let store = UrlStore::new(policy);

    thread::Builder::new()
        .name("url-store".to_string())
        .spawn(move || run(store, rx))
        .map_err(|e| StoreError::Spawn(e.to_string()))?;

    tracing::info!(?policy, "url store started");
    Ok(StoreHandle { tx })
}

/// Each request runs to completion before the next one is taken off the queue.
fn run(mut store: UrlStore, mut rx: mpsc::UnboundedReceiver<Envelope>) {
    while let Some(Envelope { request, reply }) = rx.blocking_recv() {
        let response = store.handle(request);
        if let (Some(reply), Some(response)) = (reply, response) {
            // The asking side may have gone away; nothing to do then.
            let _ = reply.send(response);
        }
    }
    tracing::debug!("url store stopped");
}

#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl StoreHandle {
    /// Adds `url` and returns the list as it stands afterwards.
    pub async fn add_url(&self, url: impl Into<String>) -> Result<UrlsResponse> {
        self.request(StoreRequest::add_url(url)).await
    }

    pub async fn get_urls(&self) -> Result<UrlsResponse> {
        self.request(StoreRequest::GetUrls).await
    }

    /// Fire-and-forget: queued, no reply.
    pub fn clear_urls(&self) -> Result<()> {
        self.notify(StoreRequest::ClearUrls)
    }

    /// Fire-and-forget: queued, no reply.
    pub fn set_urls(&self, urls: Vec<String>) -> Result<()> {
        self.notify(StoreRequest::set_urls(urls))
    }

    /// Feeds a raw JSON message through the store, returning the JSON reply
    /// for requests that have one.
    pub async fn dispatch(&self, message: Value) -> Result<Option<Value>> {
        let request = StoreRequest::from_message(message);
        if request.expects_response() {
            let response = self.request(request).await?;
            Ok(Some(json!({ "urls": response.urls })))
        } else {
            self.notify(request)?;
            Ok(None)
        }
    }

    async fn request(&self, request: StoreRequest) -> Result<UrlsResponse> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                request,
                reply: Some(reply),
            })
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    fn notify(&self, request: StoreRequest) -> Result<()> {
        self.tx
            .send(Envelope {
                request,
                reply: None,
            })
            .map_err(|_| StoreError::Closed)
    }
}
