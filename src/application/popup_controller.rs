use std::path::PathBuf;

use url::Url;

use crate::{
    api::{ApiClient, CitationRequest, CitationStyle},
    domain::{AppError, DownloadRequest, GenerateOutcome},
    platform::{Alerts, Downloads},
    store::StoreHandle,
    utils::{parse_url_list, render_url_list, text_data_uri},
};

/// What the popup learns about the backend when it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStatus {
    pub online: bool,
    pub styles: Vec<CitationStyle>,
}

/// Drives the popup's actions against the URL store and the backend.
///
/// The controller holds no list of its own: every action either asks the
/// store or pushes the parsed text back into it. Failures are logged and
/// alerted here, then returned so the view can update its status line.
#[derive(Clone)]
pub struct PopupController<A, D> {
    store: StoreHandle,
    api_client: ApiClient,
    alerts: A,
    downloads: D,
}

impl<A: Alerts, D: Downloads> PopupController<A, D> {
    pub fn new(store: StoreHandle, api_client: ApiClient, alerts: A, downloads: D) -> Self {
        Self {
            store,
            api_client,
            alerts,
            downloads,
        }
    }

    /// Current list rendered one URL per line.
    pub async fn open(&self) -> Result<String, AppError> {
        let response = self.store.get_urls().await?;
        Ok(render_url_list(&response.urls))
    }

    /// Adds the active tab's URL and returns the re-rendered list.
    pub async fn add(&self, tab_url: Option<String>) -> Result<String, AppError> {
        let result = self.add_tab_url(tab_url).await;
        if let Err(e) = &result {
            self.report(e).await;
        }
        result
    }

    async fn add_tab_url(&self, tab_url: Option<String>) -> Result<String, AppError> {
        let url = tab_url
            .as_deref()
            .and_then(as_tab_url)
            .ok_or(AppError::NoActiveTab)?;
        let response = self.store.add_url(url).await?;
        Ok(render_url_list(&response.urls))
    }

    /// Empties the store. The caller clears its text regardless of the result.
    pub fn clear(&self) -> Result<(), AppError> {
        self.store.clear_urls().map_err(|e| {
            tracing::error!("failed to clear urls: {}", e);
            AppError::from(e)
        })
    }

    /// Syncs the store to `text`, asks the backend for citations and saves
    /// them as `citations.txt`.
    pub async fn generate(&self, text: &str, style: CitationStyle, use_ai: bool) -> GenerateOutcome {
        let urls = parse_url_list(text);
        if urls.is_empty() {
            self.report(&AppError::NothingToGenerate).await;
            return GenerateOutcome::Skipped;
        }

        if let Err(e) = self.store.set_urls(urls.clone()) {
            tracing::warn!("could not sync url list before generating: {}", e);
        }

        let request = CitationRequest {
            urls,
            style,
            use_ai,
        };

        match self.fetch_and_save(&request).await {
            Ok(path) => GenerateOutcome::Saved(path),
            Err(e) => {
                self.report(&e).await;
                GenerateOutcome::Failed
            }
        }
    }

    async fn fetch_and_save(&self, request: &CitationRequest) -> Result<PathBuf, AppError> {
        let text = self.api_client.generate_citations(request).await?;
        let path = self
            .downloads
            .download(DownloadRequest::citations(text_data_uri(&text)))
            .await?;
        Ok(path)
    }

    /// Health and supported styles. Never fails: an unreachable backend is
    /// reported as offline with the built-in style list.
    pub async fn backend_status(&self) -> BackendStatus {
        let online = match self.api_client.health().await {
            Ok(online) => online,
            Err(e) => {
                tracing::warn!("backend health check failed: {}", e);
                false
            }
        };

        let styles = match self.api_client.list_styles().await {
            Ok(styles) if !styles.is_empty() => styles,
            Ok(_) => CitationStyle::ALL.to_vec(),
            Err(e) => {
                tracing::debug!("using built-in styles: {}", e);
                CitationStyle::ALL.to_vec()
            }
        };

        BackendStatus { online, styles }
    }

    async fn report(&self, error: &AppError) {
        match error {
            AppError::NoActiveTab | AppError::NothingToGenerate => tracing::warn!("{}", error),
            _ => tracing::error!("{}", error),
        }
        self.alerts.alert(&error.alert_message()).await;
    }
}

/// A tab URL is one absolute URL. Clipboard prose, several lines or a bare
/// word are rejected so each store entry stays a single rendered line.
fn as_tab_url(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return None;
    }
    Url::parse(candidate).ok()?;
    Some(candidate.to_string())
}
