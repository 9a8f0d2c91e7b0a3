use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, CitationRequest, CitationStyle, HealthResponse};

const GENERATE_PATH: &str = "api/citations/generate";
const STYLES_PATH: &str = "api/citations/styles";
const HEALTH_PATH: &str = "health";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend returned {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for the citation-generation backend.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.config.base_url.join(path)?)
    }

    /// POSTs the request and returns the plain-text citation output.
    /// Any non-2xx status is an error carrying that status code.
    pub async fn generate_citations(&self, request: &CitationRequest) -> Result<String> {
        let url = self.endpoint(GENERATE_PATH)?;
        tracing::info!(
            count = request.urls.len(),
            style = request.style.as_str(),
            use_ai = request.use_ai,
            "requesting citations from {}",
            url
        );

        let response = self.http.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Styles the backend reports as supported. Names it reports that this
    /// client does not know are skipped.
    pub async fn list_styles(&self) -> Result<Vec<CitationStyle>> {
        let response = self
            .http
            .get(self.endpoint(STYLES_PATH)?)
            .send()
            .await?
            .error_for_status()?;

        let names: Vec<String> = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        let styles: Vec<CitationStyle> = names
            .iter()
            .filter_map(|name| {
                let style = CitationStyle::from_name(name);
                if style.is_none() {
                    tracing::debug!("skipping unsupported style {:?}", name);
                }
                style
            })
            .collect();

        Ok(styles)
    }

    /// Whether `GET /health` answers with `{"status": "ok"}`.
    pub async fn health(&self) -> Result<bool> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH)?)
            .send()
            .await?
            .error_for_status()?;

        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        Ok(health.status == "ok")
    }
}
