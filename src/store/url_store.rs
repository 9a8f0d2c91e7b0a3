use serde::{Deserialize, Serialize};

use super::protocol::{StoreRequest, UrlsResponse};

/// How incoming URLs are normalized before they enter the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimPolicy {
    /// Strip surrounding whitespace, drop entries that end up empty.
    #[default]
    Trim,
    /// Store strings exactly as received; only the empty string is dropped.
    Verbatim,
}

impl TrimPolicy {
    fn normalize<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let value = match self {
            TrimPolicy::Trim => raw.trim(),
            TrimPolicy::Verbatim => raw,
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Ordered, duplicate-free list of candidate URLs for the current session.
#[derive(Debug, Default)]
pub struct UrlStore {
    urls: Vec<String>,
    policy: TrimPolicy,
}

impl UrlStore {
    pub fn new(policy: TrimPolicy) -> Self {
        Self {
            urls: Vec::new(),
            policy,
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Appends `url` unless it normalizes to nothing or is already present.
    /// Returns whether the list changed.
    pub fn add_url(&mut self, url: &str) -> bool {
        match self.policy.normalize(url) {
            Some(value) if !self.urls.iter().any(|u| u == value) => {
                self.urls.push(value.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    /// Replaces the list wholesale. Duplicates in `urls` are kept as given.
    pub fn set_urls<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let policy = self.policy;
        self.urls = urls
            .into_iter()
            .filter_map(|u| policy.normalize(u.as_ref()).map(str::to_string))
            .collect();
    }

    /// Applies one request. Only `AddUrl` and `GetUrls` produce a response.
    pub fn handle(&mut self, request: StoreRequest) -> Option<UrlsResponse> {
        match request {
            StoreRequest::AddUrl { url } => {
                if let Some(url) = url {
                    if self.add_url(&url) {
                        tracing::debug!(%url, total = self.urls.len(), "url added");
                    }
                }
                Some(self.snapshot())
            }
            StoreRequest::GetUrls => Some(self.snapshot()),
            StoreRequest::ClearUrls => {
                self.clear();
                tracing::debug!("url list cleared");
                None
            }
            StoreRequest::SetUrls { urls } => {
                if let Some(urls) = urls {
                    self.set_urls(urls);
                    tracing::debug!(total = self.urls.len(), "url list replaced");
                }
                None
            }
            StoreRequest::Unknown => None,
        }
    }

    fn snapshot(&self) -> UrlsResponse {
        UrlsResponse {
            urls: self.urls.clone(),
        }
    }
}
