//! Message vocabulary understood by the URL store.
//!
//! On the wire a request is a JSON object tagged by `action`, e.g.
//! `{"action": "add_url", "url": "https://example.org"}`. Payload fields are
//! read leniently: a field of the wrong type is treated as absent so the
//! store can ignore it instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreRequest {
    #[serde(alias = "capture_url")]
    AddUrl {
        #[serde(
            default,
            deserialize_with = "lenient_string",
            skip_serializing_if = "Option::is_none"
        )]
        url: Option<String>,
    },
    GetUrls,
    ClearUrls,
    SetUrls {
        #[serde(
            default,
            deserialize_with = "lenient_string_list",
            skip_serializing_if = "Option::is_none"
        )]
        urls: Option<Vec<String>>,
    },
    #[serde(other)]
    Unknown,
}

impl StoreRequest {
    pub fn add_url(url: impl Into<String>) -> Self {
        StoreRequest::AddUrl {
            url: Some(url.into()),
        }
    }

    pub fn set_urls(urls: Vec<String>) -> Self {
        StoreRequest::SetUrls { urls: Some(urls) }
    }

    /// Decodes a raw message. Anything that is not a recognizable request
    /// becomes `Unknown`.
    pub fn from_message(message: Value) -> Self {
        match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("ignoring unrecognized store message: {}", e);
                StoreRequest::Unknown
            }
        }
    }

    /// Whether the sender should wait for a `UrlsResponse`.
    pub fn expects_response(&self) -> bool {
        match self {
            StoreRequest::AddUrl { .. } | StoreRequest::GetUrls => true,
            StoreRequest::ClearUrls | StoreRequest::SetUrls { .. } | StoreRequest::Unknown => false,
        }
    }
}

/// Reply to `add_url` and `get_urls`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UrlsResponse {
    pub urls: Vec<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Non-arrays become `None`; non-string elements are dropped.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_actions() {
        assert_eq!(
            StoreRequest::from_message(json!({"action": "add_url", "url": "https://a.com"})),
            StoreRequest::add_url("https://a.com")
        );
        assert_eq!(
            StoreRequest::from_message(json!({"action": "get_urls"})),
            StoreRequest::GetUrls
        );
        assert_eq!(
            StoreRequest::from_message(json!({"action": "clear_urls"})),
            StoreRequest::ClearUrls
        );
        assert_eq!(
            StoreRequest::from_message(json!({"action": "set_urls", "urls": ["a", "b"]})),
            StoreRequest::set_urls(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_capture_url_alias() {
        assert_eq!(
            StoreRequest::from_message(json!({"action": "capture_url", "url": "https://a.com"})),
            StoreRequest::add_url("https://a.com")
        );
    }

    #[test]
    fn test_malformed_payloads_are_lenient() {
        assert_eq!(
            StoreRequest::from_message(json!({"action": "add_url", "url": 42})),
            StoreRequest::AddUrl { url: None }
        );
        assert_eq!(
            StoreRequest::from_message(json!({"action": "add_url"})),
            StoreRequest::AddUrl { url: None }
        );
        assert_eq!(
            StoreRequest::from_message(json!({"action": "set_urls", "urls": "nope"})),
            StoreRequest::SetUrls { urls: None }
        );
        assert_eq!(
            StoreRequest::from_message(json!({"action": "set_urls", "urls": ["a", 1, null, "b"]})),
            StoreRequest::set_urls(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_unknown_and_garbage_messages() {
        assert_eq!(
            StoreRequest::from_message(json!({"action": "reload"})),
            StoreRequest::Unknown
        );
        assert_eq!(StoreRequest::from_message(json!({"url": "x"})), StoreRequest::Unknown);
        assert_eq!(StoreRequest::from_message(json!("add_url")), StoreRequest::Unknown);
    }

    #[test]
    fn test_expects_response() {
        assert!(StoreRequest::GetUrls.expects_response());
        assert!(StoreRequest::AddUrl { url: None }.expects_response());
        assert!(!StoreRequest::ClearUrls.expects_response());
        assert!(!StoreRequest::SetUrls { urls: None }.expects_response());
        assert!(!StoreRequest::Unknown.expects_response());
    }
}
