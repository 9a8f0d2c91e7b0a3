use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Citation styles the backend knows how to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    Harvard,
    #[default]
    Unsw,
    Mla,
    Chicago,
    Apa,
    Ieee,
    Vancouver,
}

impl CitationStyle {
    pub const ALL: [CitationStyle; 7] = [
        CitationStyle::Harvard,
        CitationStyle::Unsw,
        CitationStyle::Mla,
        CitationStyle::Chicago,
        CitationStyle::Apa,
        CitationStyle::Ieee,
        CitationStyle::Vancouver,
    ];

    /// Wire name, as sent in the `style` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationStyle::Harvard => "harvard",
            CitationStyle::Unsw => "unsw",
            CitationStyle::Mla => "mla",
            CitationStyle::Chicago => "chicago",
            CitationStyle::Apa => "apa",
            CitationStyle::Ieee => "ieee",
            CitationStyle::Vancouver => "vancouver",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CitationStyle::Harvard => "Harvard",
            CitationStyle::Unsw => "UNSW Harvard",
            CitationStyle::Mla => "MLA",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Apa => "APA",
            CitationStyle::Ieee => "IEEE",
            CitationStyle::Vancouver => "Vancouver",
        };
        f.write_str(label)
    }
}

/// Body of `POST /api/citations/generate`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CitationRequest {
    pub urls: Vec<String>,
    pub style: CitationStyle,
    pub use_ai: bool,
}

/// Response from `GET /health`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    /// Parses `base_url`, making sure it ends in `/` so endpoint paths join
    /// underneath it instead of replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let req = CitationRequest {
            urls: vec!["https://a.com".into()],
            style: CitationStyle::Apa,
            use_ai: true,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"urls": ["https://a.com"], "style": "apa", "use_ai": true})
        );
    }

    #[test]
    fn test_style_names() {
        assert_eq!(CitationStyle::default(), CitationStyle::Unsw);
        assert_eq!(CitationStyle::from_name("IEEE"), Some(CitationStyle::Ieee));
        assert_eq!(CitationStyle::from_name(" vancouver "), Some(CitationStyle::Vancouver));
        assert_eq!(CitationStyle::from_name("bluebook"), None);
        for style in CitationStyle::ALL {
            assert_eq!(CitationStyle::from_name(style.as_str()), Some(style));
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ApiConfig::new("http://example.com/backend").unwrap();
        assert_eq!(config.base_url.as_str(), "http://example.com/backend/");

        let config = ApiConfig::new("http://localhost:8000").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");

        assert!(ApiConfig::new("not a url").is_err());
    }
}
