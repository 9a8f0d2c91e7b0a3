use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiConfig, CitationStyle};
use crate::store::TrimPolicy;

pub const APP_DIR: &str = "cite-collector";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";
pub const BACKEND_URL_ENV: &str = "CITE_COLLECTOR_BACKEND_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid backend URL {0:?}: {1}")]
    BackendUrl(String, url::ParseError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// "trim" (default) or "verbatim".
    pub trim: TrimPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub default_style: CitationStyle,
    pub use_ai: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadsConfig {
    /// Where `citations.txt` is written. Defaults to the platform Downloads directory.
    pub directory: Option<PathBuf>,
}

/// Configuration loaded from `<config_dir>/cite-collector/config.toml`.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub store: StoreConfig,
    pub popup: PopupConfig,
    pub downloads: DownloadsConfig,
}

impl Config {
    pub fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        ApiConfig::new(&self.backend.base_url)
            .map_err(|e| ConfigError::BackendUrl(self.backend.base_url.clone(), e))
    }

    pub fn download_dir(&self) -> PathBuf {
        self.downloads
            .directory
            .clone()
            .or_else(dirs::download_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn apply_env(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend.base_url = url;
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Load a config from `path`. A missing file is not an error.
pub fn load_from_path(path: &Path) -> Result<Option<Config>, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&data)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Platform config file plus environment overrides. Problems are logged and
/// fall back to defaults so the window still opens.
pub fn load() -> Config {
    let mut config = match config_path() {
        Some(path) => match load_from_path(&path) {
            Ok(Some(config)) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Ok(None) => Config::default(),
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    config.apply_env(std::env::var(BACKEND_URL_ENV).ok());

    if let Err(e) = config.api_config() {
        tracing::warn!("{}; falling back to {}", e, DEFAULT_BACKEND_URL);
        config.backend = BackendConfig::default();
    }

    if config.store.trim == TrimPolicy::Verbatim {
        tracing::warn!(
            "store.trim = \"verbatim\": URLs are stored untrimmed, which differs from the \
             trimming behavior of add_url/set_urls"
        );
    }

    config
}
