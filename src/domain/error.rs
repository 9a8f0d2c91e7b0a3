use thiserror::Error;

/// Everything a popup action can fail with. Each variant is contained to the
/// action that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("No active tab URL found.")]
    NoActiveTab,

    #[error("No URLs to generate citations for!")]
    NothingToGenerate,

    #[error("URL store error: {0}")]
    Store(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Download failed: {0}")]
    Download(String),
}

impl AppError {
    /// Text shown to the user in the blocking alert.
    pub fn alert_message(&self) -> String {
        match self {
            AppError::NoActiveTab | AppError::NothingToGenerate | AppError::Download(_) => {
                self.to_string()
            }
            AppError::Api(_) => "Error generating citations. Is the backend running?".to_string(),
            AppError::Store(_) => "The URL list is unavailable. Try reopening the window.".to_string(),
        }
    }
}

impl From<crate::store::StoreError> for AppError {
    fn from(e: crate::store::StoreError) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<crate::api::ApiError> for AppError {
    fn from(e: crate::api::ApiError) -> Self {
        AppError::Api(e.to_string())
    }
}

impl From<crate::platform::DownloadError> for AppError {
    fn from(e: crate::platform::DownloadError) -> Self {
        AppError::Download(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_messages() {
        assert_eq!(
            AppError::NoActiveTab.alert_message(),
            "No active tab URL found."
        );
        assert_eq!(
            AppError::NothingToGenerate.alert_message(),
            "No URLs to generate citations for!"
        );
        assert_eq!(
            AppError::Api("Backend returned 500".into()).alert_message(),
            "Error generating citations. Is the backend running?"
        );
        assert_eq!(
            AppError::Download("disk full".into()).alert_message(),
            "Download failed: disk full"
        );
    }
}
