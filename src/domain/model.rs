use std::path::PathBuf;

pub const CITATIONS_FILENAME: &str = "citations.txt";

/// A file to be saved from a `data:` URI straight into the download
/// directory, with no save-as prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

impl DownloadRequest {
    pub fn citations(data_uri: String) -> Self {
        Self {
            url: data_uri,
            filename: CITATIONS_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Nothing was sent: the list was empty.
    Skipped,
    Saved(PathBuf),
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citations_request_targets_fixed_filename() {
        let request = DownloadRequest::citations("data:text/plain;charset=utf-8,x".into());
        assert_eq!(request.filename, "citations.txt");
        assert_eq!(request.url, "data:text/plain;charset=utf-8,x");
    }
}
