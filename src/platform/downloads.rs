use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;

use super::Downloads;
use crate::domain::DownloadRequest;
use crate::utils::{decode_text_data_uri, numbered_filename, sanitize_filename};

/// Upper bound on `name (n).ext` attempts before giving up.
const MAX_UNIQUE_ATTEMPTS: u32 = 1000;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("unsupported download URL")]
    InvalidDataUri,

    #[error("invalid filename {0:?}")]
    InvalidFilename(String),

    #[error("no free filename for {0}")]
    NoFreeName(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Writes downloads into a directory without prompting. Existing files are
/// never overwritten; a numbered name is picked instead.
#[derive(Debug, Clone)]
pub struct FileDownloads {
    directory: PathBuf,
}

impl FileDownloads {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn save(&self, request: DownloadRequest) -> Result<PathBuf, DownloadError> {
        let text = decode_text_data_uri(&request.url).ok_or(DownloadError::InvalidDataUri)?;

        let filename = sanitize_filename(&request.filename);
        if filename.is_empty() || filename == "." || filename == ".." {
            return Err(DownloadError::InvalidFilename(request.filename));
        }

        tokio::fs::create_dir_all(&self.directory).await?;
        let (mut file, path) = create_unique(&self.directory, &filename).await?;

        file.write_all(text.as_bytes()).await?;
        file.sync_all().await?;

        tracing::info!(bytes = text.len(), "saved {}", path.display());
        Ok(path)
    }
}

impl Downloads for FileDownloads {
    fn download(
        &self,
        request: DownloadRequest,
    ) -> impl Future<Output = Result<PathBuf, DownloadError>> + Send {
        let this = self.clone();
        async move { this.save(request).await }
    }
}

async fn create_unique(
    directory: &Path,
    filename: &str,
) -> Result<(tokio::fs::File, PathBuf), DownloadError> {
    for n in 0..MAX_UNIQUE_ATTEMPTS {
        let candidate = if n == 0 {
            directory.join(filename)
        } else {
            directory.join(numbered_filename(filename, n))
        };

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(DownloadError::NoFreeName(filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::text_data_uri;

    #[tokio::test]
    async fn test_writes_decoded_text() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = FileDownloads::new(dir.path());

        let path = downloads
            .download(DownloadRequest::citations(text_data_uri("Doe, J. (2020).")))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("citations.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Doe, J. (2020).");
    }

    #[tokio::test]
    async fn test_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("citations.txt"), "old").unwrap();
        let downloads = FileDownloads::new(dir.path());

        let first = downloads
            .download(DownloadRequest::citations(text_data_uri("one")))
            .await
            .unwrap();
        let second = downloads
            .download(DownloadRequest::citations(text_data_uri("two")))
            .await
            .unwrap();

        assert_eq!(first, dir.path().join("citations (1).txt"));
        assert_eq!(second, dir.path().join("citations (2).txt"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("citations.txt")).unwrap(),
            "old"
        );
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "two");
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let downloads = FileDownloads::new(&nested);

        let path = downloads
            .download(DownloadRequest::citations(text_data_uri("x")))
            .await
            .unwrap();
        assert_eq!(path, nested.join("citations.txt"));
    }

    #[tokio::test]
    async fn test_rejects_bad_requests() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = FileDownloads::new(dir.path());

        let err = downloads
            .download(DownloadRequest::citations("https://a.com/file.txt".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::InvalidDataUri));

        let err = downloads
            .download(DownloadRequest {
                url: text_data_uri("x"),
                filename: "  ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::InvalidFilename(_)));
    }
}
