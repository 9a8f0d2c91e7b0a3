//! Logging init: append to a file under the platform data dir, or fall back
//! to stderr when that file can't be opened.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR;

const DEFAULT_FILTER: &str = "info,cite_collector=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn log_file_path() -> io::Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no local data directory"))?
        .join(APP_DIR);
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir.join(format!("{}.log", APP_DIR)))
}

fn file_subscriber(file: fs::File, filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish()
}

/// Initialize logging to `<data_local_dir>/cite-collector/cite-collector.log`.
/// Returns Err when the file can't be opened so the caller can fall back.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    file_subscriber(file, env_filter()).init();

    tracing::info!("logging initialized at {}", path.display());
    Ok(path)
}

pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_subscriber_appends_plain_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cite-collector.log");
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        let subscriber = file_subscriber(file, EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("saved citations");
            tracing::debug!("filtered out");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("saved citations"));
        assert!(!contents.contains("filtered out"));
        assert!(!contents.contains('\u{1b}'));
    }
}
