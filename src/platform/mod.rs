//! Desktop stand-ins for the browser surfaces the popup relies on: blocking
//! alerts and the downloads API.

pub mod alerts;
pub mod downloads;

use std::future::Future;
use std::path::PathBuf;

use crate::domain::DownloadRequest;

pub use alerts::DesktopAlerts;
pub use downloads::{DownloadError, FileDownloads};

pub trait Alerts: Clone + Send + Sync + 'static {
    /// Show `message` and wait until the user dismisses it.
    fn alert(&self, message: &str) -> impl Future<Output = ()> + Send;
}

pub trait Downloads: Clone + Send + Sync + 'static {
    /// Save the request's payload, returning where it ended up.
    fn download(
        &self,
        request: DownloadRequest,
    ) -> impl Future<Output = Result<PathBuf, DownloadError>> + Send;
}
