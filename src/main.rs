mod api;
mod app;
mod application;
mod config;
mod domain;
mod logging;
mod platform;
mod store;
mod ui;
mod utils;

use iced::{window, Size};

use crate::api::ApiClient;
use crate::application::PopupController;
use crate::platform::{DesktopAlerts, FileDownloads};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {}", e);
    }

    let config = config::load();
    let store = store::spawn_background(config.store.trim)?;
    let api_client = ApiClient::new(config.api_config()?);
    let downloads = FileDownloads::new(config.download_dir());

    tracing::info!(
        backend = %api_client.base_url(),
        downloads = %downloads.directory().display(),
        "starting cite-collector"
    );

    let controller = PopupController::new(store, api_client, DesktopAlerts, downloads);

    iced::application(
        move || app::PopupApp::boot(&config, controller.clone()),
        app::update,
        app::view,
    )
    .title("Cite Collector")
    .window(window::Settings {
        size: Size::new(440.0, 600.0),
        ..Default::default()
    })
    .run()?;

    Ok(())
}
