use std::future::Future;

use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use super::Alerts;

const ALERT_TITLE: &str = "Cite Collector";

/// Native message box.
#[derive(Debug, Clone, Default)]
pub struct DesktopAlerts;

impl Alerts for DesktopAlerts {
    fn alert(&self, message: &str) -> impl Future<Output = ()> + Send {
        let message = message.to_string();
        async move {
            AsyncMessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title(ALERT_TITLE)
                .set_description(message)
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        }
    }
}
