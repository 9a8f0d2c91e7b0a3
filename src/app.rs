use iced::Task;

use crate::application::{BackendStatus, PopupController};
use crate::config::Config;
use crate::domain::{AppError, GenerateOutcome};
use crate::platform::{DesktopAlerts, FileDownloads};
use crate::ui::{PopupMessage, PopupView};

type Controller = PopupController<DesktopAlerts, FileDownloads>;

pub struct PopupApp {
    view: PopupView,
    controller: Controller,
}

impl PopupApp {
    /// Builds the window state and kicks off the initial sync with the store
    /// and the backend.
    pub fn boot(config: &Config, controller: Controller) -> (Self, Task<Message>) {
        let view = PopupView::new(config.popup.default_style, config.popup.use_ai);
        let app = Self { view, controller };

        let open = {
            let controller = app.controller.clone();
            Task::perform(async move { controller.open().await }, Message::Opened)
        };
        let status = {
            let controller = app.controller.clone();
            Task::perform(
                async move { controller.backend_status().await },
                Message::BackendChecked,
            )
        };

        (app, Task::batch([open, status]))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(PopupMessage),
    /// Rendered list from the store
    Opened(Result<String, AppError>),
    BackendChecked(BackendStatus),
    /// URL of the page being viewed, read from the clipboard
    ActiveTabRead(Option<String>),
    Added(Result<String, AppError>),
    Generated(GenerateOutcome),
}

pub fn update(app: &mut PopupApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                PopupMessage::AddPressed => {
                    return iced::clipboard::read().map(Message::ActiveTabRead);
                }
                PopupMessage::ClearPressed => {
                    if let Err(e) = app.controller.clear() {
                        app.view.status_message = e.to_string();
                    } else {
                        app.view.status_message = "List cleared".to_string();
                    }
                    app.view.set_text("");
                }
                PopupMessage::GeneratePressed if !app.view.is_generating => {
                    let controller = app.controller.clone();
                    let text = app.view.text();
                    let style = app.view.style;
                    let use_ai = app.view.use_ai;

                    app.view.is_generating = true;
                    app.view.status_message = "Generating citations...".to_string();

                    return Task::perform(
                        async move { controller.generate(&text, style, use_ai).await },
                        Message::Generated,
                    );
                }
                _ => {}
            }
        }
        Message::Opened(result) => match result {
            Ok(text) => app.view.set_text(&text),
            Err(e) => {
                tracing::error!("failed to load urls: {}", e);
                app.view.status_message = e.to_string();
            }
        },
        Message::BackendChecked(status) => {
            app.view.set_styles(status.styles);
            if !app.view.is_generating {
                app.view.status_message = if status.online {
                    "Backend online".to_string()
                } else {
                    "Backend offline".to_string()
                };
            }
        }
        Message::ActiveTabRead(url) => {
            let controller = app.controller.clone();
            return Task::perform(async move { controller.add(url).await }, Message::Added);
        }
        Message::Added(result) => match result {
            Ok(text) => {
                app.view.set_text(&text);
                app.view.status_message = "Page added".to_string();
            }
            Err(e) => {
                app.view.status_message = e.to_string();
            }
        },
        Message::Generated(outcome) => {
            app.view.is_generating = false;
            app.view.status_message = match outcome {
                GenerateOutcome::Saved(path) => format!("Saved: {}", path.display()),
                GenerateOutcome::Skipped => "Nothing to generate".to_string(),
                GenerateOutcome::Failed => "Citation generation failed".to_string(),
            };
        }
    }
    Task::none()
}

pub fn view(app: &PopupApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
