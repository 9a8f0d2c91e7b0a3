use iced::{
    widget::{button, column, pick_list, row, text, text_editor, toggler, Space},
    Element, Length,
};

use crate::api::CitationStyle;

/// Popup view state. The editor holds a rendered snapshot of the store, not
/// the list itself.
pub struct PopupView {
    pub urls: text_editor::Content,
    pub styles: Vec<CitationStyle>,
    pub style: CitationStyle,
    pub use_ai: bool,
    pub status_message: String,
    pub is_generating: bool,
}

impl Default for PopupView {
    fn default() -> Self {
        Self::new(CitationStyle::default(), false)
    }
}

#[derive(Debug, Clone)]
pub enum PopupMessage {
    UrlsEdited(text_editor::Action),
    StyleSelected(CitationStyle),
    UseAiToggled(bool),
    AddPressed,
    ClearPressed,
    GeneratePressed,
}

impl PopupView {
    pub fn new(style: CitationStyle, use_ai: bool) -> Self {
        Self {
            urls: text_editor::Content::new(),
            styles: CitationStyle::ALL.to_vec(),
            style,
            use_ai,
            status_message: "Add pages, then generate citations".to_string(),
            is_generating: false,
        }
    }

    pub fn text(&self) -> String {
        self.urls.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.urls = text_editor::Content::with_text(text);
    }

    /// Restrict the picker to `styles`, keeping the selection when possible.
    pub fn set_styles(&mut self, styles: Vec<CitationStyle>) {
        if styles.is_empty() {
            return;
        }
        if !styles.contains(&self.style) {
            self.style = styles[0];
        }
        self.styles = styles;
    }

    pub fn update(&mut self, message: PopupMessage) {
        match message {
            PopupMessage::UrlsEdited(action) => {
                self.urls.perform(action);
            }
            PopupMessage::StyleSelected(style) => {
                self.style = style;
            }
            PopupMessage::UseAiToggled(use_ai) => {
                self.use_ai = use_ai;
            }
            PopupMessage::AddPressed
            | PopupMessage::ClearPressed
            | PopupMessage::GeneratePressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, PopupMessage> {
        let generate_label = if self.is_generating {
            "Generating..."
        } else {
            "Generate citations"
        };

        column![
            text("Cite Collector").size(24),
            Space::new().height(Length::Fixed(10.0)),
            text("URLs (one per line):").size(14),
            text_editor(&self.urls)
                .placeholder("https://example.org/article")
                .on_action(PopupMessage::UrlsEdited)
                .height(Length::Fixed(220.0))
                .padding(8),
            row![
                button("Add current page")
                    .on_press(PopupMessage::AddPressed)
                    .padding([6, 12]),
                button("Clear")
                    .on_press(PopupMessage::ClearPressed)
                    .padding([6, 12]),
            ]
            .spacing(10),
            Space::new().height(Length::Fixed(10.0)),
            row![
                text("Style:").size(14),
                pick_list(
                    self.styles.as_slice(),
                    Some(self.style),
                    PopupMessage::StyleSelected
                ),
            ]
            .spacing(10),
            toggler(self.use_ai)
                .label("Use AI")
                .on_toggle(PopupMessage::UseAiToggled),
            Space::new().height(Length::Fixed(10.0)),
            button(generate_label)
                .on_press_maybe((!self.is_generating).then_some(PopupMessage::GeneratePressed))
                .padding([10, 20]),
            text(&self.status_message).size(14),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
