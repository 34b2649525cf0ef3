pub mod editor;
pub mod menu;
pub mod prompt;

use iced::widget::{column, container, mouse_area, stack, Space};
use iced::{Background, Element, Length};

use crate::app::{App, Message};
use crate::theme::colors;

/// Id of the first input of a prompt, focused when the prompt opens.
pub const PROMPT_INPUT: &str = "prompt-primary";

/// Id of the scroller around the gutter and the text.
pub const EDITOR_SCROLL: &str = "editor-scroll";

/// Space above the first line of text, also kept around a caret that is
/// scrolled into view.
pub const EDITOR_PADDING: f32 = 16.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_toolbar(),
            self.view_tabs(),
            self.view_editor(),
            self.view_status_bar(),
        ];

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_DARK)),
                ..Default::default()
            })
            .into();

        if let Some(prompt) = &self.prompt {
            stack![
                main_view,
                backdrop(Some(colors::BACKDROP), Message::PromptCancel),
                self.view_prompt(prompt),
            ]
            .into()
        } else if self.active_menu.is_some() {
            stack![
                main_view,
                backdrop(None, Message::CloseTopMenu),
                self.view_menu_dropdown(),
            ]
            .into()
        } else {
            main_view
        }
    }
}

/// Full-window layer that swallows clicks outside a popup.
fn backdrop<'a>(tint: Option<iced::Color>, on_press: Message) -> Element<'a, Message> {
    mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: tint.map(Background::Color),
                ..Default::default()
            }),
    )
    .on_press(on_press)
    .into()
}
