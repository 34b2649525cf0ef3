use iced::widget::{button, column, container, row, text, text_input, Column, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use super::PROMPT_INPUT;
use crate::app::{App, Message, Prompt, PromptField};
use crate::theme::colors;

fn secondary_button<'a>(label: &'a str, on_press: Message) -> Element<'a, Message> {
    button(text(label).size(13).color(colors::TEXT_PRIMARY))
        .padding(Padding::from([8, 20]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => colors::BG_LIGHT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(on_press)
        .into()
}

fn prompt_input<'a>(placeholder: &'a str, value: &'a str, field: PromptField) -> Element<'a, Message> {
    let input = text_input(placeholder, value)
        .on_input(move |value| Message::PromptChanged(field, value))
        .on_submit(Message::PromptSubmit)
        .padding(Padding::from([8, 12]))
        .size(13);

    match field {
        PromptField::Primary => input.id(text_input::Id::new(PROMPT_INPUT)).into(),
        PromptField::Secondary => input.into(),
    }
}

impl App {
    pub fn view_prompt<'a>(&'a self, prompt: &'a Prompt) -> Element<'a, Message> {
        let mut fields: Vec<Element<'a, Message>> = Vec::new();
        match prompt {
            Prompt::Find { query } => {
                fields.push(prompt_input("Find what...", query, PromptField::Primary));
            }
            Prompt::Replace { find, replace_with } => {
                fields.push(prompt_input("Find what...", find, PromptField::Primary));
                fields.push(Space::with_height(8).into());
                fields.push(prompt_input(
                    "Replace with...",
                    replace_with,
                    PromptField::Secondary,
                ));
            }
            Prompt::GoToLine { input } => {
                fields.push(prompt_input("Line number...", input, PromptField::Primary));
            }
        }

        let mut buttons = row![
            secondary_button("Cancel", Message::PromptCancel),
            Space::with_width(12),
        ]
        .align_y(iced::Alignment::Center);
        if prompt.replace_next_command().is_some() {
            buttons = buttons
                .push(secondary_button("Replace", Message::PromptReplaceNext))
                .push(Space::with_width(12));
        }
        buttons = buttons.push(
            button(text(prompt.confirm_label()).size(13).color(Color::WHITE))
                .padding(Padding::from([8, 20]))
                .style(|_: &Theme, status: button::Status| {
                    let bg = match status {
                        button::Status::Hovered => colors::ACCENT_HOVER,
                        _ => colors::ACCENT,
                    };
                    button::Style {
                        background: Some(Background::Color(bg)),
                        text_color: Color::WHITE,
                        border: Border {
                            radius: 4.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::PromptSubmit),
        );

        let modal_content = column![
            text(prompt.title()).size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            Column::with_children(fields),
            Space::with_height(16),
            buttons,
        ]
        .padding(24)
        .width(Length::Fixed(380.0));

        container(container(modal_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MEDIUM)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }
}
