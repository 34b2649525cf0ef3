use iced::alignment;
use iced::widget::text::Wrapping;
use iced::widget::{
    button, container, horizontal_space, row, scrollable, text, text_editor, Row, Space,
};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};
use scrivo_core::DocumentId;

use super::{EDITOR_PADDING, EDITOR_SCROLL};
use crate::app::{App, Message};
use crate::theme::colors;

/// Gutter text for `lines` lines: one number per line, starting at 1.
fn gutter_text(lines: usize) -> String {
    (1..=lines.max(1))
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl App {
    pub fn view_tabs(&self) -> Element<'_, Message> {
        let documents = self.editor.documents();
        let selected = documents.selected();

        let mut tabs_vec: Vec<Element<'_, Message>> = documents
            .iter()
            .map(|doc| {
                let title = self.editor.title(doc.id()).unwrap_or_default();
                self.make_tab(title, doc.id(), selected == Some(doc.id()))
            })
            .collect();

        tabs_vec.push(horizontal_space().into());

        let tabs_row = Row::with_children(tabs_vec)
            .spacing(1)
            .align_y(iced::Alignment::End);

        container(tabs_row)
            .width(Length::Fill)
            .height(36)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_MEDIUM)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    pub fn make_tab(&self, title: String, id: DocumentId, is_active: bool) -> Element<'_, Message> {
        let close_btn = button(text("x").size(12).color(colors::TEXT_MUTED))
            .padding(Padding::from([2, 6]))
            .style(|_, status| {
                let bg = match status {
                    button::Status::Hovered => colors::BG_HOVER,
                    _ => Color::TRANSPARENT,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        radius: 2.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::CloseTab(id));

        let tab_content = row![
            text(title).size(13).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }),
            Space::with_width(8),
            close_btn,
        ]
        .align_y(iced::Alignment::Center);

        let bg = if is_active {
            colors::BG_DARK
        } else {
            colors::BG_MEDIUM
        };

        button(tab_content)
            .padding(Padding::from([8, 14]))
            .style(move |_, status| {
                let hover_bg = match status {
                    button::Status::Hovered if !is_active => colors::BG_HOVER,
                    _ => bg,
                };
                button::Style {
                    background: Some(Background::Color(hover_bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        color: if is_active {
                            colors::ACCENT
                        } else {
                            Color::TRANSPARENT
                        },
                        width: if is_active { 2.0 } else { 0.0 },
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::TabSelected(id))
            .into()
    }

    pub fn view_editor(&self) -> Element<'_, Message> {
        let Some(view) = self.selected_view() else {
            return container(text("No document").size(16).color(colors::TEXT_MUTED))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        let settings = &self.editor.config().editor;
        let wrapping = if settings.word_wrap {
            Wrapping::Word
        } else {
            Wrapping::None
        };

        let editor = text_editor(&view.content)
            .padding(Padding {
                top: EDITOR_PADDING,
                right: 20.0,
                bottom: EDITOR_PADDING,
                left: 16.0,
            })
            .font(Font::MONOSPACE)
            .size(settings.font_size)
            .wrapping(wrapping)
            .style(|_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(colors::BG_DARK),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: colors::TEXT_MUTED,
                placeholder: colors::TEXT_MUTED,
                value: colors::TEXT_PRIMARY,
                selection: colors::SELECTION,
            })
            .on_action(Message::EditorAction);

        if !self.show_gutter() {
            // Without a gutter the widget scrolls by itself
            return editor.height(Length::Fill).into();
        }

        let gutter = container(
            text(gutter_text(view.content.line_count()))
                .font(Font::MONOSPACE)
                .size(settings.font_size)
                .color(colors::TEXT_MUTED)
                .align_x(alignment::Horizontal::Right),
        )
        .padding(Padding {
            top: EDITOR_PADDING,
            right: 8.0,
            bottom: EDITOR_PADDING,
            left: 12.0,
        });

        // Numbers and text must scroll together, so the widget takes the
        // height of its text and one scroller moves both
        scrollable(row![gutter, editor.height(Length::Shrink)])
            .id(scrollable::Id::new(EDITOR_SCROLL))
            .on_scroll(Message::EditorScrolled)
            .height(Length::Fill)
            .into()
    }

    pub fn view_status_bar(&self) -> Element<'_, Message> {
        let message = self.editor.message().unwrap_or_default().to_string();
        let line_ending = self
            .editor
            .selected_document()
            .map(|doc| doc.line_ending().to_string())
            .unwrap_or_default();

        let status_content = row![
            text(message).size(12).color(colors::TEXT_SECONDARY),
            horizontal_space(),
            text(self.editor.status().to_string())
                .size(12)
                .color(colors::TEXT_PRIMARY),
            Space::with_width(24),
            text(line_ending).size(12).color(colors::TEXT_SECONDARY),
            Space::with_width(12),
            text("UTF-8").size(12).color(colors::TEXT_SECONDARY),
            Space::with_width(12),
        ]
        .padding(Padding::from([6, 12]))
        .align_y(iced::Alignment::Center);

        container(status_content)
            .width(Length::Fill)
            .height(28)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_MEDIUM)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
