use iced::widget::{button, column, container, horizontal_space, row, text, Column, Row, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};
use scrivo_core::Command;

use crate::app::{App, Message, TopMenu};
use crate::theme::colors;

/// One row of a dropdown.
enum MenuEntry {
    Item(Command),
    Separator,
}

fn entries(menu: TopMenu) -> Vec<MenuEntry> {
    use MenuEntry::{Item, Separator};

    match menu {
        TopMenu::File => vec![
            Item(Command::New),
            Item(Command::Open { path: None }),
            Separator,
            Item(Command::Save),
            Item(Command::SaveAs),
            Item(Command::SaveAll),
            Separator,
            Item(Command::Close),
            Item(Command::CloseAll),
            Separator,
            Item(Command::Exit),
        ],
        TopMenu::Edit => vec![
            Item(Command::Undo),
            Item(Command::Redo),
            Separator,
            Item(Command::Cut),
            Item(Command::Copy),
            Item(Command::Paste),
            Separator,
            Item(Command::SelectAll),
        ],
        TopMenu::Search => vec![
            Item(Command::Find { query: None }),
            Item(Command::Replace {
                find: None,
                replace_with: None,
            }),
            Separator,
            Item(Command::GoToLine { input: None }),
        ],
        TopMenu::View => vec![
            Item(Command::ToggleLineNumbers),
            Item(Command::ToggleWordWrap),
        ],
        TopMenu::Help => vec![Item(Command::About)],
    }
}

impl App {
    pub fn view_toolbar(&self) -> Element<'_, Message> {
        let mut menu_items: Vec<Element<'_, Message>> = Vec::new();

        for menu in TopMenu::ALL {
            let is_active = self.active_menu == Some(menu);

            let menu_btn = button(text(menu.label()).size(12).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }))
            .padding(Padding::from([6, 10]))
            .style(move |_: &Theme, status: button::Status| {
                let bg = if is_active {
                    colors::BG_ACTIVE
                } else {
                    match status {
                        button::Status::Hovered => colors::BG_HOVER,
                        _ => colors::BG_MEDIUM,
                    }
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::ToggleTopMenu(menu));

            menu_items.push(menu_btn.into());
        }

        menu_items.push(horizontal_space().into());

        let toolbar = Row::with_children(menu_items)
            .spacing(2)
            .padding(Padding::from([4, 8]))
            .align_y(iced::Alignment::Center);

        container(toolbar)
            .width(Length::Fill)
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

    /// Whether a menu command can do anything right now.
    fn is_enabled(&self, command: &Command) -> bool {
        let Ok(doc) = self.editor.selected_document() else {
            return matches!(
                command,
                Command::New
                    | Command::Open { .. }
                    | Command::Exit
                    | Command::About
                    | Command::ToggleLineNumbers
                    | Command::ToggleWordWrap
            );
        };
        match command {
            Command::Undo => doc.buffer().can_undo(),
            Command::Redo => doc.buffer().can_redo(),
            Command::Cut | Command::Copy => !doc.selection().is_empty(),
            Command::SaveAll => self.editor.has_unsaved_changes(),
            _ => true,
        }
    }

    /// On/off state of a toggle command, `None` for other commands.
    fn is_checked(&self, command: &Command) -> Option<bool> {
        let settings = &self.editor.config().editor;
        match command {
            Command::ToggleLineNumbers => Some(settings.line_numbers),
            Command::ToggleWordWrap => Some(settings.word_wrap),
            _ => None,
        }
    }

    fn menu_item(&self, command: Command) -> Element<'_, Message> {
        let shortcut = self
            .editor
            .keymap()
            .shortcut_for(&command)
            .map(|key| key.to_string())
            .unwrap_or_default();
        let enabled = self.is_enabled(&command);
        let label_color = if enabled {
            colors::TEXT_PRIMARY
        } else {
            colors::TEXT_MUTED
        };
        let check = match self.is_checked(&command) {
            Some(true) => "✓",
            _ => "",
        };

        button(
            row![
                text(check).size(12).color(colors::ACCENT).width(16),
                text(command.display_name()).size(12).color(label_color),
                horizontal_space(),
                text(shortcut).size(11).color(colors::TEXT_MUTED),
            ]
            .width(Length::Fill)
            .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([6, 16]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border::default(),
                ..Default::default()
            }
        })
        .on_press_maybe(enabled.then_some(Message::Run(command)))
        .into()
    }

    fn menu_separator<'a>() -> Element<'a, Message> {
        container(Space::new(Length::Fill, 1))
            .padding(Padding::from([4, 8]))
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BORDER)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_menu_dropdown(&self) -> Element<'_, Message> {
        let Some(menu) = self.active_menu else {
            return Space::new(0, 0).into();
        };

        let items: Vec<Element<'_, Message>> = entries(menu)
            .into_iter()
            .map(|entry| match entry {
                MenuEntry::Item(command) => self.menu_item(command),
                MenuEntry::Separator => Self::menu_separator(),
            })
            .collect();

        let menu_content = Column::with_children(items)
            .width(Length::Fixed(260.0))
            .padding(4);

        let menu_offset_x = match menu {
            TopMenu::File => 8.0,
            TopMenu::Edit => 52.0,
            TopMenu::Search => 96.0,
            TopMenu::View => 158.0,
            TopMenu::Help => 206.0,
        };

        let menu_box = container(menu_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MEDIUM)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        });

        column![
            Space::with_height(Length::Fixed(32.0)),
            row![Space::with_width(Length::Fixed(menu_offset_x)), menu_box],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
