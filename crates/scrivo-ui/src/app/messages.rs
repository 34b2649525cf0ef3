use iced::keyboard;
use iced::widget::{scrollable, text_editor};
use iced::window;
use scrivo_core::{Command, DocumentId};

use crate::app::prompt::PromptField;

/// Entries of the top menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMenu {
    File,
    Edit,
    Search,
    View,
    Help,
}

impl TopMenu {
    pub const ALL: [TopMenu; 5] = [
        TopMenu::File,
        TopMenu::Edit,
        TopMenu::Search,
        TopMenu::View,
        TopMenu::Help,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TopMenu::File => "File",
            TopMenu::Edit => "Edit",
            TopMenu::Search => "Search",
            TopMenu::View => "View",
            TopMenu::Help => "Help",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // Menus and key bindings
    Run(Command),

    // Tabs
    TabSelected(DocumentId),
    CloseTab(DocumentId),

    // Editor
    EditorAction(text_editor::Action),
    /// The gutter and text were scrolled
    EditorScrolled(scrollable::Viewport),

    // Prompts
    PromptChanged(PromptField, String),
    PromptSubmit,
    /// The Replace button of the replace prompt
    PromptReplaceNext,
    PromptCancel,

    // Top menu bar
    ToggleTopMenu(TopMenu),
    CloseTopMenu,

    // Keyboard
    KeyPressed(keyboard::Key, keyboard::Modifiers),

    // Window
    CloseRequested(window::Id),
}
