//! Command system for editor actions.
//!
//! ## Learning: The Command Pattern
//!
//! Commands encapsulate actions as values:
//! - Menus, key bindings and the CLI all produce the same `Command`
//! - `Editor::execute` is the single place that interprets them
//!
//! Commands that need typed input (find, replace, go to line) carry it in
//! their payload. A `None` payload means the prompt was cancelled or not
//! answered yet, and executing it does nothing.

use std::path::PathBuf;

/// Built-in editor commands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // File commands
    New,
    /// Open a file; `None` asks the file picker
    Open { path: Option<PathBuf> },
    Save,
    SaveAs,
    SaveAll,
    Close,
    CloseAll,
    Exit,

    // Edit commands
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,

    // Search
    Find { query: Option<String> },
    Replace {
        find: Option<String>,
        replace_with: Option<String>,
    },
    /// Replace the selected or next match only
    ReplaceNext {
        find: Option<String>,
        replace_with: Option<String>,
    },
    GoToLine { input: Option<String> },

    // View
    ToggleLineNumbers,
    ToggleWordWrap,

    // Help
    About,
}

impl Command {
    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::New => "New",
            Command::Open { .. } => "Open...",
            Command::Save => "Save",
            Command::SaveAs => "Save As...",
            Command::SaveAll => "Save All",
            Command::Close => "Close",
            Command::CloseAll => "Close All",
            Command::Exit => "Exit",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::Find { .. } => "Find...",
            Command::Replace { .. } => "Replace...",
            Command::ReplaceNext { .. } => "Replace Next",
            Command::GoToLine { .. } => "Go To Line...",
            Command::ToggleLineNumbers => "Line Numbers",
            Command::ToggleWordWrap => "Word Wrap",
            Command::About => "About",
        }
    }

    /// Stable name used in config files (`"save_as"`, `"go_to_line"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Command::New => "new",
            Command::Open { .. } => "open",
            Command::Save => "save",
            Command::SaveAs => "save_as",
            Command::SaveAll => "save_all",
            Command::Close => "close",
            Command::CloseAll => "close_all",
            Command::Exit => "exit",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Cut => "cut",
            Command::Copy => "copy",
            Command::Paste => "paste",
            Command::SelectAll => "select_all",
            Command::Find { .. } => "find",
            Command::Replace { .. } => "replace",
            Command::ReplaceNext { .. } => "replace_next",
            Command::GoToLine { .. } => "go_to_line",
            Command::ToggleLineNumbers => "toggle_line_numbers",
            Command::ToggleWordWrap => "toggle_word_wrap",
            Command::About => "about",
        }
    }

    /// Parses a config name back into a command with an empty payload.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name.trim().to_lowercase().replace(['-', ' ', '.'], "_").as_str() {
            "new" => Command::New,
            "open" => Command::Open { path: None },
            "save" => Command::Save,
            "save_as" => Command::SaveAs,
            "save_all" => Command::SaveAll,
            "close" => Command::Close,
            "close_all" => Command::CloseAll,
            "exit" | "quit" => Command::Exit,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "cut" => Command::Cut,
            "copy" => Command::Copy,
            "paste" => Command::Paste,
            "select_all" => Command::SelectAll,
            "find" => Command::Find { query: None },
            "replace" => Command::Replace {
                find: None,
                replace_with: None,
            },
            "replace_next" => Command::ReplaceNext {
                find: None,
                replace_with: None,
            },
            "go_to_line" | "goto_line" => Command::GoToLine { input: None },
            "toggle_line_numbers" | "line_numbers" => Command::ToggleLineNumbers,
            "toggle_word_wrap" | "word_wrap" => Command::ToggleWordWrap,
            "about" => Command::About,
            _ => return None,
        };
        Some(command)
    }

    /// True for commands whose payload comes from a text prompt.
    pub fn needs_prompt(&self) -> bool {
        matches!(
            self,
            Command::Find { query: None }
                | Command::Replace { find: None, .. }
                | Command::Replace {
                    replace_with: None,
                    ..
                }
                | Command::ReplaceNext { find: None, .. }
                | Command::ReplaceNext {
                    replace_with: None,
                    ..
                }
                | Command::GoToLine { input: None }
        )
    }
}

/// What happened when a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran
    Done,
    /// Nothing to do (empty payload, cancelled prompt, nothing to undo)
    Ignored,
    /// The command failed; the user has already been told
    Failed,
    /// Cut or copy produced this text for the system clipboard
    Clipboard(String),
    /// Every document agreed to close; the application should exit
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_name() {
        assert_eq!(Command::Save.display_name(), "Save");
        assert_eq!(
            Command::GoToLine { input: None }.display_name(),
            "Go To Line..."
        );
    }

    #[test]
    fn test_names_round_trip() {
        let all = [
            Command::New,
            Command::Open { path: None },
            Command::Save,
            Command::SaveAs,
            Command::SaveAll,
            Command::Close,
            Command::CloseAll,
            Command::Exit,
            Command::Undo,
            Command::Redo,
            Command::Cut,
            Command::Copy,
            Command::Paste,
            Command::SelectAll,
            Command::Find { query: None },
            Command::Replace {
                find: None,
                replace_with: None,
            },
            Command::ReplaceNext {
                find: None,
                replace_with: None,
            },
            Command::GoToLine { input: None },
            Command::ToggleLineNumbers,
            Command::ToggleWordWrap,
            Command::About,
        ];
        for command in all {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn test_from_name_is_lenient() {
        assert_eq!(Command::from_name("Save-As"), Some(Command::SaveAs));
        assert_eq!(Command::from_name("quit"), Some(Command::Exit));
        assert_eq!(
            Command::from_name("Word Wrap"),
            Some(Command::ToggleWordWrap)
        );
        assert_eq!(Command::from_name("explode"), None);
    }

    #[test]
    fn test_needs_prompt() {
        assert!(Command::Find { query: None }.needs_prompt());
        assert!(!Command::Find {
            query: Some("x".into())
        }
        .needs_prompt());
        assert!(Command::Replace {
            find: Some("a".into()),
            replace_with: None
        }
        .needs_prompt());
        assert!(Command::ReplaceNext {
            find: None,
            replace_with: Some("b".into())
        }
        .needs_prompt());
        assert!(!Command::Save.needs_prompt());
        assert!(!Command::ToggleLineNumbers.needs_prompt());
    }
}
