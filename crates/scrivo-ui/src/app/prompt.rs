//! Single-line prompts for find, replace and go to line.
//!
//! A prompt collects the payload of a command. Submitting turns it into
//! the filled-in `Command`; cancelling simply drops it, which is the same
//! as running the command with an empty payload.
//!
//! Find stays open after a match so Enter steps through them. The replace
//! prompt has a second action, Replace, that also leaves it open.

use scrivo_core::Command;

/// Which input box of a prompt changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    /// Find query, search text or line number
    Primary,
    /// Replacement text
    Secondary,
}

/// An open prompt and what has been typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Find { query: String },
    Replace { find: String, replace_with: String },
    GoToLine { input: String },
}

impl Prompt {
    /// Opens the prompt that fills in `command`'s payload.
    ///
    /// Search prompts start from `last_query`. Returns `None` for commands
    /// that take no typed input.
    pub fn for_command(command: &Command, last_query: &str) -> Option<Self> {
        match command {
            Command::Find { query } => Some(Prompt::Find {
                query: query.clone().unwrap_or_else(|| last_query.to_string()),
            }),
            Command::Replace { find, replace_with }
            | Command::ReplaceNext { find, replace_with } => Some(Prompt::Replace {
                find: find.clone().unwrap_or_else(|| last_query.to_string()),
                replace_with: replace_with.clone().unwrap_or_default(),
            }),
            Command::GoToLine { input } => Some(Prompt::GoToLine {
                input: input.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }

    /// Dialog heading.
    pub fn title(&self) -> &'static str {
        match self {
            Prompt::Find { .. } => "Find",
            Prompt::Replace { .. } => "Replace",
            Prompt::GoToLine { .. } => "Go to Line",
        }
    }

    /// Label of the confirm button.
    pub fn confirm_label(&self) -> &'static str {
        match self {
            Prompt::Find { .. } => "Find Next",
            Prompt::Replace { .. } => "Replace All",
            Prompt::GoToLine { .. } => "Go",
        }
    }

    /// True if the prompt stays open after its command succeeds.
    pub fn stays_open(&self) -> bool {
        matches!(self, Prompt::Find { .. })
    }

    /// Command of the Replace button, for prompts that have one.
    pub fn replace_next_command(&self) -> Option<Command> {
        match self {
            Prompt::Replace { find, replace_with } => Some(Command::ReplaceNext {
                find: Some(find.clone()),
                replace_with: Some(replace_with.clone()),
            }),
            _ => None,
        }
    }

    /// Stores typed text. Fields a prompt doesn't have are ignored.
    pub fn set(&mut self, field: PromptField, value: String) {
        match (self, field) {
            (Prompt::Find { query }, PromptField::Primary) => *query = value,
            (Prompt::Replace { find, .. }, PromptField::Primary) => *find = value,
            (Prompt::Replace { replace_with, .. }, PromptField::Secondary) => {
                *replace_with = value
            }
            (Prompt::GoToLine { input }, PromptField::Primary) => *input = value,
            _ => {}
        }
    }

    /// Text the search prompts should start with next time.
    pub fn query(&self) -> Option<&str> {
        match self {
            Prompt::Find { query } => Some(query),
            Prompt::Replace { find, .. } => Some(find),
            Prompt::GoToLine { .. } => None,
        }
    }

    /// The command with its payload filled in.
    pub fn into_command(self) -> Command {
        match self {
            Prompt::Find { query } => Command::Find { query: Some(query) },
            Prompt::Replace { find, replace_with } => Command::Replace {
                find: Some(find),
                replace_with: Some(replace_with),
            },
            Prompt::GoToLine { input } => Command::GoToLine { input: Some(input) },
        }
    }
}
