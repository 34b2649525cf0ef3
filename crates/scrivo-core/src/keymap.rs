//! Keyboard mapping.
//!
//! Bindings are single chords such as `Ctrl+Shift+S`. Defaults cover the
//! whole menu; the `[keyboard.bindings]` config table can rebind or add
//! chords by command name.

use crate::command::Command;
use crate::config::Config;
use std::collections::HashMap;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Cmd on macOS, Win elsewhere
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl+Shift.
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.meta
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, stored lowercase
    Char(char),
    Enter,
    Escape,
    Tab,
    Delete,
    F(u8),
}

impl Key {
    /// Parses a key name such as `s`, `F3` or `Esc`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            "tab" => Some(Key::Tab),
            "delete" | "del" => Some(Key::Delete),
            _ if lower.starts_with('f') && lower.len() > 1 && lower.len() <= 3 => {
                lower[1..].parse().ok().filter(|n| (1..=24).contains(n)).map(Key::F)
            }
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Tab => write!(f, "Tab"),
            Key::Delete => write!(f, "Delete"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parses a binding string like `"Ctrl+Shift+S"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_str, mod_strs) = parts.split_last()?;
        let key = Key::parse(key_str)?;

        let mut modifiers = Modifiers::NONE;
        for m in mod_strs {
            match m.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "super" | "win" => modifiers.meta = true,
                _ => return None,
            }
        }

        Some(Self { key, modifiers })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Chord to command table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Command>,
}

impl Keymap {
    /// Creates a keymap with default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// Unparseable chords or unknown command names are logged and skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, cmd_str) in &config.keyboard.bindings {
            match (KeyPress::parse(key_str), Command::from_name(cmd_str)) {
                (Some(key), Some(cmd)) => keymap.bind(key, cmd),
                _ => tracing::warn!("Ignoring key binding {:?} = {:?}", key_str, cmd_str),
            }
        }

        keymap
    }

    /// Adds default key bindings.
    fn add_default_bindings(&mut self) {
        use Modifiers as M;

        let defaults = [
            ('n', M::CTRL, Command::New),
            ('o', M::CTRL, Command::Open { path: None }),
            ('s', M::CTRL, Command::Save),
            ('s', M::CTRL_SHIFT, Command::SaveAs),
            ('w', M::CTRL, Command::Close),
            ('z', M::CTRL, Command::Undo),
            ('y', M::CTRL, Command::Redo),
            ('x', M::CTRL, Command::Cut),
            ('c', M::CTRL, Command::Copy),
            ('v', M::CTRL, Command::Paste),
            ('a', M::CTRL, Command::SelectAll),
            ('f', M::CTRL, Command::Find { query: None }),
            (
                'h',
                M::CTRL,
                Command::Replace {
                    find: None,
                    replace_with: None,
                },
            ),
            ('g', M::CTRL, Command::GoToLine { input: None }),
            ('l', M::CTRL_SHIFT, Command::ToggleLineNumbers),
            ('w', M::CTRL_SHIFT, Command::ToggleWordWrap),
        ];

        for (c, modifiers, command) in defaults {
            self.bind(KeyPress::new(Key::Char(c), modifiers), command);
        }
    }

    /// Binds a chord, replacing any previous binding for it.
    pub fn bind(&mut self, key: KeyPress, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Looks up the command for a chord.
    pub fn lookup(&self, key: &KeyPress) -> Option<&Command> {
        self.bindings.get(key)
    }

    /// First chord bound to a command with the same name, for menu hints.
    ///
    /// Ties are broken by the rendered chord so the hint is stable.
    pub fn shortcut_for(&self, command: &Command) -> Option<KeyPress> {
        self.bindings
            .iter()
            .filter(|(_, bound)| bound.name() == command.name())
            .map(|(key, _)| *key)
            .min_by_key(|key| key.to_string())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
