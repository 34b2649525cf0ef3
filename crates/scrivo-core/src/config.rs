//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! The `#[derive(Serialize, Deserialize)]` macro generates code to convert
//! structs to/from TOML. `#[serde(default)]` fills missing fields from
//! `Default::default()`, so a config file only needs the keys it changes:
//!
//! ```toml
//! [editor]
//! font_size = 17.0
//! line_numbers = false
//!
//! [keyboard.bindings]
//! "Ctrl+Q" = "exit"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editing behaviour
    pub editor: EditorConfig,

    /// File naming
    pub files: FileConfig,

    /// Initial window geometry
    pub window: WindowConfig,

    /// Keyboard settings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from `path`, or from the default location when `None`.
    ///
    /// Never fails: a missing file means defaults, and a broken one is
    /// logged and replaced by defaults.
    pub fn load(path: Option<&Path>) -> Self {
        Self::load_with_path(path).0
    }

    /// Like `load`, and also returns the file that changed settings are
    /// written back to.
    ///
    /// A file that exists but can't be read or parsed gets no write-back
    /// path, so it is never overwritten with defaults.
    pub fn load_with_path(path: Option<&Path>) -> (Self, Option<PathBuf>) {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Using default config: {}", e);
                    return (Self::default(), None);
                }
            },
        };

        if !target.exists() {
            tracing::debug!("No config at {}", target.display());
            return (Self::default(), Some(target));
        }
        match Self::load_from(&target) {
            Ok(config) => (config, Some(target)),
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                (Self::default(), None)
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("scrivo").join("config.toml"))
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Editor behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo history limit per document
    pub undo_limit: usize,

    /// Font size in points
    pub font_size: f32,

    /// Enable line wrapping
    pub word_wrap: bool,

    /// Show the line number gutter
    pub line_numbers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: 1000,
            font_size: 15.0,
            word_wrap: false,
            line_numbers: true,
        }
    }
}

/// File handling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Name suggested when saving a document that was never saved
    pub default_file_name: String,

    /// Label for documents without a path
    pub untitled_name: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_file_name: "document.txt".to_string(),
            untitled_name: "Untitled".to_string(),
        }
    }
}

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 700.0,
        }
    }
}

/// Keyboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Custom key bindings, chord -> command name
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
