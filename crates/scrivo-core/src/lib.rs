//! # Scrivo Core
//!
//! Editor state and document workflow, independent of any GUI toolkit.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Editor                           │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────────┐  │
//! │  │  Config  │ │  Keymap  │ │ EventBus │ │ Status line │  │
//! │  └──────────┘ └──────────┘ └──────────┘ └─────────────┘  │
//! │  ┌────────────────────────────────────────────┐          │
//! │  │             Document Registry              │          │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐       │          │
//! │  │  │  Doc 1  │ │  Doc 2  │ │  Doc 3  │       │          │
//! │  │  └─────────┘ └─────────┘ └─────────┘       │          │
//! │  └────────────────────────────────────────────┘          │
//! └──────────────────────────────────────────────────────────┘
//!              │ pick path / confirm / report
//!              ▼
//!         dyn Dialogs  (native dialogs in the UI, scripted in tests)
//! ```
//!
//! ## Learning: Collaborator Traits
//!
//! Anything that needs a human answer goes through the `Dialogs` trait.
//! The workflow code never touches a window, so every save/close/exit path
//! can be driven from a unit test with a scripted implementation.

pub mod command;
pub mod config;
pub mod dialogs;
pub mod document;
pub mod editor;
pub mod event;
pub mod keymap;
pub mod status;

pub use command::{Command, CommandOutcome};
pub use config::Config;
pub use dialogs::{CloseChoice, Dialogs};
pub use document::{Document, DocumentId, DocumentRegistry};
pub use editor::{Editor, FindOutcome, SaveOutcome};
pub use event::{EditorEvent, EventBus};
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use status::StatusLine;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("No active document")]
    NoActiveDocument,

    #[error("Invalid line number: {0:?}")]
    InvalidLineNumber(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] scrivo_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
