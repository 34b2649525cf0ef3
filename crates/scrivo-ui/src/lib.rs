//! # Scrivo UI
//!
//! Desktop front end using the iced framework.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: `App`, which owns a `scrivo_core::Editor`
//! - **Message**: Events that can occur
//! - **Update**: (state, message) -> new state
//! - **View**: state -> UI elements
//!
//! ## Learning: Who owns the text?
//!
//! The core's `TextBuffer` is the source of truth. Each tab keeps an iced
//! `text_editor::Content` as a view of it:
//! - Typing is applied to the widget first, then reported to the core
//!   as the widget's lines joined with the document's line ending
//! - Core edits (undo, replace, cut from the menu) bump the buffer
//!   revision, and the widget is rebuilt from the core text
//!
//! Native dialogs and the system clipboard live behind small adapters so
//! the workflow in `scrivo-core` never touches a window.

pub mod app;
pub mod clipboard;
pub mod dialogs;
pub mod theme;

pub use app::{run, App, Flags};
