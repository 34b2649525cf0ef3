//! # Scrivo Buffer
//!
//! Text storage for a single open document.
//!
//! ## Key Concepts
//!
//! ### Two ways to change text
//! - `set_content()` replaces everything without touching undo history.
//!   Loading a file goes through here, so a load is never an "edit".
//! - `insert()`, `delete()`, `replace()` are edits: they are recorded in
//!   the history and can be undone.
//!
//! ### Line endings
//! Text is kept byte for byte as loaded, `\r\n` included. `LineEnding`
//! records which separator a document uses so line-based views can
//! rebuild its text.
//!
//! ### Offsets
//! All offsets are character indices (not bytes). `Position` converts them
//! to 0-indexed line/column pairs for display.

mod buffer;
mod history;
mod line_ending;
mod position;
pub mod search;
mod selection;

pub use buffer::TextBuffer;
pub use history::{Edit, EditGroup, EditKind, History};
pub use line_ending::LineEnding;
pub use position::Position;
pub use selection::Selection;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len_chars(), 0);
        assert_eq!(buffer.len_lines(), 1);
    }

    #[test]
    fn test_buffer_from_string() {
        let buffer = TextBuffer::from("Ciao, mondo!");
        assert_eq!(buffer.len_chars(), 12);
        assert_eq!(buffer.text(), "Ciao, mondo!");
    }

    #[test]
    fn test_insert_and_delete() {
        let mut buffer = TextBuffer::new();
        buffer.insert(0, "Hello").unwrap();
        assert_eq!(buffer.text(), "Hello");

        buffer.insert(5, ", World!").unwrap();
        assert_eq!(buffer.text(), "Hello, World!");

        buffer.delete(5..7).unwrap();
        assert_eq!(buffer.text(), "HelloWorld!");
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = TextBuffer::new();
        buffer.insert(0, "Hello").unwrap();
        buffer.seal_history();
        buffer.insert(5, " World").unwrap();

        assert_eq!(buffer.text(), "Hello World");

        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "Hello");

        buffer.redo().unwrap();
        assert_eq!(buffer.text(), "Hello World");
    }

    #[test]
    fn test_line_operations() {
        let buffer = TextBuffer::from("Line 1\nLine 2\nLine 3");
        assert_eq!(buffer.len_lines(), 3);
        assert_eq!(buffer.line(0).unwrap(), "Line 1\n");
        assert_eq!(buffer.line(2).unwrap(), "Line 3");
        assert_eq!(buffer.line_to_char(1).unwrap(), 7);
    }
}
