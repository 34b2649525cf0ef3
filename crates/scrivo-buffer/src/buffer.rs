//! Core text buffer implementation using a rope.
//!
//! ## Why Rope?
//!
//! Ropes give O(log n) insertions and deletions anywhere in the text and
//! cheap line/char index conversions, which is what caret tracking and
//! go-to-line need.
//!
//! ## Revisions
//!
//! Every mutation bumps `revision`. Views that keep their own copy of the
//! text (the on-screen widget) compare revisions to know when to resync.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

use crate::history::{Edit, EditKind, History};
use crate::search;
use crate::{BufferError, BufferResult, Position};

const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// A text buffer backed by a rope, with undo history.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Edit history for undo/redo
    history: History,

    /// Incremented on every content change
    revision: u64,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use scrivo_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates an empty buffer keeping at most `limit` undo steps.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            rope: Rope::new(),
            history: History::new(limit),
            revision: 0,
        }
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a specific line (0-indexed), including its trailing newline.
    pub fn line(&self, line_idx: usize) -> BufferResult<Cow<'_, str>> {
        if line_idx >= self.len_lines() {
            return Err(BufferError::PositionOutOfBounds {
                line: line_idx,
                column: 0,
            });
        }
        Ok(self.rope.line(line_idx).into())
    }

    /// Returns a slice of text by character range.
    pub fn slice(&self, range: Range<usize>) -> BufferResult<Cow<'_, str>> {
        self.check_range(&range)?;
        Ok(self.rope.slice(range).into())
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// An empty buffer has 1 line. A buffer ending with `\n` counts
    /// the empty line after it.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the char index of the first character of a line.
    pub fn line_to_char(&self, line_idx: usize) -> BufferResult<usize> {
        if line_idx >= self.len_lines() {
            return Err(BufferError::PositionOutOfBounds {
                line: line_idx,
                column: 0,
            });
        }
        Ok(self.rope.line_to_char(line_idx))
    }

    /// Current revision; changes whenever the content does.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==================== Content Replacement ====================

    /// Replaces the whole content without recording an edit.
    ///
    /// History is cleared: undo must never step back across a load.
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.history.clear();
        self.bump();
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        if text.is_empty() {
            return Ok(());
        }

        self.history.push(Edit::insert(char_idx, text));
        self.rope.insert(char_idx, text);
        self.bump();
        Ok(())
    }

    /// Deletes text in a character range, returning what was removed.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(String::new());
        }

        let deleted: String = self.rope.slice(range.clone()).into();
        self.history.push(Edit::delete(range.start, deleted.clone()));
        self.rope.remove(range);
        self.bump();
        Ok(deleted)
    }

    /// Replaces text in a range with new text as a single undo step.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> BufferResult<String> {
        self.check_range(&range)?;
        self.history.begin_group();
        let deleted = self.delete(range.clone());
        let inserted = deleted
            .and_then(|deleted| self.insert(range.start, text).map(|()| deleted));
        self.history.end_group();
        inserted
    }

    /// Replaces the content with `text` as a user edit.
    ///
    /// Only the span between the common prefix and suffix is touched, so a
    /// keystroke reported as a whole new text still records a one-character
    /// edit and coalesces with its neighbours.
    pub fn apply_text(&mut self, text: &str) -> BufferResult<bool> {
        let current = self.text().into_owned();
        if current == text {
            return Ok(false);
        }

        let old: Vec<char> = current.chars().collect();
        let new: Vec<char> = text.chars().collect();

        let prefix = old
            .iter()
            .zip(&new)
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let removed = prefix..old.len() - suffix;
        let inserted: String = new[prefix..new.len() - suffix].iter().collect();

        match (removed.is_empty(), inserted.is_empty()) {
            (false, false) => {
                self.replace(removed, &inserted)?;
            }
            (false, true) => {
                self.delete(removed)?;
            }
            (true, _) => self.insert(prefix, &inserted)?,
        }
        Ok(true)
    }

    /// Replaces every case-insensitive match of `needle` as one undo step.
    ///
    /// Returns the number of replacements.
    pub fn replace_all_ignore_case(&mut self, needle: &str, replacement: &str) -> usize {
        let (replaced, count) = search::replace_all_ignore_case(&self.text(), needle, replacement);
        if count > 0 {
            let len = self.len_chars();
            // The range covers the whole buffer and is always valid.
            let _ = self.replace(0..len, &replaced);
        }
        count
    }

    // ==================== Undo/Redo ====================

    /// Closes the current undo step so the next edit starts a new one.
    pub fn seal_history(&mut self) {
        self.history.seal();
    }

    /// Undoes the last edit group.
    ///
    /// Returns the char index where the caret belongs afterwards.
    pub fn undo(&mut self) -> BufferResult<usize> {
        let group = self.history.undo().ok_or(BufferError::NothingToUndo)?;

        let mut caret = 0;
        for edit in group.edits.iter().rev() {
            caret = self.apply_raw(&edit.inverse());
        }
        self.bump();
        Ok(caret)
    }

    /// Redoes the last undone edit group.
    ///
    /// Returns the char index where the caret belongs afterwards.
    pub fn redo(&mut self) -> BufferResult<usize> {
        let group = self.history.redo().ok_or(BufferError::NothingToRedo)?;

        let mut caret = 0;
        for edit in &group.edits {
            caret = self.apply_raw(edit);
        }
        self.bump();
        Ok(caret)
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies an edit without recording it; returns the caret after it.
    fn apply_raw(&mut self, edit: &Edit) -> usize {
        match edit.kind {
            EditKind::Insert => {
                self.rope.insert(edit.position, &edit.content);
                edit.position + edit.len_chars()
            }
            EditKind::Delete => {
                let end = edit.position + edit.len_chars();
                self.rope.remove(edit.position..end);
                edit.position
            }
        }
    }

    // ==================== Position Conversion ====================

    /// Converts a Position (line, column) to a character index.
    pub fn position_to_char_idx(&self, pos: Position) -> BufferResult<usize> {
        let out_of_bounds = BufferError::PositionOutOfBounds {
            line: pos.line,
            column: pos.column,
        };
        if pos.line >= self.len_lines() {
            return Err(out_of_bounds);
        }

        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.rope.line(pos.line).len_chars();

        // Column may sit at the end of the line (for insertion)
        if pos.column > line_len {
            return Err(out_of_bounds);
        }

        Ok(line_start + pos.column)
    }

    /// Converts a character index to a Position (line, column).
    pub fn char_idx_to_position(&self, char_idx: usize) -> BufferResult<Position> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        let line = self.rope.char_to_line(char_idx);
        let column = char_idx - self.rope.line_to_char(line);
        Ok(Position { line, column })
    }

    // ==================== Search ====================

    /// Finds `needle` ignoring case, starting at `from` and wrapping once.
    pub fn find_wrapping(&self, needle: &str, from: usize) -> Option<usize> {
        search::find_wrapping(&self.text(), needle, from)
    }

    fn check_range(&self, range: &Range<usize>) -> BufferResult<()> {
        if range.start > range.end {
            return Err(BufferError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        Ok(())
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        let mut buffer = Self::new();
        buffer.rope = Rope::from_str(s);
        buffer
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
