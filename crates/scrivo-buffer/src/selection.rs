//! Text selection handling.
//!
//! A selection is an `anchor` (where it started) and a `head` (where the
//! caret is). Both are character offsets. When they are equal the selection
//! is just a caret. Ranges are half-open, so `start..end` slices directly.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A selection of text in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Fixed end of the selection
    pub anchor: usize,
    /// Moving end of the selection; the caret
    pub head: usize,
}

impl Selection {
    /// Creates a selection from `anchor` to `head`.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Creates a zero-width selection (caret only).
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Selects `start..end` with the caret at `end`.
    pub fn span(range: Range<usize>) -> Self {
        Self {
            anchor: range.start,
            head: range.end,
        }
    }

    /// Returns true if this is a zero-width selection.
    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// Lower bound of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper bound of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// The selected range, normalized.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Clamps both ends to a buffer of `len_chars` characters.
    pub fn clamped(&self, len_chars: usize) -> Self {
        Self {
            anchor: self.anchor.min(len_chars),
            head: self.head.min(len_chars),
        }
    }
}
