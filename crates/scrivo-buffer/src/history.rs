//! Undo/redo history management.
//!
//! ## The Command Pattern
//!
//! Each edit is stored as a value that can be:
//! - Undone (its inverse applied to the buffer)
//! - Redone (re-applied after undo)
//!
//! Edits are kept in groups. A group is one undo step: a burst of typing
//! coalesces into one group, and compound operations such as replace-all
//! are wrapped in `begin_group()`/`end_group()`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// The type of edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Text was inserted
    Insert,
    /// Text was deleted
    Delete,
}

/// A single edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// What kind of edit this is
    pub kind: EditKind,
    /// Character position where the edit occurred
    pub position: usize,
    /// The text that was inserted or deleted
    pub content: String,
}

impl Edit {
    /// Creates an insert edit.
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            content: content.into(),
        }
    }

    /// Creates a delete edit.
    pub fn delete(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            content: content.into(),
        }
    }

    /// Number of characters touched by this edit.
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Returns the inverse of this edit (for undo).
    pub fn inverse(&self) -> Self {
        Self {
            kind: match self.kind {
                EditKind::Insert => EditKind::Delete,
                EditKind::Delete => EditKind::Insert,
            },
            position: self.position,
            content: self.content.clone(),
        }
    }

    /// Returns true if `other` continues this edit.
    ///
    /// Inserts coalesce when typed one after another; deletes coalesce for
    /// repeated backspace or repeated forward-delete. Newlines end a run.
    pub fn can_coalesce(&self, other: &Edit) -> bool {
        if self.kind != other.kind {
            return false;
        }

        if self.content.contains('\n') || other.content.contains('\n') {
            return false;
        }

        match self.kind {
            EditKind::Insert => self.position + self.len_chars() == other.position,
            EditKind::Delete => {
                other.position + other.len_chars() == self.position
                    || self.position == other.position
            }
        }
    }

    /// Coalesces another edit into this one.
    pub fn coalesce(&mut self, other: Edit) {
        match self.kind {
            EditKind::Insert => {
                self.content.push_str(&other.content);
            }
            EditKind::Delete => {
                if other.position < self.position {
                    // Backspace: prepend
                    self.content = other.content + &self.content;
                    self.position = other.position;
                } else {
                    // Forward delete: append
                    self.content.push_str(&other.content);
                }
            }
        }
    }
}

/// A group of edits that are undone/redone together.
#[derive(Debug, Clone)]
pub struct EditGroup {
    /// The edits in application order
    pub edits: Vec<Edit>,
    /// Last time the group grew; `None` once sealed
    timestamp: Option<Instant>,
}

impl EditGroup {
    /// Creates a new open group.
    pub fn new(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            timestamp: Some(Instant::now()),
        }
    }

    fn empty() -> Self {
        Self {
            edits: Vec::new(),
            timestamp: Some(Instant::now()),
        }
    }

    fn sealed(edits: Vec<Edit>) -> Self {
        Self {
            edits,
            timestamp: None,
        }
    }

    /// Returns true if no further edits may coalesce into this group.
    pub fn is_sealed(&self) -> bool {
        self.timestamp.is_none()
    }
}

/// Manages undo/redo history.
///
/// ## Design
///
/// 1. **Bounded history**: the oldest groups are dropped past `max_size`
/// 2. **Edit coalescing**: rapid adjacent keystrokes form a single undo step
/// 3. **Edit grouping**: compound operations are one undo step
#[derive(Debug, Clone)]
pub struct History {
    /// Stack of undoable edit groups
    undo_stack: VecDeque<EditGroup>,
    /// Stack of redoable edit groups
    redo_stack: Vec<EditGroup>,
    /// Maximum number of edit groups to keep
    max_size: usize,
    /// Time window for coalescing edits
    coalesce_threshold: Duration,
    /// Whether we're inside `begin_group`/`end_group`
    in_group: bool,
}

impl History {
    /// Creates a new history with the given capacity.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_size.min(64)),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
            coalesce_threshold: Duration::from_millis(300),
            in_group: false,
        }
    }

    /// Pushes an edit onto the history.
    ///
    /// Clears the redo stack; branching history is not supported.
    pub fn push(&mut self, edit: Edit) {
        self.redo_stack.clear();

        if self.in_group {
            if let Some(group) = self.undo_stack.back_mut() {
                group.edits.push(edit);
                return;
            }
        }

        if let Some(last_group) = self.undo_stack.back_mut() {
            if let Some(timestamp) = last_group.timestamp {
                if timestamp.elapsed() < self.coalesce_threshold {
                    if let Some(last_edit) = last_group.edits.last_mut() {
                        if last_edit.can_coalesce(&edit) {
                            last_edit.coalesce(edit);
                            last_group.timestamp = Some(Instant::now());
                            return;
                        }
                    }
                }
            }
        }

        self.push_group(EditGroup::new(edit));
    }

    fn push_group(&mut self, group: EditGroup) {
        self.undo_stack.push_back(group);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    /// Starts an edit group.
    ///
    /// All edits until `end_group()` are one undo step.
    pub fn begin_group(&mut self) {
        self.seal();
        self.redo_stack.clear();
        self.push_group(EditGroup::empty());
        self.in_group = true;
    }

    /// Ends the current edit group.
    pub fn end_group(&mut self) {
        self.in_group = false;
        if self
            .undo_stack
            .back()
            .is_some_and(|group| group.edits.is_empty())
        {
            self.undo_stack.pop_back();
        }
        self.seal();
    }

    /// Stops the most recent group from absorbing further edits.
    pub fn seal(&mut self) {
        if let Some(group) = self.undo_stack.back_mut() {
            group.timestamp = None;
        }
    }

    /// Pops the last group for undo.
    ///
    /// The returned edits are in application order; the caller reverses them.
    pub fn undo(&mut self) -> Option<EditGroup> {
        let group = self.undo_stack.pop_back()?;
        self.redo_stack.push(EditGroup::sealed(group.edits.clone()));
        Some(group)
    }

    /// Pops the last undone group for redo.
    pub fn redo(&mut self) -> Option<EditGroup> {
        let group = self.redo_stack.pop()?;
        self.push_group(EditGroup::sealed(group.edits.clone()));
        Some(group)
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.in_group = false;
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
