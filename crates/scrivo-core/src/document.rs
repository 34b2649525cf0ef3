//! Documents and the registry of open tabs.
//!
//! ## Learning: Type Aliases and Newtypes
//!
//! `DocumentId` is a newtype wrapper around `Uuid`. This provides:
//! - Type safety: a tab index can't be passed where an id is expected
//! - Stability: ids survive reordering and removal of other tabs
//!
//! The UI keeps only ids. Everything it shows about a tab (title, dirty
//! marker, caret) is read back from the registry on each render.

use scrivo_buffer::search;
use scrivo_buffer::{LineEnding, Position, Selection, TextBuffer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new unique document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open tab: a text buffer plus the metadata the workflow needs.
///
/// ## Dirty tracking
///
/// `dirty` is raised by every user-originated change and cleared only by
/// `load()` or `mark_saved()`. While `loading` is set, changes never raise
/// it, so programmatic content injection can't masquerade as an edit.
#[derive(Debug)]
pub struct Document {
    /// Unique identifier
    id: DocumentId,

    /// The underlying text buffer
    buffer: TextBuffer,

    /// Selection; the caret is `selection.head`
    selection: Selection,

    /// File path (None until first saved)
    path: Option<PathBuf>,

    /// Separator found on load, kept on save
    line_ending: LineEnding,

    /// Unsaved changes
    dirty: bool,

    /// Content is being injected, not typed
    loading: bool,
}

impl Document {
    /// Creates a new empty document keeping `history_limit` undo steps.
    pub fn new(history_limit: usize) -> Self {
        Self {
            id: DocumentId::new(),
            buffer: TextBuffer::with_history_limit(history_limit),
            selection: Selection::default(),
            path: None,
            line_ending: LineEnding::default(),
            dirty: false,
            loading: false,
        }
    }

    // ==================== Getters ====================

    /// Returns the document ID.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the file path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// Line separator the file on disk uses.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Returns true if the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Raises or lowers the loading guard.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns the text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns all text.
    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    /// Changes whenever the text does.
    pub fn revision(&self) -> u64 {
        self.buffer.revision()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret offset in characters.
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    /// Caret as a line/column pair.
    pub fn caret_position(&self) -> Position {
        self.buffer
            .char_idx_to_position(self.caret())
            .unwrap_or_default()
    }

    /// True for a fresh tab: never saved, never edited, no text.
    pub fn is_untouched(&self) -> bool {
        self.path.is_none() && !self.dirty && self.buffer.is_empty()
    }

    /// File name, or `untitled` for a document that was never saved.
    pub fn display_name(&self, untitled: &str) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| untitled.to_string())
    }

    /// Tab label: the display name, with ` *` when dirty.
    pub fn title(&self, untitled: &str) -> String {
        let name = self.display_name(untitled);
        if self.dirty {
            format!("{} *", name)
        } else {
            name
        }
    }

    // ==================== Loading & Saving ====================

    /// Replaces the content with text read from `path`.
    ///
    /// The document ends up clean with the caret at the start and no undo
    /// history. The text is kept as is; its line ending is remembered.
    pub fn load(&mut self, text: &str, path: Option<PathBuf>) {
        self.loading = true;
        self.line_ending = LineEnding::detect(text);
        self.buffer.set_content(text);
        self.path = path;
        self.dirty = false;
        self.loading = false;
        self.selection = Selection::caret(0);
    }

    /// Clears the dirty flag after a successful write.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
        self.buffer.seal_history();
    }

    fn touch(&mut self) {
        if !self.loading {
            self.dirty = true;
        }
    }

    // ==================== Text Editing ====================

    /// Takes the full text reported by the editing widget after a keystroke.
    ///
    /// Returns true if the text actually changed.
    pub fn notify_user_edit(&mut self, text: &str) -> CoreResult<bool> {
        let changed = self.buffer.apply_text(text)?;
        if changed {
            self.touch();
            self.selection = self.selection.clamped(self.buffer.len_chars());
        }
        Ok(changed)
    }

    /// Replaces the selection with `text` and leaves the caret after it.
    pub fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        let range = self.selection.range();
        if range.is_empty() && text.is_empty() {
            return Ok(());
        }
        self.buffer.seal_history();
        self.buffer.replace(range.clone(), text)?;
        self.selection = Selection::caret(range.start + text.chars().count());
        self.touch();
        Ok(())
    }

    /// Same as typing: replaces the selection.
    pub fn paste(&mut self, text: &str) -> CoreResult<()> {
        self.insert_text(text)
    }

    /// Deletes the selection, or the character before the caret.
    pub fn delete_backward(&mut self) -> CoreResult<()> {
        let range = if self.selection.is_caret() {
            let caret = self.caret();
            if caret == 0 {
                return Ok(());
            }
            caret - 1..caret
        } else {
            self.selection.range()
        };
        self.delete_range(range)
    }

    /// Deletes the selection, or the character after the caret.
    pub fn delete_forward(&mut self) -> CoreResult<()> {
        let range = if self.selection.is_caret() {
            let caret = self.caret();
            if caret >= self.buffer.len_chars() {
                return Ok(());
            }
            caret..caret + 1
        } else {
            self.selection.range()
        };
        self.delete_range(range)
    }

    fn delete_range(&mut self, range: Range<usize>) -> CoreResult<()> {
        self.buffer.delete(range.clone())?;
        self.selection = Selection::caret(range.start);
        self.touch();
        Ok(())
    }

    /// Returns the selected text, if anything is selected.
    pub fn selected_text(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        self.buffer
            .slice(self.selection.range())
            .ok()
            .map(|s| s.into_owned())
    }

    /// Removes the selection and returns it.
    pub fn cut(&mut self) -> CoreResult<Option<String>> {
        let Some(text) = self.selected_text() else {
            return Ok(None);
        };
        self.delete_range(self.selection.range())?;
        Ok(Some(text))
    }

    /// Selects all text.
    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.buffer.len_chars());
    }

    /// Moves the selection, clamped to the text.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.buffer.len_chars());
    }

    // ==================== Undo/Redo ====================

    /// Undoes the last edit. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.buffer.undo() {
            Ok(caret) => {
                self.selection = Selection::caret(caret);
                self.touch();
                true
            }
            Err(_) => false,
        }
    }

    /// Redoes the last undone edit. Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.buffer.redo() {
            Ok(caret) => {
                self.selection = Selection::caret(caret);
                self.touch();
                true
            }
            Err(_) => false,
        }
    }

    // ==================== Search ====================

    /// Selects the next case-insensitive match of `query` after the
    /// selection, wrapping to the start once.
    ///
    /// Leaves the selection untouched when there is no match.
    pub fn find_next(&mut self, query: &str) -> Option<Range<usize>> {
        let start = self.buffer.find_wrapping(query, self.selection.end())?;
        let range = start..start + query.chars().count();
        self.selection = Selection::span(range.clone());
        Some(range)
    }

    /// Replaces every match of `find` as one undo step.
    ///
    /// The document counts as changed even if nothing matched.
    pub fn replace_all(&mut self, find: &str, replace_with: &str) -> usize {
        let count = self.buffer.replace_all_ignore_case(find, replace_with);
        self.touch();
        self.selection = self.selection.clamped(self.buffer.len_chars());
        count
    }

    /// Replaces one match of `find` and leaves the caret after it.
    ///
    /// A selection that is itself a match is replaced; otherwise the next
    /// match after the selection is, wrapping once. Returns the range of
    /// the inserted text, or `None` when nothing matched.
    pub fn replace_next(
        &mut self,
        find: &str,
        replace_with: &str,
    ) -> CoreResult<Option<Range<usize>>> {
        let len = find.chars().count();
        let selected_match = self.selected_text().is_some_and(|text| {
            text.chars().count() == len && search::find_ignore_case(&text, find, 0) == Some(0)
        });

        let range = if selected_match {
            self.selection.range()
        } else {
            match self.buffer.find_wrapping(find, self.selection.end()) {
                Some(start) => start..start + len,
                None => return Ok(None),
            }
        };

        self.buffer.seal_history();
        self.buffer.replace(range.clone(), replace_with)?;
        let end = range.start + replace_with.chars().count();
        self.selection = Selection::caret(end);
        self.touch();
        Ok(Some(range.start..end))
    }

    /// Puts the caret at the start of 1-based line `line`, clamped to the
    /// last line. Returns the line actually reached.
    pub fn go_to_line(&mut self, line: usize) -> usize {
        let last = self.buffer.len_lines();
        let target = line.clamp(1, last);
        let offset = self.buffer.line_to_char(target - 1).unwrap_or(0);
        self.selection = Selection::caret(offset);
        target
    }
}

/// Open documents in tab order, with exactly one selected.
///
/// ## Design
///
/// Documents live in a map keyed by id; `order` carries the tab order, so
/// iteration is always left to right.
#[derive(Debug)]
pub struct DocumentRegistry {
    /// All open documents
    documents: HashMap<DocumentId, Document>,

    /// Tab order
    order: Vec<DocumentId>,

    /// Currently selected document
    selected: Option<DocumentId>,

    /// Undo limit for new documents
    history_limit: usize,
}

impl DocumentRegistry {
    /// Creates a registry holding one empty document.
    pub fn new(history_limit: usize) -> Self {
        let mut registry = Self {
            documents: HashMap::new(),
            order: Vec::new(),
            selected: None,
            history_limit,
        };
        registry.create("", None);
        registry
    }

    /// Appends a document and selects it.
    pub fn create(&mut self, initial_text: &str, path: Option<PathBuf>) -> DocumentId {
        let mut doc = Document::new(self.history_limit);
        doc.load(initial_text, path);
        let id = doc.id();
        self.documents.insert(id, doc);
        self.order.push(id);
        self.selected = Some(id);
        id
    }

    /// Removes a document.
    ///
    /// If it was selected, its right-hand neighbour (or the new last tab)
    /// takes over. Removing the last document opens a fresh one.
    pub fn remove(&mut self, id: DocumentId) -> CoreResult<Document> {
        let index = self.position(id).ok_or(CoreError::DocumentNotFound(id))?;
        let doc = self
            .documents
            .remove(&id)
            .ok_or(CoreError::DocumentNotFound(id))?;
        self.order.remove(index);

        if self.order.is_empty() {
            self.create("", None);
        } else if self.selected == Some(id) {
            let next = index.min(self.order.len() - 1);
            self.selected = Some(self.order[next]);
        }

        Ok(doc)
    }

    /// Returns a document by ID.
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Returns a mutable document by ID.
    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    pub fn selected(&self) -> Option<DocumentId> {
        self.selected
    }

    /// Returns the selected document.
    pub fn selected_doc(&self) -> Option<&Document> {
        self.selected.and_then(|id| self.documents.get(&id))
    }

    /// Returns a mutable reference to the selected document.
    pub fn selected_doc_mut(&mut self) -> Option<&mut Document> {
        self.selected.and_then(|id| self.documents.get_mut(&id))
    }

    /// Selects a document. Unknown ids are ignored.
    pub fn select(&mut self, id: DocumentId) -> bool {
        if self.documents.contains_key(&id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Tab index of a document.
    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.order.iter().position(|&i| i == id)
    }

    /// Ids in tab order.
    pub fn ids(&self) -> &[DocumentId] {
        &self.order
    }

    /// Documents in tab order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|id| self.documents.get(id))
    }

    /// Returns the number of open documents.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no documents are open.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
