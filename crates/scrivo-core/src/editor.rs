//! Main editor orchestration.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` acts as a facade over the registry, config, keymap and event
//! bus. The UI only talks to `Editor`; everything that needs an answer
//! from a person goes through the `Dialogs` argument.
//!
//! ## Failure policy
//!
//! File errors are logged, shown through `Dialogs::show_error`, and leave
//! the previous state intact. Cancelling a prompt is silent.

use std::num::IntErrorKind;
use std::ops::Range;
use std::path::{Path, PathBuf};

use scrivo_buffer::Selection;

use crate::command::{Command, CommandOutcome};
use crate::config::Config;
use crate::dialogs::{CloseChoice, Dialogs};
use crate::document::{Document, DocumentId, DocumentRegistry};
use crate::event::{EditorEvent, EventBus};
use crate::keymap::Keymap;
use crate::status::StatusLine;
use crate::{CoreError, CoreResult};

/// Result of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to disk
    Saved,
    /// The user dismissed the save dialog
    Cancelled,
    /// Writing failed; the error has been reported
    Failed,
}

/// Result of a find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// The match is now selected
    Found(Range<usize>),
    /// No match anywhere in the document
    NotFound,
    /// Empty query; nothing was searched
    Ignored,
}

/// The main editor state.
///
/// ## Thread Safety
///
/// `Editor` is owned by the UI thread. All file I/O is synchronous and
/// finishes inside the call that started it.
pub struct Editor {
    /// Open documents
    documents: DocumentRegistry,

    /// Editor configuration
    config: Config,

    /// File that changed settings are written to
    config_path: Option<PathBuf>,

    /// Key bindings
    keymap: Keymap,

    /// Event bus for notifications
    event_bus: EventBus,

    /// Text of the last cut or copy
    clipboard: String,

    /// Transient message for the status bar
    message: Option<String>,

    /// Set once every document agreed to close
    exit_requested: bool,
}

impl Editor {
    /// Creates a new editor instance.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an editor with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let keymap = Keymap::from_config(&config);
        Self {
            documents: DocumentRegistry::new(config.editor.undo_limit),
            config,
            config_path: None,
            keymap,
            event_bus: EventBus::new(),
            clipboard: String::new(),
            message: None,
            exit_requested: false,
        }
    }

    // ==================== Accessors ====================

    /// Returns the document registry.
    pub fn documents(&self) -> &DocumentRegistry {
        &self.documents
    }

    /// Returns a document by ID.
    pub fn document(&self, id: DocumentId) -> CoreResult<&Document> {
        self.documents
            .get(id)
            .ok_or(CoreError::DocumentNotFound(id))
    }

    /// Returns the selected document.
    pub fn selected_document(&self) -> CoreResult<&Document> {
        self.documents
            .selected_doc()
            .ok_or(CoreError::NoActiveDocument)
    }

    fn selected_document_mut(&mut self) -> CoreResult<&mut Document> {
        self.documents
            .selected_doc_mut()
            .ok_or(CoreError::NoActiveDocument)
    }

    /// Returns the editor configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sets where `set_config` writes the configuration. With `None`
    /// changes last until exit.
    pub fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Updates the configuration, rebuilds the keymap and writes the
    /// config file.
    ///
    /// A failed write is logged; the new settings still apply.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        self.keymap = Keymap::from_config(&self.config);

        if let Some(path) = &self.config_path {
            match self.config.save_to(path) {
                Ok(()) => tracing::debug!("Wrote config to {}", path.display()),
                Err(e) => tracing::warn!("Failed to write {}: {}", path.display(), e),
            }
        }
        self.emit(EditorEvent::ConfigChanged);
    }

    /// Shows or hides the line number gutter. Returns the new setting.
    pub fn toggle_line_numbers(&mut self) -> bool {
        let mut config = self.config.clone();
        config.editor.line_numbers = !config.editor.line_numbers;
        self.set_config(config);
        self.config.editor.line_numbers
    }

    /// Turns word wrap on or off. Returns the new setting.
    pub fn toggle_word_wrap(&mut self) -> bool {
        let mut config = self.config.clone();
        config.editor.word_wrap = !config.editor.word_wrap;
        self.set_config(config);
        self.config.editor.word_wrap
    }

    /// Returns the keymap.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn untitled(&self) -> &str {
        &self.config.files.untitled_name
    }

    /// Tab label for a document.
    pub fn title(&self, id: DocumentId) -> Option<String> {
        self.documents.get(id).map(|doc| doc.title(self.untitled()))
    }

    /// Window title: the selected tab's label and the application name.
    pub fn window_title(&self) -> String {
        match self.documents.selected_doc() {
            Some(doc) => format!("{} - Scrivo", doc.title(self.untitled())),
            None => "Scrivo".to_string(),
        }
    }

    /// Status line for the selected document.
    pub fn status(&self) -> StatusLine {
        match self.documents.selected_doc() {
            Some(doc) => StatusLine::for_document(doc, self.untitled()),
            None => StatusLine::ready(),
        }
    }

    /// Last transient message, such as "Saved notes.txt".
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true once an exit request went through.
    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Returns true if any document has unsaved changes.
    pub fn has_unsaved_changes(&self) -> bool {
        self.documents.iter().any(Document::is_dirty)
    }

    // ==================== Document Operations ====================

    /// Makes a document the selected tab.
    pub fn select(&mut self, id: DocumentId) -> bool {
        let selected = self.documents.select(id);
        if selected {
            self.emit(EditorEvent::DocumentFocused(id));
        }
        selected
    }

    /// Creates a new untitled document.
    pub fn new_document(&mut self) -> DocumentId {
        let id = self.documents.create("", None);
        tracing::debug!("New document {}", id);

        self.emit(EditorEvent::DocumentOpened(id));
        self.emit(EditorEvent::DocumentFocused(id));
        id
    }

    /// Loads a file.
    ///
    /// A fresh, untouched selected tab is reused; otherwise a new tab is
    /// created. Errors leave every document as it was.
    pub fn open_path(&mut self, path: &Path) -> CoreResult<DocumentId> {
        let text = std::fs::read_to_string(path)?;

        let reusable = self
            .documents
            .selected_doc()
            .filter(|doc| doc.is_untouched())
            .map(Document::id);
        let id = match reusable {
            Some(id) => id,
            None => {
                let id = self.documents.create("", None);
                self.emit(EditorEvent::DocumentOpened(id));
                id
            }
        };

        let doc = self
            .documents
            .get_mut(id)
            .ok_or(CoreError::DocumentNotFound(id))?;
        doc.load(&text, Some(path.to_path_buf()));
        tracing::info!("Opened {}", path.display());

        self.message = None;
        self.emit(EditorEvent::DocumentChanged(id));
        self.emit(EditorEvent::DocumentFocused(id));
        Ok(id)
    }

    /// Opens `path`, or asks the file picker when `None`.
    ///
    /// Returns `None` when the user cancels or the file can't be read.
    pub fn open(&mut self, path: Option<PathBuf>, dialogs: &mut dyn Dialogs) -> Option<DocumentId> {
        let Some(path) = path.or_else(|| dialogs.pick_open_path()) else {
            tracing::debug!("Open cancelled");
            return None;
        };

        match self.open_path(&path) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", path.display(), e);
                dialogs.show_error(
                    "Open failed",
                    &format!("Could not open {}:\n{}", path.display(), e),
                );
                None
            }
        }
    }

    /// Writes a document to its path, asking for one if it has none.
    pub fn save(&mut self, id: DocumentId, dialogs: &mut dyn Dialogs) -> SaveOutcome {
        let Some(doc) = self.documents.get(id) else {
            return SaveOutcome::Failed;
        };
        let Some(path) = doc.path().map(Path::to_path_buf) else {
            return self.save_as(id, dialogs);
        };

        if let Err(e) = std::fs::write(&path, doc.text().as_bytes()) {
            tracing::warn!("Failed to save {}: {}", path.display(), e);
            dialogs.show_error(
                "Save failed",
                &format!("Could not save {}:\n{}", path.display(), e),
            );
            return SaveOutcome::Failed;
        }

        if let Some(doc) = self.documents.get_mut(id) {
            doc.mark_saved();
        }
        tracing::info!("Saved {}", path.display());
        self.message = Some(format!("Saved {}", path.display()));
        self.emit(EditorEvent::DocumentSaved(id));
        SaveOutcome::Saved
    }

    /// Asks for a new path, then saves there.
    pub fn save_as(&mut self, id: DocumentId, dialogs: &mut dyn Dialogs) -> SaveOutcome {
        let Some(doc) = self.documents.get(id) else {
            return SaveOutcome::Failed;
        };
        let default_name = doc
            .path()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.files.default_file_name.clone());

        let Some(path) = dialogs.pick_save_path(&default_name) else {
            tracing::debug!("Save as cancelled");
            return SaveOutcome::Cancelled;
        };

        if let Some(doc) = self.documents.get_mut(id) {
            doc.set_path(path);
        }
        self.save(id, dialogs)
    }

    /// Saves every dirty document in tab order.
    ///
    /// Stops at the first document that isn't saved. The selected tab is
    /// the same before and after.
    pub fn save_all(&mut self, dialogs: &mut dyn Dialogs) -> SaveOutcome {
        let original = self.documents.selected();
        let dirty: Vec<DocumentId> = self
            .documents
            .iter()
            .filter(|doc| doc.is_dirty())
            .map(Document::id)
            .collect();

        let mut outcome = SaveOutcome::Saved;
        for id in dirty {
            self.select(id);
            outcome = self.save(id, dialogs);
            if outcome != SaveOutcome::Saved {
                tracing::debug!("Save all stopped at {}", id);
                break;
            }
        }

        if let Some(original) = original {
            self.select(original);
        }
        outcome
    }

    /// Decides whether a document may close, prompting if it is dirty.
    pub fn confirm_close(&mut self, id: DocumentId, dialogs: &mut dyn Dialogs) -> bool {
        let Some(doc) = self.documents.get(id) else {
            return true;
        };
        if !doc.is_dirty() {
            return true;
        }

        let name = doc.display_name(self.untitled());
        match dialogs.confirm_unsaved(&name) {
            CloseChoice::Cancel => {
                tracing::debug!("Close of {} cancelled", name);
                false
            }
            CloseChoice::Discard => true,
            CloseChoice::Save => {
                self.select(id);
                self.save(id, dialogs) == SaveOutcome::Saved
            }
        }
    }

    /// Closes a document after confirmation. Returns true if it closed.
    pub fn close_document(&mut self, id: DocumentId, dialogs: &mut dyn Dialogs) -> bool {
        if !self.confirm_close(id, dialogs) {
            return false;
        }
        self.remove(id)
    }

    /// Closes the selected document after confirmation.
    pub fn close_current(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        match self.documents.selected() {
            Some(id) => self.close_document(id, dialogs),
            None => false,
        }
    }

    /// Closes every document, or none if any confirmation is denied.
    pub fn close_all(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let ids = self.documents.ids().to_vec();
        for &id in &ids {
            if !self.confirm_close(id, dialogs) {
                return false;
            }
        }

        for id in ids {
            self.remove(id);
        }
        tracing::info!("Closed all documents");
        true
    }

    /// Confirms every document in tab order.
    ///
    /// Returns true if the application may exit. Nothing is closed either
    /// way; the caller tears down the window.
    pub fn request_exit(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let ids = self.documents.ids().to_vec();
        for id in ids {
            if !self.confirm_close(id, dialogs) {
                tracing::debug!("Exit cancelled");
                return false;
            }
        }

        self.exit_requested = true;
        self.emit(EditorEvent::Exit);
        true
    }

    fn remove(&mut self, id: DocumentId) -> bool {
        let was_last = self.documents.len() == 1;
        if let Err(e) = self.documents.remove(id) {
            tracing::warn!("{}", e);
            return false;
        }
        tracing::debug!("Closed {}", id);
        self.emit(EditorEvent::DocumentClosed(id));

        if let Some(selected) = self.documents.selected() {
            if was_last {
                self.emit(EditorEvent::DocumentOpened(selected));
            }
            self.emit(EditorEvent::DocumentFocused(selected));
        }
        true
    }

    // ==================== Find / Replace / Go To ====================

    /// Selects the next match of `query`, wrapping once.
    pub fn find(&mut self, query: &str, dialogs: &mut dyn Dialogs) -> FindOutcome {
        if query.is_empty() {
            return FindOutcome::Ignored;
        }
        let Ok(doc) = self.selected_document_mut() else {
            return FindOutcome::Ignored;
        };

        let id = doc.id();
        match doc.find_next(query) {
            Some(range) => {
                self.emit(EditorEvent::SelectionChanged(id));
                FindOutcome::Found(range)
            }
            None => {
                dialogs.show_info("Find", &format!("Cannot find \"{}\"", query));
                FindOutcome::NotFound
            }
        }
    }

    /// Replaces every match of `find` in the selected document.
    ///
    /// Returns the number of replacements, or `None` for an empty pattern.
    pub fn replace(&mut self, find: &str, replace_with: &str) -> Option<usize> {
        if find.is_empty() {
            return None;
        }
        let doc = self.selected_document_mut().ok()?;
        let id = doc.id();
        let count = doc.replace_all(find, replace_with);

        tracing::debug!("Replaced {} occurrence(s) of {:?}", count, find);
        self.emit(EditorEvent::DocumentChanged(id));
        Some(count)
    }

    /// Replaces the selected match of `find`, or the next one.
    ///
    /// Shows the same message as `find` when there is no match.
    pub fn replace_next(
        &mut self,
        find: &str,
        replace_with: &str,
        dialogs: &mut dyn Dialogs,
    ) -> CoreResult<FindOutcome> {
        if find.is_empty() {
            return Ok(FindOutcome::Ignored);
        }
        let doc = self.selected_document_mut()?;
        let id = doc.id();

        match doc.replace_next(find, replace_with)? {
            Some(range) => {
                self.message = None;
                self.emit(EditorEvent::DocumentChanged(id));
                Ok(FindOutcome::Found(range))
            }
            None => {
                dialogs.show_info("Replace", &format!("Cannot find \"{}\"", find));
                Ok(FindOutcome::NotFound)
            }
        }
    }

    /// Moves the caret to the line typed in `input` (1-based).
    ///
    /// Lines past the end clamp to the last line. Returns the line reached.
    pub fn go_to_line(&mut self, input: &str) -> CoreResult<usize> {
        let invalid = || CoreError::InvalidLineNumber(input.to_string());
        let line = match input.trim().parse::<i64>() {
            Ok(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            Ok(_) => return Err(invalid()),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => usize::MAX,
            Err(_) => return Err(invalid()),
        };

        let doc = self.selected_document_mut()?;
        let id = doc.id();
        let reached = doc.go_to_line(line);
        self.emit(EditorEvent::SelectionChanged(id));
        Ok(reached)
    }

    // ==================== Text Editing ====================

    /// Takes the text reported by the editing widget for a document.
    pub fn notify_user_edit(&mut self, id: DocumentId, text: &str) -> CoreResult<bool> {
        let doc = self
            .documents
            .get_mut(id)
            .ok_or(CoreError::DocumentNotFound(id))?;
        let changed = doc.notify_user_edit(text)?;
        if changed {
            self.message = None;
            self.emit(EditorEvent::DocumentChanged(id));
        }
        Ok(changed)
    }

    /// Records where the widget's caret and selection are.
    pub fn set_selection(&mut self, id: DocumentId, selection: Selection) -> CoreResult<()> {
        let doc = self
            .documents
            .get_mut(id)
            .ok_or(CoreError::DocumentNotFound(id))?;
        if doc.selection() != selection {
            doc.set_selection(selection);
            self.emit(EditorEvent::SelectionChanged(id));
        }
        Ok(())
    }

    /// Inserts text at the caret, replacing the selection.
    pub fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        let doc = self.selected_document_mut()?;
        doc.insert_text(text)?;
        self.emit_document_changed();
        Ok(())
    }

    /// Deletes the selection or character before the caret.
    pub fn delete_backward(&mut self) -> CoreResult<()> {
        let doc = self.selected_document_mut()?;
        doc.delete_backward()?;
        self.emit_document_changed();
        Ok(())
    }

    /// Deletes the selection or character after the caret.
    pub fn delete_forward(&mut self) -> CoreResult<()> {
        let doc = self.selected_document_mut()?;
        doc.delete_forward()?;
        self.emit_document_changed();
        Ok(())
    }

    /// Undoes the last edit. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self
            .selected_document_mut()
            .map(Document::undo)
            .unwrap_or(false);
        if undone {
            self.emit_document_changed();
        }
        undone
    }

    /// Redoes the last undone edit.
    pub fn redo(&mut self) -> bool {
        let redone = self
            .selected_document_mut()
            .map(Document::redo)
            .unwrap_or(false);
        if redone {
            self.emit_document_changed();
        }
        redone
    }

    /// Copies the selection to the editor clipboard and returns it.
    pub fn copy(&mut self) -> Option<String> {
        let text = self.selected_document().ok()?.selected_text()?;
        self.clipboard = text.clone();
        Some(text)
    }

    /// Removes the selection into the editor clipboard and returns it.
    pub fn cut(&mut self) -> CoreResult<Option<String>> {
        let doc = self.selected_document_mut()?;
        let cut = doc.cut()?;
        if let Some(text) = &cut {
            self.clipboard = text.clone();
            self.emit_document_changed();
        }
        Ok(cut)
    }

    /// Inserts the editor clipboard. Returns false when it is empty.
    pub fn paste(&mut self) -> CoreResult<bool> {
        if self.clipboard.is_empty() {
            return Ok(false);
        }
        let text = self.clipboard.clone();
        self.insert_text(&text)?;
        Ok(true)
    }

    /// Replaces the editor clipboard, e.g. with the system clipboard.
    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = text.into();
    }

    /// Returns the editor clipboard.
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Selects all text.
    pub fn select_all(&mut self) -> CoreResult<()> {
        let doc = self.selected_document_mut()?;
        doc.select_all();
        let id = doc.id();
        self.emit(EditorEvent::SelectionChanged(id));
        Ok(())
    }

    // ==================== Commands ====================

    /// Runs a command against the selected document.
    pub fn execute(&mut self, command: Command, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        tracing::debug!("Execute {}", command.display_name());

        match command {
            // File commands
            Command::New => {
                self.new_document();
                CommandOutcome::Done
            }
            Command::Open { path } => {
                let asked = path.is_none();
                match self.open(path, dialogs) {
                    Some(_) => CommandOutcome::Done,
                    None if asked => CommandOutcome::Ignored,
                    None => CommandOutcome::Failed,
                }
            }
            Command::Save => match self.documents.selected() {
                Some(id) => self.save(id, dialogs).into(),
                None => CommandOutcome::Ignored,
            },
            Command::SaveAs => match self.documents.selected() {
                Some(id) => self.save_as(id, dialogs).into(),
                None => CommandOutcome::Ignored,
            },
            Command::SaveAll => self.save_all(dialogs).into(),
            Command::Close => done_if(self.close_current(dialogs)),
            Command::CloseAll => done_if(self.close_all(dialogs)),
            Command::Exit => {
                if self.request_exit(dialogs) {
                    CommandOutcome::Exit
                } else {
                    CommandOutcome::Ignored
                }
            }

            // Edit commands
            Command::Undo => done_if(self.undo()),
            Command::Redo => done_if(self.redo()),
            Command::Cut => match self.cut() {
                Ok(Some(text)) => CommandOutcome::Clipboard(text),
                Ok(None) => CommandOutcome::Ignored,
                Err(e) => self.report("Cut failed", &e, dialogs),
            },
            Command::Copy => match self.copy() {
                Some(text) => CommandOutcome::Clipboard(text),
                None => CommandOutcome::Ignored,
            },
            Command::Paste => match self.paste() {
                Ok(pasted) => done_if(pasted),
                Err(e) => self.report("Paste failed", &e, dialogs),
            },
            Command::SelectAll => done_if(self.select_all().is_ok()),

            // Search
            Command::Find { query: Some(query) } => match self.find(&query, dialogs) {
                FindOutcome::Found(_) => CommandOutcome::Done,
                FindOutcome::NotFound | FindOutcome::Ignored => CommandOutcome::Ignored,
            },
            Command::Replace {
                find: Some(find),
                replace_with: Some(replace_with),
            } => done_if(self.replace(&find, &replace_with).is_some()),
            Command::ReplaceNext {
                find: Some(find),
                replace_with: Some(replace_with),
            } => match self.replace_next(&find, &replace_with, dialogs) {
                Ok(FindOutcome::Found(_)) => CommandOutcome::Done,
                Ok(FindOutcome::NotFound | FindOutcome::Ignored) => CommandOutcome::Ignored,
                Err(e) => self.report("Replace failed", &e, dialogs),
            },
            Command::GoToLine { input: Some(input) } => match self.go_to_line(&input) {
                Ok(_) => CommandOutcome::Done,
                Err(e) => {
                    tracing::debug!("{}", e);
                    CommandOutcome::Ignored
                }
            },
            Command::Find { query: None }
            | Command::Replace { .. }
            | Command::ReplaceNext { .. }
            | Command::GoToLine { input: None } => CommandOutcome::Ignored,

            // View
            Command::ToggleLineNumbers => {
                self.toggle_line_numbers();
                CommandOutcome::Done
            }
            Command::ToggleWordWrap => {
                self.toggle_word_wrap();
                CommandOutcome::Done
            }

            // Help
            Command::About => {
                dialogs.show_info("About Scrivo", &about_text());
                CommandOutcome::Done
            }
        }
    }

    fn report(&self, title: &str, error: &CoreError, dialogs: &mut dyn Dialogs) -> CommandOutcome {
        tracing::warn!("{}: {}", title, error);
        dialogs.show_error(title, &error.to_string());
        CommandOutcome::Failed
    }

    // ==================== Events ====================

    /// Subscribes to editor events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EditorEvent> {
        self.event_bus.subscribe()
    }

    /// Emits an event.
    fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }

    /// Emits document changed event for the selected document.
    fn emit_document_changed(&mut self) {
        self.message = None;
        if let Some(id) = self.documents.selected() {
            self.emit(EditorEvent::DocumentChanged(id));
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SaveOutcome> for CommandOutcome {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Saved => CommandOutcome::Done,
            SaveOutcome::Cancelled => CommandOutcome::Ignored,
            SaveOutcome::Failed => CommandOutcome::Failed,
        }
    }
}

fn done_if(done: bool) -> CommandOutcome {
    if done {
        CommandOutcome::Done
    } else {
        CommandOutcome::Ignored
    }
}

fn about_text() -> String {
    format!(
        "Scrivo {}\nA small tabbed text editor.",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::scripted::ScriptedDialogs;
    use crate::event::drain;
    use std::fs;
    use tempfile::TempDir;

    fn dirty_doc(editor: &mut Editor, text: &str, path: Option<PathBuf>) -> DocumentId {
        let id = editor.new_document();
        editor.notify_user_edit(id, text).unwrap();
        if let Some(path) = path {
            editor.documents.get_mut(id).unwrap().set_path(path);
        }
        id
    }

    #[test]
    fn test_new_editor_has_one_clean_document() {
        let editor = Editor::new();
        assert_eq!(editor.documents().len(), 1);
        assert!(!editor.has_unsaved_changes());
        assert_eq!(editor.status().as_str(), "Untitled | Ln 1, Col 1");
        assert_eq!(editor.window_title(), "Untitled - Scrivo");
    }

    #[test]
    fn test_user_edit_marks_dirty() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        assert!(editor.notify_user_edit(id, "hello").unwrap());

        assert!(editor.document(id).unwrap().is_dirty());
        assert_eq!(editor.title(id).as_deref(), Some("Untitled *"));
        assert!(editor.status().as_str().starts_with("Untitled * |"));
    }

    #[test]
    fn test_open_reuses_untouched_tab() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "line one\nline two").unwrap();

        let mut editor = Editor::new();
        let first = editor.documents().ids()[0];
        let id = editor.open_path(&path).unwrap();

        assert_eq!(id, first);
        assert_eq!(editor.documents().len(), 1);
        let doc = editor.document(id).unwrap();
        assert_eq!(doc.text(), "line one\nline two");
        assert!(!doc.is_dirty());
        assert_eq!(doc.caret(), 0);
        assert_eq!(doc.path(), Some(path.as_path()));
    }

    #[test]
    fn test_open_next_to_edited_tab() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.txt");
        fs::write(&path, "b").unwrap();

        let mut editor = Editor::new();
        let first = editor.documents().ids()[0];
        editor.notify_user_edit(first, "typed").unwrap();

        let id = editor.open_path(&path).unwrap();
        assert_ne!(id, first);
        assert_eq!(editor.documents().len(), 2);
        assert_eq!(editor.documents().selected(), Some(id));
        assert_eq!(editor.document(first).unwrap().text(), "typed");
    }

    #[test]
    fn test_open_missing_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut editor = Editor::new();
        let mut dialogs = ScriptedDialogs::new();

        let opened = editor.open(Some(dir.path().join("nope.txt")), &mut dialogs);
        assert_eq!(opened, None);
        assert_eq!(dialogs.errors.len(), 1);
        assert_eq!(editor.documents().len(), 1);
        assert!(editor.selected_document().unwrap().is_untouched());
    }

    #[test]
    fn test_open_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let mut editor = Editor::new();
        assert!(matches!(editor.open_path(&path), Err(CoreError::Io(_))));
        assert!(editor.selected_document().unwrap().is_untouched());
    }

    #[test]
    fn test_open_cancelled_picker_is_silent() {
        let mut editor = Editor::new();
        let mut dialogs = ScriptedDialogs::new().answer_open_path(None);

        let outcome = editor.execute(Command::Open { path: None }, &mut dialogs);
        assert_eq!(outcome, CommandOutcome::Ignored);
        assert!(dialogs.errors.is_empty());
    }

    #[test]
    fn test_open_through_picker() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("picked.txt");
        fs::write(&path, "picked").unwrap();

        let mut editor = Editor::new();
        let mut dialogs = ScriptedDialogs::new().answer_open_path(Some(path));
        let outcome = editor.execute(Command::Open { path: None }, &mut dialogs);

        assert_eq!(outcome, CommandOutcome::Done);
        assert_eq!(editor.selected_document().unwrap().text(), "picked");
    }

    #[test]
    fn test_save_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.txt");

        let mut editor = Editor::new();
        let mut events = editor.subscribe();
        let id = dirty_doc(&mut editor, "content", Some(path.clone()));
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(editor.save(id, &mut dialogs), SaveOutcome::Saved);
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
        assert!(!editor.document(id).unwrap().is_dirty());
        assert!(dialogs.save_prompts.is_empty());
        assert!(drain(&mut events).contains(&EditorEvent::DocumentSaved(id)));
        assert_eq!(
            editor.message(),
            Some(format!("Saved {}", path.display()).as_str())
        );
    }

    #[test]
    fn test_save_untitled_asks_for_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chosen.txt");

        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "draft").unwrap();
        let mut dialogs = ScriptedDialogs::new().answer_save_path(Some(path.clone()));

        assert_eq!(editor.execute(Command::Save, &mut dialogs), CommandOutcome::Done);
        assert_eq!(dialogs.save_prompts, vec!["document.txt"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "draft");
        assert_eq!(editor.title(id).as_deref(), Some("chosen.txt"));
    }

    #[test]
    fn test_save_cancelled_changes_nothing() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "draft").unwrap();
        let mut dialogs = ScriptedDialogs::new().answer_save_path(None);

        assert_eq!(editor.save(id, &mut dialogs), SaveOutcome::Cancelled);
        let doc = editor.document(id).unwrap();
        assert!(doc.is_dirty());
        assert_eq!(doc.path(), None);
        assert!(dialogs.errors.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("x.txt");

        let mut editor = Editor::new();
        let id = dirty_doc(&mut editor, "x", Some(path));
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(editor.save(id, &mut dialogs), SaveOutcome::Failed);
        assert!(editor.document(id).unwrap().is_dirty());
        assert_eq!(dialogs.errors.len(), 1);
        assert_eq!(dialogs.errors[0].0, "Save failed");
    }

    #[test]
    fn test_save_as_suggests_current_name() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");

        let mut editor = Editor::new();
        let id = dirty_doc(&mut editor, "x", Some(old.clone()));
        let mut dialogs = ScriptedDialogs::new().answer_save_path(Some(new.clone()));

        assert_eq!(editor.save_as(id, &mut dialogs), SaveOutcome::Saved);
        assert_eq!(dialogs.save_prompts, vec!["old.txt"]);
        assert!(new.exists());
        assert!(!old.exists());
    }

    #[test]
    fn test_save_all_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("missing-dir").join("first.txt");
        let third_path = dir.path().join("third.txt");

        let mut editor = Editor::new();
        let first = editor.documents().ids()[0];
        editor.notify_user_edit(first, "one").unwrap();
        editor.documents.get_mut(first).unwrap().set_path(bad);
        let second = editor.new_document();
        let third = dirty_doc(&mut editor, "three", Some(third_path.clone()));
        editor.select(second);

        let mut dialogs = ScriptedDialogs::new();
        assert_eq!(editor.save_all(&mut dialogs), SaveOutcome::Failed);

        assert_eq!(dialogs.errors.len(), 1);
        assert!(!third_path.exists());
        assert!(editor.document(third).unwrap().is_dirty());
        assert_eq!(editor.documents().selected(), Some(second));
    }

    #[test]
    fn test_save_all_saves_dirty_documents() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");

        let mut editor = Editor::new();
        let original = editor.documents().ids()[0];
        dirty_doc(&mut editor, "a", Some(a.clone()));
        dirty_doc(&mut editor, "b", Some(b.clone()));
        editor.select(original);

        let mut dialogs = ScriptedDialogs::new();
        assert_eq!(
            editor.execute(Command::SaveAll, &mut dialogs),
            CommandOutcome::Done
        );
        assert_eq!(fs::read_to_string(a).unwrap(), "a");
        assert_eq!(fs::read_to_string(b).unwrap(), "b");
        assert!(!editor.has_unsaved_changes());
        assert_eq!(editor.documents().selected(), Some(original));
    }

    #[test]
    fn test_close_last_document_leaves_fresh_one() {
        let mut editor = Editor::new();
        let only = editor.documents().ids()[0];
        let mut dialogs = ScriptedDialogs::new();

        assert!(editor.close_current(&mut dialogs));
        assert_eq!(editor.documents().len(), 1);
        let doc = editor.selected_document().unwrap();
        assert_ne!(doc.id(), only);
        assert!(doc.is_untouched());
        assert_eq!(editor.title(doc.id()).as_deref(), Some("Untitled"));
    }

    #[test]
    fn test_close_clean_document_does_not_prompt() {
        let mut editor = Editor::new();
        editor.new_document();
        let mut dialogs = ScriptedDialogs::new();

        assert!(editor.close_current(&mut dialogs));
        assert!(dialogs.confirmed.is_empty());
        assert_eq!(editor.documents().len(), 1);
    }

    #[test]
    fn test_close_dirty_document_choices() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "unsaved").unwrap();

        let mut dialogs = ScriptedDialogs::new()
            .answer_choice(CloseChoice::Cancel)
            .answer_choice(CloseChoice::Save)
            .answer_save_path(None)
            .answer_choice(CloseChoice::Discard);

        assert!(!editor.close_current(&mut dialogs));
        assert_eq!(editor.documents().selected(), Some(id));

        assert!(!editor.close_current(&mut dialogs));
        assert_eq!(editor.documents().selected(), Some(id));

        assert!(editor.close_current(&mut dialogs));
        assert_ne!(editor.documents().selected(), Some(id));
        assert_eq!(dialogs.confirmed, vec!["Untitled"; 3]);
    }

    #[test]
    fn test_close_with_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keep.txt");

        let mut editor = Editor::new();
        let id = dirty_doc(&mut editor, "keep me", Some(path.clone()));
        let mut dialogs = ScriptedDialogs::new().answer_choice(CloseChoice::Save);

        assert!(editor.close_document(id, &mut dialogs));
        assert_eq!(fs::read_to_string(path).unwrap(), "keep me");
        assert!(editor.document(id).is_err());
    }

    #[test]
    fn test_close_all_denied_closes_nothing() {
        let mut editor = Editor::new();
        let first = editor.documents().ids()[0];
        editor.notify_user_edit(first, "one").unwrap();
        dirty_doc(&mut editor, "two", None);

        let mut dialogs = ScriptedDialogs::new()
            .answer_choice(CloseChoice::Discard)
            .answer_choice(CloseChoice::Cancel);

        assert!(!editor.close_all(&mut dialogs));
        assert_eq!(editor.documents().len(), 2);
        assert!(editor.document(first).unwrap().is_dirty());
    }

    #[test]
    fn test_close_all_leaves_fresh_document() {
        let mut editor = Editor::new();
        editor.new_document();
        dirty_doc(&mut editor, "gone", None);
        let mut dialogs = ScriptedDialogs::new().answer_choice(CloseChoice::Discard);

        assert_eq!(
            editor.execute(Command::CloseAll, &mut dialogs),
            CommandOutcome::Done
        );
        assert_eq!(editor.documents().len(), 1);
        assert!(editor.selected_document().unwrap().is_untouched());
    }

    #[test]
    fn test_exit_confirms_every_document() {
        let mut editor = Editor::new();
        let first = editor.documents().ids()[0];
        editor.notify_user_edit(first, "one").unwrap();
        let mut events = editor.subscribe();

        let mut dialogs = ScriptedDialogs::new().answer_choice(CloseChoice::Cancel);
        assert_eq!(
            editor.execute(Command::Exit, &mut dialogs),
            CommandOutcome::Ignored
        );
        assert!(!editor.should_exit());

        let mut dialogs = ScriptedDialogs::new().answer_choice(CloseChoice::Discard);
        assert_eq!(
            editor.execute(Command::Exit, &mut dialogs),
            CommandOutcome::Exit
        );
        assert!(editor.should_exit());
        assert!(drain(&mut events).contains(&EditorEvent::Exit));
    }

    #[test]
    fn test_find_wraps_around() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "xxabcxxabc").unwrap();
        editor.set_selection(id, Selection::caret(0)).unwrap();
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(editor.find("abc", &mut dialogs), FindOutcome::Found(2..5));
        assert_eq!(editor.find("abc", &mut dialogs), FindOutcome::Found(7..10));
        assert_eq!(editor.find("abc", &mut dialogs), FindOutcome::Found(2..5));
        assert!(dialogs.infos.is_empty());
    }

    #[test]
    fn test_find_miss_reports_and_keeps_selection() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "hello").unwrap();
        editor.set_selection(id, Selection::caret(2)).unwrap();
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(editor.find("xyz", &mut dialogs), FindOutcome::NotFound);
        assert_eq!(dialogs.infos.len(), 1);
        assert_eq!(
            editor.selected_document().unwrap().selection(),
            Selection::caret(2)
        );
        assert_eq!(editor.find("", &mut dialogs), FindOutcome::Ignored);
        assert_eq!(dialogs.infos.len(), 1);
    }

    #[test]
    fn test_replace_marks_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.txt");
        fs::write(&path, "foofoo").unwrap();

        let mut editor = Editor::new();
        let id = editor.open_path(&path).unwrap();
        let mut dialogs = ScriptedDialogs::new();

        let outcome = editor.execute(
            Command::Replace {
                find: Some("foo".into()),
                replace_with: Some("bar".into()),
            },
            &mut dialogs,
        );
        assert_eq!(outcome, CommandOutcome::Done);
        let doc = editor.document(id).unwrap();
        assert_eq!(doc.text(), "barbar");
        assert!(doc.is_dirty());

        assert!(editor.undo());
        assert_eq!(editor.document(id).unwrap().text(), "foofoo");
    }

    #[test]
    fn test_replace_next_walks_through_matches() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "cat dog cat").unwrap();
        editor.set_selection(id, Selection::caret(0)).unwrap();
        let mut dialogs = ScriptedDialogs::new();
        let replace_next = || Command::ReplaceNext {
            find: Some("CAT".into()),
            replace_with: Some("cow".into()),
        };

        assert_eq!(editor.execute(replace_next(), &mut dialogs), CommandOutcome::Done);
        assert_eq!(editor.document(id).unwrap().text(), "cow dog cat");
        assert_eq!(editor.execute(replace_next(), &mut dialogs), CommandOutcome::Done);
        assert_eq!(editor.document(id).unwrap().text(), "cow dog cow");
        assert!(dialogs.infos.is_empty());

        assert_eq!(editor.execute(replace_next(), &mut dialogs), CommandOutcome::Ignored);
        assert_eq!(dialogs.infos.len(), 1);
        assert_eq!(dialogs.infos[0].0, "Replace");
        assert_eq!(
            editor.replace_next("", "x", &mut dialogs).unwrap(),
            FindOutcome::Ignored
        );
    }

    #[test]
    fn test_view_toggles_write_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scrivo").join("config.toml");

        let mut editor = Editor::new();
        editor.set_config_path(Some(path.clone()));
        let mut events = editor.subscribe();
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(
            editor.execute(Command::ToggleWordWrap, &mut dialogs),
            CommandOutcome::Done
        );
        assert!(editor.config().editor.word_wrap);
        assert!(Config::load_from(&path).unwrap().editor.word_wrap);

        assert!(!editor.toggle_line_numbers());
        let saved = Config::load_from(&path).unwrap();
        assert!(!saved.editor.line_numbers);
        assert!(saved.editor.word_wrap);

        assert_eq!(
            drain(&mut events),
            vec![EditorEvent::ConfigChanged, EditorEvent::ConfigChanged]
        );
    }

    #[test]
    fn test_view_toggles_without_config_file() {
        let mut editor = Editor::new();
        assert!(editor.config_path().is_none());
        assert!(editor.toggle_word_wrap());
        assert!(!editor.toggle_word_wrap());
    }

    #[test]
    fn test_set_config_rebuilds_keymap() {
        let mut editor = Editor::new();
        let chord = crate::KeyPress::parse("Ctrl+Q").unwrap();
        assert_eq!(editor.keymap().lookup(&chord), None);

        let mut config = Config::default();
        config
            .keyboard
            .bindings
            .insert("Ctrl+Q".to_string(), "exit".to_string());
        editor.set_config(config);

        assert_eq!(editor.keymap().lookup(&chord), Some(&Command::Exit));
    }

    #[test]
    fn test_replace_empty_pattern_is_noop() {
        let mut editor = Editor::new();
        assert_eq!(editor.replace("", "x"), None);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_go_to_line() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "a\nb\nc\nd\ne").unwrap();

        assert_eq!(editor.go_to_line("100").unwrap(), 5);
        assert_eq!(editor.status().as_str(), "Untitled * | Ln 5, Col 1");

        assert_eq!(editor.go_to_line(" 2 ").unwrap(), 2);
        assert_eq!(editor.selected_document().unwrap().caret(), 2);

        for bad in ["0", "-1", "abc", ""] {
            assert!(matches!(
                editor.go_to_line(bad),
                Err(CoreError::InvalidLineNumber(_))
            ));
        }
        assert_eq!(editor.selected_document().unwrap().caret(), 2);

        assert_eq!(editor.go_to_line("99999999999999999999999").unwrap(), 5);
    }

    #[test]
    fn test_prompt_commands_without_payload_do_nothing() {
        let mut editor = Editor::new();
        let mut dialogs = ScriptedDialogs::new();
        for command in [
            Command::Find { query: None },
            Command::Replace {
                find: Some("a".into()),
                replace_with: None,
            },
            Command::ReplaceNext {
                find: None,
                replace_with: Some("b".into()),
            },
            Command::GoToLine { input: None },
            Command::GoToLine {
                input: Some("zero".into()),
            },
        ] {
            assert_eq!(editor.execute(command, &mut dialogs), CommandOutcome::Ignored);
        }
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_cut_copy_paste() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "hello world").unwrap();
        editor.set_selection(id, Selection::new(0, 6)).unwrap();
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(
            editor.execute(Command::Copy, &mut dialogs),
            CommandOutcome::Clipboard("hello ".into())
        );
        assert_eq!(
            editor.execute(Command::Cut, &mut dialogs),
            CommandOutcome::Clipboard("hello ".into())
        );
        assert_eq!(editor.selected_document().unwrap().text(), "world");

        editor.set_selection(id, Selection::caret(5)).unwrap();
        editor.set_clipboard("!");
        assert_eq!(editor.execute(Command::Paste, &mut dialogs), CommandOutcome::Done);
        assert_eq!(editor.selected_document().unwrap().text(), "world!");

        editor.set_selection(id, Selection::caret(0)).unwrap();
        assert_eq!(editor.execute(Command::Cut, &mut dialogs), CommandOutcome::Ignored);
    }

    #[test]
    fn test_select_all_then_insert() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "old text").unwrap();
        let mut dialogs = ScriptedDialogs::new();

        editor.execute(Command::SelectAll, &mut dialogs);
        editor.insert_text("new").unwrap();
        assert_eq!(editor.selected_document().unwrap().text(), "new");

        editor.delete_backward().unwrap();
        editor.set_selection(id, Selection::caret(0)).unwrap();
        editor.delete_forward().unwrap();
        assert_eq!(editor.selected_document().unwrap().text(), "e");
    }

    #[test]
    fn test_undo_redo_commands() {
        let mut editor = Editor::new();
        let mut dialogs = ScriptedDialogs::new();
        assert_eq!(editor.execute(Command::Undo, &mut dialogs), CommandOutcome::Ignored);

        editor.insert_text("abc").unwrap();
        assert_eq!(editor.execute(Command::Undo, &mut dialogs), CommandOutcome::Done);
        assert_eq!(editor.selected_document().unwrap().text(), "");
        assert_eq!(editor.execute(Command::Redo, &mut dialogs), CommandOutcome::Done);
        assert_eq!(editor.selected_document().unwrap().text(), "abc");
    }

    #[test]
    fn test_about_shows_info() {
        let mut editor = Editor::new();
        let mut dialogs = ScriptedDialogs::new();
        assert_eq!(editor.execute(Command::About, &mut dialogs), CommandOutcome::Done);
        assert_eq!(dialogs.infos[0].0, "About Scrivo");
    }

    #[test]
    fn test_config_names_untitled_and_default_file() {
        let mut config = Config::default();
        config.files.untitled_name = "Senza titolo".into();
        config.files.default_file_name = "nota.txt".into();

        let mut editor = Editor::with_config(config);
        let id = editor.documents().ids()[0];
        editor.notify_user_edit(id, "x").unwrap();
        assert_eq!(editor.title(id).as_deref(), Some("Senza titolo *"));

        let mut dialogs = ScriptedDialogs::new().answer_save_path(None);
        editor.save(id, &mut dialogs);
        assert_eq!(dialogs.save_prompts, vec!["nota.txt"]);
    }

    #[test]
    fn test_open_emits_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("e.txt");
        fs::write(&path, "e").unwrap();

        let mut editor = Editor::new();
        let mut events = editor.subscribe();
        let id = editor.open_path(&path).unwrap();

        assert_eq!(
            drain(&mut events),
            vec![
                EditorEvent::DocumentChanged(id),
                EditorEvent::DocumentFocused(id)
            ]
        );
    }
}
