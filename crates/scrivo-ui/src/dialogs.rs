//! Native dialogs backed by `rfd`.
//!
//! ## Learning: Blocking dialogs in an event loop
//!
//! `rfd::FileDialog` and `rfd::MessageDialog` block until the user answers.
//! That matches the workflow in `scrivo-core`, which asks a question and
//! uses the answer in the same call (for example "save changes?" in the
//! middle of Close All). The window is frozen meanwhile, as with any
//! modal dialog.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use scrivo_core::{CloseChoice, Dialogs};

/// File filters offered by the open and save dialogs.
const TEXT_FILTER: (&str, &[&str]) = ("Text files", &["txt", "md", "log", "csv", "toml"]);

/// `Dialogs` implementation using the platform's native dialogs.
#[derive(Debug, Default)]
pub struct NativeDialogs {
    /// Folder of the last picked file, where the next dialog starts
    last_dir: Option<PathBuf>,
}

impl NativeDialogs {
    /// Creates the dialog adapter.
    pub fn new() -> Self {
        Self::default()
    }

    fn file_dialog(&self) -> FileDialog {
        let dialog = FileDialog::new()
            .add_filter(TEXT_FILTER.0, TEXT_FILTER.1)
            .add_filter("All files", &["*"]);
        match &self.last_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn remember(&mut self, path: Option<&PathBuf>) {
        if let Some(dir) = path.and_then(|p| p.parent()) {
            self.last_dir = Some(dir.to_path_buf());
        }
    }
}

impl Dialogs for NativeDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        let path = self.file_dialog().set_title("Open").pick_file();
        self.remember(path.as_ref());
        path
    }

    fn pick_save_path(&mut self, default_name: &str) -> Option<PathBuf> {
        let path = self
            .file_dialog()
            .set_title("Save As")
            .set_file_name(default_name)
            .save_file();
        self.remember(path.as_ref());
        path
    }

    fn confirm_unsaved(&mut self, name: &str) -> CloseChoice {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Scrivo")
            .set_description(format!("Do you want to save changes to {}?", name))
            .set_buttons(MessageButtons::YesNoCancel)
            .show();

        match answer {
            MessageDialogResult::Yes => CloseChoice::Save,
            MessageDialogResult::No => CloseChoice::Discard,
            _ => CloseChoice::Cancel,
        }
    }

    fn show_error(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_info(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
