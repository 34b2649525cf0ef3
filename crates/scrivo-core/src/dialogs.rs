//! Questions the workflow asks the user.
//!
//! The editor never opens a window itself. Native file pickers and message
//! boxes live in the UI crate; tests plug in a scripted implementation.

use std::path::PathBuf;

/// Answer to "this document has unsaved changes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    /// Save first, close only if the save succeeds
    Save,
    /// Close and lose the changes
    Discard,
    /// Keep the document open
    Cancel,
}

/// User-facing prompts and notifications.
pub trait Dialogs {
    /// Asks for a file to open. `None` when the user cancels.
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Asks where to save, suggesting `default_name`. `None` when cancelled.
    fn pick_save_path(&mut self, default_name: &str) -> Option<PathBuf>;

    /// Asks what to do with the unsaved document called `name`.
    fn confirm_unsaved(&mut self, name: &str) -> CloseChoice;

    /// Reports a failed operation.
    fn show_error(&mut self, title: &str, message: &str);

    /// Reports something the user should know, such as a search miss.
    fn show_info(&mut self, title: &str, message: &str);
}
