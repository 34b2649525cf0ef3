//! System clipboard access.
//!
//! The core keeps its own clipboard string so it can be tested without a
//! display. These helpers copy between that string and the OS clipboard.

/// Clipboard failures. They are logged, never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("System clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

/// Puts `text` on the system clipboard.
pub fn write(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Reads text from the system clipboard.
pub fn read() -> Result<String, ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    Ok(clipboard.get_text()?)
}
