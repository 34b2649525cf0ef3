//! The one-line status summary shown under the editor.

use crate::document::Document;

/// Rendered status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    /// Status when no document is selected.
    pub fn ready() -> Self {
        Self {
            text: "Ready".to_string(),
        }
    }

    /// `"{path or placeholder}{ *} | Ln {line}, Col {col}"`, 1-based.
    pub fn for_document(doc: &Document, untitled: &str) -> Self {
        let name = doc
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| untitled.to_string());
        let dirty = if doc.is_dirty() { " *" } else { "" };
        let caret = doc.caret_position();

        Self {
            text: format!(
                "{}{} | Ln {}, Col {}",
                name,
                dirty,
                caret.display_line(),
                caret.display_column()
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivo_buffer::Selection;
    use std::path::PathBuf;

    #[test]
    fn test_untitled_status() {
        let doc = Document::new(100);
        assert_eq!(
            StatusLine::for_document(&doc, "Untitled").as_str(),
            "Untitled | Ln 1, Col 1"
        );
    }

    #[test]
    fn test_status_tracks_caret_and_dirty() {
        let mut doc = Document::new(100);
        doc.load("one\ntwo\nthree", Some(PathBuf::from("/tmp/notes.txt")));
        doc.set_selection(Selection::caret(6));
        doc.notify_user_edit("one\ntwo!\nthree").unwrap();

        assert_eq!(
            StatusLine::for_document(&doc, "Untitled").to_string(),
            "/tmp/notes.txt * | Ln 2, Col 3"
        );
    }

    #[test]
    fn test_ready() {
        assert_eq!(StatusLine::ready().as_str(), "Ready");
    }
}
