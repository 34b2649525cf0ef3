//! Translation between iced widget state and the core's char offsets.
//!
//! The `text_editor` widget speaks in (line, byte column) cursors and
//! motions, the core in char offsets. Everything here is a pure function
//! of a `TextBuffer` or a widget `Content` so it can be tested without a
//! window.
//!
//! ## Learning: The widget stores lines, not text
//!
//! `Content` keeps a list of lines with the separators stripped. Building
//! one drops a final empty line, and `Content::text()` joins with `\n` and
//! always ends with one. Neither round-trips a file, so text goes in
//! through `widget_source` and comes back out through `widget_text`.

use std::borrow::Cow;

use iced::keyboard;
use iced::widget::text_editor::{Action, Content, Motion};
use scrivo_buffer::{LineEnding, Selection, TextBuffer};
use scrivo_core::{Key, KeyPress, Modifiers};

/// Converts an iced key press into a keymap chord.
///
/// Returns `None` for keys the keymap has no name for (arrows, Shift on
/// its own, media keys).
pub fn key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyPress> {
    use keyboard::key::Named;

    let key = match key {
        keyboard::Key::Character(c) => Key::Char(c.chars().next()?.to_lowercase().next()?),
        keyboard::Key::Named(named) => match named {
            Named::Enter => Key::Enter,
            Named::Escape => Key::Escape,
            Named::Tab => Key::Tab,
            Named::Delete => Key::Delete,
            Named::F1 => Key::F(1),
            Named::F2 => Key::F(2),
            Named::F3 => Key::F(3),
            Named::F4 => Key::F(4),
            Named::F5 => Key::F(5),
            Named::F6 => Key::F(6),
            Named::F7 => Key::F(7),
            Named::F8 => Key::F(8),
            Named::F9 => Key::F(9),
            Named::F10 => Key::F(10),
            Named::F11 => Key::F(11),
            Named::F12 => Key::F(12),
            _ => return None,
        },
        keyboard::Key::Unidentified => return None,
    };

    Some(KeyPress::new(
        key,
        Modifiers {
            ctrl: modifiers.control(),
            alt: modifiers.alt(),
            shift: modifiers.shift(),
            meta: modifiers.logo(),
        },
    ))
}

/// Text to build a widget from.
///
/// A trailing line break gets an empty line after it, which the widget
/// would otherwise lose.
pub fn widget_source(text: &str) -> Cow<'_, str> {
    if text.ends_with(['\n', '\r']) {
        Cow::Owned(format!("{}\n", text))
    } else {
        Cow::Borrowed(text)
    }
}

/// The widget's text, joined with the document's line ending.
pub fn widget_text(content: &Content, line_ending: LineEnding) -> String {
    line_ending.join(content.lines().map(|line| (*line).to_owned()))
}

/// Char offset of a widget cursor given as (line, byte column).
///
/// Out of range cursors clamp to the end of the line or buffer.
pub fn char_offset(buffer: &TextBuffer, line: usize, byte_column: usize) -> usize {
    let line = line.min(buffer.len_lines().saturating_sub(1));
    let (Ok(start), Ok(text)) = (buffer.line_to_char(line), buffer.line(line)) else {
        return buffer.len_chars();
    };

    let column = text
        .trim_end_matches(['\n', '\r'])
        .char_indices()
        .take_while(|(byte, _)| *byte < byte_column)
        .count();
    (start + column).min(buffer.len_chars())
}

/// Rebuilds a selection from the widget's caret and its selected text.
///
/// The widget reports what is selected but not which end the caret is
/// on, so the text on either side of the caret is compared with it.
pub fn infer_selection(buffer: &TextBuffer, caret: usize, selected: Option<&str>) -> Selection {
    let Some(selected) = selected.filter(|s| !s.is_empty()) else {
        return Selection::caret(caret);
    };
    let len = selected.chars().count();

    let after = caret + len;
    if buffer.slice(caret..after).is_ok_and(|text| text == selected) {
        // Selected leftwards: the caret sits at the start
        return Selection::new(after, caret);
    }
    if let Some(before) = caret.checked_sub(len) {
        if buffer.slice(before..caret).is_ok_and(|text| text == selected) {
            return Selection::new(before, caret);
        }
    }

    Selection::caret(caret)
}

/// Widget actions that reproduce `selection`, caret last.
pub fn selection_actions(buffer: &TextBuffer, selection: Selection) -> Vec<Action> {
    let selection = selection.clamped(buffer.len_chars());
    let Ok(anchor) = buffer.char_idx_to_position(selection.anchor) else {
        return Vec::new();
    };

    let mut actions = vec![Action::Move(Motion::DocumentStart)];
    actions.extend(std::iter::repeat_n(Action::Move(Motion::Down), anchor.line));
    actions.extend(std::iter::repeat_n(Action::Move(Motion::Right), anchor.column));

    let select = if selection.head >= selection.anchor {
        Motion::Right
    } else {
        Motion::Left
    };
    actions.extend(std::iter::repeat_n(Action::Select(select), selection.len()));
    actions
}

/// Scroll offset that brings a row into view, or `None` if it is visible.
///
/// `top` and `height` describe the viewport; `margin` is kept free above
/// or below the row.
pub fn scroll_to_show(top: f32, height: f32, row_top: f32, row_height: f32, margin: f32) -> Option<f32> {
    if row_top < top {
        Some((row_top - margin).max(0.0))
    } else if row_top + row_height > top + height {
        Some(row_top + row_height + margin - height)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::text_editor::Edit;
    use scrivo_core::Editor;

    fn widget_for(text: &str) -> Content {
        Content::with_text(&widget_source(text))
    }

    fn count(actions: &[Action], wanted: fn(&Action) -> bool) -> usize {
        actions.iter().filter(|a| wanted(a)).count()
    }

    #[test]
    fn test_key_press_translation() {
        let ctrl_shift = keyboard::Modifiers::CTRL | keyboard::Modifiers::SHIFT;
        let kp = key_press(&keyboard::Key::Character("S".into()), ctrl_shift).unwrap();
        assert_eq!(kp, KeyPress::parse("Ctrl+Shift+S").unwrap());

        let kp = key_press(
            &keyboard::Key::Named(keyboard::key::Named::F3),
            keyboard::Modifiers::empty(),
        )
        .unwrap();
        assert_eq!(kp.key, Key::F(3));
        assert!(kp.modifiers.is_empty());

        assert!(
            key_press(
                &keyboard::Key::Named(keyboard::key::Named::ArrowUp),
                keyboard::Modifiers::empty()
            )
            .is_none()
        );
    }

    #[test]
    fn test_typing_in_fresh_tab_reaches_buffer_as_typed() {
        let mut editor = Editor::new();
        let id = editor.documents().ids()[0];
        let doc = editor.document(id).unwrap();
        let line_ending = doc.line_ending();
        let mut content = widget_for(&doc.text());

        content.perform(Action::Edit(Edit::Insert('a')));
        editor
            .notify_user_edit(id, &widget_text(&content, line_ending))
            .unwrap();

        assert_eq!(editor.document(id).unwrap().text(), "a");
    }

    #[test]
    fn test_widget_text_keeps_crlf() {
        let mut content = widget_for("one\r\ntwo");
        content.perform(Action::Move(Motion::DocumentEnd));
        content.perform(Action::Edit(Edit::Insert('!')));

        assert_eq!(widget_text(&content, LineEnding::Crlf), "one\r\ntwo!");
    }

    #[test]
    fn test_widget_keeps_trailing_newline() {
        let content = widget_for("a\n");
        assert_eq!(content.line_count(), 2);
        assert_eq!(widget_text(&content, LineEnding::Lf), "a\n");

        let mut content = widget_for("a\r\n");
        content.perform(Action::Move(Motion::DocumentEnd));
        content.perform(Action::Edit(Edit::Insert('b')));
        assert_eq!(widget_text(&content, LineEnding::Crlf), "a\r\nb");

        assert_eq!(widget_text(&widget_for(""), LineEnding::Lf), "");
        assert_eq!(widget_source("no newline"), "no newline");
    }

    #[test]
    fn test_char_offset_counts_chars_not_bytes() {
        let buffer = TextBuffer::from("héllo\nwörld");
        // "wö" is three bytes
        assert_eq!(char_offset(&buffer, 1, 3), 8);
        assert_eq!(char_offset(&buffer, 0, 0), 0);
        // "hé" is three bytes, two chars
        assert_eq!(char_offset(&buffer, 0, 3), 2);
    }

    #[test]
    fn test_char_offset_clamps() {
        let buffer = TextBuffer::from("ab\ncd");
        assert_eq!(char_offset(&buffer, 0, 99), 2);
        assert_eq!(char_offset(&buffer, 9, 0), 3);
        assert_eq!(char_offset(&TextBuffer::new(), 0, 4), 0);
    }

    #[test]
    fn test_infer_selection_direction() {
        let buffer = TextBuffer::from("one two three");

        // Selected "two" by dragging right: caret after it
        let sel = infer_selection(&buffer, 7, Some("two"));
        assert_eq!((sel.anchor, sel.head), (4, 7));

        // Selected "two" by dragging left: caret before it
        let sel = infer_selection(&buffer, 4, Some("two"));
        assert_eq!((sel.anchor, sel.head), (7, 4));

        assert!(infer_selection(&buffer, 5, None).is_caret());
        assert!(infer_selection(&buffer, 5, Some("")).is_caret());
        assert!(infer_selection(&buffer, 5, Some("zzz")).is_caret());
    }

    #[test]
    fn test_scroll_to_show() {
        // Visible rows need no scrolling
        assert_eq!(scroll_to_show(0.0, 100.0, 40.0, 20.0, 16.0), None);
        // Above the viewport
        assert_eq!(scroll_to_show(200.0, 100.0, 150.0, 20.0, 16.0), Some(134.0));
        assert_eq!(scroll_to_show(200.0, 100.0, 10.0, 20.0, 16.0), Some(0.0));
        // Below it
        assert_eq!(scroll_to_show(0.0, 100.0, 120.0, 20.0, 16.0), Some(56.0));
    }

    #[test]
    fn test_selection_actions_forward() {
        let buffer = TextBuffer::from("abc\ndefg\nh");
        let actions = selection_actions(&buffer, Selection::new(5, 8));

        assert!(matches!(actions[0], Action::Move(Motion::DocumentStart)));
        assert_eq!(count(&actions, |a| matches!(a, Action::Move(Motion::Down))), 1);
        assert_eq!(count(&actions, |a| matches!(a, Action::Move(Motion::Right))), 1);
        assert_eq!(count(&actions, |a| matches!(a, Action::Select(Motion::Right))), 3);
    }

    #[test]
    fn test_selection_actions_backward_and_clamped() {
        let buffer = TextBuffer::from("abc");
        let actions = selection_actions(&buffer, Selection::new(3, 1));
        assert_eq!(count(&actions, |a| matches!(a, Action::Move(Motion::Right))), 3);
        assert_eq!(count(&actions, |a| matches!(a, Action::Select(Motion::Left))), 2);

        let actions = selection_actions(&buffer, Selection::caret(50));
        assert_eq!(count(&actions, |a| matches!(a, Action::Move(Motion::Right))), 3);
        assert_eq!(count(&actions, |a| matches!(a, Action::Select(_))), 0);
    }
}
