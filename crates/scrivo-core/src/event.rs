//! Event system for editor notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! Rust's ownership model makes traditional observer patterns tricky.
//! We use `tokio::sync::broadcast` as a fan-out queue instead:
//! - No object references to manage
//! - Events are values, not callbacks
//! - Subscribers receive copies (Clone)
//!
//! Sending never blocks, so the editor can emit from the UI thread and
//! subscribers drain at their own pace with `try_recv` or `recv().await`.

use crate::document::DocumentId;
use tokio::sync::broadcast;

/// Events that can occur in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    // Document events
    /// A document was created or loaded
    DocumentOpened(DocumentId),
    /// A document was closed
    DocumentClosed(DocumentId),
    /// A document was written to disk
    DocumentSaved(DocumentId),
    /// A document's content changed
    DocumentChanged(DocumentId),
    /// A document became the selected tab
    DocumentFocused(DocumentId),
    /// Selection or caret moved
    SelectionChanged(DocumentId),

    // Editor events
    /// Configuration changed
    ConfigChanged,
    /// The application may exit
    Exit,
}

/// Event bus for broadcasting editor events.
///
/// Lagged receivers don't block senders; they skip ahead.
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        // Capacity of 256 events in the buffer
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: EditorEvent) {
        tracing::trace!(?event, "emit");
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Drains every event currently queued on `receiver`.
pub fn drain(receiver: &mut broadcast::Receiver<EditorEvent>) -> Vec<EditorEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                tracing::warn!("Event receiver lagged, missed {} events", n);
            }
            Err(_) => break,
        }
    }
    events
}
