use std::collections::HashMap;
use std::path::PathBuf;

use iced::widget::text::LineHeight;
use iced::widget::{scrollable, text_editor};
use iced::{keyboard, window, Pixels, Subscription, Task};
use scrivo_buffer::Selection;
use scrivo_core::{event, Config, Document, DocumentId, Editor, EditorEvent};
use tokio::sync::broadcast;

use crate::dialogs::NativeDialogs;

pub mod messages;
pub mod prompt;
pub mod sync;
pub mod update;
pub mod view;

pub use messages::*;
pub use prompt::{Prompt, PromptField};

/// Launch options from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// File opened in the first tab
    pub file: Option<PathBuf>,
    /// Loaded configuration
    pub config: Config,
    /// Where changed settings are written back
    pub config_path: Option<PathBuf>,
}

/// Widget state for one open document.
pub struct DocumentView {
    pub content: text_editor::Content,
    /// Buffer revision the widget text matches
    revision: u64,
    /// Selection the widget currently shows
    selection: Selection,
}

impl DocumentView {
    fn new(doc: &Document) -> Self {
        let mut view = Self {
            content: text_editor::Content::with_text(&sync::widget_source(&doc.text())),
            revision: doc.revision(),
            selection: Selection::default(),
        };
        view.show_selection(doc);
        view
    }

    /// Brings the widget up to date after the core changed the document.
    fn refresh(&mut self, doc: &Document) {
        if self.revision != doc.revision() {
            self.content = text_editor::Content::with_text(&sync::widget_source(&doc.text()));
            self.revision = doc.revision();
            self.selection = Selection::default();
        }
        if self.selection != doc.selection() {
            self.show_selection(doc);
        }
    }

    fn show_selection(&mut self, doc: &Document) {
        for action in sync::selection_actions(doc.buffer(), doc.selection()) {
            self.content.perform(action);
        }
        self.selection = doc.selection();
    }

    /// Records that the core has caught up with the widget.
    fn mark_synced(&mut self, doc: &Document) {
        self.revision = doc.revision();
        self.selection = doc.selection();
    }
}

pub struct App {
    pub editor: Editor,
    pub dialogs: NativeDialogs,
    pub views: HashMap<DocumentId, DocumentView>,
    pub prompt: Option<Prompt>,
    /// Last find or replace pattern, offered when a search prompt opens
    pub last_query: String,
    pub active_menu: Option<TopMenu>,
    /// Last reported position of the gutter scroller
    pub viewport: Option<scrollable::Viewport>,
    events: broadcast::Receiver<EditorEvent>,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let mut editor = Editor::with_config(flags.config);
        editor.set_config_path(flags.config_path);
        let events = editor.subscribe();

        let mut app = Self {
            editor,
            dialogs: NativeDialogs::new(),
            views: HashMap::new(),
            prompt: None,
            last_query: String::new(),
            active_menu: None,
            viewport: None,
            events,
        };

        if let Some(file) = flags.file {
            app.editor.open(Some(file), &mut app.dialogs);
        }
        app.sync_views();

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        self.editor.window_title()
    }

    /// Rebuilds widgets for documents the core changed and drops widgets of
    /// closed documents.
    pub fn sync_views(&mut self) {
        for event in event::drain(&mut self.events) {
            if let EditorEvent::DocumentClosed(id) = event {
                self.views.remove(&id);
            }
        }

        for doc in self.editor.documents().iter() {
            self.views
                .entry(doc.id())
                .and_modify(|view| view.refresh(doc))
                .or_insert_with(|| DocumentView::new(doc));
        }
    }

    /// True when the line number gutter is drawn.
    ///
    /// Wrapped rows have no position the gutter could follow, so it is
    /// hidden while word wrap is on.
    pub fn show_gutter(&self) -> bool {
        let settings = &self.editor.config().editor;
        settings.line_numbers && !settings.word_wrap
    }

    /// Height of one line of text in pixels.
    pub fn line_height(&self) -> f32 {
        let size = Pixels(self.editor.config().editor.font_size);
        LineHeight::default().to_absolute(size).0
    }

    /// Widget of the selected document.
    pub fn selected_view(&self) -> Option<&DocumentView> {
        let id = self.editor.documents().selected()?;
        self.views.get(&id)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keyboard_sub = keyboard::on_key_press(|key, modifiers| {
            Some(Message::KeyPressed(key, modifiers))
        });

        Subscription::batch([
            keyboard_sub,
            window::close_requests().map(Message::CloseRequested),
        ])
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let size = iced::Size::new(flags.config.window.width, flags.config.window.height);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(size)
        .exit_on_close_request(false)
        .theme(|_| iced::Theme::Dark)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
