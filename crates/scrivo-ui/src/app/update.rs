use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::widget::{text_editor, text_input};
use iced::{keyboard, Task};
use scrivo_buffer::Selection;
use scrivo_core::{Command, CommandOutcome, Document, DocumentId};

use crate::app::view::{EDITOR_PADDING, EDITOR_SCROLL, PROMPT_INPUT};
use crate::app::{sync, App, Message, Prompt};
use crate::clipboard;

/// Everything that decides where the caret is drawn.
type CaretState = (bool, Option<(DocumentId, Selection, u64)>);

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let before = self.caret_state();
        let task = self.handle(message);
        self.sync_views();

        if self.caret_state() != before {
            return Task::batch([task, self.follow_caret()]);
        }
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Run(command) => return self.run_command(command),

            Message::TabSelected(id) => {
                self.active_menu = None;
                self.editor.select(id);
            }

            Message::CloseTab(id) => {
                self.active_menu = None;
                self.editor.close_document(id, &mut self.dialogs);
            }

            Message::EditorAction(action) => {
                self.active_menu = None;
                return self.perform_editor_action(action);
            }
            Message::EditorScrolled(viewport) => {
                self.viewport = Some(viewport);
            }

            Message::PromptChanged(field, value) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.set(field, value);
                }
            }
            Message::PromptSubmit => {
                if let Some(prompt) = self.prompt.take() {
                    if let Some(query) = prompt.query() {
                        self.last_query = query.to_string();
                    }
                    if prompt.stays_open() {
                        // Enter again moves on to the next match
                        if self.execute(prompt.clone().into_command()) == CommandOutcome::Done {
                            self.prompt = Some(prompt);
                        }
                        return Task::none();
                    }
                    return self.run_command(prompt.into_command());
                }
            }
            Message::PromptReplaceNext => {
                if let Some(prompt) = &self.prompt {
                    if let Some(query) = prompt.query() {
                        self.last_query = query.to_string();
                    }
                    if let Some(command) = prompt.replace_next_command() {
                        self.execute(command);
                    }
                }
            }
            Message::PromptCancel => {
                self.prompt = None;
            }

            Message::ToggleTopMenu(menu) => {
                if self.active_menu == Some(menu) {
                    self.active_menu = None;
                } else {
                    self.active_menu = Some(menu);
                }
            }
            Message::CloseTopMenu => {
                self.active_menu = None;
            }

            Message::KeyPressed(key, modifiers) => {
                return self.handle_key_pressed(key, modifiers);
            }

            Message::CloseRequested(_) => return self.run_command(Command::Exit),
        }
        Task::none()
    }

    /// Runs a command from a menu, a key binding or a submitted prompt.
    pub fn run_command(&mut self, command: Command) -> Task<Message> {
        self.active_menu = None;

        if command.needs_prompt() {
            self.prompt = Prompt::for_command(&command, &self.last_query);
            return text_input::focus(text_input::Id::new(PROMPT_INPUT));
        }

        match self.execute(command) {
            CommandOutcome::Exit => {
                tracing::info!("Exiting");
                iced::exit()
            }
            _ => Task::none(),
        }
    }

    /// Runs a command with a complete payload, syncing the system
    /// clipboard around it.
    fn execute(&mut self, command: Command) -> CommandOutcome {
        if command == Command::Paste {
            // The system clipboard may hold text copied from another program
            match clipboard::read() {
                Ok(text) => self.editor.set_clipboard(text),
                Err(e) => tracing::debug!("{}", e),
            }
        }

        let outcome = self.editor.execute(command, &mut self.dialogs);
        if let CommandOutcome::Clipboard(text) = &outcome {
            if let Err(e) = clipboard::write(text) {
                tracing::warn!("{}", e);
            }
        }
        outcome
    }

    /// Applies a widget action, then reports the new text and caret to the
    /// core.
    fn perform_editor_action(&mut self, action: text_editor::Action) -> Task<Message> {
        if let text_editor::Action::Scroll { lines } = action {
            if self.show_gutter() {
                // The widget is as tall as its text; the scroller around it
                // and the gutter moves instead
                let y = lines as f32 * self.line_height();
                return scrollable::scroll_by(
                    scrollable::Id::new(EDITOR_SCROLL),
                    AbsoluteOffset { x: 0.0, y },
                );
            }
        }

        let Some(id) = self.editor.documents().selected() else {
            return Task::none();
        };
        let Ok(line_ending) = self.editor.document(id).map(Document::line_ending) else {
            return Task::none();
        };
        let Some(view) = self.views.get_mut(&id) else {
            return Task::none();
        };

        let is_edit = action.is_edit();
        view.content.perform(action);
        if is_edit {
            let text = sync::widget_text(&view.content, line_ending);
            if let Err(e) = self.editor.notify_user_edit(id, &text) {
                tracing::warn!("Dropped edit for {}: {}", id, e);
            }
        }

        let selection = match self.editor.document(id) {
            Ok(doc) => {
                let (line, column) = view.content.cursor_position();
                let caret = sync::char_offset(doc.buffer(), line, column);
                let selected = view.content.selection();
                sync::infer_selection(doc.buffer(), caret, selected.as_deref())
            }
            Err(_) => return Task::none(),
        };
        if let Err(e) = self.editor.set_selection(id, selection) {
            tracing::warn!("{}", e);
        }

        if let Ok(doc) = self.editor.document(id) {
            view.mark_synced(doc);
        }
        Task::none()
    }

    fn caret_state(&self) -> CaretState {
        let caret = self
            .editor
            .selected_document()
            .ok()
            .map(|doc| (doc.id(), doc.selection(), doc.revision()));
        (self.show_gutter(), caret)
    }

    /// Scrolls the gutter view so the caret's line is visible.
    fn follow_caret(&self) -> Task<Message> {
        let Some(viewport) = self.viewport.filter(|_| self.show_gutter()) else {
            return Task::none();
        };
        let Ok(doc) = self.editor.selected_document() else {
            return Task::none();
        };

        let line_height = self.line_height();
        let row_top = EDITOR_PADDING + doc.caret_position().line as f32 * line_height;
        match sync::scroll_to_show(
            viewport.absolute_offset().y,
            viewport.bounds().height,
            row_top,
            line_height,
            EDITOR_PADDING,
        ) {
            Some(y) => scrollable::scroll_to(
                scrollable::Id::new(EDITOR_SCROLL),
                AbsoluteOffset { x: 0.0, y },
            ),
            None => Task::none(),
        }
    }

    fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        if matches!(key, keyboard::Key::Named(keyboard::key::Named::Escape))
            && (self.prompt.take().is_some() || self.active_menu.take().is_some())
        {
            return Task::none();
        }

        let Some(chord) = sync::key_press(&key, modifiers) else {
            return Task::none();
        };
        match self.editor.keymap().lookup(&chord).cloned() {
            Some(command) => self.run_command(command),
            None => Task::none(),
        }
    }
}
