use anyhow::Result;
use smartnotes_core::{
    Controller, DirectoryEmitter, Intent, Notice, NoteId, RenderedView, SqliteStore,
};
use std::path::Path;

use crate::config::Config;

pub const DATABASE_FILE: &str = "smartnotes.db";

/// Which input the keyboard currently drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    ConfirmDelete(NoteId),
    ExportPrompt,
    Help,
}

/// Message shown in the status bar until the next one replaces it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Application state
pub struct App {
    pub should_quit: bool,
    pub controller: Controller,
    pub config: Config,
    pub mode: InputMode,
    /// Index into the rendered cards
    pub selected: usize,
    pub view: RenderedView,
    pub search_input: String,
    pub export_input: String,
    pub status: Option<StatusMessage>,
}

impl App {
    /// Open the note database in `data_dir`
    pub fn open(data_dir: &Path, config: Config) -> Result<Self> {
        let slots = SqliteStore::open(data_dir.join(DATABASE_FILE))?;
        let emitter = DirectoryEmitter::new(config.export_dir(data_dir));
        log::info!("exports go to {}", emitter.dir().display());
        let controller = Controller::open(Box::new(slots), Box::new(emitter), config.settings())?;
        Ok(Self::with_controller(controller, config))
    }

    pub fn with_controller(controller: Controller, config: Config) -> Self {
        let view = controller.view();
        Self {
            should_quit: false,
            controller,
            config,
            mode: InputMode::Normal,
            selected: 0,
            view,
            search_input: String::new(),
            export_input: String::new(),
            status: None,
        }
    }

    /// Send an intent to the controller, then re-render.
    /// Failures end up in the status bar and the log.
    fn dispatch(&mut self, intent: Intent) -> Option<Notice> {
        let notice = match self.controller.handle(intent) {
            Ok(notice) => notice,
            Err(err) => {
                log::error!("action failed: {}", err);
                self.status = Some(StatusMessage {
                    text: format!("Error: {}", err),
                    is_error: true,
                });
                None
            }
        };
        if let Some(notice) = &notice {
            self.status = Some(StatusMessage {
                text: notice.to_string(),
                is_error: notice.is_error(),
            });
        }
        self.refresh();
        notice
    }

    /// Re-render the list and keep the selection in range
    pub fn refresh(&mut self) {
        self.view = self.controller.view();
        let count = self.view.cards().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    pub fn selected_id(&self) -> Option<NoteId> {
        self.view.cards().get(self.selected).map(|card| card.id)
    }

    fn select_id(&mut self, id: NoteId) {
        if let Some(index) = self.view.cards().iter().position(|card| card.id == id) {
            self.selected = index;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let last = self.view.cards().len().saturating_sub(1);
        if self.selected < last {
            self.selected += 1;
        }
    }

    // Form

    pub fn open_create(&mut self) {
        self.dispatch(Intent::OpenCreate);
        self.mode = InputMode::Form;
    }

    pub fn open_edit_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(Intent::OpenEdit(id));
            if self.controller.editor().is_open() {
                self.mode = InputMode::Form;
            }
        }
    }

    pub fn form_input(&mut self, c: char) {
        self.controller.editor_mut().focused_mut().push(c);
    }

    pub fn form_backspace(&mut self) {
        self.controller.editor_mut().focused_mut().pop();
    }

    pub fn form_next_field(&mut self) {
        self.controller.editor_mut().cycle_focus();
    }

    /// Submit the form; it stays open when title or content is blank
    pub fn submit_form(&mut self) {
        match self.dispatch(Intent::Submit) {
            Some(Notice::Created(id)) | Some(Notice::Updated(id)) => self.select_id(id),
            _ => {}
        }
        if !self.controller.editor().is_open() {
            self.mode = InputMode::Normal;
        }
    }

    pub fn cancel_form(&mut self) {
        self.dispatch(Intent::Cancel);
        self.mode = InputMode::Normal;
    }

    // Card actions

    pub fn toggle_pin_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(Intent::TogglePin(id));
            self.select_id(id);
        }
    }

    pub fn initiate_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.mode = InputMode::ConfirmDelete(id);
        }
    }

    pub fn confirm_delete(&mut self) {
        self.answer_delete(true);
    }

    pub fn cancel_delete(&mut self) {
        self.answer_delete(false);
    }

    fn answer_delete(&mut self, confirmed: bool) {
        if let InputMode::ConfirmDelete(id) = self.mode {
            self.dispatch(Intent::Delete { id, confirmed });
        }
        self.mode = InputMode::Normal;
    }

    pub fn toggle_theme(&mut self) {
        self.dispatch(Intent::ToggleTheme);
    }

    pub fn toggle_sort(&mut self) {
        let next = self.controller.sort_mode().toggled();
        self.dispatch(Intent::Sort(next));
    }

    // Search

    pub fn open_search(&mut self) {
        self.search_input = self.controller.search_term().to_string();
        self.mode = InputMode::Search;
    }

    pub fn update_search_query(&mut self, c: char) {
        self.search_input.push(c);
        self.apply_search();
    }

    pub fn backspace_search_query(&mut self) {
        self.search_input.pop();
        self.apply_search();
    }

    fn apply_search(&mut self) {
        self.dispatch(Intent::Search(self.search_input.clone()));
        self.selected = 0;
    }

    /// Leave search input, keeping the filter
    pub fn close_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Leave search input and drop the filter
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.apply_search();
        self.mode = InputMode::Normal;
    }

    // Export

    /// Ask for a format, unless there is nothing to export
    pub fn open_export(&mut self) {
        if self.controller.notes().is_empty() {
            self.dispatch(Intent::Export { format: None });
            return;
        }
        self.export_input.clear();
        self.mode = InputMode::ExportPrompt;
    }

    pub fn confirm_export(&mut self) {
        let format = std::mem::take(&mut self.export_input);
        self.dispatch(Intent::Export { format: Some(format) });
        self.mode = InputMode::Normal;
    }

    pub fn cancel_export(&mut self) {
        self.export_input.clear();
        self.dispatch(Intent::Export { format: None });
        self.mode = InputMode::Normal;
    }

    pub fn open_help(&mut self) {
        self.mode = InputMode::Help;
    }

    pub fn close_help(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Handle tick events
    pub fn tick(&mut self) {}

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
