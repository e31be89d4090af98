//! The single owner of application state. UI layers turn user input into
//! [`Intent`]s and show whatever [`Notice`] comes back.

use std::fmt;
use std::path::PathBuf;

use crate::actions::{self, ExportOutcome};
use crate::editor::{Editor, SubmitOutcome};
use crate::export::FileEmitter;
use crate::models::{now_millis, validate_date_format, Note, NoteId, Theme, DEFAULT_DATE_FORMAT};
use crate::storage::{KeyValueStore, NoteStore};
use crate::view::{render, RenderedView, SortMode};
use crate::Result;

/// Startup preferences that do not live in storage
#[derive(Debug, Clone)]
pub struct Settings {
    pub date_format: String,
    /// Theme used when no preference has been stored yet
    pub default_theme: Theme,
    pub default_sort: SortMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            default_theme: Theme::default(),
            default_sort: SortMode::default(),
        }
    }
}

/// A request from the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenCreate,
    OpenEdit(NoteId),
    Submit,
    Cancel,
    TogglePin(NoteId),
    /// `confirmed` is the user's answer to the delete confirmation
    Delete { id: NoteId, confirmed: bool },
    ToggleTheme,
    /// `format` is the answer to the format prompt, `None` if dismissed
    Export { format: Option<String> },
    Search(String),
    Sort(SortMode),
}

/// Something worth telling the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Created(NoteId),
    Updated(NoteId),
    Pinned { id: NoteId, pinned: bool },
    Deleted(NoteId),
    ThemeChanged(Theme),
    Exported(PathBuf),
    NoNotesToExport,
    InvalidExportFormat(String),
}

impl Notice {
    /// Whether the notice reports a problem rather than a success
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::NoNotesToExport | Notice::InvalidExportFormat(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Created(_) => write!(f, "Note saved."),
            Notice::Updated(_) => write!(f, "Note updated."),
            Notice::Pinned { pinned: true, .. } => write!(f, "Note pinned."),
            Notice::Pinned { pinned: false, .. } => write!(f, "Note unpinned."),
            Notice::Deleted(_) => write!(f, "Note deleted."),
            Notice::ThemeChanged(theme) => write!(f, "Switched to {} mode.", theme),
            Notice::Exported(path) => write!(f, "Exported to {}", path.display()),
            Notice::NoNotesToExport => write!(f, "No notes found to download!"),
            Notice::InvalidExportFormat(_) => {
                write!(f, "Invalid format. Please enter \"json\" or \"txt\".")
            }
        }
    }
}

pub struct Controller {
    store: NoteStore,
    editor: Editor,
    emitter: Box<dyn FileEmitter>,
    search_term: String,
    sort_mode: SortMode,
    theme: Theme,
    date_format: String,
}

impl Controller {
    /// Load notes and the theme preference from `slots`
    pub fn open(
        slots: Box<dyn KeyValueStore>,
        emitter: Box<dyn FileEmitter>,
        settings: Settings,
    ) -> Result<Self> {
        validate_date_format(&settings.date_format)?;
        let store = NoteStore::load(slots)?;
        let theme = actions::load_theme(store.slots(), settings.default_theme)?;
        log::info!("controller ready: {} notes, theme {}", store.len(), theme);

        Ok(Self {
            store,
            editor: Editor::new(),
            emitter,
            search_term: String::new(),
            sort_mode: settings.default_sort,
            theme,
            date_format: settings.date_format,
        })
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Form buffers are edited in place by the UI between intents
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Render the current list for display
    pub fn view(&self) -> RenderedView {
        render(self.store.notes(), &self.search_term, self.sort_mode, &self.date_format)
    }

    pub fn handle(&mut self, intent: Intent) -> Result<Option<Notice>> {
        self.handle_at(intent, now_millis())
    }

    /// Same as [`Controller::handle`] with an explicit clock for new notes
    pub fn handle_at(&mut self, intent: Intent, now: i64) -> Result<Option<Notice>> {
        log::debug!("intent {:?}", intent);
        match intent {
            Intent::OpenCreate => {
                self.editor.open_create();
                Ok(None)
            }
            Intent::OpenEdit(id) => {
                if let Some(note) = self.store.get(id) {
                    self.editor.open_edit(note);
                }
                Ok(None)
            }
            Intent::Submit => match self.editor.submit(&mut self.store, now)? {
                SubmitOutcome::Created(id) => Ok(Some(Notice::Created(id))),
                SubmitOutcome::Updated(id) => Ok(Some(Notice::Updated(id))),
                SubmitOutcome::Rejected => Ok(None),
            },
            Intent::Cancel => {
                self.editor.cancel();
                Ok(None)
            }
            Intent::TogglePin(id) => Ok(actions::toggle_pin(&mut self.store, id)?
                .map(|pinned| Notice::Pinned { id, pinned })),
            Intent::Delete { id, confirmed } => {
                let removed = actions::delete_note(&mut self.store, id, confirmed)?;
                Ok(removed.map(|note| Notice::Deleted(note.id)))
            }
            Intent::ToggleTheme => {
                self.theme = actions::toggle_theme(self.store.slots_mut(), self.theme)?;
                Ok(Some(Notice::ThemeChanged(self.theme)))
            }
            Intent::Export { format } => {
                let outcome = actions::export_notes(
                    &self.store,
                    format.as_deref(),
                    self.emitter.as_mut(),
                    &self.date_format,
                )?;
                Ok(match outcome {
                    ExportOutcome::Written { path, .. } => Some(Notice::Exported(path)),
                    ExportOutcome::NoNotes => Some(Notice::NoNotesToExport),
                    ExportOutcome::InvalidFormat(input) => {
                        Some(Notice::InvalidExportFormat(input))
                    }
                    ExportOutcome::Cancelled => None,
                })
            }
            Intent::Search(term) => {
                self.search_term = term;
                Ok(None)
            }
            Intent::Sort(mode) => {
                self.sort_mode = mode;
                Ok(None)
            }
        }
    }
}
