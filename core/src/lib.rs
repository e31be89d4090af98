//! Core of SmartNotes: note model, keyword analyzer, markup pipeline,
//! persistent store and the controller the UI talks to.

pub mod actions;
pub mod analyzer;
pub mod controller;
pub mod editor;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod models;
pub mod storage;
pub mod view;

pub use analyzer::{analyze, Analysis};
pub use controller::{Controller, Intent, Notice, Settings};
pub use editor::{Editor, EditorState, FormField, SubmitOutcome};
pub use error::{Error, Result};
pub use export::{DirectoryEmitter, ExportFormat, FileEmitter};
pub use models::{Mood, Note, NoteId, Theme};
pub use storage::{KeyValueStore, MemoryStore, NoteStore, SqliteStore, NOTES_KEY, THEME_KEY};
pub use view::{render, NoteCard, RenderedView, SortMode};
