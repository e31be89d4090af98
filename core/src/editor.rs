//! Note form state machine: closed, creating or editing an existing note.

use crate::models::{Note, NoteId};
use crate::storage::NoteStore;
use crate::Result;

pub const SAVE_LABEL: &str = "Save Note";
pub const UPDATE_LABEL: &str = "Update Note";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Creating,
    Editing(NoteId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(NoteId),
    Updated(NoteId),
    /// Title or content was blank after trimming; nothing changed
    Rejected,
}

/// Form buffers plus the edit-id
#[derive(Debug, Clone, Default)]
pub struct Editor {
    state: EditorState,
    pub title: String,
    pub content: String,
    focus: FormField,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    pub fn edit_id(&self) -> Option<NoteId> {
        match self.state {
            EditorState::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    /// Move focus to the other field
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Content,
            FormField::Content => FormField::Title,
        };
    }

    /// Buffer of the focused field
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            EditorState::Editing(_) => UPDATE_LABEL,
            _ => SAVE_LABEL,
        }
    }

    /// Open a blank form with the title focused
    pub fn open_create(&mut self) {
        self.reset();
        self.state = EditorState::Creating;
    }

    /// Open the form populated from `note`
    pub fn open_edit(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.focus = FormField::Title;
        self.state = EditorState::Editing(note.id);
    }

    /// Validate the form and apply it to `store`.
    ///
    /// Blank title or content leaves everything untouched, form open. Otherwise
    /// the matching note is updated (or a new one created at `now`), the store
    /// is saved and the form is closed and cleared. A failed save leaves both
    /// the store and the form as they were, so submitting again is safe.
    pub fn submit(&mut self, store: &mut NoteStore, now: i64) -> Result<SubmitOutcome> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            log::warn!("note form rejected: title or content is blank");
            return Ok(SubmitOutcome::Rejected);
        }
        let (title, content) = (title.to_string(), content.to_string());

        let edit_id = self.edit_id();
        let outcome = store.commit(|store| match edit_id {
            Some(id) if store.get(id).is_some() => {
                store.update(id, title, content)?;
                Ok(SubmitOutcome::Updated(id))
            }
            _ => Ok(SubmitOutcome::Created(store.create(title, content, now))),
        })?;

        self.reset();
        Ok(outcome)
    }

    /// Close and clear the form without touching the store
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = EditorState::Closed;
        self.title.clear();
        self.content.clear();
        self.focus = FormField::Title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use crate::storage::{FailingStore, KeyValueStore, MemoryStore, NOTES_KEY};

    fn store() -> NoteStore {
        NoteStore::load(Box::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_open_create_clears_and_focuses_title() {
        let mut editor = Editor::new();
        editor.title = "stale".to_string();
        editor.set_focus(FormField::Content);

        editor.open_create();

        assert_eq!(editor.state(), EditorState::Creating);
        assert!(editor.title.is_empty());
        assert_eq!(editor.focus(), FormField::Title);
        assert_eq!(editor.submit_label(), SAVE_LABEL);
    }

    #[test]
    fn test_blank_submission_is_rejected() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open_create();
        editor.title = "   ".to_string();
        editor.content = "body".to_string();

        let outcome = editor.submit(&mut store, 1).unwrap();

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(editor.is_open());
        assert_eq!(editor.content, "body");
        assert!(store.is_empty());
        assert!(store.slots().get(NOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_create_trims_and_persists() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open_create();
        editor.title = "  Q1 Plan ".to_string();
        editor.content = "project kickoff meeting, great start\n".to_string();

        let outcome = editor.submit(&mut store, 1_000).unwrap();

        assert_eq!(outcome, SubmitOutcome::Created(1_000));
        assert!(!editor.is_open());
        assert!(editor.title.is_empty());

        let note = store.get(1_000).unwrap();
        assert_eq!(note.title, "Q1 Plan");
        assert_eq!(note.tags, vec!["Work"]);
        assert_eq!(note.mood, Mood::Positive);
        assert_eq!(note.summary, "project kickoff meeting, great start");
        assert!(store.slots().get(NOTES_KEY).unwrap().is_some());
    }

    #[test]
    fn test_edit_preserves_identity() {
        let mut store = store();
        let id = store.create("Old".to_string(), "plain".to_string(), 50);
        store.toggle_pin(id);

        let mut editor = Editor::new();
        editor.open_edit(store.get(id).unwrap());
        assert_eq!(editor.edit_id(), Some(id));
        assert_eq!(editor.title, "Old");
        assert_eq!(editor.submit_label(), UPDATE_LABEL);

        editor.content = "urgent error".to_string();
        let outcome = editor.submit(&mut store, 9_999).unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(id));
        assert_eq!(store.len(), 1);
        let note = store.get(id).unwrap();
        assert_eq!(note.created_at, 50);
        assert!(note.is_pinned);
        assert_eq!(note.mood, Mood::Urgent);
        assert_eq!(editor.edit_id(), None);
    }

    #[test]
    fn test_edit_of_deleted_note_creates_new() {
        let mut store = store();
        let id = store.create("Gone".to_string(), "x".to_string(), 10);
        let mut editor = Editor::new();
        editor.open_edit(store.get(id).unwrap());
        store.remove(id);

        let outcome = editor.submit(&mut store, 20).unwrap();
        assert_eq!(outcome, SubmitOutcome::Created(20));
    }

    #[test]
    fn test_resubmit_after_failed_save_creates_one_note() {
        let slots = FailingStore::new();
        let failing = slots.failing.clone();
        let mut store = NoteStore::load(Box::new(slots)).unwrap();
        let mut editor = Editor::new();
        editor.open_create();
        editor.title = "Retry".to_string();
        editor.content = "body".to_string();

        failing.set(true);
        assert!(editor.submit(&mut store, 100).is_err());
        assert!(store.is_empty());
        assert!(editor.is_open());
        assert_eq!(editor.title, "Retry");

        failing.set(false);
        let outcome = editor.submit(&mut store, 101).unwrap();

        assert_eq!(outcome, SubmitOutcome::Created(101));
        assert_eq!(store.len(), 1);
        assert!(!editor.is_open());
    }

    #[test]
    fn test_failed_update_keeps_old_text() {
        let slots = FailingStore::new();
        let failing = slots.failing.clone();
        let mut store = NoteStore::load(Box::new(slots)).unwrap();
        let id = store.create("Old".to_string(), "plain".to_string(), 5);

        let mut editor = Editor::new();
        editor.open_edit(store.get(id).unwrap());
        editor.content = "urgent".to_string();
        failing.set(true);

        assert!(editor.submit(&mut store, 6).is_err());
        assert_eq!(store.get(id).unwrap().content, "plain");
        assert_eq!(editor.edit_id(), Some(id));
    }

    #[test]
    fn test_cancel_resets_without_saving() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open_create();
        editor.title = "draft".to_string();

        editor.cancel();

        assert_eq!(editor.state(), EditorState::Closed);
        assert!(editor.title.is_empty());
        assert!(store.slots_mut().get(NOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_focus_cycles() {
        let mut editor = Editor::new();
        editor.open_create();
        editor.focused_mut().push('a');
        editor.cycle_focus();
        editor.focused_mut().push('b');
        assert_eq!(editor.title, "a");
        assert_eq!(editor.content, "b");
    }
}
