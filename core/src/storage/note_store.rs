use crate::models::{Note, NoteId};
use crate::{Error, Result};

use super::KeyValueStore;

/// Slot holding the serialized note collection
pub const NOTES_KEY: &str = "smartNotesPro_notes";
/// Slot holding the theme preference
pub const THEME_KEY: &str = "smartNotesPro_theme";

/// In-memory ordered note collection backed by one persistent slot.
///
/// Mutations only touch memory; callers persist with [`NoteStore::save`]
/// once the mutation is complete.
pub struct NoteStore {
    notes: Vec<Note>,
    slots: Box<dyn KeyValueStore>,
}

impl NoteStore {
    /// Load the collection from the notes slot.
    ///
    /// A missing slot yields an empty store. Stored data that does not parse
    /// is returned as an error; the store does not try to repair it.
    pub fn load(slots: Box<dyn KeyValueStore>) -> Result<Self> {
        let notes = match slots.get(NOTES_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Note>>(&raw)?,
            None => Vec::new(),
        };
        log::info!("loaded {} notes", notes.len());
        Ok(Self { notes, slots })
    }

    /// Overwrite the notes slot with the full collection
    pub fn save(&mut self) -> Result<()> {
        let raw = self.serialize()?;
        self.slots.set(NOTES_KEY, &raw)?;
        log::debug!("saved {} notes ({} bytes)", self.notes.len(), raw.len());
        Ok(())
    }

    /// Apply `change` and save. When the change or the save fails the
    /// collection is restored, so memory never runs ahead of the slot.
    pub fn commit<T>(&mut self, change: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let before = self.notes.clone();
        let result = change(self).and_then(|value| self.save().map(|()| value));
        if result.is_err() {
            log::warn!("change rolled back, {} notes kept", before.len());
            self.notes = before;
        }
        result
    }

    /// Compact JSON, the form written to the notes slot
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.notes)?)
    }

    /// Pretty-printed JSON, the form written to backups
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.notes)?)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Id for a note created at `now`: the timestamp itself unless an
    /// existing id already claims it or a later value
    pub fn next_id(&self, now: i64) -> NoteId {
        match self.notes.iter().map(|n| n.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }

    /// Append a new note created at `now` and return its id
    pub fn create(&mut self, title: String, content: String, now: i64) -> NoteId {
        let id = self.next_id(now);
        self.notes.push(Note::new(id, title, content, now));
        log::info!("created note {}", id);
        id
    }

    /// Replace title and content of an existing note
    pub fn update(&mut self, id: NoteId, title: String, content: String) -> Result<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?;
        note.set_text(title, content);
        log::info!("updated note {}", id);
        Ok(())
    }

    /// Flip the pin flag; returns the new state, or `None` if the id is unknown
    pub fn toggle_pin(&mut self, id: NoteId) -> Option<bool> {
        let note = self.notes.iter_mut().find(|n| n.id == id)?;
        note.is_pinned = !note.is_pinned;
        Some(note.is_pinned)
    }

    /// Remove the note with `id`, returning it
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        let removed = self.notes.remove(index);
        log::info!("removed note {}", id);
        Some(removed)
    }

    pub fn slots(&self) -> &dyn KeyValueStore {
        self.slots.as_ref()
    }

    pub fn slots_mut(&mut self) -> &mut dyn KeyValueStore {
        self.slots.as_mut()
    }
}
