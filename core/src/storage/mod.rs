mod database;
mod memory;
mod note_store;

pub use database::SqliteStore;
pub use memory::MemoryStore;
#[cfg(test)]
pub(crate) use memory::FailingStore;
pub use note_store::{NoteStore, NOTES_KEY, THEME_KEY};

use crate::Result;

/// String-valued persistent slots.
///
/// Each key holds one whole value; writes overwrite it unconditionally.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
