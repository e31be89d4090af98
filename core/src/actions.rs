//! Pin, delete, theme and export handlers. Each one persists what it changes.

use std::path::PathBuf;

use crate::export::{text_export, ExportFormat, FileEmitter};
use crate::models::{Note, NoteId, Theme};
use crate::storage::{KeyValueStore, NoteStore, THEME_KEY};
use crate::Result;

/// Flip the pin flag of `id` and persist. Unknown ids are a no-op.
pub fn toggle_pin(store: &mut NoteStore, id: NoteId) -> Result<Option<bool>> {
    if store.get(id).is_none() {
        return Ok(None);
    }
    let pinned = store.commit(|store| Ok(store.toggle_pin(id)))?;
    log::info!("note {} pinned={:?}", id, pinned);
    Ok(pinned)
}

/// Remove `id` if the user confirmed. Declining changes nothing.
pub fn delete_note(store: &mut NoteStore, id: NoteId, confirmed: bool) -> Result<Option<Note>> {
    if !confirmed {
        log::debug!("delete of note {} declined", id);
        return Ok(None);
    }
    if store.get(id).is_none() {
        return Ok(None);
    }
    store.commit(|store| Ok(store.remove(id)))
}

/// Stored theme preference, or `fallback` when none (or an unreadable one) is stored
pub fn load_theme(slots: &dyn KeyValueStore, fallback: Theme) -> Result<Theme> {
    match slots.get(THEME_KEY)? {
        Some(raw) => match raw.parse::<Theme>() {
            Ok(theme) => Ok(theme),
            Err(err) => {
                log::warn!("ignoring stored theme: {}", err);
                Ok(fallback)
            }
        },
        None => Ok(fallback),
    }
}

/// Switch to the other theme and persist the choice
pub fn toggle_theme(slots: &mut dyn KeyValueStore, current: Theme) -> Result<Theme> {
    let next = current.toggled();
    slots.set(THEME_KEY, next.as_str())?;
    log::info!("theme switched to {}", next);
    Ok(next)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { format: ExportFormat, path: PathBuf },
    /// There is nothing to export
    NoNotes,
    /// The user typed something other than a known format
    InvalidFormat(String),
    /// The prompt was dismissed or left empty
    Cancelled,
}

/// Export every note in the format named by `input`.
///
/// `input` is the raw answer to the format prompt, `None` if the prompt was
/// dismissed. The empty-store check happens before the answer is looked at.
pub fn export_notes(
    store: &NoteStore,
    input: Option<&str>,
    emitter: &mut dyn FileEmitter,
    date_format: &str,
) -> Result<ExportOutcome> {
    if store.is_empty() {
        return Ok(ExportOutcome::NoNotes);
    }

    let answer = input.map(str::trim).unwrap_or_default();
    if answer.is_empty() {
        return Ok(ExportOutcome::Cancelled);
    }
    let Ok(format) = answer.parse::<ExportFormat>() else {
        log::warn!("export rejected, unknown format {:?}", answer);
        return Ok(ExportOutcome::InvalidFormat(answer.to_string()));
    };

    let contents = match format {
        ExportFormat::Json => store.to_pretty_json()?,
        ExportFormat::Text => text_export(store.notes(), date_format),
    };
    let path = emitter.emit(format.filename(), &contents, format.mime())?;
    log::info!("exported {} notes as {}", store.len(), format);
    Ok(ExportOutcome::Written { format, path })
}
