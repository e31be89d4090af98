use serde::{Deserialize, Serialize};

use super::{format_timestamp, Mood};
use crate::analyzer::analyze;

pub type NoteId = i64;

/// A note as persisted in the notes slot.
///
/// Field order and camelCase names match the stored JSON layout, so a
/// collection that is loaded and saved again serializes byte for byte the same.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    #[serde(default)]
    pub is_pinned: bool,
    pub summary: String,
    pub tags: Vec<String>,
    pub mood: Mood,
}

impl Note {
    /// Create an unpinned note and derive its summary, tags and mood
    pub fn new(id: NoteId, title: String, content: String, created_at: i64) -> Self {
        let analysis = analyze(&content);
        Self {
            id,
            title,
            content,
            created_at,
            is_pinned: false,
            summary: analysis.summary,
            tags: analysis.tags,
            mood: analysis.mood,
        }
    }

    /// Replace title and content, recomputing the derived fields.
    /// Id, creation time and pin state are left alone.
    pub fn set_text(&mut self, title: String, content: String) {
        let analysis = analyze(&content);
        self.title = title;
        self.content = content;
        self.summary = analysis.summary;
        self.tags = analysis.tags;
        self.mood = analysis.mood;
    }

    /// Case-insensitive match on title or content. `needle` must be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }

    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }

    pub fn created_display(&self, date_format: &str) -> String {
        format_timestamp(self.created_at, date_format)
    }
}
