//! List rendering: search filter, pinned-first sort, empty states and card assembly.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::format::{escape_html, format_markdown, highlight};
use crate::models::{Mood, Note, NoteId};
use crate::Error;

pub const WELCOME_TITLE: &str = "Welcome to Smart Notes Pro!";
pub const WELCOME_HINT: &str = "Click \"➕ Add New Note\" to create your first note.";
pub const NO_MATCHES_TITLE: &str = "No Notes Found";

/// Recency order applied within each pin group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            SortMode::Newest => SortMode::Oldest,
            SortMode::Oldest => SortMode::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            other => Err(Error::InvalidInput(format!("Unknown sort mode: {}", other))),
        }
    }
}

/// One rendered note. `title` and `content` are markup; the rest is plain text
/// except `summary`, which is escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteCard {
    pub id: NoteId,
    pub pinned: bool,
    pub title: String,
    pub content: String,
    pub created: String,
    pub mood: Mood,
    pub tags: String,
    pub summary: String,
}

impl NoteCard {
    fn build(note: &Note, term: &str, date_format: &str) -> Self {
        Self {
            id: note.id,
            pinned: note.is_pinned,
            title: highlight(&escape_html(&note.title), term),
            content: highlight(&format_markdown(&note.content), term),
            created: note.created_display(date_format),
            mood: note.mood,
            tags: note.tags_joined(),
            summary: escape_html(&note.summary),
        }
    }

    pub fn to_html(&self) -> String {
        let pinned_class = if self.pinned { " pinned-note" } else { "" };
        let pin_icon = if self.pinned { "📌" } else { "📍" };
        format!(
            concat!(
                "<div class=\"note-card{pinned_class}\" data-id=\"{id}\">\n",
                "  <div class=\"note-header\">\n",
                "    <h3>{title}</h3>\n",
                "    <div class=\"card-actions\">\n",
                "      <button data-action=\"pin\" data-id=\"{id}\">{pin_icon}</button>\n",
                "      <button data-action=\"edit\" data-id=\"{id}\">✏️</button>\n",
                "      <button data-action=\"delete\" data-id=\"{id}\">🗑️</button>\n",
                "    </div>\n",
                "  </div>\n",
                "  <div class=\"note-meta\">\n",
                "    <span>Created: {created}</span> |\n",
                "    <span>Mood: {mood}</span> |\n",
                "    <span>Tags: {tags}</span>\n",
                "  </div>\n",
                "  <div class=\"note-content\">{content}</div>\n",
                "  <div class=\"note-summary\"><small>Summary: {summary}</small></div>\n",
                "</div>\n",
            ),
            pinned_class = pinned_class,
            id = self.id,
            title = self.title,
            pin_icon = pin_icon,
            created = escape_html(&self.created),
            mood = self.mood,
            tags = escape_html(&self.tags),
            content = self.content,
            summary = self.summary,
        )
    }
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    /// Nothing stored yet and no search active
    Welcome,
    /// The search matched nothing; carries the term as typed
    NoMatches { term: String },
    Cards(Vec<NoteCard>),
}

impl RenderedView {
    pub fn cards(&self) -> &[NoteCard] {
        match self {
            RenderedView::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            RenderedView::Welcome => format!(
                "<div class=\"no-results-message\">\n  <h2>{}</h2>\n  <p>{}</p>\n</div>\n",
                WELCOME_TITLE,
                escape_html(WELCOME_HINT)
            ),
            RenderedView::NoMatches { term } => format!(
                concat!(
                    "<div class=\"no-results-message\">\n",
                    "  <h2>{}</h2>\n",
                    "  <p>Your search for \"<strong>{}</strong>\" did not match any notes.</p>\n",
                    "  <p>Try a different search term or add a new note!</p>\n",
                    "</div>\n",
                ),
                NO_MATCHES_TITLE,
                escape_html(term)
            ),
            RenderedView::Cards(cards) => cards.iter().map(NoteCard::to_html).collect(),
        }
    }
}

/// Notes whose title or content contains `term`, ignoring case
pub fn filter_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    let needle = term.to_lowercase();
    notes.iter().filter(|n| n.matches(&needle)).collect()
}

/// Pinned notes first, then by creation time in `mode` order. Stable.
pub fn sort_notes(notes: &mut [&Note], mode: SortMode) {
    notes.sort_by(|a, b| compare(a, b, mode));
}

fn compare(a: &Note, b: &Note, mode: SortMode) -> Ordering {
    let by_time = match mode {
        SortMode::Newest => b.created_at.cmp(&a.created_at),
        SortMode::Oldest => a.created_at.cmp(&b.created_at),
    };
    b.is_pinned.cmp(&a.is_pinned).then(by_time)
}

/// Run the full pipeline over `notes`
pub fn render(notes: &[Note], term: &str, mode: SortMode, date_format: &str) -> RenderedView {
    if notes.is_empty() && term.trim().is_empty() {
        return RenderedView::Welcome;
    }

    let mut visible = filter_notes(notes, term);
    log::debug!("search {:?} kept {} of {} notes", term, visible.len(), notes.len());
    if visible.is_empty() {
        return RenderedView::NoMatches { term: term.to_string() };
    }

    sort_notes(&mut visible, mode);
    RenderedView::Cards(
        visible
            .into_iter()
            .map(|note| NoteCard::build(note, term, date_format))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_DATE_FORMAT;

    fn note(id: NoteId, title: &str, content: &str, created_at: i64, pinned: bool) -> Note {
        let mut note = Note::new(id, title.to_string(), content.to_string(), created_at);
        note.is_pinned = pinned;
        note
    }

    fn ids(view: &RenderedView) -> Vec<NoteId> {
        view.cards().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_welcome_when_empty() {
        let empty = render(&[], "", SortMode::Newest, DEFAULT_DATE_FORMAT);
        assert_eq!(empty, RenderedView::Welcome);
        let blank = render(&[], "   ", SortMode::Newest, DEFAULT_DATE_FORMAT);
        assert_eq!(blank, RenderedView::Welcome);
    }

    #[test]
    fn test_no_matches_on_empty_collection_with_term() {
        let view = render(&[], "Milk", SortMode::Newest, DEFAULT_DATE_FORMAT);
        assert_eq!(view, RenderedView::NoMatches { term: "Milk".to_string() });
    }

    #[test]
    fn test_no_matches_keeps_literal_term() {
        let notes = vec![note(1, "a", "b", 1, false)];
        let view = render(&notes, "ZZZ", SortMode::Newest, DEFAULT_DATE_FORMAT);
        assert_eq!(view, RenderedView::NoMatches { term: "ZZZ".to_string() });
        assert!(view.to_html().contains("<strong>ZZZ</strong>"));
    }

    #[test]
    fn test_pin_dominates_recency() {
        let notes = vec![
            note(1, "A", "older", 100, true),
            note(2, "B", "newer", 200, false),
        ];
        let view = render(&notes, "", SortMode::Newest, DEFAULT_DATE_FORMAT);
        assert_eq!(ids(&view), vec![1, 2]);
    }

    #[test]
    fn test_sort_modes_within_pin_groups() {
        let notes = vec![
            note(1, "a", "x", 100, false),
            note(2, "b", "x", 300, true),
            note(3, "c", "x", 200, false),
            note(4, "d", "x", 50, true),
        ];

        let newest = render(&notes, "", SortMode::Newest, DEFAULT_DATE_FORMAT);
        assert_eq!(ids(&newest), vec![2, 4, 3, 1]);

        let oldest = render(&notes, "", SortMode::Oldest, DEFAULT_DATE_FORMAT);
        assert_eq!(ids(&oldest), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_filter_title_or_content_case_insensitive() {
        let notes = vec![
            note(1, "Shopping", "milk", 1, false),
            note(2, "Work", "Finish REPORT", 2, false),
            note(3, "Misc", "nothing", 3, false),
        ];
        assert_eq!(filter_notes(&notes, "report").len(), 1);
        assert_eq!(filter_notes(&notes, "SHOP").len(), 1);
        assert_eq!(filter_notes(&notes, "").len(), 3);
    }

    #[test]
    fn test_card_contents() {
        let notes = vec![note(9, "Plan", "**big** plan", 1, true)];
        let view = render(&notes, "plan", SortMode::Newest, "%Y");
        let card = &view.cards()[0];

        assert_eq!(card.title, r#"<span class="highlight">Plan</span>"#);
        assert_eq!(card.content, r#"<strong>big</strong> <span class="highlight">plan</span>"#);
        assert_eq!(card.tags, "General");
        assert_eq!(card.mood, Mood::Neutral);
        assert_eq!(card.summary, "**big** plan");
        assert!(card.pinned);
    }

    #[test]
    fn test_card_html_escapes_title() {
        let notes = vec![note(3, "<script>", "body", 1, false)];
        let html = render(&notes, "", SortMode::Newest, DEFAULT_DATE_FORMAT).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("data-id=\"3\""));
    }

    #[test]
    fn test_sort_mode_parse_and_toggle() {
        assert_eq!("Oldest".parse::<SortMode>().unwrap(), SortMode::Oldest);
        assert!("random".parse::<SortMode>().is_err());
        assert_eq!(SortMode::Newest.toggled(), SortMode::Oldest);
    }
}
