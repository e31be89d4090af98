//! Keyword heuristics deriving a summary, topical tags and a mood from note text.

use crate::models::Mood;

pub const SUMMARY_MAX_CHARS: usize = 50;
pub const SUMMARY_ELLIPSIS: &str = "...";

pub const TAG_WORK: &str = "Work";
pub const TAG_IDEA: &str = "Idea";
pub const TAG_GENERAL: &str = "General";

/// Tag rules, checked in this order
const TAG_RULES: &[(&str, &[&str])] = &[
    (TAG_WORK, &["meeting", "work", "project"]),
    (TAG_IDEA, &["idea", "concept"]),
];

/// Mood rules, first match wins
const MOOD_RULES: &[(Mood, &[&str])] = &[
    (Mood::Positive, &["great", "happy", "success"]),
    (Mood::Urgent, &["urgent", "error", "bug"]),
];

/// Fields derived from note content
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub tags: Vec<String>,
    pub mood: Mood,
}

/// Derive summary, tags and mood from `content`
pub fn analyze(content: &str) -> Analysis {
    let lower = content.to_lowercase();
    Analysis {
        summary: summarize(content),
        tags: derive_tags(&lower),
        mood: derive_mood(&lower),
    }
}

/// First 50 characters, with an ellipsis when anything was cut
pub fn summarize(content: &str) -> String {
    let mut chars = content.chars();
    let mut summary: String = chars.by_ref().take(SUMMARY_MAX_CHARS).collect();
    if chars.next().is_some() {
        summary.push_str(SUMMARY_ELLIPSIS);
    }
    summary
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

fn derive_tags(lower: &str) -> Vec<String> {
    let mut tags: Vec<String> = TAG_RULES
        .iter()
        .filter(|(_, keywords)| contains_any(lower, keywords))
        .map(|(tag, _)| tag.to_string())
        .collect();
    if tags.is_empty() {
        tags.push(TAG_GENERAL.to_string());
    }
    tags
}

fn derive_mood(lower: &str) -> Mood {
    MOOD_RULES
        .iter()
        .find(|(_, keywords)| contains_any(lower, keywords))
        .map(|(mood, _)| *mood)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_and_idea_in_order() {
        let analysis = analyze("An idea from the Meeting");
        assert_eq!(analysis.tags, vec!["Work", "Idea"]);
    }

    #[test]
    fn test_no_keywords_defaults() {
        let analysis = analyze("Buy milk and eggs");
        assert_eq!(analysis.tags, vec!["General"]);
        assert_eq!(analysis.mood, Mood::Neutral);
    }

    #[test]
    fn test_positive_beats_urgent() {
        assert_eq!(analyze("I am happy but found a bug").mood, Mood::Positive);
        assert_eq!(analyze("found a BUG in parser").mood, Mood::Urgent);
    }

    #[test]
    fn test_substring_matching() {
        // "networking" contains "work", "conceptual" contains "concept"
        let analysis = analyze("networking is conceptual");
        assert_eq!(analysis.tags, vec!["Work", "Idea"]);
    }

    #[test]
    fn test_summary_truncation() {
        let exact = "a".repeat(50);
        assert_eq!(summarize(&exact), exact);

        let long = "b".repeat(51);
        assert_eq!(summarize(&long), format!("{}...", "b".repeat(50)));

        assert_eq!(summarize("short"), "short");
    }

    #[test]
    fn test_summary_counts_characters_not_bytes() {
        let text = "é".repeat(60);
        let summary = summarize(&text);
        assert_eq!(summary.chars().count(), 53);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_kickoff_scenario() {
        let content = "project kickoff meeting, great start";
        let analysis = analyze(content);
        assert_eq!(analysis.tags, vec!["Work"]);
        assert_eq!(analysis.mood, Mood::Positive);
        assert_eq!(analysis.summary, content);
    }
}
