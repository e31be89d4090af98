use serde::{Deserialize, Serialize};
use std::fmt;

/// Mood label derived from note content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mood {
    #[serde(alias = "Positive 😊")]
    Positive,
    #[serde(alias = "Urgent 🚨")]
    Urgent,
    #[default]
    Neutral,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Positive => "Positive",
            Mood::Urgent => "Urgent",
            Mood::Neutral => "Neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Positive => "😊",
            Mood::Urgent => "🚨",
            Mood::Neutral => "",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_serializes_plain_label() {
        assert_eq!(serde_json::to_string(&Mood::Urgent).unwrap(), "\"Urgent\"");
    }

    #[test]
    fn test_mood_accepts_decorated_labels() {
        let mood: Mood = serde_json::from_str("\"Positive 😊\"").unwrap();
        assert_eq!(mood, Mood::Positive);
        let mood: Mood = serde_json::from_str("\"Urgent 🚨\"").unwrap();
        assert_eq!(mood, Mood::Urgent);
    }

    #[test]
    fn test_unknown_mood_is_rejected() {
        assert!(serde_json::from_str::<Mood>("\"Sleepy\"").is_err());
    }
}
