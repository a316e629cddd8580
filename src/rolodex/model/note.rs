use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped free-text note with an ordered tag list.
///
/// Tags keep insertion order and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Note {
    pub fn new(text: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Utc::now(),
            tags,
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    /// Removes the first occurrence of `tag`. Returns false if it was absent.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(pos) => {
                self.tags.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match against the text or any tag.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.text.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_keep_order_and_duplicates() {
        let mut note = Note::new("call back", vec!["work".into()]);
        note.add_tag("urgent");
        note.add_tag("work");
        assert_eq!(note.tags, vec!["work", "urgent", "work"]);

        assert!(note.remove_tag("work"));
        assert_eq!(note.tags, vec!["urgent", "work"]);
        assert!(!note.remove_tag("missing"));
    }

    #[test]
    fn matches_text_or_tag_ignoring_case() {
        let note = Note::new("Student at GoIT", vec!["Junior".into()]);
        assert!(note.matches("goit"));
        assert!(note.matches("JUN"));
        assert!(!note.matches("senior"));
    }
}
