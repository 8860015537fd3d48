use pulldown_cmark::{Event, Parser, Tag};
use serde::{Deserialize, Serialize};

use super::{generate_id, now_millis};

const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl Note {
    /// Create an empty note with a generated id
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            title: String::new(),
            content: String::new(),
            updated_at: now_millis(),
        }
    }

    /// Create a note with explicit fields (for testing or import)
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        updated_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            updated_at,
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Plain-text excerpt of the markdown content, at most `max_chars` long
    pub fn preview(&self, max_chars: usize) -> String {
        let mut plain = String::new();
        for event in Parser::new(&self.content) {
            match event {
                Event::Text(text) | Event::Code(text) => plain.push_str(&text),
                Event::SoftBreak | Event::HardBreak => plain.push(' '),
                // Block boundaries separate words; inline ones (emphasis, links) do not
                Event::End(
                    Tag::Paragraph
                    | Tag::Heading(..)
                    | Tag::Item
                    | Tag::CodeBlock(_)
                    | Tag::BlockQuote
                    | Tag::TableCell,
                ) => plain.push(' '),
                _ => {}
            }
        }

        let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }
        let mut truncated: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation() {
        let note = Note::new();
        assert!(!note.id.is_empty());
        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert!(note.updated_at > 0);
    }

    #[test]
    fn test_note_with_id() {
        let note = Note::with_id("test-id", "Test Note", "body", 42);
        assert_eq!(note.id, "test-id");
        assert_eq!(note.title, "Test Note");
        assert_eq!(note.content, "body");
        assert_eq!(note.updated_at, 42);
    }

    #[test]
    fn test_note_touch() {
        let mut note = Note::with_id("a", "", "", 0);
        note.touch();
        assert!(note.updated_at > 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let note = Note::with_id("a", "T", "C", 7);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["updatedAt"], 7);
        assert_eq!(json["id"], "a");
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn test_display_title_falls_back() {
        assert_eq!(Note::with_id("a", "  ", "", 0).display_title(), "Untitled");
        assert_eq!(Note::with_id("a", "Groceries", "", 0).display_title(), "Groceries");
    }

    #[test]
    fn test_preview_strips_markdown() {
        let note = Note::with_id("a", "", "# Heading\n\nSome **bold** and `code`.", 0);
        assert_eq!(note.preview(80), "Heading Some bold and code.");
    }

    #[test]
    fn test_preview_keeps_inline_markup_words_whole() {
        let note = Note::with_id("a", "", "- **bo**ld item
- [link](https://example.com)", 0);
        assert_eq!(note.preview(80), "bold item link");
    }

    #[test]
    fn test_preview_truncates() {
        let note = Note::with_id("a", "", "abcdefghij", 0);
        assert_eq!(note.preview(5), "abcd…");
        assert_eq!(note.preview(10), "abcdefghij");
    }
}
