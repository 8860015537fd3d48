//! Derived views over the notes collection.

use crate::models::Note;

/// Notes whose title or content contains `query`, case-insensitively.
///
/// A blank query matches everything. Order follows `notes`.
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }
    notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The note with `selected_id` in the unfiltered collection, if any
pub fn resolve_selected<'a>(notes: &'a [Note], selected_id: &str) -> Option<&'a Note> {
    if selected_id.is_empty() {
        return None;
    }
    notes.iter().find(|n| n.id == selected_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Note> {
        vec![
            Note::with_id("1", "Shopping List", "milk, eggs", 3),
            Note::with_id("2", "Ideas", "Build an ABC tracker", 2),
            Note::with_id("3", "abc notes", "", 1),
            Note::with_id("4", "Journal", "nothing here", 0),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let notes = sample();
        let all: Vec<&str> = filter(&notes, "").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(all, vec!["1", "2", "3", "4"]);
        assert_eq!(filter(&notes, "   \t").len(), 4);
    }

    #[test]
    fn test_matches_title_or_content_case_insensitively() {
        let notes = sample();
        let hits: Vec<&str> = filter(&notes, "abc").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(hits, vec!["2", "3"]);

        let hits: Vec<&str> = filter(&notes, "MILK").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(hits, vec!["1"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter(&sample(), "zebra").is_empty());
    }

    #[test]
    fn test_resolve_selected() {
        let notes = sample();
        assert_eq!(resolve_selected(&notes, "2").map(|n| n.title.as_str()), Some("Ideas"));
        assert!(resolve_selected(&notes, "").is_none());
        assert!(resolve_selected(&notes, "gone").is_none());
    }
}
