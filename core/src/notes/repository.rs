use crate::models::{now_millis, Note};

/// Sort most recently modified first; equal timestamps keep their relative order
pub fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// In-memory notes collection, kept in display order
#[derive(Debug, Default, Clone)]
pub struct NoteRepository {
    notes: Vec<Note>,
}

impl NoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a loaded collection
    pub fn from_notes(mut notes: Vec<Note>) -> Self {
        sort_by_recency(&mut notes);
        Self { notes }
    }

    /// Create an empty note at the head of the collection
    pub fn create(&mut self) -> Note {
        let note = Note::new();
        self.notes.insert(0, note.clone());
        note
    }

    /// Replace title and content of the note with the same id.
    ///
    /// `updated_at` is always stamped with the current time; the caller's
    /// value is ignored. Unknown ids leave the collection untouched.
    pub fn update(&mut self, note: &Note) -> &[Note] {
        if let Some(existing) = self.notes.iter_mut().find(|n| n.id == note.id) {
            existing.title = note.title.clone();
            existing.content = note.content.clone();
            existing.updated_at = now_millis();
        } else {
            log::debug!("event=note_update module=notes status=skipped reason=unknown_id id={}", note.id);
        }
        sort_by_recency(&mut self.notes);
        &self.notes
    }

    /// Remove the note with `id`; unknown ids are ignored
    pub fn delete(&mut self, id: &str) -> &[Note] {
        self.notes.retain(|n| n.id != id);
        &self.notes
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn first(&self) -> Option<&Note> {
        self.notes.first()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    fn is_sorted_desc(notes: &[Note]) -> bool {
        notes.windows(2).all(|w| w[0].updated_at >= w[1].updated_at)
    }

    #[test]
    fn test_from_notes_sorts_stably() {
        let repo = NoteRepository::from_notes(vec![
            Note::with_id("a", "", "", 1),
            Note::with_id("b", "", "", 3),
            Note::with_id("c", "", "", 1),
            Note::with_id("d", "", "", 3),
        ]);
        assert_eq!(ids(repo.notes()), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_create_prepends_empty_note() {
        let mut repo = NoteRepository::from_notes(vec![Note::with_id("old", "x", "y", i64::MAX)]);
        let note = repo.create();

        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert_eq!(repo.first().map(|n| n.id.as_str()), Some(note.id.as_str()));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_update_stamps_time_and_resorts() {
        let mut repo = NoteRepository::from_notes(vec![
            Note::with_id("a", "A", "", 20),
            Note::with_id("b", "B", "", 10),
        ]);

        let before = now_millis();
        let stale = Note::with_id("b", "B2", "body", 0);
        let notes = repo.update(&stale);

        assert_eq!(ids(notes), vec!["b", "a"]);
        assert_eq!(notes[0].title, "B2");
        assert_eq!(notes[0].content, "body");
        assert!(notes[0].updated_at >= before);
        assert!(is_sorted_desc(notes));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut repo = NoteRepository::from_notes(vec![Note::with_id("a", "A", "", 5)]);
        let notes = repo.update(&Note::with_id("ghost", "G", "g", 9)).to_vec();

        assert_eq!(notes, vec![Note::with_id("a", "A", "", 5)]);
    }

    #[test]
    fn test_delete() {
        let mut repo = NoteRepository::from_notes(vec![
            Note::with_id("a", "", "", 2),
            Note::with_id("b", "", "", 1),
        ]);

        assert_eq!(ids(repo.delete("a")), vec!["b"]);
        assert_eq!(ids(repo.delete("missing")), vec!["b"]);
        assert!(repo.get("a").is_none());
    }

    #[test]
    fn test_sorted_after_mixed_mutations() {
        let mut repo = NoteRepository::new();
        let first = repo.create();
        let second = repo.create();
        repo.create();

        let mut edited = first.clone();
        edited.title = "edited".to_string();
        repo.update(&edited);
        assert!(is_sorted_desc(repo.notes()));
        assert_eq!(repo.get(&first.id).map(|n| n.title.as_str()), Some("edited"));

        repo.delete(&second.id);
        assert!(is_sorted_desc(repo.notes()));
        assert_eq!(repo.len(), 2);
    }
}
