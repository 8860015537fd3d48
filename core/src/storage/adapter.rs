//! JSON persistence of the three session records on top of a [`KeyValueStore`].
//!
//! Reads never fail: missing or malformed records degrade to their defaults.
//! Writes return a `Result` and leave the decision to discard it to the caller.

use crate::models::{Note, Theme};
use crate::storage::KeyValueStore;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

pub const NOTES_KEY: &str = "scribble.notes";
pub const THEME_KEY: &str = "scribble.theme";
pub const SELECTED_ID_KEY: &str = "scribble.selectedId";

pub struct StorageAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("event=store_read module=storage status=error key={key} error={err}");
                None
            }
        }
    }

    /// Read and decode the JSON record at `key`; `None` if absent or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("event=store_decode module=storage status=error key={key} error={err}");
                None
            }
        }
    }

    /// Encode `value` as JSON and overwrite the record at `key`
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.store.set(key, &encoded)
    }

    /// Load the notes collection.
    ///
    /// A record that is not a JSON array yields an empty collection. Entries
    /// that do not decode as a note, or repeat an earlier id, are skipped.
    pub fn load_notes(&self) -> Vec<Note> {
        let Some(serde_json::Value::Array(entries)) = self.load::<serde_json::Value>(NOTES_KEY)
        else {
            return Vec::new();
        };

        let total = entries.len();
        let mut seen = HashSet::new();
        let notes: Vec<Note> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<Note>(entry).ok())
            .filter(|note| seen.insert(note.id.clone()))
            .collect();

        if notes.len() != total {
            log::warn!(
                "event=notes_load module=storage status=partial kept={} skipped={}",
                notes.len(),
                total - notes.len()
            );
        }
        notes
    }

    pub fn save_notes(&mut self, notes: &[Note]) -> Result<()> {
        self.save(NOTES_KEY, notes)
    }

    pub fn load_theme(&self) -> Theme {
        match self.read_raw(THEME_KEY) {
            Some(raw) => {
                let name = serde_json::from_str::<String>(&raw).unwrap_or(raw);
                Theme::parse(name.trim())
            }
            None => Theme::default(),
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.save(THEME_KEY, theme.as_str())
    }

    /// Load the selected note id; absent or `null` becomes the empty string
    pub fn load_selected_id(&self) -> String {
        self.load::<Option<String>>(SELECTED_ID_KEY)
            .flatten()
            .unwrap_or_default()
    }

    pub fn save_selected_id(&mut self, id: &str) -> Result<()> {
        self.save(SELECTED_ID_KEY, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn adapter_with(key: &str, raw: &str) -> StorageAdapter<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(key, raw).unwrap();
        StorageAdapter::new(store)
    }

    #[test]
    fn test_notes_round_trip() {
        let mut adapter = StorageAdapter::new(MemoryStore::new());
        let notes = vec![
            Note::with_id("b", "Second", "two", 2),
            Note::with_id("a", "First", "one", 1),
        ];

        adapter.save_notes(&notes).unwrap();
        let loaded = adapter.load_notes();
        adapter.save_notes(&loaded).unwrap();
        assert_eq!(adapter.load_notes(), notes);
    }

    #[test]
    fn test_missing_notes_is_empty() {
        let adapter = StorageAdapter::new(MemoryStore::new());
        assert!(adapter.load_notes().is_empty());
    }

    #[test]
    fn test_corrupt_notes_is_empty() {
        assert!(adapter_with(NOTES_KEY, "{not json").load_notes().is_empty());
    }

    #[test]
    fn test_non_sequence_notes_is_empty() {
        assert!(adapter_with(NOTES_KEY, r#"{"id":"a"}"#).load_notes().is_empty());
        assert!(adapter_with(NOTES_KEY, "42").load_notes().is_empty());
        assert!(adapter_with(NOTES_KEY, "null").load_notes().is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let raw = r#"[
            {"id":"a","title":"A","content":"","updatedAt":1},
            {"id":"b","title":3},
            {"id":"a","title":"dup","content":"","updatedAt":0}
        ]"#;
        let notes = adapter_with(NOTES_KEY, raw).load_notes();
        assert_eq!(notes, vec![Note::with_id("a", "A", "", 1)]);
    }

    #[test]
    fn test_saved_notes_layout() {
        let mut adapter = StorageAdapter::new(MemoryStore::new());
        adapter
            .save_notes(&[Note::with_id("a", "T", "C", 5)])
            .unwrap();
        let raw = adapter.store().get(NOTES_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"id":"a","title":"T","content":"C","updatedAt":5}]"#);
    }

    #[test]
    fn test_theme_defaults_and_round_trip() {
        let mut adapter = StorageAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load_theme(), Theme::Light);

        adapter.save_theme(Theme::Dark).unwrap();
        assert_eq!(adapter.load_theme(), Theme::Dark);
        assert_eq!(
            adapter.store().get(THEME_KEY).unwrap().as_deref(),
            Some("\"dark\"")
        );
    }

    #[test]
    fn test_unrecognized_theme_is_light() {
        assert_eq!(adapter_with(THEME_KEY, "\"sepia\"").load_theme(), Theme::Light);
        assert_eq!(adapter_with(THEME_KEY, "garbage{").load_theme(), Theme::Light);
        assert_eq!(adapter_with(THEME_KEY, "dark").load_theme(), Theme::Dark);
    }

    #[test]
    fn test_selected_id_normalizes_to_empty() {
        let adapter = StorageAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load_selected_id(), "");
        assert_eq!(adapter_with(SELECTED_ID_KEY, "null").load_selected_id(), "");
        assert_eq!(adapter_with(SELECTED_ID_KEY, "[1,2]").load_selected_id(), "");
    }

    #[test]
    fn test_selected_id_round_trip() {
        let mut adapter = StorageAdapter::new(MemoryStore::new());
        adapter.save_selected_id("abc").unwrap();
        assert_eq!(adapter.load_selected_id(), "abc");
        adapter.save_selected_id("").unwrap();
        assert_eq!(adapter.load_selected_id(), "");
    }
}
