//! Application state: the notes collection plus theme, selection and search.
//!
//! Every mutation is written through to the store before returning. Write
//! failures are discarded in [`Session::persist_outcome`]; the in-memory state
//! stays authoritative for the rest of the process.

use crate::config::{BackendConfig, Mode};
use crate::models::{Note, Theme};
use crate::notes::{self, NoteRepository};
use crate::storage::{KeyValueStore, StorageAdapter};
use crate::Result;

pub struct Session<S: KeyValueStore> {
    storage: StorageAdapter<S>,
    repo: NoteRepository,
    theme: Theme,
    selected_id: String,
    search_query: String,
    config: BackendConfig,
}

impl<S: KeyValueStore> Session<S> {
    /// Build the session from whatever the store holds, falling back to defaults
    pub fn open(store: S, config: BackendConfig) -> Self {
        let storage = StorageAdapter::new(store);
        let repo = NoteRepository::from_notes(storage.load_notes());
        let theme = storage.load_theme();
        let selected_id = storage.load_selected_id();

        log::info!(
            "event=session_open module=session status=ok notes={} theme={} mode={}",
            repo.len(),
            theme.as_str(),
            config.mode().label()
        );

        Self {
            storage,
            repo,
            theme,
            selected_id,
            search_query: String::new(),
            config,
        }
    }

    /// Create an empty note, select it and persist both
    pub fn create_note(&mut self) -> Note {
        let note = self.repo.create();
        self.selected_id = note.id.clone();
        self.persist_notes();
        self.persist_selected_id();
        log::debug!("event=note_create module=session status=ok id={}", note.id);
        note
    }

    /// Apply a full replacement of a note's fields
    pub fn update_note(&mut self, note: &Note) {
        self.repo.update(note);
        self.persist_notes();
    }

    /// Replace the selected note's title and content; false when nothing is selected
    pub fn update_selected(&mut self, title: &str, content: &str) -> bool {
        let Some(mut note) = self.selected_note().cloned() else {
            return false;
        };
        note.title = title.to_string();
        note.content = content.to_string();
        self.update_note(&note);
        true
    }

    /// Delete a note, moving the selection to the newest remaining note if it
    /// was the selected one
    pub fn delete_note(&mut self, id: &str) {
        let repair = if self.selected_id == id {
            Some(
                self.repo
                    .notes()
                    .iter()
                    .find(|n| n.id != id)
                    .map(|n| n.id.clone())
                    .unwrap_or_default(),
            )
        } else {
            None
        };

        self.repo.delete(id);
        self.persist_notes();

        if let Some(next) = repair {
            self.selected_id = next;
            self.persist_selected_id();
        }
        log::debug!("event=note_delete module=session status=ok id={id}");
    }

    /// Select `id` without checking that it exists
    pub fn select(&mut self, id: &str) {
        self.selected_id = id.to_string();
        self.persist_selected_id();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        let outcome = self.storage.save_theme(self.theme);
        self.persist_outcome("theme", outcome);
        self.theme
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Notes matching the current search query, newest first
    pub fn visible_notes(&self) -> Vec<&Note> {
        notes::filter(self.repo.notes(), &self.search_query)
    }

    /// The selected note, even when the search query hides it
    pub fn selected_note(&self) -> Option<&Note> {
        notes::resolve_selected(self.repo.notes(), &self.selected_id)
    }

    pub fn notes(&self) -> &[Note] {
        self.repo.notes()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    fn persist_notes(&mut self) {
        let outcome = self.storage.save_notes(self.repo.notes());
        self.persist_outcome("notes", outcome);
    }

    fn persist_selected_id(&mut self) {
        let outcome = self.storage.save_selected_id(&self.selected_id);
        self.persist_outcome("selected_id", outcome);
    }

    /// Storage writes are best-effort: failures are logged and dropped here,
    /// never surfaced to the caller.
    fn persist_outcome(&self, record: &str, outcome: Result<()>) {
        if let Err(err) = outcome {
            log::warn!("event=persist module=session status=error record={record} error={err}");
        }
    }
}
