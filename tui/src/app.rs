use anyhow::Result;
use ratatui::layout::Rect;
use scribble_core::export::export_markdown;
use scribble_core::{Note, Session, SqliteStore, Theme};
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::Config;

/// Which pane receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Search,
    Title,
    Content,
}

impl Focus {
    /// Next pane in Tab order
    pub fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Title,
            Focus::Title => Focus::Content,
            Focus::Content => Focus::Search,
            Focus::Search => Focus::Sidebar,
        }
    }
}

/// Application state
pub struct App {
    pub should_quit: bool,
    pub session: Session<SqliteStore>,
    pub config: Config,
    pub focus: Focus,
    pub sidebar_selected_index: usize,
    pub title_buffer: String,
    pub content_buffer: String,
    pub confirming_delete: bool,
    pub help_open: bool,
    pub status_message: Option<String>,
    pub workspace_dir: PathBuf,
    // Filled in while rendering so mouse clicks can be mapped to notes
    pub sidebar_list_area: Rect,
    pub sidebar_offset: usize,
}

impl App {
    /// Directory holding the store file; config, logs and exports live there too
    pub fn workspace_dir_for(db_path: &Path) -> PathBuf {
        db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Open the store at `db_path`
    pub fn new(db_path: &Path, config: Config) -> Result<Self> {
        let store = SqliteStore::open(db_path)?;
        Ok(Self::with_store(store, config, Self::workspace_dir_for(db_path)))
    }

    /// Build the app around an already-open store
    pub fn with_store(store: SqliteStore, config: Config, workspace_dir: PathBuf) -> Self {
        let backend = config.backend.clone().with_env_override();
        let session = Session::open(store, backend);

        let mut app = Self {
            should_quit: false,
            session,
            config,
            focus: Focus::Sidebar,
            sidebar_selected_index: 0,
            title_buffer: String::new(),
            content_buffer: String::new(),
            confirming_delete: false,
            help_open: false,
            status_message: None,
            workspace_dir,
            sidebar_list_area: Rect::default(),
            sidebar_offset: 0,
        };
        app.load_selected_into_buffers();
        app.sync_sidebar_to_selection();
        app
    }

    pub fn theme(&self) -> Theme {
        self.session.theme()
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        self.session.visible_notes()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.session.selected_note()
    }

    /// Copy the selected note into the editor buffers
    fn load_selected_into_buffers(&mut self) {
        match self.session.selected_note() {
            Some(note) => {
                self.title_buffer = note.title.clone();
                self.content_buffer = note.content.clone();
            }
            None => {
                self.title_buffer.clear();
                self.content_buffer.clear();
            }
        }
    }

    /// Point the sidebar cursor at the selected note when it is visible
    fn sync_sidebar_to_selection(&mut self) {
        let selected = self.session.selected_id().to_string();
        let visible = self.session.visible_notes();
        if let Some(idx) = visible.iter().position(|n| n.id == selected) {
            self.sidebar_selected_index = idx;
        } else {
            self.sidebar_selected_index = self
                .sidebar_selected_index
                .min(visible.len().saturating_sub(1));
        }
    }

    // =========================
    // Notes
    // =========================

    /// Create a note, select it and start editing its title
    pub fn create_note(&mut self) {
        self.session.create_note();
        self.load_selected_into_buffers();
        self.sync_sidebar_to_selection();
        self.focus = Focus::Title;
    }

    /// Select a note by its index in the visible list
    pub fn select_visible(&mut self, index: usize) {
        let id = match self.session.visible_notes().get(index) {
            Some(note) => note.id.clone(),
            None => return,
        };
        self.session.select(&id);
        self.sidebar_selected_index = index;
        self.load_selected_into_buffers();
    }

    pub fn sidebar_select_up(&mut self) {
        if self.sidebar_selected_index > 0 {
            self.sidebar_selected_index -= 1;
        }
    }

    pub fn sidebar_select_down(&mut self) {
        let last = self.session.visible_notes().len().saturating_sub(1);
        if self.sidebar_selected_index < last {
            self.sidebar_selected_index += 1;
        }
    }

    /// Open the sidebar-highlighted note in the editor
    pub fn sidebar_activate_selected(&mut self) {
        if self.session.visible_notes().is_empty() {
            return;
        }
        self.select_visible(self.sidebar_selected_index);
        self.focus = Focus::Title;
    }

    /// Ask for confirmation before deleting the selected note
    pub fn initiate_delete(&mut self) {
        if self.session.selected_note().is_some() {
            self.confirming_delete = true;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.confirming_delete = false;
        let id = self.session.selected_id().to_string();
        if id.is_empty() {
            return;
        }
        self.session.delete_note(&id);
        self.load_selected_into_buffers();
        self.sync_sidebar_to_selection();
        if self.session.selected_note().is_none() {
            self.focus = Focus::Sidebar;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    // =========================
    // Editing
    // =========================

    /// Push the editor buffers into the selected note
    fn commit_edit(&mut self) {
        if self.session.update_selected(&self.title_buffer, &self.content_buffer) {
            self.sync_sidebar_to_selection();
        }
    }

    fn can_edit(&self) -> bool {
        self.session.selected_note().is_some()
    }

    pub fn insert_char(&mut self, ch: char) {
        if !self.can_edit() {
            return;
        }
        match self.focus {
            Focus::Title => self.title_buffer.push(ch),
            Focus::Content => self.content_buffer.push(ch),
            _ => return,
        }
        self.commit_edit();
    }

    pub fn insert_newline(&mut self) {
        if self.focus == Focus::Content && self.can_edit() {
            self.content_buffer.push('\n');
            self.commit_edit();
        }
    }

    /// Delete the last grapheme of the focused field
    pub fn backspace(&mut self) {
        if !self.can_edit() {
            return;
        }
        let buffer = match self.focus {
            Focus::Title => &mut self.title_buffer,
            Focus::Content => &mut self.content_buffer,
            _ => return,
        };
        if pop_grapheme(buffer) {
            self.commit_edit();
        }
    }

    // =========================
    // Search
    // =========================

    pub fn open_search(&mut self) {
        self.focus = Focus::Search;
    }

    pub fn update_search_query(&mut self, ch: char) {
        let mut query = self.session.search_query().to_string();
        query.push(ch);
        self.set_search_query(query);
    }

    pub fn backspace_search_query(&mut self) {
        let mut query = self.session.search_query().to_string();
        if pop_grapheme(&mut query) {
            self.set_search_query(query);
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search_query(String::new());
        self.focus = Focus::Sidebar;
    }

    fn set_search_query(&mut self, query: String) {
        self.session.set_search_query(query);
        self.sidebar_selected_index = 0;
        self.sync_sidebar_to_selection();
    }

    // =========================
    // Misc
    // =========================

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
        // Editor panes are skipped while nothing is selected
        if !self.can_edit() && matches!(self.focus, Focus::Title | Focus::Content) {
            self.focus = Focus::Search;
        }
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.session.toggle_theme();
        self.status_message = Some(format!("Theme: {}", theme.as_str()));
    }

    pub fn export_markdown(&mut self, out_dir: &Path) -> Result<()> {
        match export_markdown(self.session.notes(), out_dir) {
            Ok(written) => {
                self.status_message = Some(format!(
                    "Exported {} note(s) to {}",
                    written.len(),
                    out_dir.display()
                ));
                Ok(())
            }
            Err(err) => {
                log::warn!("event=export module=tui status=error error={err}");
                self.status_message = Some(format!("Export failed: {err}"));
                Err(err.into())
            }
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.workspace_dir.join("export")
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    /// Handle tick events
    pub fn tick(&mut self) {}

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn pop_grapheme(buffer: &mut String) -> bool {
    match buffer.grapheme_indices(true).next_back() {
        Some((idx, _)) => {
            buffer.truncate(idx);
            true
        }
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_app() -> App {
        App::with_store(
            SqliteStore::open_in_memory().unwrap(),
            Config::default(),
            PathBuf::from("."),
        )
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.insert_char(ch);
        }
    }

    #[test]
    fn test_workspace_dir_for() {
        assert_eq!(App::workspace_dir_for(Path::new("scribble.db")), PathBuf::from("."));
        assert_eq!(
            App::workspace_dir_for(Path::new("/data/notes/scribble.db")),
            PathBuf::from("/data/notes")
        );
    }

    #[test]
    fn test_new_opens_store_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("scribble.db");
        {
            let mut app = App::new(&db_path, Config::default()).unwrap();
            app.create_note();
            app.insert_char('x');
        }
        let app = App::new(&db_path, Config::default()).unwrap();
        assert_eq!(app.title_buffer, "x");
        assert_eq!(app.workspace_dir, dir.path());
    }

    #[test]
    fn test_pop_grapheme() {
        let mut s = "cafe\u{301}".to_string();
        assert!(pop_grapheme(&mut s));
        assert_eq!(s, "caf");
        let mut empty = String::new();
        assert!(!pop_grapheme(&mut empty));
    }

    #[test]
    fn test_create_note_focuses_title() {
        let mut app = test_app();
        app.create_note();

        assert_eq!(app.focus, Focus::Title);
        assert_eq!(app.sidebar_selected_index, 0);
        assert_eq!(app.visible_notes().len(), 1);
        assert!(app.title_buffer.is_empty());
    }

    #[test]
    fn test_typing_updates_note_on_every_keystroke() {
        let mut app = test_app();
        app.create_note();
        type_str(&mut app, "Hi");
        assert_eq!(app.selected_note().unwrap().title, "Hi");

        app.focus = Focus::Content;
        type_str(&mut app, "line");
        app.insert_newline();
        app.backspace();
        assert_eq!(app.selected_note().unwrap().content, "line");
    }

    #[test]
    fn test_typing_without_selection_is_ignored() {
        let mut app = test_app();
        app.focus = Focus::Title;
        app.insert_char('x');
        assert!(app.title_buffer.is_empty());
        assert!(app.session.notes().is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation_and_repairs_selection() {
        let mut app = test_app();
        app.create_note();
        type_str(&mut app, "first");
        app.create_note();
        type_str(&mut app, "second");

        app.initiate_delete();
        assert!(app.confirming_delete);
        app.cancel_delete();
        assert_eq!(app.session.notes().len(), 2);

        app.initiate_delete();
        app.confirm_delete();
        assert_eq!(app.session.notes().len(), 1);
        assert_eq!(app.title_buffer, "first");
        assert_eq!(app.selected_note().unwrap().title, "first");

        app.initiate_delete();
        app.confirm_delete();
        assert!(app.selected_note().is_none());
        assert!(app.title_buffer.is_empty());
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn test_search_narrows_sidebar() {
        let mut app = test_app();
        app.create_note();
        type_str(&mut app, "Groceries");
        app.create_note();
        type_str(&mut app, "Work log");

        app.open_search();
        for ch in "groc".chars() {
            app.update_search_query(ch);
        }
        let visible: Vec<String> = app.visible_notes().iter().map(|n| n.title.clone()).collect();
        assert_eq!(visible, vec!["Groceries".to_string()]);
        // The editor keeps the hidden selection
        assert_eq!(app.selected_note().unwrap().title, "Work log");

        app.backspace_search_query();
        assert_eq!(app.session.search_query(), "gro");

        app.clear_search();
        assert_eq!(app.visible_notes().len(), 2);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn test_sidebar_navigation_selects_note() {
        let mut app = test_app();
        app.create_note();
        type_str(&mut app, "older");
        app.create_note();
        type_str(&mut app, "newer");
        app.focus = Focus::Sidebar;

        app.sidebar_select_down();
        app.sidebar_select_down();
        assert_eq!(app.sidebar_selected_index, 1);
        app.sidebar_activate_selected();
        assert_eq!(app.title_buffer, "older");
        assert_eq!(app.focus, Focus::Title);

        app.sidebar_select_up();
        assert_eq!(app.sidebar_selected_index, 0);
    }

    #[test]
    fn test_cycle_focus_skips_editor_without_selection() {
        let mut app = test_app();
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Search);

        app.create_note();
        app.focus = Focus::Sidebar;
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Title);
    }

    #[test]
    fn test_toggle_theme_sets_status() {
        let mut app = test_app();
        app.toggle_theme();
        assert_eq!(app.theme(), Theme::Dark);
        assert_eq!(app.status_message.as_deref(), Some("Theme: dark"));
    }

    #[test]
    fn test_export_markdown_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.create_note();
        type_str(&mut app, "Exported");

        app.export_markdown(dir.path()).unwrap();
        assert!(dir.path().join("Exported.md").exists());
        assert!(app.status_message.unwrap().starts_with("Exported 1 note(s)"));
    }
}
