use anyhow::Result;
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::app::{App, Focus};
use crate::config::key_matches;

/// Height of one sidebar entry: title line plus preview line
pub const SIDEBAR_ITEM_HEIGHT: u16 = 2;

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
    /// Mouse event
    Mouse(MouseEvent),
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => return Ok(Event::Key(key)),
                CEvent::Mouse(m) => return Ok(Event::Mouse(m)),
                _ => {}
            }
        }
        Ok(Event::Tick)
    }
}

/// Typed characters; AltGr (CONTROL+ALT) still produces text
fn is_text_input(key: &KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
}

/// Handle key events for the application
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // On Windows, crossterm reports both key press and release events.
    // We only want to handle press events to avoid duplicates.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Help screen takes precedence
    if app.help_open {
        if matches!(key.code, KeyCode::Esc) || key_matches(&app.config.keymap.help, &key) {
            app.close_help();
        }
        return;
    }

    if app.confirming_delete {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    // --- Global bindings (work from every pane) ---
    let keymap = app.config.keymap.clone();
    if key_matches(&keymap.quit, &key) {
        app.quit();
    } else if key_matches(&keymap.new_note, &key) {
        app.create_note();
    } else if key_matches(&keymap.delete_note, &key) {
        app.initiate_delete();
    } else if key_matches(&keymap.toggle_theme, &key) {
        app.toggle_theme();
    } else if key_matches(&keymap.search, &key) {
        app.open_search();
    } else if key_matches(&keymap.cycle_focus, &key) {
        app.cycle_focus();
    } else if key_matches(&keymap.export, &key) {
        let out = app.export_dir();
        let _ = app.export_markdown(&out);
    } else if key_matches(&keymap.help, &key) {
        app.open_help();
    } else {
        match app.focus {
            Focus::Sidebar => handle_sidebar_input(key, app),
            Focus::Search => handle_search_input(key, app),
            Focus::Title | Focus::Content => handle_editing_input(key, app),
        }
    }
}

fn handle_sidebar_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.sidebar_select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.sidebar_select_down(),
        KeyCode::Enter | KeyCode::Right => app.sidebar_activate_selected(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('n') => app.create_note(),
        KeyCode::Char('d') | KeyCode::Delete => app.initiate_delete(),
        KeyCode::Char('q') if is_text_input(&key) => app.quit(),
        _ => {}
    }
}

fn handle_search_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter | KeyCode::Down => app.focus = Focus::Sidebar,
        KeyCode::Backspace => app.backspace_search_query(),
        KeyCode::Char(c) if is_text_input(&key) => app.update_search_query(c),
        _ => {}
    }
}

/// Handle key events when the title or content field has focus
fn handle_editing_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.focus = Focus::Sidebar,
        KeyCode::Enter if app.focus == Focus::Title => app.focus = Focus::Content,
        KeyCode::Down if app.focus == Focus::Title => app.focus = Focus::Content,
        KeyCode::Up if app.focus == Focus::Content => app.focus = Focus::Title,
        KeyCode::Enter => app.insert_newline(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if is_text_input(&key) => app.insert_char(c),
        _ => {}
    }
}

/// A left click on a sidebar entry selects that note
pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    if app.help_open || app.confirming_delete {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let area = app.sidebar_list_area;
    // Skip the border rows and columns
    let inside = mouse.column > area.x
        && mouse.column < area.x + area.width.saturating_sub(1)
        && mouse.row > area.y
        && mouse.row < area.y + area.height.saturating_sub(1);
    if !inside {
        return;
    }

    let row = (mouse.row - area.y - 1) / SIDEBAR_ITEM_HEIGHT;
    let index = app.sidebar_offset + row as usize;
    if index < app.visible_notes().len() {
        app.select_visible(index);
        app.focus = Focus::Sidebar;
    }
}
