use crate::app::{App, Focus};
use crate::event::SIDEBAR_ITEM_HEIGHT;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{block::Title, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use scribble_core::models::millis_to_datetime;
use scribble_core::Mode;

use super::Palette;

const CURSOR: &str = "▊";
const PREVIEW_CHARS: usize = 60;

fn pane_block<'a, T: Into<Title<'a>>>(title: T, palette: &Palette, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(palette.border_style(focused))
}

/// Render the header with title and key hints
pub fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title = match app.selected_note() {
        Some(note) => format!(" 📝 {} ", note.display_title()),
        None => " Scribble ".to_string(),
    };

    let key_hints = match app.focus {
        Focus::Sidebar => " [↑/↓:Move] [Enter:Open] [n:New] [d:Delete] [/:Search] [Tab:Focus] [F1:Help] [q:Quit] ",
        Focus::Search => " [Type to filter] [Enter:List] [Esc:Clear] ",
        Focus::Title => " [Type to rename] [Enter:Body] [Esc:List] [Ctrl+N:New] [Ctrl+D:Delete] ",
        Focus::Content => " [Typing...] [↑:Title] [Esc:List] [Ctrl+T:Theme] [Ctrl+E:Export] ",
    };

    let header_spans = vec![
        Span::styled(
            title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(key_hints, palette.muted_style()),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL).border_style(palette.border_style(false)))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Render the search input above the notes list
pub fn render_search_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Search;
    let query = app.session.search_query();

    let line = if query.is_empty() && !focused {
        Line::from(Span::styled("/ Search notes", palette.muted_style()))
    } else {
        let mut spans = vec![Span::raw("/ "), Span::raw(query.to_string())];
        if focused {
            spans.push(Span::styled(CURSOR, Style::default().fg(palette.accent)));
        }
        Line::from(spans)
    };

    let input = Paragraph::new(line).block(pane_block(" Search ", palette, focused));
    frame.render_widget(input, area);
}

/// Render the sidebar notes list, newest first
pub fn render_sidebar_notes(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Sidebar;
    let selected_id = app.session.selected_id().to_string();
    let total = app.session.notes().len();
    let visible = app.visible_notes();
    let count = visible.len();

    let title = if count == total {
        format!(" Notes ({}) ", total)
    } else {
        format!(" Notes ({}/{}) ", count, total)
    };
    let block = pane_block(title, palette, focused);

    if visible.is_empty() {
        let message = if total == 0 {
            "No notes yet. Press Ctrl+N to create one."
        } else {
            "No notes match your search."
        };
        let empty = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(palette.muted_style());
        frame.render_widget(empty, area);
        app.sidebar_list_area = area;
        app.sidebar_offset = 0;
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|n| {
            let mut title_style = Style::default().add_modifier(Modifier::BOLD);
            if n.id == selected_id {
                title_style = title_style.fg(palette.accent);
            }
            let modified = millis_to_datetime(n.updated_at)
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M");
            let lines = vec![
                Line::from(Span::styled(n.display_title().to_string(), title_style)),
                Line::from(Span::styled(
                    format!("{} · {}", modified, n.preview(PREVIEW_CHARS)),
                    palette.muted_style(),
                )),
            ];
            debug_assert_eq!(lines.len() as u16, SIDEBAR_ITEM_HEIGHT);
            ListItem::new(Text::from(lines))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.sidebar_selected_index.min(count - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            palette.highlight()
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        });

    frame.render_stateful_widget(list, area, &mut state);
    app.sidebar_list_area = area;
    app.sidebar_offset = state.offset();
}

/// Render the title field of the editor
pub fn render_title_editor(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Title;
    let block = pane_block(" Title ", palette, focused);

    if app.selected_note().is_none() {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    }

    let mut spans = vec![Span::styled(
        app.title_buffer.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(palette.accent)));
    } else if app.title_buffer.is_empty() {
        spans.push(Span::styled("Untitled", palette.muted_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render the content field of the editor
pub fn render_content_editor(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Content;
    let block = pane_block(" Note ", palette, focused);

    if app.selected_note().is_none() {
        let empty = Paragraph::new("Select a note or press Ctrl+N to start writing.")
            .block(block)
            .alignment(Alignment::Center)
            .style(palette.muted_style());
        frame.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = app
        .content_buffer
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(CURSOR, Style::default().fg(palette.accent)));
        }
    }

    // Keep the end of the note in view while typing
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = if focused {
        lines.len().saturating_sub(inner_height) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mode = match app.session.mode() {
        Mode::Local => "local".to_string(),
        Mode::Remote(url) => format!("remote: {}", url),
    };
    let mut status_text = format!(
        " {} notes | {} | theme: {} ",
        app.session.notes().len(),
        mode,
        app.theme().as_str()
    );
    if let Some(message) = &app.status_message {
        status_text.push_str(&format!("| {} ", message));
    }

    let status_bar = Paragraph::new(status_text)
        .style(palette.highlight())
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub fn render_delete_confirmation(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 5, area);
    let title = app
        .selected_note()
        .map(|n| n.display_title().to_string())
        .unwrap_or_default();

    let text = format!("Delete \"{}\"? (y/n)", title);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Confirm Deletion ")
                .borders(Borders::ALL)
                .style(Style::default().fg(palette.warning)),
        )
        .style(palette.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area); // This clears the area behind the popup
    frame.render_widget(paragraph, popup_area);
}

/// Render the help screen overlay
pub fn render_help_screen(frame: &mut Frame, app: &App, palette: &Palette, size: Rect) {
    let keymap = &app.config.keymap;
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let binding = |keys: &str, what: &str| Line::from(format!("{:<13}{}", keys, what));

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("Notes", heading)),
        binding(&keymap.new_note, "New note"),
        binding(&keymap.delete_note, "Delete selected note"),
        binding(&keymap.export, "Export all notes to Markdown"),
        Line::from(""),
        Line::from(Span::styled("Navigation", heading)),
        binding(&keymap.cycle_focus, "Cycle focus: list, title, body, search"),
        binding("↑/↓  j/k", "Move in the notes list"),
        binding("Enter", "Open highlighted note"),
        binding("Esc", "Back to the notes list"),
        Line::from(""),
        Line::from(Span::styled("Search", heading)),
        binding(&keymap.search, "Search titles and content"),
        binding("/", "Search (from the list)"),
        Line::from(""),
        Line::from(Span::styled("Interface", heading)),
        binding(&keymap.toggle_theme, "Toggle light/dark theme"),
        binding(&keymap.help, "Show this help"),
        binding(&keymap.quit, "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close", palette.muted_style())),
    ];

    let popup_height = help_text.len() as u16 + 2;
    let popup_area = centered_rect(60, popup_height, size);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(palette.border_style(true))
        .style(palette.base());

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}
