use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
    Frame,
};

use super::{
    render_content_editor, render_delete_confirmation, render_header, render_help_screen,
    render_search_bar, render_sidebar_notes, render_status_bar, render_title_editor, Palette,
};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.size();
    let palette = Palette::for_theme(app.theme());
    frame.render_widget(Block::default().style(palette.base()), size);

    // Create main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_header(frame, app, &palette, chunks[0]);
    render_content(frame, app, &palette, chunks[1]);
    render_status_bar(frame, app, &palette, chunks[2]);

    // Overlays (drawn last)
    if app.confirming_delete {
        render_delete_confirmation(frame, app, &palette, size);
    }
    if app.help_open {
        render_help_screen(frame, app, &palette, size);
    }
}

/// Sidebar (search + list) on the left, editor (title + content) on the right
fn render_content(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);
    render_search_bar(frame, app, palette, sidebar[0]);
    render_sidebar_notes(frame, app, palette, sidebar[1]);

    let editor = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);
    render_title_editor(frame, app, palette, editor[0]);
    render_content_editor(frame, app, palette, editor[1]);
}
