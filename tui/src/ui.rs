mod layout;
mod palette;
mod widgets;

pub use layout::render;
pub use palette::Palette;
pub use widgets::{
    render_content_editor,
    render_delete_confirmation,
    render_header,
    render_help_screen,
    render_search_bar,
    render_sidebar_notes,
    render_status_bar,
    render_title_editor,
};
