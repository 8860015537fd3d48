use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scribble_core::logging::{default_log_level, init_logging};
use scribble_tui::config::load_config;
use scribble_tui::{App, EventHandler};
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_DB_PATH: &str = "scribble.db";
const CONFIG_FILE: &str = "config.toml";

fn main() -> Result<()> {
    let db_path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
    );
    let workspace_dir = App::workspace_dir_for(&db_path);

    // Load everything before touching the terminal so errors print normally
    let config = load_config(&workspace_dir.join(CONFIG_FILE))?;

    let log_dir = absolute(&workspace_dir)?.join("logs");
    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("Logging disabled: {}", err);
    }

    let mut app = App::new(&db_path, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler
    let event_handler = EventHandler::new(250); // 250ms tick rate

    // Main loop
    let result = run_app(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("event=app_exit module=cli status=error error={err:?}");
        eprintln!("Error: {:?}", err);
    } else {
        log::info!("event=app_exit module=cli status=ok");
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| scribble_tui::ui::render(f, app))?;

        // Handle events
        match event_handler.next()? {
            scribble_tui::Event::Key(key) => {
                scribble_tui::event::handle_key_event(key, app);
            }
            scribble_tui::Event::Mouse(mouse) => {
                scribble_tui::event::handle_mouse_event(mouse, app);
            }
            scribble_tui::Event::Tick => {
                app.tick();
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
