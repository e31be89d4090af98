use anyhow::{Context, Result};
use crossterm::{
    execute,
    event::{EnableMouseCapture, DisableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use smartnotes_core::logging::init_logging;
use smartnotes_tui::config::{load_config, CONFIG_FILE};
use smartnotes_tui::{App, EventHandler};
use std::io;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Data directory holds the database, config.toml and logs/
    let data_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = load_config(&data_dir.join(CONFIG_FILE))?;
    init_logging(&config.log_level, data_dir.join("logs"))?;
    log::info!("starting smartnotes in {}", data_dir.display());

    // Unreadable stored notes stop us here, before the terminal is touched
    let mut app = App::open(&data_dir, config)
        .with_context(|| format!("failed to open notes in {}", data_dir.display()))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(250); // 250ms tick rate

    let result = run_app(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("event loop failed: {:?}", err);
        eprintln!("Error: {:?}", err);
    }
    log::info!("smartnotes exited");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| smartnotes_tui::ui::render(f, app))?;

        match event_handler.next()? {
            smartnotes_tui::Event::Key(key) => {
                smartnotes_tui::event::handle_key_event(key, app);
            }
            smartnotes_tui::Event::Mouse(mouse) => {
                smartnotes_tui::event::handle_mouse_event(mouse, app);
            }
            smartnotes_tui::Event::Tick => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
