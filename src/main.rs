// Shipbox - terminal shipping box calculator
mod app;
mod event;
mod ui;

use app::App;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::EventHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use shipbox_lib::config::AppConfig;
use shipbox_lib::notifications::NotificationCenter;
use shipbox_lib::storage::{self, BoxStore, BOXES_FILE};
use shipbox_lib::{config, logger};
use std::io;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize storage directories
    let data_dir = match storage::init_storage() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logger (no console output)
    let log_path = logger::init_logger(&data_dir)?;
    tracing::info!(
        "{} v{} starting, logging to {}",
        config::APP_NAME,
        config::APP_VERSION,
        log_path.display()
    );

    let app_config = AppConfig::from_env();
    tracing::info!(
        app_name = %app_config.app_name,
        currency = %app_config.currency,
        "Configuration loaded"
    );

    // Setup event handler first (notification timers report through it)
    let mut event_handler = EventHandler::new();
    event_handler.spawn_keyboard_listener();

    // Load records once; every later change is flushed by the store
    let store = BoxStore::open(data_dir.join(BOXES_FILE));
    let notifications = NotificationCenter::with_expiry(event_handler.expiry_callback());
    let mut app = App::new(app_config, store, notifications);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("Error: {:?}", err);
    }

    tracing::info!(
        "Exiting with {} boxes stored in {}",
        app.store.len(),
        app.store.path().display()
    );
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> io::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events
        if let Some(event) = event_handler.next().await {
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
