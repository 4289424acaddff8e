use anyhow::Result;
use bscdapp::config::AppConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use tracing::{error, info};

mod app;
mod event;
mod input;
mod screens;
mod theme;
mod ui;
mod widgets;

use app::App;
use event::EventHandler;

use crate::session::Session;

/// Run the TUI application
pub async fn run_tui(config: &AppConfig) -> Result<()> {
    // Mount before touching the terminal so config errors print normally
    let session = Session::open(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_handler = EventHandler::new();
    event_handler.forward_page_events(session.events);
    let mut app = App::new(session.page, session.simulator);
    let res = run_app(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "TUI exited with an error");
    }
    info!("TUI closed");
    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        match event_handler.next().await {
            Some(event) if !app.handle_event(event.clone()) => break,
            Some(_) => {}
            None => break,
        }
    }

    Ok(())
}
