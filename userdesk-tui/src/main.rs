//! Userdesk TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use userdesk_tui::api_client::RestClient;
use userdesk_tui::clipboard;
use userdesk_tui::config::{initial_query_from_args, TuiConfig};
use userdesk_tui::error::TuiError;
use userdesk_tui::events::TuiEvent;
use userdesk_tui::logging;
use userdesk_tui::state::{App, Effect};
use userdesk_tui::views::render_view;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config.log_path)?;
    let api = RestClient::new(&config)?;
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    tracing::info!(url = %config.users_url(), "Starting userdesk");

    let mut app = App::new(config, &initial_query_from_args());

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    spawn_fetch(api.clone(), event_tx.clone());

    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        let event = tokio::select! {
            _ = ticker.tick() => TuiEvent::Tick,
            Some(event) = event_rx.recv() => event,
        };
        match app.handle_event(event, Instant::now()) {
            Effect::Quit => break,
            Effect::Refresh => spawn_fetch(api.clone(), event_tx.clone()),
            Effect::CopyToClipboard(text) => {
                let result = clipboard::copy_to_clipboard(terminal.backend_mut(), &text);
                app.clipboard_written(result);
            }
            Effect::None => {}
        }
    }

    app.flush();
    tracing::info!(query = %app.location_query(), "Exiting");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Load users in the background; the result arrives as an event.
fn spawn_fetch(api: RestClient, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let event = match api.fetch_users().await {
            Ok(users) => TuiEvent::UsersLoaded(users),
            Err(err) => TuiEvent::ApiError(err.to_string()),
        };
        let _ = sender.send(event).await;
    });
}
