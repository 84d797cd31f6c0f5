//! EMUCON console entry point.

use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use emucon_client::{ClientConfig, RestClient};
use emucon_hooks::{Hooks, HooksConfig};
use emucon_query::{ChannelNotifier, QueryStore, StoreConfig};
use emucon_tui::config::TuiConfig;
use emucon_tui::error::TuiError;
use emucon_tui::events::TuiEvent;
use emucon_tui::nav::View;
use emucon_tui::persistence::{self, PersistedState};
use emucon_tui::state::App;
use emucon_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_tracing(&config)?;

    let mut client_config = ClientConfig::new(config.api_base_url.trim());
    if let Some(timeout) = config.request_timeout() {
        client_config = client_config.with_timeout(timeout);
    }
    let client = RestClient::new(&client_config)?;
    let store = QueryStore::new(StoreConfig::new().with_gc_time(config.gc_time()));
    let (notifier, mut toasts) = ChannelNotifier::new();
    let hooks = Hooks::with_config(
        store,
        client,
        Arc::new(notifier),
        HooksConfig::default().with_log_tail_interval(config.log_tail_interval()),
    );

    let active_view = match persistence::load(&config.persistence_path) {
        Ok(Some(state)) => state.active_view,
        Ok(None) => View::default(),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable UI state");
            View::default()
        }
    };

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    let mut app = App::new(config, hooks, active_view, event_tx.clone());

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    spawn_input_reader(event_tx);
    tracing::info!(view = app.active_view.title(), "console started");

    let mut ticker = tokio::time::interval(app.config.refresh_interval());

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        let quit = tokio::select! {
            _ = ticker.tick() => app.handle_event(TuiEvent::Tick),
            Some(notification) = toasts.recv() => app.handle_event(TuiEvent::Toast(notification)),
            Some(event) = event_rx.recv() => app.handle_event(event),
        };
        if quit {
            break;
        }
    }

    let persisted = PersistedState::new(app.active_view);
    if let Err(err) = persistence::save(&app.config.persistence_path, &persisted) {
        tracing::warn!(error = %err, "failed to save UI state");
    }

    Ok(())
}

/// Logs go to `error_log_path`; the terminal belongs to the UI.
fn init_tracing(config: &TuiConfig) -> Result<(), TuiError> {
    if let Some(parent) = config.error_log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.error_log_path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("emucon=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
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
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
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
