//! errlens TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use errlens_client::ClassifierClient;
use errlens_core::PendingClassification;
use errlens_tui::config::TuiConfig;
use errlens_tui::error::TuiError;
use errlens_tui::events::TuiEvent;
use errlens_tui::logging::init_logging;
use errlens_tui::state::{App, AppCommand};
use errlens_tui::tasks::{run_classification, run_example_fetch, run_health_check};
use errlens_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_logging(&config.log_path)?;
    let client = Arc::new(ClassifierClient::new(&config.client_config())?);
    tracing::info!(base_url = client.base_url(), "Starting errlens TUI");

    let fetch_remote_examples = config.fetch_remote_examples;
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    spawn_health_check(client.clone(), event_tx.clone());
    if fetch_remote_examples {
        spawn_example_fetch(client.clone(), event_tx.clone());
    }

    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            // Tick only forces a redraw.
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &client, &event_tx, event) {
                    break;
                }
            }
        }
    }

    tracing::info!("Shutting down errlens TUI");
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

/// Returns true when the app should exit.
fn handle_event(
    app: &mut App,
    client: &Arc<ClassifierClient>,
    sender: &mpsc::Sender<TuiEvent>,
    event: TuiEvent,
) -> bool {
    match event {
        TuiEvent::Input(key) => match app.handle_key(key) {
            Some(AppCommand::Quit) => return true,
            Some(AppCommand::Classify(pending)) => {
                spawn_classification(client.clone(), pending, sender.clone());
            }
            Some(AppCommand::CheckHealth) => {
                spawn_health_check(client.clone(), sender.clone());
            }
            None => {}
        },
        TuiEvent::Classified { ticket, outcome } => app.apply_classification(ticket, outcome),
        TuiEvent::Health(result) => app.apply_health(result),
        TuiEvent::RemoteExamples(result) => app.apply_remote_examples(result),
        TuiEvent::Resize { .. } => {}
    }
    false
}

fn spawn_classification(
    client: Arc<ClassifierClient>,
    pending: PendingClassification,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let event = run_classification(client, pending).await;
        let _ = sender.send(event).await;
    });
}

fn spawn_health_check(client: Arc<ClassifierClient>, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let event = run_health_check(client).await;
        let _ = sender.send(event).await;
    });
}

fn spawn_example_fetch(client: Arc<ClassifierClient>, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let event = run_example_fetch(client).await;
        let _ = sender.send(event).await;
    });
}
