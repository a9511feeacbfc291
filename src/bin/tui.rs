//! Terminal client for the todo API.
//!
//! Synchronous crossterm event loop over an async HTTP client:
//! requests are spawned on a tokio runtime and their outcomes are
//! delivered back through a channel drained each tick, so the UI never
//! blocks on the network. A creation and a per-entry mutation can be
//! in flight at the same time; duplicate submissions are prevented by
//! the view model.
//!
//! # Environment Variables
//!
//! - `TODO_API_BASE_URL`: API base URL (default
//!   `http://localhost:5000/api`)

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use todo_app::client::{ApiClient, ApiEvent, AppModel, Command, Focus, ui};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let runtime = Runtime::new()?;
    let client = ApiClient::from_env();
    let (event_tx, mut event_rx) = unbounded_channel::<ApiEvent>();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut model = AppModel::new();
    // Initial list load, issued exactly once.
    dispatch(&runtime, &client, &event_tx, Command::Load);

    let result = run_loop(
        &mut terminal,
        &mut model,
        &runtime,
        &client,
        &event_tx,
        &mut event_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &mut AppModel,
    runtime: &Runtime,
    client: &ApiClient,
    event_tx: &UnboundedSender<ApiEvent>,
    event_rx: &mut tokio::sync::mpsc::UnboundedReceiver<ApiEvent>,
) -> anyhow::Result<()> {
    loop {
        // Drain completed requests before drawing.
        while let Ok(api_event) = event_rx.try_recv() {
            model.apply(api_event);
        }

        terminal.draw(|frame| ui::draw(frame, model))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = handle_key(model, key.code, key.modifiers) {
                    dispatch(runtime, client, event_tx, command);
                }
            }
        }

        if model.quit {
            return Ok(());
        }
    }
}

/// Translates a key press into a state change, possibly yielding a
/// request to issue.
fn handle_key(model: &mut AppModel, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        model.quit = true;
        return None;
    }

    // Confirmation dialog swallows all input until answered.
    if model.confirm.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => return model.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => model.cancel_delete(),
            _ => {}
        }
        return None;
    }

    if code == KeyCode::Tab {
        model.toggle_focus();
        return None;
    }

    match model.focus {
        Focus::Input => match code {
            KeyCode::Enter => return model.submit_draft(),
            KeyCode::Char(c) => model.draft.push(c),
            KeyCode::Backspace => {
                model.draft.pop();
            }
            KeyCode::Esc => model.draft.clear(),
            _ => {}
        },
        Focus::List => match code {
            KeyCode::Char('q') | KeyCode::Esc => model.quit = true,
            KeyCode::Up | KeyCode::Char('k') => model.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => model.select_next(),
            KeyCode::Char(' ') => return model.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => model.request_delete_selected(),
            _ => {}
        },
    }

    None
}

/// Spawns a request on the runtime; its outcome comes back as an
/// [`ApiEvent`] on the channel.
fn dispatch(
    runtime: &Runtime,
    client: &ApiClient,
    event_tx: &UnboundedSender<ApiEvent>,
    command: Command,
) {
    let client = client.clone();
    let event_tx = event_tx.clone();

    runtime.spawn(async move {
        let api_event = match command {
            Command::Load => ApiEvent::Loaded(client.list().await.map_err(|e| e.to_string())),
            Command::Create { title } => {
                ApiEvent::Created(client.create(&title).await.map_err(|e| e.to_string()))
            }
            Command::Toggle { id, is_complete } => ApiEvent::Toggled {
                id,
                result: client
                    .set_complete(id, is_complete)
                    .await
                    .map_err(|e| e.to_string()),
            },
            Command::Delete { id } => ApiEvent::Deleted {
                id,
                result: client.delete(id).await.map_err(|e| e.to_string()),
            },
        };
        // Receiver gone means the UI is shutting down.
        let _ = event_tx.send(api_event);
    });
}
