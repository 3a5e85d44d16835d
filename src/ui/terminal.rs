//! Terminal event loop
//!
//! Runs on the main thread. Inference calls are dispatched onto the tokio
//! runtime and report back over a channel, so the console keeps redrawing
//! while the model thinks.

use crate::command::executor::CommandExecutor;
use crate::command::relay::CommandRelay;
use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::parser::{request_commands, ParsedReply};
use crate::ui::render::draw_ui;
use crate::ui::state::{ConsoleState, LogCategory};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Messages from worker tasks back to the console
#[derive(Debug)]
pub enum UiMessage {
    SubmissionFinished(std::result::Result<ParsedReply, String>),
}

/// Run the console until the user quits
pub fn run(handle: Handle, client: Arc<LlmClient>, relay: Arc<CommandRelay>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &handle, &client, &relay);
    let cleanup = restore_terminal(&mut terminal);

    result.and(cleanup)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: &Handle,
    client: &Arc<LlmClient>,
    relay: &CommandRelay,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = ConsoleState::new();
    state.log(
        format!(
            "Connected to {} (model {})",
            client.api_url(),
            client.model()
        ),
        LogCategory::System,
    );

    while !state.should_quit {
        while let Ok(msg) = rx.try_recv() {
            apply_message(&mut state, relay, msg);
        }
        state.refresh_relay(relay);

        terminal.draw(|f| draw_ui(f, &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if let Some(text) = handle_key(&mut state, key) {
                    dispatch_submission(handle, Arc::clone(client), text, tx.clone());
                }
            }
        }
    }

    Ok(())
}

/// Apply a key press. Returns the instruction to submit, if any.
pub fn handle_key(state: &mut ConsoleState, key: KeyEvent) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
            state.should_quit = true;
            None
        }
        (KeyCode::Enter, _) => state.begin_submission(),
        (KeyCode::Backspace, _) => {
            state.pop_char();
            None
        }
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            state.push_char(c);
            None
        }
        _ => None,
    }
}

/// Apply a worker result: queue commands on success, then re-enable input
pub fn apply_message(state: &mut ConsoleState, relay: &CommandRelay, msg: UiMessage) {
    match msg {
        UiMessage::SubmissionFinished(Ok(reply)) => {
            let result = CommandExecutor::execute(relay, &reply);
            state.finish_success(&reply, &result);
        }
        UiMessage::SubmissionFinished(Err(error)) => {
            tracing::warn!("Submission failed: {}", error);
            state.finish_failure(&error);
        }
    }
}

/// Run one inference round-trip on the runtime and post the outcome
pub fn dispatch_submission(
    handle: &Handle,
    client: Arc<LlmClient>,
    text: String,
    tx: mpsc::UnboundedSender<UiMessage>,
) {
    tracing::info!("Submitting instruction: {}", text);
    handle.spawn(async move {
        let outcome = request_commands(&client, &text)
            .await
            .map_err(|e| e.to_string());
        // The console may already have exited
        let _ = tx.send(UiMessage::SubmissionFinished(outcome));
    });
}
