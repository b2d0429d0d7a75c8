//! Terminal UI for Strictly Pairs.

mod app;
mod input;
mod scheduler;
mod ui;

pub use app::{CardFace, TerminalApp};
use input::move_cursor;
pub use scheduler::TokioScheduler;

use crate::config::GameConfig;
use crate::games::pairs::{FiredTimer, InputEvent, SelectOutcome, SessionController};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

type TerminalController = SessionController<TerminalApp, TokioScheduler>;

/// Run the interactive game.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Log to a file so output does not tear the screen
    let log_file =
        std::fs::File::create("strictly_pairs.log").context("Failed to create log file")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(seed = ?config.seed(), "Starting Strictly Pairs TUI");

    let (scheduler, mut timer_rx) = TokioScheduler::new();
    let mut controller = SessionController::new(
        config.rules(),
        config.deck_source(),
        TerminalApp::new(*config.max_stars()),
        scheduler,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut controller, &mut timer_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, drain timers, handle one key, repeat.
#[instrument(skip_all)]
fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut TerminalController,
    timer_rx: &mut mpsc::UnboundedReceiver<FiredTimer>,
) -> Result<()> {
    loop {
        while let Ok(fired) = timer_rx.try_recv() {
            controller.on_timer(fired);
        }

        terminal.draw(|f| ui::draw(f, controller.presentation()))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('r') => {
                info!("User restarted");
                controller.handle_input(InputEvent::Restart);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let position = controller.presentation().cursor_position();
                if let Some(outcome) = controller.handle_input(InputEvent::Select(position)) {
                    report(controller, outcome);
                }
            }
            code => {
                let app = controller.presentation_mut();
                let next = move_cursor(app.cursor(), code, app.columns(), app.cards().len());
                app.set_cursor(next);
                debug!(cursor = next, "Cursor moved");
            }
        }
    }
}

fn report(controller: &mut TerminalController, outcome: SelectOutcome) {
    let message = match outcome {
        SelectOutcome::Ignored(reason) => reason.to_string(),
        SelectOutcome::Opened(_) => "Pick its partner".to_string(),
        SelectOutcome::Mismatched { .. } => "No match".to_string(),
        SelectOutcome::Matched { .. } | SelectOutcome::Completed { .. } => return,
    };
    controller.presentation_mut().set_status(message);
}
