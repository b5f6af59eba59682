// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Receiving session actions and updating the transcript

pub mod app;
pub mod scroll;
pub mod ui;
pub mod wrap;

use crate::session::Action;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Rows moved by a single arrow key press
const LINE_STEP: usize = 1;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal even when the loop fails.
pub async fn run_tui(mut action_rx: mpsc::Receiver<Action>, mut app: App) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut action_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, a redraw tick and incoming session actions,
/// handling whichever completes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    action_rx: &mut mpsc::Receiver<Action>,
) -> Result<()> {
    // Redraw periodically so uptime and the log line stay current
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}

            // Session actions from the source task
            Some(action) = action_rx.recv() => {
                app.apply(action);
                // Drain whatever else is queued before redrawing
                while let Ok(action) = action_rx.try_recv() {
                    app.apply(action);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        KeyCode::Up | KeyCode::Char('k') => app.scroll.scroll_up(LINE_STEP),
        KeyCode::Down | KeyCode::Char('j') => app.scroll.scroll_down(LINE_STEP),
        KeyCode::PageUp => app.scroll.page_up(),
        KeyCode::PageDown => app.scroll.page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.scroll.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll.scroll_to_bottom(),

        KeyCode::Char('f') => app.scroll.toggle_auto_follow(),
        KeyCode::Char('l') => app.show_logs = !app.show_logs,
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}
