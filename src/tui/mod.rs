//! Terminal User Interface module for kbq.
//!
//! Provides a query input bar with answer and sources panels using ratatui
//! for rendering and crossterm for terminal management. One query may be in
//! flight at a time; the event loop blocks on the request after painting the
//! loading frame.

use std::io;
use std::panic;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::backend::SearchClientBuilder;
use crate::controller::SearchController;

mod app;
pub mod event;
mod ui;

pub use app::{AnswerView, App};

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
/// Returns a configured Terminal instance.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
/// This should always be called before exiting the TUI,
/// even in error cases, to prevent terminal corruption.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for panic handler.
///
/// Does not require a Terminal reference, making it safe to call
/// from a panic hook where we may not have access to the Terminal.
/// Ignores errors since we're likely already in a bad state.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Initializes a panic hook that restores the terminal before panicking.
///
/// This ensures the terminal is restored even if a panic occurs anywhere
/// in the application, not just in the event loop. The original panic
/// hook is preserved and called after terminal restoration.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Runs the main event loop for the TUI.
///
/// Polls for keyboard events, updates app state, and re-renders.
/// Exits when the user presses Ctrl+C or an error occurs.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, controller: &SearchController) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, controller, &mut terminal);

    // Always restore terminal state
    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Internal event loop implementation.
///
/// Separated from `run_event_loop` to ensure terminal restoration happens
/// in the outer function.
fn run_event_loop_internal(
    app: &mut App,
    controller: &SearchController,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = crossterm_event::read()?
        {
            match event::handle_key_event(app, key) {
                event::KeyOutcome::Quit => break,
                event::KeyOutcome::Continue => {}
                event::KeyOutcome::Submit => {
                    let request_issued = execute_submission(app, controller, |app| {
                        terminal
                            .draw(|frame| ui::draw(frame, app))
                            .map(|_| ())
                            .context("failed to draw loading frame")
                    })?;
                    if request_issued {
                        drain_pending_input()?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Discards key events that queued up while a request was in flight.
///
/// The event loop blocks inside the request, so keystrokes typed during it
/// sit in the terminal input queue until the outcome has been applied. A
/// queued Enter would otherwise fire a second submission of the same query
/// the moment the busy flag clears.
fn drain_pending_input() -> Result<()> {
    while crossterm_event::poll(std::time::Duration::ZERO)? {
        let _ = crossterm_event::read()?;
    }
    Ok(())
}

/// Runs one submission through the controller and applies the outcome.
///
/// An input that trims empty short-circuits to the validation warning without
/// entering the loading state. Otherwise the loading frame is painted via
/// `show_loading` before the blocking request, and the outcome replaces both
/// panels when it returns. The busy flag clears on every path.
///
/// Returns whether a request was actually issued, so the caller can discard
/// input that queued up while the request blocked the loop.
fn execute_submission<F>(
    app: &mut App,
    controller: &SearchController,
    mut show_loading: F,
) -> Result<bool>
where
    F: FnMut(&App) -> Result<()>,
{
    let raw_input = app.input().to_string();

    if raw_input.trim().is_empty() {
        app.apply_submission(controller.submit(&raw_input), controller.backend_url());
        return Ok(false);
    }

    app.begin_search();
    show_loading(app)?;

    let submission = controller.submit(&raw_input);
    app.apply_submission(submission, controller.backend_url());

    Ok(true)
}

/// Entry point for the TUI application.
///
/// Builds the backend client, installs the panic hook, and starts the event
/// loop.
///
/// # Errors
///
/// Returns an error if:
/// - The backend URL is invalid
/// - Terminal initialization or the event loop fails
pub fn run(backend_url: Option<String>) -> Result<()> {
    // Install panic hook to restore terminal on panic
    init_panic_hook();

    let mut builder = SearchClientBuilder::new();
    if let Some(url) = backend_url {
        builder = builder.base_url(url);
    }
    let client = builder.build().context("Failed to create backend client")?;
    let controller = SearchController::new(Box::new(client));

    let mut app = App::new();
    run_event_loop(&mut app, &controller).context("TUI event loop failed")?;

    Ok(())
}
