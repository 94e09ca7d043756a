//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes. The query
//! input is always focused; Enter submits, Esc clears, and Up/Down scroll
//! the answer panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;

/// What the event loop should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Keep polling
    Continue,
    /// Submit the current query input
    Submit,
    /// Exit the application
    Quit,
}

/// Handles a keyboard event and updates the app state accordingly.
///
/// # Event Handling
///
/// - `Ctrl+C`: Quit application
/// - `Enter`: Submit the query; ignored while a request is in flight
/// - `Esc`: Clear the query input
/// - `Backspace`: Delete the last input character
/// - `Up`/`Down`: Scroll the answer panel
/// - Printable characters: append to the query input
///
/// # Examples
///
/// ```
/// use kbq::tui::{App, event::{handle_key_event, KeyOutcome}};
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let mut app = App::new();
/// let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// assert_eq!(handle_key_event(&mut app, key), KeyOutcome::Quit);
/// ```
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyOutcome {
    // Global quit key
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        return KeyOutcome::Quit;
    }

    match key.code {
        KeyCode::Enter => {
            // The busy flag is the disabled-submit analog. With a blocking
            // request this guard only fires for events dispatched while the
            // flag is set; keystrokes queued during the request itself are
            // discarded by the event loop's drain step after it returns.
            if app.is_searching() {
                KeyOutcome::Continue
            } else {
                KeyOutcome::Submit
            }
        }
        KeyCode::Esc => {
            app.clear_input();
            KeyOutcome::Continue
        }
        KeyCode::Backspace => {
            app.pop_input_char();
            KeyOutcome::Continue
        }
        KeyCode::Up => {
            app.scroll_answer_up(1);
            KeyOutcome::Continue
        }
        KeyCode::Down => {
            app.scroll_answer_down(1);
            KeyOutcome::Continue
        }
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_input_char(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}
