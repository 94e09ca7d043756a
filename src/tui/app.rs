use crate::backend::SourceRef;
use crate::controller::{failure_message, Submission, EMPTY_QUERY_WARNING};
use crate::format::{format_answer, FormattedAnswer};

/// Content of the answer panel.
///
/// Exactly one of these is shown at a time; each render replaces the panel
/// wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerView {
    /// Nothing submitted yet
    Idle,
    /// A request is in flight
    Loading,
    /// Validation warning (empty query)
    Warning(String),
    /// Request failure text, including the reachability hint
    Error(String),
    /// A successful answer with its searched-chunk count
    Answer {
        formatted: FormattedAnswer,
        num_docs_searched: u64,
    },
}

/// Application state for the TUI.
///
/// Holds the query input buffer, the two output panels (answer and sources),
/// and the busy flag that stands in for a disabled submit control.
#[derive(Debug, Clone)]
pub struct App {
    /// Query input buffer
    input: String,
    /// Answer panel content
    answer: AnswerView,
    /// Sources panel content; empty means the panel renders nothing
    sources: Vec<SourceRef>,
    /// True while a request is in flight; Enter is ignored while set
    searching: bool,
    /// Scroll offset for the answer panel
    answer_scroll: u16,
}

impl App {
    /// Creates a new App with default state.
    ///
    /// # Examples
    ///
    /// ```
    /// use kbq::tui::{App, AnswerView};
    ///
    /// let app = App::new();
    /// assert_eq!(app.input(), "");
    /// assert_eq!(*app.answer(), AnswerView::Idle);
    /// assert!(app.sources().is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            input: String::new(),
            answer: AnswerView::Idle,
            sources: Vec::new(),
            searching: false,
            answer_scroll: 0,
        }
    }

    /// Returns the query input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the answer panel content.
    pub fn answer(&self) -> &AnswerView {
        &self.answer
    }

    /// Returns the sources panel content.
    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }

    /// Returns whether a request is in flight.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Returns the answer panel scroll offset.
    pub fn answer_scroll(&self) -> u16 {
        self.answer_scroll
    }

    /// Appends a character to the query input buffer.
    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Removes the last character from the query input buffer.
    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Clears the query input buffer (Esc key behavior).
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Scrolls the answer panel down by the specified amount.
    pub fn scroll_answer_down(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(amount);
    }

    /// Scrolls the answer panel up by the specified amount.
    pub fn scroll_answer_up(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(amount);
    }

    /// Enters the in-flight state before the request is issued.
    ///
    /// Shows the loading indicator, clears the sources panel, and sets the
    /// busy flag so a further Enter is dropped until the outcome arrives.
    pub fn begin_search(&mut self) {
        self.answer = AnswerView::Loading;
        self.sources.clear();
        self.searching = true;
        self.answer_scroll = 0;
    }

    /// Applies a submission outcome to the panels.
    ///
    /// Clears the busy flag unconditionally, on every outcome. A validation
    /// warning and a request failure both clear the sources panel; a success
    /// replaces both panels with fresh content.
    pub fn apply_submission(&mut self, submission: Submission, backend_url: &str) {
        self.searching = false;
        self.answer_scroll = 0;

        match submission {
            Submission::EmptyQuery => {
                self.answer = AnswerView::Warning(EMPTY_QUERY_WARNING.to_string());
                self.sources.clear();
            }
            Submission::Answered(response) => {
                self.answer = AnswerView::Answer {
                    formatted: format_answer(&response.answer),
                    num_docs_searched: response.num_docs_searched,
                };
                self.sources = response.sources;
            }
            Submission::Failed(error) => {
                self.answer = AnswerView::Error(failure_message(&error, backend_url));
                self.sources.clear();
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
