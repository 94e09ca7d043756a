//! UI rendering functions for the TUI.
//!
//! Implements the layout with query input, answer panel, sources panel, and
//! shortcut bar using ratatui widgets and layout management.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::format;

use super::app::{AnswerView, App};

/// Main rendering function for the TUI.
///
/// Draws the query input at the top, the answer and sources panels in the
/// content area, and the shortcut bar at the bottom. Both output panels are
/// rebuilt wholesale from app state on every frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main layout: query input at top, content in middle, shortcuts at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(0),    // Content area
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    // Split content area horizontally: answer (60%) | sources (40%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Answer panel
            Constraint::Percentage(40), // Sources panel
        ])
        .split(main_chunks[1]);

    render_query_input(frame, app, main_chunks[0]);
    render_answer_panel(frame, app, content_chunks[0]);
    render_sources_panel(frame, app, content_chunks[1]);
    render_shortcut_bar(frame, main_chunks[2]);
}

/// Renders the query input bar at the top of the screen.
///
/// Shows a cursor indicator while input is accepted; while a request is in
/// flight the border dims and the cursor disappears, mirroring a disabled
/// submit control.
fn render_query_input(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.is_searching() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Query")
        .border_style(border_style);

    let mut content = app.input().to_string();
    if !app.is_searching() {
        content.push('█'); // Cursor indicator
    }

    let paragraph = Paragraph::new(content).block(block);

    frame.render_widget(paragraph, area);
}

/// Builds the answer panel text for the current state.
///
/// Separated from rendering so the content can be asserted in tests without
/// a terminal.
pub fn answer_text(app: &App) -> Text<'static> {
    match app.answer() {
        AnswerView::Idle => Text::from(Line::styled(
            "Type a query and press Enter.",
            Style::default().fg(Color::DarkGray),
        )),
        AnswerView::Loading => Text::from(Line::styled(
            "Searching knowledge base...",
            Style::default().fg(Color::Cyan),
        )),
        AnswerView::Warning(message) => Text::from(Line::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        AnswerView::Error(message) => {
            let mut text = Text::default();
            for line in message.lines() {
                text.lines
                    .push(Line::styled(line.to_string(), Style::default().fg(Color::Red)));
            }
            text
        }
        AnswerView::Answer {
            formatted,
            num_docs_searched,
        } => {
            let mut text = Text::default();
            for (i, paragraph) in formatted.paragraphs().iter().enumerate() {
                if i > 0 {
                    text.lines.push(Line::from(""));
                }
                for line in paragraph {
                    text.lines.push(Line::from(line.clone()));
                }
            }
            text.lines.push(Line::from(""));
            text.lines.push(Line::styled(
                format::searched_chunks_line(*num_docs_searched),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
            text
        }
    }
}

/// Renders the answer panel with the formatted answer, a loading indicator,
/// a validation warning, or an error message.
fn render_answer_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Answer");

    let paragraph = Paragraph::new(answer_text(app))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Builds the sources panel line items. Empty sources yield no items; the
/// panel shows no placeholder text.
pub fn source_items(app: &App) -> Vec<ListItem<'static>> {
    app.sources()
        .iter()
        .enumerate()
        .map(|(idx, source)| ListItem::new(format::source_line(idx, source)))
        .collect()
}

/// Renders the sources panel with one line item per citation.
fn render_sources_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Sources");

    let list = List::new(source_items(app)).block(block);

    frame.render_widget(list, area);
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Format: `Key: action | Key: action` with keys highlighted in cyan.
fn render_shortcut_bar(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let spans = vec![
        Span::styled("Enter", key_style),
        Span::raw(": search"),
        Span::styled(" | ", sep_style),
        Span::styled("Esc", key_style),
        Span::raw(": clear"),
        Span::styled(" | ", sep_style),
        Span::styled("Up/Down", key_style),
        Span::raw(": scroll"),
        Span::styled(" | ", sep_style),
        Span::styled("Ctrl+C", key_style),
        Span::raw(": quit"),
    ];

    let paragraph = Paragraph::new(Line::from(spans));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, SearchResponse, SourceRef};
    use crate::controller::Submission;

    fn text_to_string(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn layout_splits_input_content_and_shortcut_rows() {
        let area = Rect::new(0, 0, 100, 30);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        assert_eq!(main_chunks[0].height, 3, "query input should be 3 rows");
        assert_eq!(main_chunks[2].height, 1, "shortcut bar should be 1 row");

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[1]);

        let total = content_chunks[0].width + content_chunks[1].width;
        let left_pct = (f32::from(content_chunks[0].width) / f32::from(total)) * 100.0;
        assert!(
            (left_pct - 60.0).abs() < 5.0,
            "answer panel should be approximately 60% wide, got {left_pct}%"
        );
    }

    #[test]
    fn idle_state_shows_hint() {
        let app = App::new();
        let rendered = text_to_string(&answer_text(&app));
        assert!(rendered.contains("Type a query"));
    }

    #[test]
    fn loading_state_shows_indicator() {
        let mut app = App::new();
        app.begin_search();

        let rendered = text_to_string(&answer_text(&app));
        assert!(rendered.contains("Searching knowledge base"));
    }

    #[test]
    fn answer_shows_paragraphs_and_searched_count() {
        let mut app = App::new();
        app.apply_submission(
            Submission::Answered(SearchResponse {
                answer: "A\n\nB\nC".to_string(),
                num_docs_searched: 5,
                sources: Vec::new(),
            }),
            "http://x",
        );

        let rendered = text_to_string(&answer_text(&app));
        // Paragraph break becomes a blank line; single newline stays a line break
        assert!(rendered.contains("A\n\nB\nC"));
        assert!(rendered.contains("Searched 5 document chunks"));
    }

    #[test]
    fn error_shows_every_message_line() {
        let mut app = App::new();
        app.apply_submission(
            Submission::Failed(BackendError::Http { status: 500 }),
            "http://127.0.0.1:8000",
        );

        let rendered = text_to_string(&answer_text(&app));
        assert!(rendered.contains("status 500"));
        assert!(rendered.contains("Make sure the backend server is running"));
    }

    #[test]
    fn one_list_item_per_source() {
        let mut app = App::new();
        app.apply_submission(
            Submission::Answered(SearchResponse {
                answer: "X is Y.".to_string(),
                num_docs_searched: 5,
                sources: vec![
                    SourceRef {
                        file: "doc1.txt".to_string(),
                        chunk: 0,
                        similarity: 0.873,
                    },
                    SourceRef {
                        file: "doc2.txt".to_string(),
                        chunk: 3,
                        similarity: 0.5,
                    },
                ],
            }),
            "http://x",
        );

        let items = source_items(&app);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn empty_sources_render_no_items() {
        let app = App::new();
        assert!(source_items(&app).is_empty());
    }
}
