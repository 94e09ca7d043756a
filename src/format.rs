//! Display formatting for answers and source citations.
//!
//! Pure transformations with no side effects: answer text is split into
//! paragraph/line structure, and source references are rendered as one-line
//! citations. The UI layers (TUI and CLI) consume these without re-deriving
//! the display rules.

use crate::backend::SourceRef;

/// An answer broken into display structure.
///
/// Paragraphs are ordered, and each paragraph is an ordered list of lines.
/// Double newlines in the raw text become paragraph boundaries; remaining
/// single newlines become line breaks within a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAnswer {
    paragraphs: Vec<Vec<String>>,
}

impl FormattedAnswer {
    /// Returns the paragraphs, each as its list of lines.
    pub fn paragraphs(&self) -> &[Vec<String>] {
        &self.paragraphs
    }

    /// Renders the answer back to plain text with paragraphs separated by a
    /// blank line. Used by the one-shot CLI output.
    pub fn to_display_string(&self) -> String {
        self.paragraphs
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Formats raw answer text into paragraph/line structure.
///
/// Every `"\n\n"` sequence becomes a paragraph boundary and every remaining
/// `"\n"` becomes a line break within a paragraph. Text with no newlines is
/// one paragraph of one line. Consumes plain text exactly once; re-formatting
/// already-structured output is out of scope.
pub fn format_answer(text: &str) -> FormattedAnswer {
    let paragraphs = text
        .split("\n\n")
        .map(|paragraph| paragraph.split('\n').map(String::from).collect())
        .collect();

    FormattedAnswer { paragraphs }
}

/// Renders one source citation line.
///
/// `position` is the zero-based index of the source in the response; the
/// displayed position and chunk are both 1-based, and similarity is shown as
/// a percentage with one decimal place.
///
/// # Examples
///
/// ```
/// use kbq::backend::SourceRef;
/// use kbq::format::source_line;
///
/// let source = SourceRef {
///     file: "doc1.txt".to_string(),
///     chunk: 0,
///     similarity: 0.873,
/// };
/// assert_eq!(
///     source_line(0, &source),
///     "Source 1: doc1.txt (Chunk 1) Similarity: 87.3%"
/// );
/// ```
pub fn source_line(position: usize, source: &SourceRef) -> String {
    format!(
        "Source {}: {} (Chunk {}) Similarity: {:.1}%",
        position + 1,
        source.file,
        source.chunk + 1,
        source.similarity * 100.0
    )
}

/// Renders the searched-chunk count shown under the answer.
pub fn searched_chunks_line(num_docs_searched: u64) -> String {
    format!("Searched {num_docs_searched} document chunks")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_newline_splits_paragraphs_single_newline_splits_lines() {
        let formatted = format_answer("A\n\nB\nC");

        assert_eq!(
            formatted.paragraphs(),
            &[vec!["A".to_string()], vec!["B".to_string(), "C".to_string()]]
        );
    }

    #[test]
    fn text_without_newlines_is_one_paragraph_of_one_line() {
        let formatted = format_answer("X is Y.");

        assert_eq!(formatted.paragraphs(), &[vec!["X is Y.".to_string()]]);
    }

    #[test]
    fn multiple_paragraphs_preserve_order() {
        let formatted = format_answer("first\n\nsecond\n\nthird");

        assert_eq!(formatted.paragraphs().len(), 3);
        assert_eq!(formatted.paragraphs()[0], vec!["first"]);
        assert_eq!(formatted.paragraphs()[1], vec!["second"]);
        assert_eq!(formatted.paragraphs()[2], vec!["third"]);
    }

    #[test]
    fn to_display_string_round_trips_structure() {
        let formatted = format_answer("A\n\nB\nC");

        assert_eq!(formatted.to_display_string(), "A\n\nB\nC");
    }

    #[test]
    fn empty_text_is_one_paragraph_with_one_empty_line() {
        let formatted = format_answer("");

        assert_eq!(formatted.paragraphs(), &[vec![String::new()]]);
    }

    #[test]
    fn source_line_uses_one_based_positions_and_percentage() {
        let source = SourceRef {
            file: "doc1.txt".to_string(),
            chunk: 0,
            similarity: 0.873,
        };

        assert_eq!(
            source_line(0, &source),
            "Source 1: doc1.txt (Chunk 1) Similarity: 87.3%"
        );
    }

    #[test]
    fn source_line_rounds_similarity_to_one_decimal() {
        let source = SourceRef {
            file: "notes.md".to_string(),
            chunk: 4,
            similarity: 0.56789,
        };

        // 56.789 rounds to 56.8
        assert_eq!(
            source_line(2, &source),
            "Source 3: notes.md (Chunk 5) Similarity: 56.8%"
        );
    }

    #[test]
    fn source_line_handles_zero_and_full_similarity() {
        let zero = SourceRef {
            file: "a.txt".to_string(),
            chunk: 0,
            similarity: 0.0,
        };
        let full = SourceRef {
            file: "b.txt".to_string(),
            chunk: 1,
            similarity: 1.0,
        };

        assert_eq!(source_line(0, &zero), "Source 1: a.txt (Chunk 1) Similarity: 0.0%");
        assert_eq!(source_line(1, &full), "Source 2: b.txt (Chunk 2) Similarity: 100.0%");
    }

    #[test]
    fn searched_chunks_line_includes_count() {
        assert_eq!(searched_chunks_line(5), "Searched 5 document chunks");
        assert_eq!(searched_chunks_line(0), "Searched 0 document chunks");
    }
}
