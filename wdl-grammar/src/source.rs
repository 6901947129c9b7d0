//! The source registry.
//!
//! A [`Source`] identifies a single WDL document by URI and owns its text
//! buffer. Spans produced by the lexer and parser are byte offsets into that
//! buffer; the registry converts them to 1-based line/column [`Position`]s
//! for display.

use std::fmt;
use std::sync::Arc;

use line_index::LineIndex;
use line_index::TextSize;
use url::Url;

use crate::Span;

/// A 1-based line/column position within a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// The 1-based line number.
    line: usize,
    /// The 1-based column number.
    column: usize,
}

impl Position {
    /// Creates a new position from a 1-based line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Gets the 1-based line number of the position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Gets the 1-based column number of the position.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{line}:{column}", line = self.line, column = self.column)
    }
}

/// Represents a WDL source document.
///
/// The source owns the document text; it is cheap to clone.
#[derive(Debug, Clone)]
pub struct Source {
    /// The URI identifying the document.
    uri: Arc<Url>,
    /// The document text.
    text: Arc<str>,
    /// The line index used to convert byte offsets to line/column positions.
    lines: Arc<LineIndex>,
}

impl Source {
    /// Creates a new source from a URI and document text.
    pub fn new(uri: Url, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let lines = Arc::new(LineIndex::new(&text));
        Self {
            uri: Arc::new(uri),
            text,
            lines,
        }
    }

    /// Creates a source with a synthesized URI.
    ///
    /// Useful for in-memory documents such as tests.
    pub fn unnamed(text: impl Into<Arc<str>>) -> Self {
        Self::new(
            Url::parse("file:///unnamed.wdl").expect("URL should parse"),
            text,
        )
    }

    /// Gets the URI identifying the document.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Gets the text of the document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Converts a byte offset to a 1-based position.
    ///
    /// Offsets past the end of the document clamp to the last position.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line_col = self
            .lines
            .line_col(TextSize::new(offset as u32));
        Position::new(line_col.line as usize + 1, line_col.col as usize + 1)
    }

    /// Converts a span to its start and end positions.
    ///
    /// The end position is exclusive.
    pub fn span_positions(&self, span: Span) -> (Position, Position) {
        (self.position(span.offset()), self.position(span.end()))
    }

    /// Gets the 1-based line number containing the given byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        self.position(offset).line()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn positions_are_one_based() {
        let source = Source::unnamed("version 1.0\ntask t {\n}\n");
        assert_eq!(source.position(0), Position::new(1, 1));
        assert_eq!(source.position(8), Position::new(1, 9));
        assert_eq!(source.position(12), Position::new(2, 1));
        assert_eq!(source.line_of(17), 2);
    }

    #[test]
    fn span_positions_are_end_exclusive() {
        let source = Source::unnamed("a\nbc\n");
        let (start, end) = source.span_positions(Span::new(2, 2));
        assert_eq!(start, Position::new(2, 1));
        assert_eq!(end, Position::new(2, 3));
    }
}
