//! Diagnostics reported while processing WDL documents.

use std::fmt;

/// A region of source text, as a byte offset and length.
///
/// The region is half-open: it covers `offset..offset + len`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// The byte offset of the start of the region.
    offset: usize,
    /// The length of the region in bytes.
    len: usize,
}

impl Span {
    /// Creates a new span from a byte offset and length.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Gets the byte offset of the start of the span.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Gets the length of the span in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Determines if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the byte offset one past the end of the span.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Creates the smallest span covering both `self` and `other`.
    pub fn merge(self, other: Self) -> Self {
        let offset = self.offset.min(other.offset);
        Self {
            offset,
            len: self.end().max(other.end()) - offset,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{offset}..{end}", offset = self.offset, end = self.end())
    }
}

impl From<logos::Span> for Span {
    fn from(value: logos::Span) -> Self {
        Self::new(value.start, value.len())
    }
}

/// How a diagnostic is reported to the user.
///
/// Warnings never prevent a document from being used; errors do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The diagnostic points out something suspect but usable.
    Warning,
    /// The diagnostic describes a failure.
    Error,
}

/// A secondary annotation pointing at source related to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// The note message.
    message: String,
    /// The span of the annotated source.
    span: Span,
}

impl Note {
    /// Gets the message of the note.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the span of the annotated source.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A problem found while lexing, parsing, checking, or evaluating a
/// document.
///
/// A diagnostic carries its severity, a message, the primary span it points
/// at when one is known, and any number of secondary [`Note`]s annotating
/// related source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    severity: Severity,
    /// The diagnostic message.
    message: String,
    /// The primary span the diagnostic points at, when known.
    span: Option<Span>,
    /// The secondary notes of the diagnostic.
    notes: Vec<Note>,
}

impl Diagnostic {
    /// Creates an error diagnostic pointing at the given span.
    pub fn error(span: impl Into<Option<Span>>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span: span.into(),
            notes: Vec::new(),
        }
    }

    /// Creates a warning diagnostic pointing at the given span.
    pub fn warning(span: impl Into<Option<Span>>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span: span.into(),
            notes: Vec::new(),
        }
    }

    /// Attaches a secondary note annotating related source.
    pub fn note(mut self, span: Span, message: impl Into<String>) -> Self {
        self.notes.push(Note {
            message: message.into(),
            span,
        });
        self
    }

    /// Gets the severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Determines if the diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Gets the message of the diagnostic.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the primary span the diagnostic points at, when known.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Gets the secondary notes of the diagnostic.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: ")?,
            Severity::Error => write!(f, "error: ")?,
        }
        write!(f, "{message}", message = self.message)?;
        if let Some(span) = self.span {
            write!(f, " (at {span})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn spans_merge_to_the_smallest_cover() {
        let merged = Span::new(4, 2).merge(Span::new(10, 5));
        assert_eq!(merged.offset(), 4);
        assert_eq!(merged.end(), 15);
        // Merging is insensitive to argument order.
        assert_eq!(merged, Span::new(10, 5).merge(Span::new(4, 2)));
    }

    #[test]
    fn diagnostics_render_their_severity_and_span() {
        let diagnostic = Diagnostic::error(Span::new(3, 4), "something went wrong")
            .note(Span::new(0, 1), "relevant context");
        assert!(diagnostic.is_error());
        assert_eq!(
            diagnostic.to_string(),
            "error: something went wrong (at 3..7)"
        );
        assert_eq!(diagnostic.notes().len(), 1);

        let warning = Diagnostic::warning(None, "suspicious but usable");
        assert!(!warning.is_error());
        assert_eq!(warning.span(), None);
    }
}
