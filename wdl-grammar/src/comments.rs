//! The document comment map.
//!
//! Comments are not part of the grammar proper; the lexer records them as it
//! streams tokens and the parser deposits them here, keyed by line number.
//! Consumers (formatters, documentation generators) query the map by line
//! range to reattach comments to syntax.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::Span;

/// Describes how a comment relates to the surrounding syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPlacement {
    /// The comment occupies its own line.
    ///
    /// Own-line comments attach to the nearest following syntactic element.
    OwnLine,
    /// The comment trails other content on its line.
    ///
    /// End-of-line comments attach to the preceding syntactic element.
    EndOfLine,
}

/// A single comment in a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The comment text, including the leading `#` characters.
    text: String,
    /// Whether the comment is pre-formatted (started with `##`).
    preformatted: bool,
    /// The placement of the comment.
    placement: CommentPlacement,
    /// The span of the comment.
    span: Span,
}

impl Comment {
    /// Creates a new comment.
    pub fn new(text: impl Into<String>, placement: CommentPlacement, span: Span) -> Self {
        let text = text.into();
        let preformatted = text.starts_with("##");
        Self {
            text,
            preformatted,
            placement,
            span,
        }
    }

    /// Gets the text of the comment, including the leading `#` characters.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Determines if the comment is pre-formatted.
    ///
    /// Pre-formatted comments start with `##` and must be reproduced
    /// verbatim by formatting tools.
    pub fn is_preformatted(&self) -> bool {
        self.preformatted
    }

    /// Gets the placement of the comment.
    pub fn placement(&self) -> CommentPlacement {
        self.placement
    }

    /// Gets the span of the comment.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A map of line number to the comment found on that line.
///
/// Lines are 1-based. A line holds at most one comment, as a `#` comment
/// always extends to the end of its line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    /// The comments, sorted by line number.
    comments: BTreeMap<usize, Comment>,
}

impl CommentMap {
    /// Creates an empty comment map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a comment found on the given line.
    pub fn insert(&mut self, line: usize, comment: Comment) {
        self.comments.insert(line, comment);
    }

    /// Gets the comment on the given line, if any.
    pub fn get(&self, line: usize) -> Option<&Comment> {
        self.comments.get(&line)
    }

    /// Iterates the comments on lines in `[start, end)`, in line order.
    pub fn range(&self, lines: Range<usize>) -> impl Iterator<Item = (usize, &Comment)> {
        self.comments.range(lines).map(|(line, c)| (*line, c))
    }

    /// Iterates all comments in line order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Comment)> {
        self.comments.iter().map(|(line, c)| (*line, c))
    }

    /// Determines if the map contains no comments.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Gets the number of comments in the map.
    pub fn len(&self) -> usize {
        self.comments.len()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn range_queries_are_half_open() {
        let mut map = CommentMap::new();
        map.insert(
            1,
            Comment::new("## header", CommentPlacement::OwnLine, Span::new(0, 9)),
        );
        map.insert(
            3,
            Comment::new("# trailing", CommentPlacement::EndOfLine, Span::new(20, 10)),
        );
        map.insert(
            7,
            Comment::new("# other", CommentPlacement::OwnLine, Span::new(50, 7)),
        );

        let lines: Vec<_> = map.range(1..7).map(|(line, _)| line).collect();
        assert_eq!(lines, [1, 3]);
        assert!(map.get(1).unwrap().is_preformatted());
        assert!(!map.get(3).unwrap().is_preformatted());
    }
}
