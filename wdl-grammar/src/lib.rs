//! Lexing and parsing of Workflow Description Language (WDL) documents.
//!
//! This crate is the front of the WDL pipeline: given a [`Source`], it
//! produces a version-specific concrete syntax tree (see [`grammar`]) along
//! with the document's [`CommentMap`]. Three language versions are supported:
//! `draft-2`, 1.0, and 2.0 (`development`); the `version` directive selects
//! the grammar, and its absence selects `draft-2`.
//!
//! Parsing stops at the first grammar mismatch and reports it as an error
//! [`Diagnostic`]; no recovery is attempted.
//!
//! # Examples
//!
//! ```rust
//! use wdl_grammar::Document;
//! use wdl_grammar::Source;
//!
//! let source = Source::unnamed("version 1.0\nworkflow test {}");
//! let document = Document::parse(&source).expect("document should parse");
//! assert!(matches!(document, Document::V1(_)));
//! ```

mod comments;
pub mod concrete;
mod diagnostic;
pub mod grammar;
pub mod lexer;
mod parser;
mod source;
mod version;

pub use comments::Comment;
pub use comments::CommentMap;
pub use comments::CommentPlacement;
pub use diagnostic::Diagnostic;
pub use diagnostic::Note;
pub use diagnostic::Severity;
pub use diagnostic::Span;
pub use grammar::Document;
pub use source::Position;
pub use source::Source;
pub use version::SupportedVersion;

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::concrete::ExprKind;
    use crate::concrete::StringPart;

    /// Parses a 1.0 document, panicking on failure.
    fn parse_v1(body: &str) -> grammar::v1::Document {
        let source = Source::unnamed(format!("version 1.0\n{body}"));
        match Document::parse(&source) {
            Ok(Document::V1(document)) => document,
            Ok(_) => panic!("document should be a 1.0 document"),
            Err(e) => panic!("document should parse: {message}", message = e.message()),
        }
    }

    #[test]
    fn version_directive_selects_the_grammar() {
        let source = Source::unnamed("workflow w {}");
        let document = Document::parse(&source).expect("document should parse");
        assert_eq!(document.version(), SupportedVersion::Draft2);

        let source = Source::unnamed("version development\nworkflow w {}");
        let document = Document::parse(&source).expect("document should parse");
        assert_eq!(document.version(), SupportedVersion::V2);

        let source = Source::unnamed("version 3.5\nworkflow w {}");
        let e = Document::parse(&source).expect_err("document should not parse");
        assert_eq!(e.message(), "unsupported WDL version `3.5`");
    }

    #[test]
    fn tasks_require_a_command_section() {
        let source = Source::unnamed("version 1.0\ntask t { runtime { cpu: 1 } }");
        let e = Document::parse(&source).expect_err("document should not parse");
        assert_eq!(e.message(), "task `t` is missing a command section");
    }

    #[test]
    fn strings_without_interpolation_are_a_single_fragment() {
        let document = parse_v1(
            r#"workflow w {
    String s = "hello world"
}"#,
        );
        let workflow = document.workflow.expect("document should have a workflow");
        match &workflow.body[0] {
            concrete::WorkflowElement::Decl(concrete::Declaration::Bound(decl)) => {
                match &decl.expr.kind {
                    ExprKind::String(s) => assert_eq!(s.as_text(), Some("hello world")),
                    _ => panic!("expected a string literal"),
                }
            }
            _ => panic!("expected a bound declaration"),
        }
    }

    #[test]
    fn placeholders_split_strings_into_fragments() {
        let document = parse_v1(
            r#"workflow w {
    String name = "world"
    String s = "hello ~{name}!"
}"#,
        );
        let workflow = document.workflow.expect("document should have a workflow");
        match &workflow.body[1] {
            concrete::WorkflowElement::Decl(concrete::Declaration::Bound(decl)) => {
                match &decl.expr.kind {
                    ExprKind::String(s) => {
                        assert_eq!(s.parts.len(), 3);
                        assert!(matches!(
                            &s.parts[0],
                            StringPart::Text { value, .. } if value == "hello "
                        ));
                        assert!(matches!(&s.parts[1], StringPart::Placeholder(_)));
                        assert!(matches!(
                            &s.parts[2],
                            StringPart::Text { value, .. } if value == "!"
                        ));
                    }
                    _ => panic!("expected a string literal"),
                }
            }
            _ => panic!("expected a bound declaration"),
        }
    }

    #[test]
    fn command_sections_accept_both_delimiters() {
        let document = parse_v1(
            "task t {\n    command <<<\n        echo ~{1 + 2}\n    >>>\n}\n\
             task u {\n    command {\n        echo hi\n    }\n}",
        );
        assert!(document.tasks[0].command.heredoc);
        assert_eq!(document.tasks[0].command.parts.len(), 3);
        assert!(!document.tasks[1].command.heredoc);
        assert_eq!(document.tasks[1].command.parts.len(), 1);
    }

    #[test]
    fn placeholder_options_are_recognized_in_any_order() {
        let document = parse_v1(
            "task t {\n    input {\n        Array[Int] a\n        Boolean b\n    }\n    \
             command <<<\n        ~{sep=\", \" a} ~{true=\"yes\" false=\"no\" b} \
             ~{false=\"no\" true=\"yes\" b}\n    >>>\n}",
        );
        let placeholders: Vec<_> = document.tasks[0]
            .command
            .parts
            .iter()
            .filter_map(|p| match p {
                StringPart::Placeholder(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(placeholders.len(), 3);
        assert_eq!(placeholders[0].options.len(), 1);
        assert_eq!(placeholders[1].options.len(), 2);
        assert_eq!(placeholders[2].options.len(), 2);
    }

    #[test]
    fn comments_are_mapped_by_line() {
        let source = Source::unnamed(
            "version 1.0\n## preformatted\nworkflow w {\n    Int x = 1  # trailing\n}\n",
        );
        let document = Document::parse(&source).expect("document should parse");
        let comments = document.comments();
        assert_eq!(comments.len(), 2);
        let own_line = comments.get(2).expect("line 2 should have a comment");
        assert!(own_line.is_preformatted());
        assert_eq!(own_line.placement(), CommentPlacement::OwnLine);
        let trailing = comments.get(4).expect("line 4 should have a comment");
        assert_eq!(trailing.placement(), CommentPlacement::EndOfLine);
        assert_eq!(trailing.text(), "# trailing");
    }

    #[test]
    fn draft2_interpolates_with_dollar_only() {
        let source = Source::unnamed(
            "task t {\n    String name\n    command {\n        echo ${name} ~{name}\n    }\n}",
        );
        let document = match Document::parse(&source).expect("document should parse") {
            Document::Draft2(d) => d,
            _ => panic!("document should be a draft-2 document"),
        };
        let parts = &document.tasks[0].command.parts;
        // `${name}` is a placeholder; `~{name}` is literal text.
        assert_eq!(
            parts
                .iter()
                .filter(|p| matches!(p, StringPart::Placeholder(_)))
                .count(),
            1
        );
        let text: String = parts
            .iter()
            .filter_map(|p| match p {
                StringPart::Text { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert!(text.contains("~{name}"));
    }
}
