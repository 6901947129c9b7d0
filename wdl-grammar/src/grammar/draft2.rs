//! The `draft-2` document grammar.
//!
//! `draft-2` documents have no `input` sections (inputs are section-less
//! declarations), no struct definitions, no struct aliases on imports, and
//! interpolate with `${}` only.

use crate::Diagnostic;
use crate::Span;
use crate::comments::CommentMap;
use crate::concrete::ImportStatement;
use crate::concrete::Task;
use crate::concrete::VersionStatement;
use crate::concrete::Workflow;
use crate::lexer::Token;
use crate::parser::Parser;

/// A parsed `draft-2` document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The `version` statement, if the document carried an explicit
    /// `version draft-2` directive.
    pub version: Option<VersionStatement>,
    /// The import statements, in source order.
    pub imports: Vec<ImportStatement>,
    /// The task definitions, in source order.
    pub tasks: Vec<Task>,
    /// The workflow definition, if present.
    pub workflow: Option<Workflow>,
    /// The comment map of the document.
    pub comments: CommentMap,
    /// The span of the document.
    pub span: Span,
}

/// Parses the top level of a `draft-2` document.
pub(crate) fn document(
    mut parser: Parser<'_>,
    version: Option<VersionStatement>,
) -> Result<Document, Diagnostic> {
    let mut imports = Vec::new();
    let mut tasks = Vec::new();
    let mut workflow: Option<Workflow> = None;

    loop {
        match parser.peek()? {
            Some((Token::ImportKeyword, span)) => {
                parser.next()?;
                imports.push(parser.import_statement(span, false)?);
            }
            Some((Token::TaskKeyword, span)) => {
                parser.next()?;
                tasks.push(parser.task(span)?);
            }
            Some((Token::WorkflowKeyword, span)) => {
                parser.next()?;
                let w = parser.workflow(span)?;
                if workflow.is_some() {
                    return Err(Diagnostic::error(
                        w.span,
                        "document contains more than one workflow",
                    ));
                }
                workflow = Some(w);
            }
            Some(_) => return Err(parser.expected("`import`, `task`, or `workflow`")),
            None => break,
        }
    }

    let span = Span::new(0, parser.source().text().len());
    Ok(Document {
        version,
        imports,
        tasks,
        workflow,
        comments: parser.finish(),
        span,
    })
}
