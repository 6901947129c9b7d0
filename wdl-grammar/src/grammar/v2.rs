//! The 2.0 (`development`) document grammar.
//!
//! 2.0 documents add the `Directory` type, task `hints` sections, struct
//! literals, and the `None` literal; `${}` interpolation is no longer
//! recognized.

use crate::Diagnostic;
use crate::Span;
use crate::comments::CommentMap;
use crate::concrete::ImportStatement;
use crate::concrete::StructDefinition;
use crate::concrete::Task;
use crate::concrete::VersionStatement;
use crate::concrete::Workflow;
use crate::lexer::Token;
use crate::parser::Parser;

/// A parsed 2.0 document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The `version` statement.
    pub version: VersionStatement,
    /// The import statements, in source order.
    pub imports: Vec<ImportStatement>,
    /// The struct definitions, in source order.
    pub structs: Vec<StructDefinition>,
    /// The task definitions, in source order.
    pub tasks: Vec<Task>,
    /// The workflow definition, if present.
    pub workflow: Option<Workflow>,
    /// The comment map of the document.
    pub comments: CommentMap,
    /// The span of the document.
    pub span: Span,
}

/// Parses the top level of a 2.0 document.
pub(crate) fn document(
    mut parser: Parser<'_>,
    version: VersionStatement,
) -> Result<Document, Diagnostic> {
    let mut imports = Vec::new();
    let mut structs = Vec::new();
    let mut tasks = Vec::new();
    let mut workflow: Option<Workflow> = None;

    loop {
        match parser.peek()? {
            Some((Token::ImportKeyword, span)) => {
                parser.next()?;
                imports.push(parser.import_statement(span, true)?);
            }
            Some((Token::StructKeyword, span)) => {
                parser.next()?;
                structs.push(parser.struct_definition(span)?);
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
            Some(_) => {
                return Err(parser.expected("`import`, `struct`, `task`, or `workflow`"));
            }
            None => break,
        }
    }

    let span = Span::new(0, parser.source().text().len());
    Ok(Document {
        version,
        imports,
        structs,
        tasks,
        workflow,
        comments: parser.finish(),
        span,
    })
}
