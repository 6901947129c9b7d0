//! Version-independent document structure.

use wdl_grammar::CommentMap;
use wdl_grammar::Span;
use wdl_grammar::SupportedVersion;

use crate::CommandPart;
use crate::Expr;
use crate::MetaValue;
use crate::Type;

/// An identifier with its span.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    /// The identifier text.
    pub text: String,
    /// The span of the identifier.
    pub span: Span,
}

impl Ident {
    /// Creates a new identifier.
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Gets the identifier text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// A declaration.
///
/// Unbound declarations (no expression) only occur in inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The declared type.
    pub ty: Type,
    /// The declared name.
    pub name: Ident,
    /// The declaration value, if bound.
    pub expr: Option<Expr>,
    /// The span of the declaration.
    pub span: Span,
}

/// An import statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    /// The import URI as written.
    pub uri: String,
    /// The span of the URI literal.
    pub uri_span: Span,
    /// The optional namespace of the import.
    pub namespace: Option<Ident>,
    /// The struct aliases of the import, as `(source, target)` names.
    pub aliases: Vec<(Ident, Ident)>,
    /// The span of the statement.
    pub span: Span,
}

impl ImportStatement {
    /// Gets the effective namespace of the import.
    ///
    /// Without an explicit `as` clause, the namespace is the final component
    /// of the URI with the `.wdl` extension removed.
    pub fn effective_namespace(&self) -> Option<String> {
        match &self.namespace {
            Some(ns) => Some(ns.text.clone()),
            None => {
                let base = self.uri.rsplit('/').next()?;
                let base = base.strip_suffix(".wdl").unwrap_or(base);
                if base.is_empty() {
                    None
                } else {
                    Some(base.to_string())
                }
            }
        }
    }
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    /// The struct name.
    pub name: Ident,
    /// The struct members, in source order.
    pub members: Vec<Declaration>,
    /// The span of the definition.
    pub span: Span,
}

/// A single `name: expr` item of a `runtime` or `hints` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeItem {
    /// The item name.
    pub name: Ident,
    /// The item value.
    pub expr: Expr,
}

/// A single item of a `meta` or `parameter_meta` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaItem {
    /// The item name.
    pub name: Ident,
    /// The item value.
    pub value: MetaValue,
}

/// A task definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// The task name.
    pub name: Ident,
    /// The task inputs.
    ///
    /// For `draft-2` documents these are the section-less unbound
    /// declarations of the task body.
    pub inputs: Vec<Declaration>,
    /// The private declarations of the task.
    pub declarations: Vec<Declaration>,
    /// The parts of the command section, in source order.
    pub command: Vec<CommandPart>,
    /// The span of the command section.
    pub command_span: Span,
    /// The task outputs.
    pub outputs: Vec<Declaration>,
    /// The `runtime` section items.
    pub runtime: Vec<RuntimeItem>,
    /// The `hints` section items.
    pub hints: Vec<RuntimeItem>,
    /// The `meta` section items.
    pub meta: Vec<MetaItem>,
    /// The `parameter_meta` section items.
    pub parameter_meta: Vec<MetaItem>,
    /// The span of the task.
    pub span: Span,
}

/// An input of a call statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CallInput {
    /// The input name.
    pub name: Ident,
    /// The supplied expression.
    ///
    /// `None` denotes the `name`-only shorthand.
    pub expr: Option<Expr>,
}

/// A call statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The dotted name of the called task or workflow.
    pub target: Vec<Ident>,
    /// The optional alias of the call.
    pub alias: Option<Ident>,
    /// The supplied inputs.
    pub inputs: Vec<CallInput>,
    /// The span of the statement.
    pub span: Span,
}

impl Call {
    /// Gets the name the call is known by in its scope.
    ///
    /// This is the alias when present and the final component of the target
    /// otherwise.
    pub fn name(&self) -> &Ident {
        self.alias
            .as_ref()
            .unwrap_or_else(|| self.target.last().expect("target should not be empty"))
    }
}

/// A scatter statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    /// The iteration variable.
    pub variable: Ident,
    /// The collection expression.
    pub expr: Expr,
    /// The statements of the body.
    pub body: Vec<WorkflowElement>,
    /// The span of the statement.
    pub span: Span,
}

/// A conditional statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    /// The condition expression.
    pub expr: Expr,
    /// The statements of the body.
    pub body: Vec<WorkflowElement>,
    /// The span of the statement.
    pub span: Span,
}

/// An element of a workflow body.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowElement {
    /// A declaration.
    Decl(Declaration),
    /// A call statement.
    Call(Call),
    /// A scatter statement.
    Scatter(Scatter),
    /// A conditional statement.
    Conditional(Conditional),
}

/// A workflow definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    /// The workflow name.
    pub name: Ident,
    /// The workflow inputs.
    pub inputs: Vec<Declaration>,
    /// The body of the workflow.
    pub body: Vec<WorkflowElement>,
    /// The workflow outputs.
    pub outputs: Vec<Declaration>,
    /// The `meta` section items.
    pub meta: Vec<MetaItem>,
    /// The `parameter_meta` section items.
    pub parameter_meta: Vec<MetaItem>,
    /// The span of the workflow.
    pub span: Span,
}

/// A version-independent WDL document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The language version of the document.
    pub version: SupportedVersion,
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
