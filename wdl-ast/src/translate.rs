//! Lowering of version-specific concrete syntax into the AST.
//!
//! Lowering is purely structural: no name resolution or type checking
//! happens here. The only diagnostics produced are for constructs the
//! expression grammar accepts but the AST restricts (placeholder option
//! combinations, metadata values, and `null` outside metadata).

use wdl_grammar::Diagnostic;
use wdl_grammar::Span;
use wdl_grammar::SupportedVersion;
use wdl_grammar::concrete;

use crate::Call;
use crate::CallInput;
use crate::CommandPart;
use crate::Conditional;
use crate::Declaration;
use crate::Document;
use crate::Expr;
use crate::ExprKind;
use crate::Ident;
use crate::ImportStatement;
use crate::MetaItem;
use crate::MetaValue;
use crate::MetaValueKind;
use crate::RuntimeItem;
use crate::Scatter;
use crate::StructDefinition;
use crate::Task;
use crate::Type;
use crate::TypeKind;
use crate::Workflow;
use crate::WorkflowElement;
use crate::expr::BinaryOp;
use crate::expr::UnaryOp;

/// Creates a "null outside metadata" diagnostic.
fn null_outside_metadata(span: Span) -> Diagnostic {
    Diagnostic::error(span, "`null` can only be used within a metadata section")
}

/// Creates a "duplicate placeholder option" diagnostic.
fn duplicate_placeholder_option(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("duplicate placeholder option `{name}`"))
}

/// Lowers a parsed document of any version.
pub(crate) fn document(cst: wdl_grammar::Document) -> Result<Document, Diagnostic> {
    match cst {
        wdl_grammar::Document::Draft2(d) => draft2(d),
        wdl_grammar::Document::V1(d) => v1(d),
        wdl_grammar::Document::V2(d) => v2(d),
    }
}

/// Lowers a `draft-2` document.
///
/// Section-less unbound declarations at the top of tasks and workflows
/// become their inputs.
fn draft2(cst: wdl_grammar::grammar::draft2::Document) -> Result<Document, Diagnostic> {
    Ok(Document {
        version: SupportedVersion::Draft2,
        imports: cst
            .imports
            .into_iter()
            .map(import_statement)
            .collect::<Result<_, _>>()?,
        structs: Vec::new(),
        tasks: cst
            .tasks
            .into_iter()
            .map(task)
            .collect::<Result<_, _>>()?,
        workflow: cst.workflow.map(workflow).transpose()?,
        comments: cst.comments,
        span: cst.span,
    })
}

/// Lowers a 1.0 document.
fn v1(cst: wdl_grammar::grammar::v1::Document) -> Result<Document, Diagnostic> {
    Ok(Document {
        version: SupportedVersion::V1,
        imports: cst
            .imports
            .into_iter()
            .map(import_statement)
            .collect::<Result<_, _>>()?,
        structs: cst
            .structs
            .into_iter()
            .map(struct_definition)
            .collect::<Result<_, _>>()?,
        tasks: cst
            .tasks
            .into_iter()
            .map(task)
            .collect::<Result<_, _>>()?,
        workflow: cst.workflow.map(workflow).transpose()?,
        comments: cst.comments,
        span: cst.span,
    })
}

/// Lowers a 2.0 document.
fn v2(cst: wdl_grammar::grammar::v2::Document) -> Result<Document, Diagnostic> {
    Ok(Document {
        version: SupportedVersion::V2,
        imports: cst
            .imports
            .into_iter()
            .map(import_statement)
            .collect::<Result<_, _>>()?,
        structs: cst
            .structs
            .into_iter()
            .map(struct_definition)
            .collect::<Result<_, _>>()?,
        tasks: cst
            .tasks
            .into_iter()
            .map(task)
            .collect::<Result<_, _>>()?,
        workflow: cst.workflow.map(workflow).transpose()?,
        comments: cst.comments,
        span: cst.span,
    })
}

/// Lowers an identifier.
fn ident(i: concrete::Ident) -> Ident {
    Ident {
        text: i.text,
        span: i.span,
    }
}

/// Lowers an import statement.
fn import_statement(i: concrete::ImportStatement) -> Result<ImportStatement, Diagnostic> {
    let uri = i
        .uri
        .as_text()
        .expect("import URIs cannot contain placeholders")
        .to_string();
    Ok(ImportStatement {
        uri,
        uri_span: i.uri.span,
        namespace: i.namespace.map(ident),
        aliases: i
            .aliases
            .into_iter()
            .map(|a| (ident(a.source), ident(a.target)))
            .collect(),
        span: i.span,
    })
}

/// Lowers a struct definition.
fn struct_definition(s: concrete::StructDefinition) -> Result<StructDefinition, Diagnostic> {
    Ok(StructDefinition {
        name: ident(s.name),
        members: s
            .members
            .into_iter()
            .map(|m| {
                Ok(Declaration {
                    ty: ty(m.ty),
                    name: ident(m.name),
                    expr: None,
                    span: m.span,
                })
            })
            .collect::<Result<_, Diagnostic>>()?,
        span: s.span,
    })
}

/// Lowers a type annotation.
fn ty(t: concrete::Type) -> Type {
    let span = t.span();
    let kind = match t {
        concrete::Type::Boolean { .. } => TypeKind::Boolean,
        concrete::Type::Int { .. } => TypeKind::Int,
        concrete::Type::Float { .. } => TypeKind::Float,
        concrete::Type::String { .. } => TypeKind::String,
        concrete::Type::File { .. } => TypeKind::File,
        concrete::Type::Directory { .. } => TypeKind::Directory,
        concrete::Type::Object { .. } => TypeKind::Object,
        concrete::Type::Named { name } => TypeKind::Named(name.text),
        concrete::Type::Array {
            element, non_empty, ..
        } => TypeKind::Array {
            element: Box::new(ty(*element)),
            non_empty,
        },
        concrete::Type::Map { key, value, .. } => TypeKind::Map {
            key: Box::new(ty(*key)),
            value: Box::new(ty(*value)),
        },
        concrete::Type::Pair { left, right, .. } => TypeKind::Pair {
            left: Box::new(ty(*left)),
            right: Box::new(ty(*right)),
        },
        concrete::Type::Optional { inner, .. } => TypeKind::Optional(Box::new(ty(*inner))),
    };
    Type { kind, span }
}

/// Lowers a declaration.
fn declaration(d: concrete::Declaration) -> Result<Declaration, Diagnostic> {
    match d {
        concrete::Declaration::Bound(d) => Ok(Declaration {
            ty: ty(d.ty),
            name: ident(d.name),
            expr: Some(expr(d.expr)?),
            span: d.span,
        }),
        concrete::Declaration::Unbound(d) => Ok(Declaration {
            ty: ty(d.ty),
            name: ident(d.name),
            expr: None,
            span: d.span,
        }),
    }
}

/// Lowers a bound declaration.
fn bound_declaration(d: concrete::BoundDecl) -> Result<Declaration, Diagnostic> {
    Ok(Declaration {
        ty: ty(d.ty),
        name: ident(d.name),
        expr: Some(expr(d.expr)?),
        span: d.span,
    })
}

/// Splits a task or workflow declaration list into inputs and private
/// declarations.
///
/// For versions with `input` sections, the input section is the sole source
/// of inputs. For `draft-2`, unbound declarations are the inputs.
fn split_declarations(
    input: Option<concrete::InputSection>,
    declarations: Vec<concrete::Declaration>,
) -> Result<(Vec<Declaration>, Vec<Declaration>), Diagnostic> {
    let mut inputs = Vec::new();
    let mut private = Vec::new();

    if let Some(section) = input {
        for d in section.declarations {
            inputs.push(declaration(d)?);
        }
    }

    for d in declarations {
        match d {
            concrete::Declaration::Unbound(_) => inputs.push(declaration(d)?),
            concrete::Declaration::Bound(_) => private.push(declaration(d)?),
        }
    }

    Ok((inputs, private))
}

/// Lowers a task definition.
fn task(t: concrete::Task) -> Result<Task, Diagnostic> {
    let (inputs, declarations) = split_declarations(t.input, t.declarations)?;
    let command_span = t.command.span;
    Ok(Task {
        name: ident(t.name),
        inputs,
        declarations,
        command: command_parts(t.command)?,
        command_span,
        outputs: t
            .output
            .map(|o| {
                o.declarations
                    .into_iter()
                    .map(bound_declaration)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default(),
        runtime: t
            .runtime
            .map(|r| runtime_items(r.items))
            .transpose()?
            .unwrap_or_default(),
        hints: t
            .hints
            .map(|h| runtime_items(h.items))
            .transpose()?
            .unwrap_or_default(),
        meta: t.meta.map(meta_items).transpose()?.unwrap_or_default(),
        parameter_meta: t
            .parameter_meta
            .map(meta_items)
            .transpose()?
            .unwrap_or_default(),
        span: t.span,
    })
}

/// Lowers a workflow definition.
fn workflow(w: concrete::Workflow) -> Result<Workflow, Diagnostic> {
    let mut inputs = Vec::new();
    if let Some(section) = w.input {
        for d in section.declarations {
            inputs.push(declaration(d)?);
        }
    }

    let mut body = Vec::new();
    for element in w.body {
        match element {
            // Section-less unbound declarations are draft-2 workflow inputs.
            concrete::WorkflowElement::Decl(concrete::Declaration::Unbound(d)) => {
                inputs.push(declaration(concrete::Declaration::Unbound(d))?);
            }
            element => body.push(workflow_element(element)?),
        }
    }

    Ok(Workflow {
        name: ident(w.name),
        inputs,
        body,
        outputs: w
            .output
            .map(|o| {
                o.declarations
                    .into_iter()
                    .map(bound_declaration)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default(),
        meta: w.meta.map(meta_items).transpose()?.unwrap_or_default(),
        parameter_meta: w
            .parameter_meta
            .map(meta_items)
            .transpose()?
            .unwrap_or_default(),
        span: w.span,
    })
}

/// Lowers a workflow body element.
fn workflow_element(e: concrete::WorkflowElement) -> Result<WorkflowElement, Diagnostic> {
    match e {
        concrete::WorkflowElement::Decl(d) => Ok(WorkflowElement::Decl(declaration(d)?)),
        concrete::WorkflowElement::Call(c) => Ok(WorkflowElement::Call(Call {
            target: c.target.into_iter().map(ident).collect(),
            alias: c.alias.map(ident),
            inputs: c
                .inputs
                .into_iter()
                .map(|i| {
                    Ok(CallInput {
                        name: ident(i.name),
                        expr: i.expr.map(expr).transpose()?,
                    })
                })
                .collect::<Result<_, Diagnostic>>()?,
            span: c.span,
        })),
        concrete::WorkflowElement::Scatter(s) => Ok(WorkflowElement::Scatter(Scatter {
            variable: ident(s.variable),
            expr: expr(s.expr)?,
            body: s
                .body
                .into_iter()
                .map(workflow_element)
                .collect::<Result<_, _>>()?,
            span: s.span,
        })),
        concrete::WorkflowElement::Conditional(c) => {
            Ok(WorkflowElement::Conditional(Conditional {
                expr: expr(c.expr)?,
                body: c
                    .body
                    .into_iter()
                    .map(workflow_element)
                    .collect::<Result<_, _>>()?,
                span: c.span,
            }))
        }
    }
}

/// Lowers the parts of a command section.
fn command_parts(c: concrete::CommandSection) -> Result<Vec<CommandPart>, Diagnostic> {
    c.parts
        .into_iter()
        .map(|part| match part {
            concrete::StringPart::Text { value, span } => Ok(CommandPart::Text { value, span }),
            concrete::StringPart::Placeholder(p) => Ok(CommandPart::Expr(placeholder(p)?)),
        })
        .collect()
}

/// Lowers the items of a `runtime` or `hints` section.
fn runtime_items(items: Vec<concrete::RuntimeItem>) -> Result<Vec<RuntimeItem>, Diagnostic> {
    items
        .into_iter()
        .map(|i| {
            Ok(RuntimeItem {
                name: ident(i.name),
                expr: expr(i.expr)?,
            })
        })
        .collect()
}

/// Lowers the items of a metadata section.
fn meta_items(section: concrete::MetadataSection) -> Result<Vec<MetaItem>, Diagnostic> {
    section
        .items
        .into_iter()
        .map(|i| {
            Ok(MetaItem {
                name: ident(i.name),
                value: meta_value(i.value)?,
            })
        })
        .collect()
}

/// Lowers a metadata value, restricting the expression grammar to the
/// metadata value sum.
fn meta_value(e: concrete::Expr) -> Result<MetaValue, Diagnostic> {
    let span = e.span;
    let kind = match e.kind {
        concrete::ExprKind::Null => MetaValueKind::Null,
        concrete::ExprKind::Boolean(v) => MetaValueKind::Boolean(v),
        concrete::ExprKind::Integer(v) => MetaValueKind::Integer(v),
        concrete::ExprKind::Float(v) => MetaValueKind::Float(v),
        concrete::ExprKind::Unary {
            op: concrete::UnaryOp::Negation,
            operand,
        } => match operand.kind {
            concrete::ExprKind::Integer(v) => MetaValueKind::Integer(-v),
            concrete::ExprKind::Float(v) => MetaValueKind::Float(-v),
            _ => {
                return Err(Diagnostic::error(
                    span,
                    "metadata values must be literal values",
                ));
            }
        },
        concrete::ExprKind::String(s) => match s.as_text() {
            Some(text) => MetaValueKind::String(text.to_string()),
            None => {
                return Err(Diagnostic::error(
                    span,
                    "metadata strings cannot contain placeholders",
                ));
            }
        },
        concrete::ExprKind::Array(elements) => MetaValueKind::Array(
            elements
                .into_iter()
                .map(meta_value)
                .collect::<Result<_, _>>()?,
        ),
        // Metadata objects parse as map literals with name keys.
        concrete::ExprKind::Map(items) => MetaValueKind::Object(
            items
                .into_iter()
                .map(|(key, value)| {
                    let name = match key.kind {
                        concrete::ExprKind::Ident(name) => name,
                        _ => {
                            return Err(Diagnostic::error(
                                key.span,
                                "metadata object keys must be names",
                            ));
                        }
                    };
                    Ok((name, meta_value(value)?))
                })
                .collect::<Result<_, _>>()?,
        ),
        concrete::ExprKind::Object(members) => MetaValueKind::Object(
            members
                .into_iter()
                .map(|m| Ok((m.name.text, meta_value(m.value)?)))
                .collect::<Result<_, Diagnostic>>()?,
        ),
        concrete::ExprKind::Ident(_) => {
            return Err(Diagnostic::error(
                span,
                "names cannot be referenced in metadata sections",
            ));
        }
        _ => {
            return Err(Diagnostic::error(
                span,
                "metadata values must be literal values",
            ));
        }
    };
    Ok(MetaValue { kind, span })
}

/// Lowers a string literal to a [`ExprKind::String`] or
/// [`ExprKind::CompoundString`] expression.
fn string_literal(s: concrete::StringLiteral) -> Result<Expr, Diagnostic> {
    if let Some(text) = s.as_text() {
        return Ok(Expr {
            kind: ExprKind::String(text.to_string()),
            span: s.span,
        });
    }

    let parts = s
        .parts
        .into_iter()
        .map(|part| match part {
            concrete::StringPart::Text { value, span } => Ok(Expr {
                kind: ExprKind::String(value),
                span,
            }),
            concrete::StringPart::Placeholder(p) => placeholder(p),
        })
        .collect::<Result<_, _>>()?;

    Ok(Expr {
        kind: ExprKind::CompoundString(parts),
        span: s.span,
    })
}

/// Lowers a placeholder, applying its options.
///
/// `sep=` applies innermost, then `true=`/`false=`, then `default=`; the
/// options are mutually independent and each may appear at most once.
fn placeholder(p: concrete::Placeholder) -> Result<Expr, Diagnostic> {
    let span = p.span;
    let mut sep = None;
    let mut default = None;
    let mut true_value = None;
    let mut false_value = None;

    for option in p.options {
        match option {
            concrete::PlaceholderOption::Sep { value, span } => {
                if sep.is_some() {
                    return Err(duplicate_placeholder_option("sep", span));
                }
                sep = Some(string_literal(value)?);
            }
            concrete::PlaceholderOption::Default { value, span } => {
                if default.is_some() {
                    return Err(duplicate_placeholder_option("default", span));
                }
                default = Some(expr(value)?);
            }
            concrete::PlaceholderOption::True { value, span } => {
                if true_value.is_some() {
                    return Err(duplicate_placeholder_option("true", span));
                }
                true_value = Some(string_literal(value)?);
            }
            concrete::PlaceholderOption::False { value, span } => {
                if false_value.is_some() {
                    return Err(duplicate_placeholder_option("false", span));
                }
                false_value = Some(string_literal(value)?);
            }
        }
    }

    let mut lowered = expr(p.expr)?;

    if let Some(separator) = sep {
        lowered = Expr {
            kind: ExprKind::PlaceholderSep {
                separator: Box::new(separator),
                array: Box::new(lowered),
            },
            span,
        };
    }

    match (true_value, false_value) {
        (Some(t), Some(f)) => {
            lowered = Expr {
                kind: ExprKind::PlaceholderEqual {
                    true_expr: Box::new(t),
                    false_expr: Box::new(f),
                    condition: Box::new(lowered),
                },
                span,
            };
        }
        (None, None) => {}
        _ => {
            return Err(Diagnostic::error(
                span,
                "placeholder options `true` and `false` must be used together",
            ));
        }
    }

    if let Some(d) = default {
        lowered = Expr {
            kind: ExprKind::PlaceholderDefault {
                default: Box::new(d),
                value: Box::new(lowered),
            },
            span,
        };
    }

    Ok(lowered)
}

/// Lowers an expression.
pub(crate) fn expr(e: concrete::Expr) -> Result<Expr, Diagnostic> {
    let span = e.span;
    let kind = match e.kind {
        concrete::ExprKind::Boolean(v) => ExprKind::Boolean(v),
        concrete::ExprKind::Integer(v) => ExprKind::Integer(v),
        concrete::ExprKind::Float(v) => ExprKind::Float(v),
        concrete::ExprKind::None => ExprKind::None,
        concrete::ExprKind::Null => return Err(null_outside_metadata(span)),
        concrete::ExprKind::String(s) => return string_literal(s),
        concrete::ExprKind::Ident(name) => ExprKind::Ident(name),
        concrete::ExprKind::Array(elements) => ExprKind::Array(
            elements
                .into_iter()
                .map(expr)
                .collect::<Result<_, _>>()?,
        ),
        concrete::ExprKind::Map(items) => ExprKind::Map(
            items
                .into_iter()
                .map(|(k, v)| Ok((expr(k)?, expr(v)?)))
                .collect::<Result<_, Diagnostic>>()?,
        ),
        concrete::ExprKind::Object(members) => ExprKind::Object(
            members
                .into_iter()
                .map(|m| Ok((ident(m.name), expr(m.value)?)))
                .collect::<Result<_, Diagnostic>>()?,
        ),
        concrete::ExprKind::Struct { name, members } => ExprKind::Struct {
            name: ident(name),
            members: members
                .into_iter()
                .map(|m| Ok((ident(m.name), expr(m.value)?)))
                .collect::<Result<_, Diagnostic>>()?,
        },
        concrete::ExprKind::Pair(left, right) => {
            ExprKind::Pair(Box::new(expr(*left)?), Box::new(expr(*right)?))
        }
        concrete::ExprKind::Group(inner) => {
            let inner = expr(*inner)?;
            return Ok(Expr {
                kind: inner.kind,
                span,
            });
        }
        concrete::ExprKind::Unary { op, operand } => ExprKind::Unary {
            op: match op {
                concrete::UnaryOp::Negation => UnaryOp::Negation,
                concrete::UnaryOp::LogicalNot => UnaryOp::LogicalNot,
            },
            operand: Box::new(expr(*operand)?),
        },
        concrete::ExprKind::Binary { op, lhs, rhs } => ExprKind::Binary {
            op: match op {
                concrete::BinaryOp::LogicalOr => BinaryOp::LogicalOr,
                concrete::BinaryOp::LogicalAnd => BinaryOp::LogicalAnd,
                concrete::BinaryOp::Equality => BinaryOp::Equality,
                concrete::BinaryOp::Inequality => BinaryOp::Inequality,
                concrete::BinaryOp::Less => BinaryOp::Less,
                concrete::BinaryOp::LessEqual => BinaryOp::LessEqual,
                concrete::BinaryOp::Greater => BinaryOp::Greater,
                concrete::BinaryOp::GreaterEqual => BinaryOp::GreaterEqual,
                concrete::BinaryOp::Addition => BinaryOp::Addition,
                concrete::BinaryOp::Subtraction => BinaryOp::Subtraction,
                concrete::BinaryOp::Multiplication => BinaryOp::Multiplication,
                concrete::BinaryOp::Division => BinaryOp::Division,
                concrete::BinaryOp::Modulo => BinaryOp::Modulo,
            },
            lhs: Box::new(expr(*lhs)?),
            rhs: Box::new(expr(*rhs)?),
        },
        concrete::ExprKind::IfThenElse {
            condition,
            true_expr,
            false_expr,
        } => ExprKind::IfThenElse {
            condition: Box::new(expr(*condition)?),
            true_expr: Box::new(expr(*true_expr)?),
            false_expr: Box::new(expr(*false_expr)?),
        },
        concrete::ExprKind::Apply { target, arguments } => ExprKind::Apply {
            target: ident(target),
            arguments: arguments
                .into_iter()
                .map(expr)
                .collect::<Result<_, _>>()?,
        },
        concrete::ExprKind::Index { target, index } => ExprKind::At {
            target: Box::new(expr(*target)?),
            index: Box::new(expr(*index)?),
        },
        concrete::ExprKind::Access { target, member } => ExprKind::GetName {
            target: Box::new(expr(*target)?),
            member: ident(member),
        },
    };
    Ok(Expr { kind, span })
}
