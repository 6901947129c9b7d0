//! The typed abstract syntax tree.
//!
//! The typed AST mirrors the shape of the AST; every expression node carries
//! its inferred [`Type`] and every function call carries its resolved
//! prototype. Implicit coercions elaborated during inference appear as
//! explicit [`TypedExprKind::Coerce`] nodes whose type is the coercion
//! target.

use std::sync::Arc;

use indexmap::IndexMap;
use wdl_ast::BinaryOp;
use wdl_ast::MetaValue;
use wdl_ast::Span;
use wdl_ast::SupportedVersion;
use wdl_ast::UnaryOp;

use crate::stdlib::FunctionSignature;
use crate::types::CallType;
use crate::types::StructType;
use crate::types::Type;

/// A typed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    /// The kind of the expression.
    pub kind: TypedExprKind,
    /// The inferred type of the expression.
    pub ty: Type,
    /// The span of the expression.
    pub span: Span,
}

/// The kind of a typed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    /// A literal boolean.
    Boolean(bool),
    /// A literal integer.
    Integer(i64),
    /// A literal float.
    Float(f64),
    /// The literal `None` value.
    None,
    /// A string literal without interpolation.
    String(String),
    /// A string literal with interpolation.
    CompoundString(Vec<TypedExpr>),
    /// A name reference.
    Ident(String),
    /// An array literal.
    Array(Vec<TypedExpr>),
    /// A map literal.
    Map(Vec<(TypedExpr, TypedExpr)>),
    /// An `object { … }` literal.
    Object(Vec<(String, TypedExpr)>),
    /// A struct literal.
    Struct {
        /// The struct type name.
        name: String,
        /// The literal members.
        members: Vec<(String, TypedExpr)>,
    },
    /// A pair literal.
    Pair(Box<TypedExpr>, Box<TypedExpr>),
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<TypedExpr>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        lhs: Box<TypedExpr>,
        /// The right operand.
        rhs: Box<TypedExpr>,
    },
    /// An `if … then … else …` expression.
    IfThenElse {
        /// The condition expression.
        condition: Box<TypedExpr>,
        /// The expression evaluated when the condition holds.
        true_expr: Box<TypedExpr>,
        /// The expression evaluated when the condition does not hold.
        false_expr: Box<TypedExpr>,
    },
    /// A call to a standard library function.
    Apply {
        /// The name of the called function.
        target: String,
        /// The resolved prototype of the call.
        signature: FunctionSignature,
        /// The call arguments.
        arguments: Vec<TypedExpr>,
    },
    /// An index operation.
    At {
        /// The indexed expression.
        target: Box<TypedExpr>,
        /// The index expression.
        index: Box<TypedExpr>,
    },
    /// A member access.
    GetName {
        /// The accessed expression.
        target: Box<TypedExpr>,
        /// The accessed member name.
        member: String,
    },
    /// A placeholder with `true=`/`false=` options.
    PlaceholderEqual {
        /// The string substituted when the condition holds.
        true_expr: Box<TypedExpr>,
        /// The string substituted when the condition does not hold.
        false_expr: Box<TypedExpr>,
        /// The condition expression.
        condition: Box<TypedExpr>,
    },
    /// A placeholder with a `default=` option.
    PlaceholderDefault {
        /// The default expression.
        default: Box<TypedExpr>,
        /// The value expression.
        value: Box<TypedExpr>,
    },
    /// A placeholder with a `sep=` option.
    PlaceholderSep {
        /// The separator expression.
        separator: Box<TypedExpr>,
        /// The array expression.
        array: Box<TypedExpr>,
    },
    /// An implicit coercion elaborated during inference.
    ///
    /// The coercion target is the node's type.
    Coerce {
        /// The coerced expression.
        expr: Box<TypedExpr>,
    },
}

/// A typed declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDeclaration {
    /// The declared name.
    pub name: String,
    /// The declared type.
    pub ty: Type,
    /// The declaration value, if bound.
    pub expr: Option<TypedExpr>,
    /// The span of the declaration.
    pub span: Span,
}

/// A typed part of a command section.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedCommandPart {
    /// A literal text fragment.
    Text(String),
    /// An interpolated expression.
    Expr(TypedExpr),
}

/// A typed task.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedTask {
    /// The task name.
    pub name: String,
    /// The task inputs.
    pub inputs: Vec<TypedDeclaration>,
    /// The private declarations of the task.
    pub declarations: Vec<TypedDeclaration>,
    /// The parts of the command section.
    pub command: Vec<TypedCommandPart>,
    /// The task outputs.
    pub outputs: Vec<TypedDeclaration>,
    /// The `runtime` section items.
    pub runtime: Vec<(String, TypedExpr)>,
    /// The `hints` section items.
    pub hints: Vec<(String, TypedExpr)>,
    /// The `meta` section items.
    pub meta: Vec<(String, MetaValue)>,
    /// The `parameter_meta` section items.
    pub parameter_meta: Vec<(String, MetaValue)>,
    /// The span of the task.
    pub span: Span,
}

/// A typed call statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCall {
    /// The name of the call within its scope.
    pub name: String,
    /// The dotted target of the call as written.
    pub target: String,
    /// The supplied inputs.
    pub inputs: Vec<(String, Option<TypedExpr>)>,
    /// The type of the call's outputs.
    pub ty: Arc<CallType>,
    /// The span of the statement.
    pub span: Span,
}

/// A typed scatter statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedScatter {
    /// The iteration variable.
    pub variable: String,
    /// The type of the iteration variable.
    pub variable_ty: Type,
    /// The collection expression.
    pub expr: TypedExpr,
    /// The statements of the body.
    pub body: Vec<TypedWorkflowElement>,
    /// The span of the statement.
    pub span: Span,
}

/// A typed conditional statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedConditional {
    /// The condition expression.
    pub expr: TypedExpr,
    /// The statements of the body.
    pub body: Vec<TypedWorkflowElement>,
    /// The span of the statement.
    pub span: Span,
}

/// A typed element of a workflow body.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedWorkflowElement {
    /// A declaration.
    Decl(TypedDeclaration),
    /// A call statement.
    Call(TypedCall),
    /// A scatter statement.
    Scatter(TypedScatter),
    /// A conditional statement.
    Conditional(TypedConditional),
}

/// A typed workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedWorkflow {
    /// The workflow name.
    pub name: String,
    /// The workflow inputs.
    pub inputs: Vec<TypedDeclaration>,
    /// The body of the workflow.
    pub body: Vec<TypedWorkflowElement>,
    /// The workflow outputs.
    pub outputs: Vec<TypedDeclaration>,
    /// The `meta` section items.
    pub meta: Vec<(String, MetaValue)>,
    /// The `parameter_meta` section items.
    pub parameter_meta: Vec<(String, MetaValue)>,
    /// The span of the workflow.
    pub span: Span,
}

/// A typed document.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDocument {
    /// The language version of the document.
    pub version: SupportedVersion,
    /// The struct types of the document, in definition order.
    pub structs: IndexMap<String, Arc<StructType>>,
    /// The typed tasks of the document, in source order.
    pub tasks: Vec<TypedTask>,
    /// The typed workflow of the document, if present.
    pub workflow: Option<TypedWorkflow>,
}
