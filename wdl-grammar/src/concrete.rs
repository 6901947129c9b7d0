//! Concrete syntax tree nodes shared between language versions.
//!
//! Each supported version defines its own document type in the
//! [`grammar`](crate::grammar) module; productions common to every version
//! produce the nodes defined here. Every node carries the span of the source
//! text it was parsed from.

use crate::Span;

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

/// A type as written in source.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// The `Boolean` type.
    Boolean {
        /// The span of the type.
        span: Span,
    },
    /// The `Int` type.
    Int {
        /// The span of the type.
        span: Span,
    },
    /// The `Float` type.
    Float {
        /// The span of the type.
        span: Span,
    },
    /// The `String` type.
    String {
        /// The span of the type.
        span: Span,
    },
    /// The `File` type.
    File {
        /// The span of the type.
        span: Span,
    },
    /// The `Directory` type.
    Directory {
        /// The span of the type.
        span: Span,
    },
    /// The `Object` type.
    Object {
        /// The span of the type.
        span: Span,
    },
    /// A reference to a struct type by name.
    Named {
        /// The name of the referenced type.
        name: Ident,
    },
    /// An `Array[T]` type.
    Array {
        /// The element type.
        element: Box<Type>,
        /// Whether the array was marked non-empty (`+`).
        non_empty: bool,
        /// The span of the type.
        span: Span,
    },
    /// A `Map[K, V]` type.
    Map {
        /// The key type.
        key: Box<Type>,
        /// The value type.
        value: Box<Type>,
        /// The span of the type.
        span: Span,
    },
    /// A `Pair[L, R]` type.
    Pair {
        /// The left type.
        left: Box<Type>,
        /// The right type.
        right: Box<Type>,
        /// The span of the type.
        span: Span,
    },
    /// An optional type (`T?`).
    Optional {
        /// The inner type.
        inner: Box<Type>,
        /// The span of the type.
        span: Span,
    },
}

impl Type {
    /// Gets the span of the type.
    pub fn span(&self) -> Span {
        match self {
            Self::Boolean { span }
            | Self::Int { span }
            | Self::Float { span }
            | Self::String { span }
            | Self::File { span }
            | Self::Directory { span }
            | Self::Object { span }
            | Self::Array { span, .. }
            | Self::Map { span, .. }
            | Self::Pair { span, .. }
            | Self::Optional { span, .. } => *span,
            Self::Named { name } => name.span,
        }
    }
}

/// A declaration without a value (`Int x`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnboundDecl {
    /// The declared type.
    pub ty: Type,
    /// The declared name.
    pub name: Ident,
    /// The span of the declaration.
    pub span: Span,
}

/// A declaration with a value (`Int x = 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundDecl {
    /// The declared type.
    pub ty: Type,
    /// The declared name.
    pub name: Ident,
    /// The declaration value.
    pub expr: Expr,
    /// The span of the declaration.
    pub span: Span,
}

/// A bound or unbound declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// The declaration is bound.
    Bound(BoundDecl),
    /// The declaration is unbound.
    Unbound(UnboundDecl),
}

impl Declaration {
    /// Gets the name of the declaration.
    pub fn name(&self) -> &Ident {
        match self {
            Self::Bound(d) => &d.name,
            Self::Unbound(d) => &d.name,
        }
    }

    /// Gets the span of the declaration.
    pub fn span(&self) -> Span {
        match self {
            Self::Bound(d) => d.span,
            Self::Unbound(d) => d.span,
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric negation (`-`).
    Negation,
    /// Logical not (`!`).
    LogicalNot,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Logical or (`||`).
    LogicalOr,
    /// Logical and (`&&`).
    LogicalAnd,
    /// Equality (`==`).
    Equality,
    /// Inequality (`!=`).
    Inequality,
    /// Less than (`<`).
    Less,
    /// Less than or equal (`<=`).
    LessEqual,
    /// Greater than (`>`).
    Greater,
    /// Greater than or equal (`>=`).
    GreaterEqual,
    /// Addition (`+`).
    Addition,
    /// Subtraction (`-`).
    Subtraction,
    /// Multiplication (`*`).
    Multiplication,
    /// Division (`/`).
    Division,
    /// Modulo (`%`).
    Modulo,
}

/// A member of an `object` or struct literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMember {
    /// The member name.
    pub name: Ident,
    /// The member value.
    pub value: Expr,
}

/// An expression with its span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// The span of the expression.
    pub span: Span,
}

/// The kind of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal boolean.
    Boolean(bool),
    /// A literal integer.
    Integer(i64),
    /// A literal float.
    Float(f64),
    /// The literal `None` value.
    None,
    /// The literal `null` value.
    ///
    /// Only valid inside metadata sections; lowering rejects it elsewhere.
    Null,
    /// A string literal.
    String(StringLiteral),
    /// A name reference.
    Ident(String),
    /// An array literal.
    Array(Vec<Expr>),
    /// A map literal.
    Map(Vec<(Expr, Expr)>),
    /// An `object { … }` literal.
    Object(Vec<ObjectMember>),
    /// A struct literal (`Name { … }`).
    Struct {
        /// The struct type name.
        name: Ident,
        /// The literal members.
        members: Vec<ObjectMember>,
    },
    /// A pair literal (`(a, b)`).
    Pair(Box<Expr>, Box<Expr>),
    /// A parenthesized expression.
    Group(Box<Expr>),
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        lhs: Box<Expr>,
        /// The right operand.
        rhs: Box<Expr>,
    },
    /// An `if … then … else …` expression.
    IfThenElse {
        /// The condition expression.
        condition: Box<Expr>,
        /// The expression evaluated when the condition holds.
        true_expr: Box<Expr>,
        /// The expression evaluated when the condition does not hold.
        false_expr: Box<Expr>,
    },
    /// A call to a standard library function.
    Apply {
        /// The called function.
        target: Ident,
        /// The call arguments.
        arguments: Vec<Expr>,
    },
    /// An index operation (`a[i]`).
    Index {
        /// The indexed expression.
        target: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// A member access (`a.b`).
    Access {
        /// The accessed expression.
        target: Box<Expr>,
        /// The accessed member name.
        member: Ident,
    },
}

/// A string literal, parsed into text and placeholder parts.
///
/// A literal without interpolation has a single text part.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// The ordered parts of the literal.
    pub parts: Vec<StringPart>,
    /// The span of the literal, including the quotes.
    pub span: Span,
}

impl StringLiteral {
    /// Gets the literal text if the string contains no placeholders.
    pub fn as_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [] => Some(""),
            [StringPart::Text { value, .. }] => Some(value),
            _ => None,
        }
    }
}

/// A part of a string literal or command section.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    /// A literal text fragment.
    Text {
        /// The text of the fragment, with escapes resolved.
        value: String,
        /// The span of the fragment.
        span: Span,
    },
    /// An embedded placeholder.
    Placeholder(Placeholder),
}

/// A placeholder embedded in a string literal or command section.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// The placeholder options, in source order.
    pub options: Vec<PlaceholderOption>,
    /// The placeholder expression.
    pub expr: Expr,
    /// The span of the placeholder.
    pub span: Span,
}

/// An option of a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderOption {
    /// The `sep=` option.
    Sep {
        /// The separator string.
        value: StringLiteral,
        /// The span of the option.
        span: Span,
    },
    /// The `default=` option.
    Default {
        /// The default expression.
        value: Expr,
        /// The span of the option.
        span: Span,
    },
    /// The `true=` option.
    True {
        /// The substituted string.
        value: StringLiteral,
        /// The span of the option.
        span: Span,
    },
    /// The `false=` option.
    False {
        /// The substituted string.
        value: StringLiteral,
        /// The span of the option.
        span: Span,
    },
}

/// A command section.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSection {
    /// The ordered parts of the command.
    pub parts: Vec<StringPart>,
    /// Whether the section used heredoc (`<<< … >>>`) delimiters.
    pub heredoc: bool,
    /// The span of the section.
    pub span: Span,
}

/// An `input` section.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSection {
    /// The declarations of the section.
    pub declarations: Vec<Declaration>,
    /// The span of the section.
    pub span: Span,
}

/// An `output` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSection {
    /// The declarations of the section.
    pub declarations: Vec<BoundDecl>,
    /// The span of the section.
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

/// A `runtime` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSection {
    /// The items of the section.
    pub items: Vec<RuntimeItem>,
    /// The span of the section.
    pub span: Span,
}

/// A `hints` section.
#[derive(Debug, Clone, PartialEq)]
pub struct HintsSection {
    /// The items of the section.
    pub items: Vec<RuntimeItem>,
    /// The span of the section.
    pub span: Span,
}

/// A single `name: value` item of a metadata section.
///
/// The value is parsed with the expression grammar; lowering to the AST
/// restricts it to metadata values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataItem {
    /// The item name.
    pub name: Ident,
    /// The item value.
    pub value: Expr,
}

/// A `meta` or `parameter_meta` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataSection {
    /// The items of the section.
    pub items: Vec<MetadataItem>,
    /// The span of the section.
    pub span: Span,
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    /// The struct name.
    pub name: Ident,
    /// The struct members, in source order.
    pub members: Vec<UnboundDecl>,
    /// The span of the definition.
    pub span: Span,
}

/// A struct alias of an import statement (`alias A as B`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportAlias {
    /// The name of the struct in the imported document.
    pub source: Ident,
    /// The name of the struct in the importing document.
    pub target: Ident,
}

/// An import statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    /// The import URI.
    pub uri: StringLiteral,
    /// The optional `as` namespace.
    pub namespace: Option<Ident>,
    /// The struct aliases of the import.
    pub aliases: Vec<ImportAlias>,
    /// The span of the statement.
    pub span: Span,
}

/// A `version` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionStatement {
    /// The version text as written.
    pub version: String,
    /// The span of the statement.
    pub span: Span,
}

/// A task definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// The task name.
    pub name: Ident,
    /// The `input` section, if present.
    ///
    /// Always absent for `draft-2` documents.
    pub input: Option<InputSection>,
    /// The private declarations of the task.
    ///
    /// For `draft-2` documents this also carries the section-less inputs.
    pub declarations: Vec<Declaration>,
    /// The command section.
    pub command: CommandSection,
    /// The `output` section, if present.
    pub output: Option<OutputSection>,
    /// The `runtime` section, if present.
    pub runtime: Option<RuntimeSection>,
    /// The `hints` section, if present.
    ///
    /// Only present for 2.0 documents.
    pub hints: Option<HintsSection>,
    /// The `meta` section, if present.
    pub meta: Option<MetadataSection>,
    /// The `parameter_meta` section, if present.
    pub parameter_meta: Option<MetadataSection>,
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
    /// `None` denotes the `name`-only shorthand, which supplies the value of
    /// the identically named binding in scope.
    pub expr: Option<Expr>,
}

/// A call statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    /// The dotted target of the call.
    pub target: Vec<Ident>,
    /// The optional `as` alias.
    pub alias: Option<Ident>,
    /// The supplied inputs.
    pub inputs: Vec<CallInput>,
    /// The span of the statement.
    pub span: Span,
}

/// A scatter statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterStatement {
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
pub struct ConditionalStatement {
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
    Call(CallStatement),
    /// A scatter statement.
    Scatter(ScatterStatement),
    /// A conditional statement.
    Conditional(ConditionalStatement),
}

/// A workflow definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    /// The workflow name.
    pub name: Ident,
    /// The `input` section, if present.
    ///
    /// Always absent for `draft-2` documents.
    pub input: Option<InputSection>,
    /// The body of the workflow.
    pub body: Vec<WorkflowElement>,
    /// The `output` section, if present.
    pub output: Option<OutputSection>,
    /// The `meta` section, if present.
    pub meta: Option<MetadataSection>,
    /// The `parameter_meta` section, if present.
    pub parameter_meta: Option<MetadataSection>,
    /// The span of the workflow.
    pub span: Span,
}
