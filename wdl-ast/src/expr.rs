//! Version-independent expressions.

use wdl_grammar::Span;

use crate::Ident;

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

impl BinaryOp {
    /// Gets the symbol of the operator as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::LogicalOr => "||",
            Self::LogicalAnd => "&&",
            Self::Equality => "==",
            Self::Inequality => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "*",
            Self::Division => "/",
            Self::Modulo => "%",
        }
    }
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
    /// A string literal without interpolation.
    String(String),
    /// A string literal with interpolation.
    ///
    /// The parts are literal [`ExprKind::String`] fragments and placeholder
    /// expressions, in source order.
    CompoundString(Vec<Expr>),
    /// A name reference.
    Ident(String),
    /// An array literal.
    Array(Vec<Expr>),
    /// A map literal.
    Map(Vec<(Expr, Expr)>),
    /// An `object { … }` literal.
    Object(Vec<(Ident, Expr)>),
    /// A struct literal (`Name { … }`).
    Struct {
        /// The struct type name.
        name: Ident,
        /// The literal members.
        members: Vec<(Ident, Expr)>,
    },
    /// A pair literal (`(a, b)`).
    Pair(Box<Expr>, Box<Expr>),
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
    At {
        /// The indexed expression.
        target: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// A member access (`a.b`).
    GetName {
        /// The accessed expression.
        target: Box<Expr>,
        /// The accessed member name.
        member: Ident,
    },
    /// A placeholder with `true=`/`false=` options.
    ///
    /// Evaluates the condition and substitutes the matching string.
    PlaceholderEqual {
        /// The string substituted when the condition holds.
        true_expr: Box<Expr>,
        /// The string substituted when the condition does not hold.
        false_expr: Box<Expr>,
        /// The condition expression.
        condition: Box<Expr>,
    },
    /// A placeholder with a `default=` option.
    ///
    /// Substitutes the default when the value evaluates to `None`.
    PlaceholderDefault {
        /// The default expression.
        default: Box<Expr>,
        /// The value expression.
        value: Box<Expr>,
    },
    /// A placeholder with a `sep=` option.
    ///
    /// Joins the stringified elements of the array with the separator.
    PlaceholderSep {
        /// The separator expression.
        separator: Box<Expr>,
        /// The array expression.
        array: Box<Expr>,
    },
}

impl ExprKind {
    /// Gets a short description of the expression kind for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "literal boolean",
            Self::Integer(_) => "literal integer",
            Self::Float(_) => "literal float",
            Self::None => "literal `None`",
            Self::String(_) => "literal string",
            Self::CompoundString(_) => "interpolated string",
            Self::Ident(_) => "name reference",
            Self::Array(_) => "array literal",
            Self::Map(_) => "map literal",
            Self::Object(_) => "object literal",
            Self::Struct { .. } => "struct literal",
            Self::Pair(..) => "pair literal",
            Self::Unary { .. } => "unary expression",
            Self::Binary { .. } => "binary expression",
            Self::IfThenElse { .. } => "conditional expression",
            Self::Apply { .. } => "function call",
            Self::At { .. } => "index expression",
            Self::GetName { .. } => "member access",
            Self::PlaceholderEqual { .. } => "placeholder",
            Self::PlaceholderDefault { .. } => "placeholder",
            Self::PlaceholderSep { .. } => "placeholder",
        }
    }
}

/// A part of a command section.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandPart {
    /// A literal text fragment.
    Text {
        /// The text of the fragment.
        value: String,
        /// The span of the fragment.
        span: Span,
    },
    /// An interpolated expression.
    Expr(Expr),
}
