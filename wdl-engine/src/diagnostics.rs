//! Creation of evaluation diagnostics.

use wdl_analysis::types::Type;
use wdl_ast::Diagnostic;
use wdl_ast::Span;

/// Creates a "division by zero" diagnostic.
pub fn division_by_zero(span: Span, divisor_span: Span) -> Diagnostic {
    Diagnostic::error(span, "attempt to divide by zero")
        .note(divisor_span, "this expression evaluated to zero")
}

/// Creates a "numeric overflow" diagnostic.
pub fn numeric_overflow(span: Span) -> Diagnostic {
    Diagnostic::error(span, "evaluation of arithmetic expression resulted in overflow")
}

/// Creates an "integer negation not in range" diagnostic.
pub fn integer_negation_not_in_range(value: i64, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "negation of integer value {value} exceeds the range for a 64-bit signed integer \
             ({min}..={max})",
            min = i64::MIN,
            max = i64::MAX,
        ),
    )
}

/// Creates an "index out of bounds" diagnostic.
pub fn index_out_of_bounds(index: i64, len: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("array index {index} is out of bounds for an array of length {len}"),
    )
}

/// Creates a "map key not found" diagnostic.
pub fn map_key_not_found(span: Span) -> Diagnostic {
    Diagnostic::error(span, "the map does not contain an entry for the given key")
}

/// Creates a "missing binding" diagnostic.
pub fn missing_binding(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("no value is bound to the name `{name}`"))
}

/// Creates a "rebinding is forbidden" diagnostic.
pub fn rebinding_forbidden(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("a value is already bound to the name `{name}`"))
}

/// Creates a "missing member" diagnostic.
pub fn missing_member(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("the value does not have a member named `{name}`"))
}

/// Creates a "not a pair accessor" diagnostic.
pub fn not_a_pair_accessor(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("a pair only has the members `left` and `right`, not `{name}`"),
    )
}

/// Creates a "runtime type mismatch" diagnostic.
pub fn runtime_type_mismatch(e: anyhow::Error, target: &Type, span: Span) -> Diagnostic {
    let e = e.context(format!("failed to coerce the value to type `{target}`"));
    Diagnostic::error(span, format!("{e:#}"))
}

/// Creates a "cannot render value" diagnostic.
pub fn cannot_render(ty: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("a value of type `{ty}` cannot be rendered as a string"),
    )
}

/// Creates a "function call failed" diagnostic.
pub fn function_call_failed(name: &str, reason: impl std::fmt::Display, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("call to function `{name}` failed: {reason}"))
}

/// Creates a "cannot evaluate call statement" diagnostic.
pub fn cannot_evaluate_call(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "call `{name}` cannot be evaluated by the expression engine; calls are executed \
             externally"
        ),
    )
}

/// Creates an "invalid regular expression" diagnostic.
pub fn invalid_regex(e: &regex::Error, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("invalid regular expression: {e}"))
}

/// Creates an "internal evaluation error" diagnostic.
///
/// Produced for values or nodes that inference should have made
/// impossible; always indicates a bug rather than a user error.
pub fn internal_error(description: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("internal error: unexpected {description}; this is a bug"),
    )
}
