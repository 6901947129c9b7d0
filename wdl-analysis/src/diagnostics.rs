//! Creation of type checking diagnostics.

use wdl_ast::BinaryOp;
use wdl_ast::Diagnostic;
use wdl_ast::Span;

use crate::types::Type;

/// Creates an "unknown type name" diagnostic.
pub fn unknown_type(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("unknown type name `{name}`"))
}

/// Creates a "recursive struct" diagnostic.
pub fn recursive_struct(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("struct `{name}` is recursively defined"))
}

/// Creates a "name already defined" diagnostic.
pub fn name_already_defined(name: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::error(span, format!("name `{name}` is already defined"))
        .note(first, "first defined here")
}

/// Creates a "name shadows an enclosing name" diagnostic.
pub fn name_shadows(name: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("name `{name}` shadows a name visible in an enclosing scope"),
    )
    .note(first, "the shadowed name is defined here")
}

/// Creates an "unknown name" diagnostic.
pub fn unknown_name(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("unknown name `{name}`"))
}

/// Creates a "type mismatch" diagnostic.
pub fn type_mismatch(expected: &Type, actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("type mismatch: expected type `{expected}`, but found type `{actual}`"),
    )
}

/// Creates a "questionable coercion to a path type" diagnostic.
pub fn questionable_path_coercion(target: &Type, span: Span) -> Diagnostic {
    Diagnostic::warning(
        span,
        format!("coercion of a `String` to type `{target}` outside of an output section"),
    )
}

/// Creates a "no common type" diagnostic.
pub fn no_common_type(first: &Type, second: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("types `{first}` and `{second}` have no common type"),
    )
}

/// Creates an "`if` conditional mismatch" diagnostic.
pub fn if_conditional_mismatch(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: expected `if` conditional expression to be type `Boolean`, but \
             found type `{actual}`"
        ),
    )
}

/// Creates a "logical operand mismatch" diagnostic.
pub fn logical_operand_mismatch(op: BinaryOp, actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: operands of `{symbol}` must be type `Boolean`, but found type \
             `{actual}`",
            symbol = op.symbol()
        ),
    )
}

/// Creates a "logical not mismatch" diagnostic.
pub fn logical_not_mismatch(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: expected operand of logical `!` to be type `Boolean`, but found \
             type `{actual}`"
        ),
    )
}

/// Creates a "negation mismatch" diagnostic.
pub fn negation_mismatch(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: expected operand of negation to be type `Int` or `Float`, but \
             found type `{actual}`"
        ),
    )
}

/// Creates a "numeric operand mismatch" diagnostic.
pub fn numeric_mismatch(op: BinaryOp, lhs: &Type, rhs: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: operands of `{symbol}` must be numeric, but found types `{lhs}` \
             and `{rhs}`",
            symbol = op.symbol()
        ),
    )
}

/// Creates a "comparison mismatch" diagnostic.
pub fn comparison_mismatch(op: BinaryOp, lhs: &Type, rhs: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: operands of `{symbol}` cannot be compared, as they are types \
             `{lhs}` and `{rhs}`",
            symbol = op.symbol()
        ),
    )
}

/// Creates a "cannot index" diagnostic.
pub fn cannot_index(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "indexing is only allowed on `Array` and `Map` types, but this is type `{actual}`"
        ),
    )
}

/// Creates an "index type mismatch" diagnostic.
pub fn index_type_mismatch(expected: &Type, actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("type mismatch: expected index to be type `{expected}`, but found type `{actual}`"),
    )
}

/// Creates a "cannot access" diagnostic.
pub fn cannot_access(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "member access is only allowed on structs, objects, pairs, and calls, but this is \
             type `{actual}`"
        ),
    )
}

/// Creates a "not a pair accessor" diagnostic.
pub fn not_a_pair_accessor(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("a pair only has the members `left` and `right`, not `{name}`"),
    )
}

/// Creates a "not a struct member" diagnostic.
pub fn not_a_struct_member(struct_name: &str, member: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("struct `{struct_name}` does not have a member named `{member}`"),
    )
}

/// Creates a "missing struct members" diagnostic.
pub fn missing_struct_members(struct_name: &str, missing: &[&str], span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "struct literal of `{struct_name}` is missing required members {missing}",
            missing = missing
                .iter()
                .map(|m| format!("`{m}`"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    )
}

/// Creates an "unknown function" diagnostic.
pub fn unknown_function(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("unknown standard library function `{name}`"))
}

/// Creates a "too few arguments" diagnostic.
pub fn too_few_arguments(name: &str, span: Span, minimum: usize, count: usize) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "function `{name}` requires at least {minimum} argument{s}, but {count} were \
             supplied",
            s = if minimum == 1 { "" } else { "s" },
        ),
    )
}

/// Creates a "too many arguments" diagnostic.
pub fn too_many_arguments(name: &str, span: Span, maximum: usize, count: usize) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "function `{name}` accepts at most {maximum} argument{s}, but {count} were supplied",
            s = if maximum == 1 { "" } else { "s" },
        ),
    )
}

/// Creates an "argument type mismatch" diagnostic.
pub fn argument_type_mismatch(
    name: &str,
    expected: &str,
    actual: &Type,
    span: Span,
) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: argument to function `{name}` expects type `{expected}`, but found \
             type `{actual}`"
        ),
    )
}

/// Creates an "ambiguous call" diagnostic.
pub fn ambiguous_argument(name: &str, span: Span, first: &str, second: &str) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "call to function `{name}` is ambiguous between signatures `{first}` and `{second}`"
        ),
    )
}

/// Creates an "unknown call target" diagnostic.
pub fn unknown_call_target(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("unknown task or workflow `{name}`"))
}

/// Creates an "unknown namespace" diagnostic.
pub fn unknown_namespace(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("unknown import namespace `{name}`"))
}

/// Creates an "unknown call input or output" diagnostic.
pub fn unknown_call_io(target: &str, name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("`{target}` does not have an input or output named `{name}`"),
    )
}

/// Creates a "missing call input" diagnostic.
pub fn missing_call_input(target: &str, input: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("missing required input `{input}` in call to `{target}`"),
    )
}

/// Creates a "not an array" diagnostic for scatter collections.
pub fn not_an_array(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "type mismatch: expected scatter collection to be an `Array`, but found type \
             `{actual}`"
        ),
    )
}

/// Creates a "cannot coerce to `String`" diagnostic.
pub fn cannot_coerce_to_string(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("cannot coerce type `{actual}` to `String`"))
}

/// Creates a "placeholder `default` requires an optional value" diagnostic.
pub fn default_option_mismatch(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!(
            "placeholder option `default` requires an optional value, but found type `{actual}`"
        ),
    )
}

/// Creates a "placeholder `sep` requires an array" diagnostic.
pub fn sep_option_mismatch(actual: &Type, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("placeholder option `sep` requires an array value, but found type `{actual}`"),
    )
}

/// Creates a "double optional" diagnostic.
pub fn double_optional(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("binding `{name}` would be an optional of an optional type"),
    )
}

/// Creates a "struct definition conflict" diagnostic.
pub fn struct_conflict(name: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::error(span, format!("conflicting definitions for struct `{name}`"))
        .note(first, "first defined here")
}

/// Creates an "import cycle" diagnostic.
pub fn import_cycle(uri: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("import of `{uri}` forms a cycle"))
}

/// Creates an "import failure" diagnostic.
pub fn import_failure(uri: &str, error: &anyhow::Error, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("failed to import `{uri}`: {error:#}"))
}

/// Creates an "imported document is invalid" diagnostic.
pub fn invalid_import(uri: &str, span: Span) -> Diagnostic {
    Diagnostic::error(span, format!("imported document `{uri}` contains errors"))
}

/// Creates an internal error diagnostic.
///
/// Used when inference encounters an AST node that lowering should have
/// rejected; always indicates a bug rather than a user error.
pub fn internal_error(description: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        format!("internal error: unexpected {description}; this is a bug"),
    )
}
