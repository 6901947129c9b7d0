//! Analysis of Workflow Description Language (WDL) documents.
//!
//! Analysis parses a document, resolves its imports, and type checks it,
//! producing an analyzed [`Document`]: the typed AST plus the symbol tables
//! (structs and task/workflow inputs and outputs) that consumers such as the
//! evaluation engine work from.
//!
//! Type errors accumulate: inference continues past an error by annotating
//! the offending node as `Any`, so a single pass surfaces as many
//! diagnostics as possible. Only structural failures (syntax errors,
//! unresolvable imports, unresolvable structs) abort analysis.
//!
//! # Examples
//!
//! ```rust
//! use wdl_analysis::CheckOptions;
//! use wdl_analysis::NoSourceReader;
//! use wdl_analysis::Source;
//! use wdl_analysis::analyze;
//!
//! let source = Source::unnamed("version 1.0\nworkflow test {\n    Int x = 1\n}");
//! let result = analyze(&source, &NoSourceReader, CheckOptions::default())
//!     .expect("analysis should succeed");
//! assert!(result.diagnostics.is_empty());
//! ```

pub mod diagnostics;
mod document;
mod imports;
mod infer;
mod scope;
pub mod stdlib;
pub mod typed;
pub mod types;

pub use document::AnalysisResult;
pub use document::Callable;
pub use document::Document;
pub use document::Failure;
pub use document::Input;
pub use document::analyze;
pub use imports::LocalSourceReader;
pub use imports::NoSourceReader;
pub use imports::SourceReader;
pub use wdl_ast::Diagnostic;
pub use wdl_ast::Severity;
pub use wdl_ast::Source;
pub use wdl_ast::Span;
pub use wdl_ast::SupportedVersion;

/// Type checks a standalone expression against an environment of bound
/// names.
///
/// Returns the typed expression, or the accumulated diagnostics if any are
/// errors. Struct types are not available to standalone expressions.
pub fn check_expr(
    source: &Source,
    version: SupportedVersion,
    env: &[(String, types::Type)],
) -> Result<typed::TypedExpr, Vec<Diagnostic>> {
    let expr = wdl_ast::Expr::parse(source, version).map_err(|e| vec![e])?;
    let mut diagnostics = Vec::new();
    let structs = indexmap::IndexMap::new();
    let typed = infer::check_standalone_expr(&expr, version, &structs, env, &mut diagnostics);
    if diagnostics.iter().any(Diagnostic::is_error) {
        return Err(diagnostics);
    }
    Ok(typed)
}

/// Options controlling type checking.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Reject bindings that would have an optional of an optional type.
    ///
    /// By default, double optionals flatten on construction; enabling this
    /// reports a type error instead.
    pub reject_double_optional: bool,
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::PrimitiveType;
    use crate::types::Type;

    /// Analyzes a document, panicking on fatal errors.
    fn check(source: &str) -> AnalysisResult {
        analyze(
            &Source::unnamed(source),
            &NoSourceReader,
            CheckOptions::default(),
        )
        .expect("analysis should not fail")
    }

    /// Analyzes a document and returns its error messages.
    fn check_errors(source: &str) -> Vec<String> {
        let result = check(source);
        result
            .diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.message().to_string())
            .collect()
    }

    #[test]
    fn declaration_coercion() {
        // Int coerces to Float across a declaration boundary.
        let result = check(
            "version 1.0\nworkflow w {\n    Int x = 3\n    Float y = x\n}",
        );
        assert!(result.diagnostics.is_empty());
        let workflow = result.document.typed.workflow.as_ref().unwrap();
        match &workflow.body[1] {
            crate::typed::TypedWorkflowElement::Decl(d) => {
                assert_eq!(d.ty, Type::from(PrimitiveType::Float));
                // The implicit coercion is elaborated as a `Coerce` node.
                let expr = d.expr.as_ref().unwrap();
                assert!(matches!(
                    expr.kind,
                    crate::typed::TypedExprKind::Coerce { .. }
                ));
                assert_eq!(expr.ty, Type::from(PrimitiveType::Float));
            }
            _ => panic!("expected a declaration"),
        }
    }

    #[test]
    fn scatter_bindings_promote_to_arrays() {
        let result = check(
            "version 1.0\nworkflow w {\n    scatter (i in [1, 2, 3]) {\n        Int y = i + 1\n    }\n    Array[Int] z = y\n}",
        );
        assert!(result.diagnostics.is_empty());
        let workflow = result.document.typed.workflow.as_ref().unwrap();
        match &workflow.body[1] {
            crate::typed::TypedWorkflowElement::Decl(d) => {
                // The literal collection is non-empty, so the promoted
                // binding is a non-empty array coerced to `Array[Int]`.
                let expr = d.expr.as_ref().unwrap();
                match &expr.kind {
                    crate::typed::TypedExprKind::Coerce { expr } => {
                        assert_eq!(
                            expr.ty,
                            Type::non_empty_array(PrimitiveType::Integer.into())
                        );
                    }
                    _ => panic!("expected a coercion"),
                }
            }
            _ => panic!("expected a declaration"),
        }
    }

    #[test]
    fn conditional_bindings_promote_to_optionals() {
        let result = check(
            "version 1.0\nworkflow w {\n    Boolean b = true\n    if (b) {\n        Int x = 1\n    }\n    Int? y = x\n}",
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn nested_scatter_and_conditional_compose() {
        let result = check(
            "version 1.0\nworkflow w {\n    scatter (i in [1, 2]) {\n        if (i > 1) {\n            Int x = i\n        }\n    }\n    Array[Int?] y = x\n}",
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn scatter_iterator_is_not_exported() {
        let errors = check_errors(
            "version 1.0\nworkflow w {\n    scatter (i in [1]) {\n        Int x = i\n    }\n    Array[Int] y = i\n}",
        );
        assert_eq!(errors, ["unknown name `i`"]);
    }

    #[test]
    fn shadowing_is_rejected() {
        let errors = check_errors(
            "version 1.0\nworkflow w {\n    Int x = 1\n    scatter (i in [1]) {\n        Int x = 2\n    }\n}",
        );
        assert_eq!(
            errors,
            ["name `x` shadows a name visible in an enclosing scope"]
        );
    }

    #[test]
    fn struct_member_access() {
        let result = check(
            "version 1.0\nstruct P {\n    Int a\n}\nworkflow w {\n    P p = object { a: 7 }\n    Int q = p.a\n}",
        );
        assert!(result.diagnostics.is_empty());

        let errors = check_errors(
            "version 1.0\nstruct P {\n    Int a\n}\nworkflow w {\n    P p = object { a: 7 }\n    Int q = p.b\n}",
        );
        assert_eq!(errors, ["struct `P` does not have a member named `b`"]);
    }

    #[test]
    fn errors_accumulate_in_one_pass() {
        let errors = check_errors(
            "version 1.0\nworkflow w {\n    Int x = \"not an int\"\n    Boolean b = y\n    Int z = 1 && 2\n}",
        );
        // One for the bad declaration, one for the unknown name, two for the
        // non-Boolean `&&` operands, and one for binding `1 && 2` to `Int`.
        assert_eq!(errors.len(), 5);
        assert!(errors[0].contains("type mismatch"));
        assert_eq!(errors[1], "unknown name `y`");
    }

    #[test]
    fn calls_check_their_inputs() {
        let source = "version 1.0\n\
                      task t {\n    input {\n        Int n\n        String s = \"x\"\n    }\n    command {}\n    output {\n        Int out = n\n    }\n}\n\
                      workflow w {\n    call t { input: n = 1 }\n    Int x = t.out\n}";
        let result = check(source);
        assert!(result.diagnostics.is_empty());

        let errors = check_errors(
            "version 1.0\n\
             task t {\n    input {\n        Int n\n    }\n    command {}\n}\n\
             workflow w {\n    call t\n}",
        );
        assert_eq!(errors, ["missing required input `n` in call to `t`"]);
    }

    #[test]
    fn double_optionals_flatten_by_default() {
        let source = "version 1.0\nworkflow w {\n    Boolean b = true\n    if (b) {\n        Int? x = 1\n    }\n    Int? y = x\n}";
        let result = check(source);
        assert!(result.diagnostics.is_empty());

        let result = analyze(
            &Source::unnamed(source),
            &NoSourceReader,
            CheckOptions {
                reject_double_optional: true,
            },
        )
        .expect("analysis should not fail");
        assert_eq!(
            result.diagnostics[0].message(),
            "binding `x` would be an optional of an optional type"
        );
    }
}
