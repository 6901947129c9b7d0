//! Expression evaluation engine for Workflow Description Language (WDL)
//! documents.
//!
//! The engine evaluates the typed AST produced by `wdl-analysis`: it
//! computes runtime [`Value`]s for expressions and declarations and
//! materializes command sections into their final shell strings. It does
//! not execute commands or orchestrate calls; those are the concern of an
//! external executor, which consumes the materialized command and the
//! JSON-serialized form of values.
//!
//! Evaluation is synchronous and deterministic for pure expressions. The
//! I/O-bearing standard library functions go through an injected
//! [`FileSource`].

mod command;
pub mod diagnostics;
mod eval;
mod io;
pub mod stdlib;
mod value;

pub use command::strip_leading_whitespace;
pub use eval::Bindings;
pub use eval::BindingsContext;
pub use eval::EvaluatedTask;
pub use eval::EvaluationContext;
pub use eval::ExprEvaluator;
pub use eval::TaskEvaluator;
pub use eval::apply_command;
pub use eval::apply_declarations;
pub use eval::apply_workflow_body;
pub use io::FileSource;
pub use io::LocalFileSource;
pub use value::CallValue;
pub use value::Coercible;
pub use value::CompoundValue;
pub use value::Map;
pub use value::Object;
pub use value::Pair;
pub use value::PrimitiveValue;
pub use value::Struct;
pub use value::Value;
pub use wdl_ast::Diagnostic;

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use wdl_analysis::CheckOptions;
    use wdl_analysis::NoSourceReader;
    use wdl_analysis::analyze;
    use wdl_ast::Source;

    use super::*;

    /// Analyzes a document, panicking on any diagnostic.
    fn analyze_ok(source: &str) -> std::sync::Arc<wdl_analysis::Document> {
        let result = analyze(
            &Source::unnamed(source),
            &NoSourceReader,
            CheckOptions::default(),
        )
        .expect("analysis should not fail");
        assert!(
            result.diagnostics.is_empty(),
            "unexpected diagnostics: {message}",
            message = result
                .diagnostics
                .first()
                .map(|d| d.message().to_string())
                .unwrap_or_default()
        );
        result.document
    }

    /// A file source for pure evaluation tests.
    fn file_source() -> LocalFileSource {
        LocalFileSource::new(".", std::env::temp_dir())
    }

    #[test]
    fn declarations_thread_left_to_right() {
        // `Float y = x` evaluates against the binding produced by `Int x`.
        let document = analyze_ok(
            "version 1.0\ntask t {\n    Int x = 3\n    Float y = x\n    command {}\n}",
        );
        let task = &document.typed.tasks[0];
        let fs = file_source();
        let bindings = apply_declarations(&task.declarations, Bindings::new(), &fs)
            .expect("evaluation should succeed");
        assert_eq!(bindings.get("x"), Some(&Value::from(3)));
        assert_eq!(bindings.get("y"), Some(&Value::from(3.0)));
    }

    #[test]
    fn division_by_zero_is_an_evaluation_error() {
        // Inference accepts the expression; evaluation reports the error.
        let document = analyze_ok(
            "version 1.0\ntask t {\n    Int z = 10 / 0\n    command {}\n}",
        );
        let task = &document.typed.tasks[0];
        let fs = file_source();
        let e = apply_declarations(&task.declarations, Bindings::new(), &fs)
            .expect_err("evaluation should fail");
        assert_eq!(e.message(), "attempt to divide by zero");
    }

    #[test]
    fn scatter_bodies_evaluate_per_element() {
        let document = analyze_ok(
            "version 1.0\nworkflow w {\n    scatter (i in [1, 2, 3]) {\n        Int y = i + 1\n    }\n}",
        );
        let workflow = document.typed.workflow.as_ref().unwrap();
        let fs = file_source();
        let bindings = apply_workflow_body(&workflow.body, Bindings::new(), &fs)
            .expect("evaluation should succeed");
        assert_eq!(
            bindings.get("y"),
            Some(&Value::new_array(vec![2.into(), 3.into(), 4.into()]))
        );
        // The iteration variable is not exported.
        assert_eq!(bindings.get("i"), None);
    }

    #[test]
    fn conditional_bodies_bind_none_when_not_taken() {
        let source = "version 1.0\nworkflow w {\n    Boolean b = false\n    if (b) {\n        Int x = 1\n    }\n}";
        let document = analyze_ok(source);
        let workflow = document.typed.workflow.as_ref().unwrap();
        let fs = file_source();
        let bindings = apply_workflow_body(&workflow.body, Bindings::new(), &fs)
            .expect("evaluation should succeed");
        assert_eq!(bindings.get("x"), Some(&Value::None));
    }

    #[test]
    fn commands_materialize_with_placeholders_and_dedent() {
        let document = analyze_ok(
            "version 1.0\ntask t {\n    input {\n        Array[Int] a\n    }\n    \
             command <<<\n        echo ~{sep=\", \" a}\n    >>>\n}",
        );
        let task = &document.typed.tasks[0];
        let fs = file_source();
        let mut inputs = Bindings::new();
        inputs
            .bind(
                "a",
                Value::new_array(vec![1.into(), 2.into(), 3.into()]),
            )
            .unwrap();
        let evaluated = TaskEvaluator::new(&fs)
            .evaluate(task, inputs)
            .expect("evaluation should succeed");
        assert_eq!(evaluated.command, "echo 1, 2, 3");
    }

    #[test]
    fn struct_values_evaluate_and_access() {
        let document = analyze_ok(
            "version 1.0\nstruct P {\n    Int a\n}\ntask t {\n    P p = object { a: 7 }\n    Int q = p.a\n    command {}\n}",
        );
        let task = &document.typed.tasks[0];
        let fs = file_source();
        let bindings = apply_declarations(&task.declarations, Bindings::new(), &fs)
            .expect("evaluation should succeed");
        assert_eq!(bindings.get("q"), Some(&Value::from(7)));
    }

    #[test]
    fn pure_evaluation_is_deterministic() {
        let document = analyze_ok(
            "version 1.0\ntask t {\n    Float x = (1 + 2) * 3.5 / 2\n    String s = \"a\" + x\n    command {}\n}",
        );
        let task = &document.typed.tasks[0];
        let fs = file_source();
        let first = apply_declarations(&task.declarations, Bindings::new(), &fs).unwrap();
        let second = apply_declarations(&task.declarations, Bindings::new(), &fs).unwrap();
        assert_eq!(first, second);
    }
}
