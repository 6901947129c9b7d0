//! End-to-end scenarios driving the parser, type checker, and evaluator
//! together.

use pretty_assertions::assert_eq;
use wdl::Source;
use wdl::engine::Bindings;
use wdl::engine::LocalFileSource;
use wdl::engine::TaskEvaluator;
use wdl::engine::Value;
use wdl::engine::apply_declarations;
use wdl::engine::apply_workflow_body;
use wdl::load;

/// Loads a document, panicking on any error.
fn load_ok(source: &str) -> std::sync::Arc<wdl::Document> {
    load(&Source::unnamed(source)).unwrap_or_else(|e| panic!("document should load: {e}"))
}

/// Creates a file source for pure evaluation.
fn file_source() -> LocalFileSource {
    LocalFileSource::new(".", std::env::temp_dir())
}

#[test]
fn declaration_coercion() {
    // S1: `Int x = 3` followed by `Float y = x` type checks and evaluates
    // `y` to 3.0.
    let document = load_ok(
        "version 1.0\ntask t {\n    Int x = 3\n    Float y = x\n    command {}\n}",
    );
    let task = &document.typed.tasks[0];
    let bindings =
        apply_declarations(&task.declarations, Bindings::new(), &file_source()).unwrap();
    assert_eq!(bindings.get("y"), Some(&Value::from(3.0)));
}

#[test]
fn division_by_zero() {
    // S2: inference succeeds; evaluation reports the error at the division.
    let document = load_ok(
        "version 1.0\ntask t {\n    Int z = 10 / 0\n    command {}\n}",
    );
    let task = &document.typed.tasks[0];
    let e = apply_declarations(&task.declarations, Bindings::new(), &file_source())
        .expect_err("evaluation should fail");
    assert_eq!(e.message(), "attempt to divide by zero");
    assert!(e.span().is_some());
}

#[test]
fn scatter_shape() {
    // S3: the outer scope sees `y` as a non-empty `Array[Int]` and
    // evaluation yields `[2, 3, 4]`.
    let document = load_ok(
        "version 1.0\nworkflow w {\n    scatter (i in [1, 2, 3]) {\n        Int y = i + 1\n    }\n    Array[Int]+ check = y\n}",
    );
    let workflow = document.typed.workflow.as_ref().unwrap();
    let bindings = apply_workflow_body(&workflow.body, Bindings::new(), &file_source()).unwrap();
    assert_eq!(
        bindings.get("y"),
        Some(&Value::new_array(vec![2.into(), 3.into(), 4.into()]))
    );
}

#[test]
fn placeholder_sep() {
    // S4: a `sep=", "` placeholder materializes the joined elements.
    let document = load_ok(
        "version 1.0\ntask t {\n    input {\n        Array[Int] a\n    }\n    \
         command <<<\n        ~{sep=\", \" a}\n    >>>\n}",
    );
    let task = &document.typed.tasks[0];
    let mut inputs = Bindings::new();
    inputs
        .bind("a", Value::new_array(vec![1.into(), 2.into(), 3.into()]))
        .unwrap();
    let fs = file_source();
    let evaluated = TaskEvaluator::new(&fs).evaluate(task, inputs).unwrap();
    assert_eq!(evaluated.command, "1, 2, 3");
}

#[test]
fn command_dedent() {
    // S5: common leading whitespace is stripped from the materialized
    // command.
    let document = load_ok(
        "version 1.0\ntask t {\n    command <<<\n    python <<CODE\n    import os\n    CODE\n    >>>\n}",
    );
    let task = &document.typed.tasks[0];
    let fs = file_source();
    let evaluated = TaskEvaluator::new(&fs)
        .evaluate(task, Bindings::new())
        .unwrap();
    assert_eq!(evaluated.command, "python <<CODE\nimport os\nCODE");
}

#[test]
fn struct_access() {
    // S6: struct literals evaluate and member access works; access of an
    // unknown member is a type error.
    let document = load_ok(
        "version 1.0\nstruct P {\n    Int a\n}\ntask t {\n    P p = object { a: 7 }\n    Int q = p.a\n    command {}\n}",
    );
    let task = &document.typed.tasks[0];
    let bindings =
        apply_declarations(&task.declarations, Bindings::new(), &file_source()).unwrap();
    assert_eq!(bindings.get("q"), Some(&Value::from(7)));

    let e = load(&Source::unnamed(
        "version 1.0\nstruct P {\n    Int a\n}\ntask t {\n    P p = object { a: 7 }\n    Int q = p.b\n    command {}\n}",
    ))
    .expect_err("load should fail");
    assert_eq!(e.kind, wdl::ErrorKind::Type);
    assert_eq!(
        e.diagnostics[0].message(),
        "struct `P` does not have a member named `b`"
    );
}

#[test]
fn equal_sources_check_to_equal_typed_documents() {
    // Parsing and checking are functions of the source text: two passes
    // over the same document produce structurally equal typed ASTs.
    let source = "version 1.0\n\
                  struct P {\n    Int a\n    String b\n}\n\
                  task t {\n    input {\n        Int n\n        P? p\n    }\n    \
                  Float f = n * 1.5\n    command <<<\n        echo ~{n} ~{f}\n    >>>\n    \
                  output {\n        String out = \"~{n}\"\n    }\n    \
                  runtime {\n        cpu: 1\n    }\n}\n\
                  workflow w {\n    input {\n        Array[Int] xs = [1, 2]\n    }\n    \
                  scatter (x in xs) {\n        call t { input: n = x }\n        Int doubled = x * 2\n    }\n    \
                  output {\n        Array[String] outs = t.out\n    }\n}";
    let first = load_ok(source);
    let second = load_ok(source);
    assert_eq!(first.typed, second.typed);
}

#[test]
fn nested_scatter_and_conditional_evaluation() {
    // Scatter-in-conditional and conditional-in-scatter compose: the
    // produced bindings are arrays of optionals.
    let document = load_ok(
        "version 1.0\nworkflow w {\n    scatter (i in [1, 2, 3]) {\n        if (i % 2 == 1) {\n            Int odd = i * 10\n        }\n    }\n    Array[Int?] check = odd\n}",
    );
    let workflow = document.typed.workflow.as_ref().unwrap();
    let bindings = apply_workflow_body(&workflow.body, Bindings::new(), &file_source()).unwrap();
    assert_eq!(
        bindings.get("odd"),
        Some(&Value::new_array(vec![
            10.into(),
            Value::None,
            30.into()
        ]))
    );
}

#[test]
fn imports_resolve_and_merge_symbols() {
    // Imported tasks are callable through their namespace; imported
    // structs merge into the importer's scope.
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(
        dir.path().join("lib.wdl"),
        "version 1.0\nstruct Sample {\n    String name\n}\ntask fetch {\n    input {\n        String id\n    }\n    command {}\n    output {\n        String out = id\n    }\n}",
    )
    .expect("failed to write import");

    let uri = url::Url::from_file_path(dir.path().join("main.wdl"))
        .expect("path should be absolute");
    let source = Source::new(
        uri,
        "version 1.0\nimport \"lib.wdl\"\nworkflow w {\n    Sample s = object { name: \"x\" }\n    call lib.fetch { input: id = s.name }\n}",
    );
    let document = load(&source).unwrap_or_else(|e| panic!("document should load: {e}"));
    assert!(document.namespaces.contains_key("lib"));
    assert!(document.structs.contains_key("Sample"));
}

#[test]
fn import_cycles_are_rejected() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(
        dir.path().join("a.wdl"),
        "version 1.0\nimport \"b.wdl\"\nworkflow a {}",
    )
    .expect("failed to write document");
    std::fs::write(
        dir.path().join("b.wdl"),
        "version 1.0\nimport \"a.wdl\"\ntask t {\n    command {}\n}",
    )
    .expect("failed to write document");

    let uri = url::Url::from_file_path(dir.path().join("a.wdl")).expect("path should be absolute");
    let text = std::fs::read_to_string(dir.path().join("a.wdl")).expect("failed to read");
    let e = load(&Source::new(uri, text)).expect_err("load should fail");
    assert_eq!(e.kind, wdl::ErrorKind::Import);
}
