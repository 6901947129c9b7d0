//! An abstract syntax tree for Workflow Description Language (WDL) documents.
//!
//! The AST is version-independent: the per-version concrete syntax trees
//! produced by `wdl-grammar` lower into the single [`Document`] shape defined
//! here. Lowering is structural; name resolution and type checking are the
//! concern of `wdl-analysis`.
//!
//! # Examples
//!
//! ```rust
//! use wdl_ast::Document;
//! use wdl_ast::Source;
//!
//! let source = Source::unnamed("version 1.0\nworkflow test {}");
//! let document = Document::parse(&source).expect("document should parse");
//! assert_eq!(document.tasks.len(), 0);
//! assert!(document.workflow.is_some());
//! ```

mod document;
mod expr;
mod meta;
mod translate;
mod types;

pub use document::Call;
pub use document::CallInput;
pub use document::Conditional;
pub use document::Declaration;
pub use document::Document;
pub use document::Ident;
pub use document::ImportStatement;
pub use document::MetaItem;
pub use document::RuntimeItem;
pub use document::Scatter;
pub use document::StructDefinition;
pub use document::Task;
pub use document::Workflow;
pub use document::WorkflowElement;
pub use expr::BinaryOp;
pub use expr::CommandPart;
pub use expr::Expr;
pub use expr::ExprKind;
pub use expr::UnaryOp;
pub use meta::MetaValue;
pub use meta::MetaValueKind;
pub use types::Type;
pub use types::TypeKind;
pub use wdl_grammar::Diagnostic;
pub use wdl_grammar::Severity;
pub use wdl_grammar::Source;
pub use wdl_grammar::Span;
pub use wdl_grammar::SupportedVersion;

impl Document {
    /// Parses a document from the given source and lowers it to the AST.
    ///
    /// Returns the first syntax error encountered, if any.
    pub fn parse(source: &Source) -> Result<Self, Diagnostic> {
        let cst = wdl_grammar::Document::parse(source)?;
        translate::document(cst)
    }
}

impl Expr {
    /// Parses a standalone expression from the given source and lowers it
    /// to the AST.
    pub fn parse(source: &Source, version: SupportedVersion) -> Result<Self, Diagnostic> {
        let cst = wdl_grammar::grammar::parse_expr(source, version)?;
        translate::expr(cst)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Parses a document, panicking on failure.
    fn parse(source: &str) -> Document {
        let source = Source::unnamed(source);
        match Document::parse(&source) {
            Ok(document) => document,
            Err(e) => panic!("document should parse: {message}", message = e.message()),
        }
    }

    #[test]
    fn draft2_unbound_declarations_become_inputs() {
        let document = parse(
            "task t {\n    String name\n    Int count = 2\n    command { echo ${name} }\n}",
        );
        let task = &document.tasks[0];
        assert_eq!(task.inputs.len(), 1);
        assert_eq!(task.inputs[0].name.as_str(), "name");
        assert_eq!(task.declarations.len(), 1);
        assert_eq!(task.declarations[0].name.as_str(), "count");
    }

    #[test]
    fn strings_with_placeholders_lower_to_compound_strings() {
        let document = parse(
            "version 1.0\nworkflow w {\n    String name = \"x\"\n    String s = \"a~{name}b\"\n}",
        );
        let workflow = document.workflow.expect("document should have a workflow");
        let decl = match &workflow.body[1] {
            WorkflowElement::Decl(d) => d,
            _ => panic!("expected a declaration"),
        };
        match decl.expr.as_ref().map(|e| &e.kind) {
            Some(ExprKind::CompoundString(parts)) => {
                assert_eq!(parts.len(), 3);
                assert!(matches!(&parts[0].kind, ExprKind::String(s) if s == "a"));
                assert!(matches!(&parts[1].kind, ExprKind::Ident(s) if s == "name"));
                assert!(matches!(&parts[2].kind, ExprKind::String(s) if s == "b"));
            }
            _ => panic!("expected a compound string"),
        }
    }

    #[test]
    fn placeholder_options_lower_to_placeholder_expressions() {
        let document = parse(
            "version 1.0\ntask t {\n    input {\n        Array[Int]? a\n    }\n    \
             command <<<\n        ~{default=\"-\" sep=\", \" a}\n    >>>\n}",
        );
        let task = &document.tasks[0];
        let placeholder = task
            .command
            .iter()
            .find_map(|p| match p {
                CommandPart::Expr(e) => Some(e),
                _ => None,
            })
            .expect("command should have a placeholder");
        // `default=` wraps `sep=`.
        match &placeholder.kind {
            ExprKind::PlaceholderDefault { value, .. } => match &value.kind {
                ExprKind::PlaceholderSep { array, .. } => {
                    assert!(matches!(&array.kind, ExprKind::Ident(s) if s == "a"));
                }
                _ => panic!("expected a sep placeholder"),
            },
            _ => panic!("expected a default placeholder"),
        }
    }

    #[test]
    fn metadata_lowers_to_the_restricted_sum() {
        let document = parse(
            "version 1.0\ntask t {\n    command {}\n    meta {\n        \
             author: \"someone\"\n        deprecated: false\n        attempts: 3\n        \
             keywords: [\"a\", \"b\"]\n        extras: { nested: null }\n    }\n}",
        );
        let meta = &document.tasks[0].meta;
        assert_eq!(meta.len(), 5);
        assert!(matches!(
            &meta[0].value.kind,
            MetaValueKind::String(s) if s == "someone"
        ));
        assert!(matches!(&meta[1].value.kind, MetaValueKind::Boolean(false)));
        assert!(matches!(&meta[2].value.kind, MetaValueKind::Integer(3)));
        assert!(matches!(&meta[3].value.kind, MetaValueKind::Array(items) if items.len() == 2));
        match &meta[4].value.kind {
            MetaValueKind::Object(members) => {
                assert_eq!(members[0].0, "nested");
                assert!(matches!(members[0].1.kind, MetaValueKind::Null));
            }
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn names_are_rejected_in_metadata() {
        let source = Source::unnamed(
            "version 1.0\ntask t {\n    command {}\n    meta { x: some_name }\n}",
        );
        let e = Document::parse(&source).expect_err("document should not lower");
        assert_eq!(e.message(), "names cannot be referenced in metadata sections");
    }

    #[test]
    fn import_namespaces_default_to_the_file_stem() {
        let document = parse(
            "version 1.0\nimport \"lib/tools.wdl\"\nimport \"other.wdl\" as lib\nworkflow w {}",
        );
        assert_eq!(
            document.imports[0].effective_namespace(),
            Some("tools".to_string())
        );
        assert_eq!(
            document.imports[1].effective_namespace(),
            Some("lib".to_string())
        );
    }
}
