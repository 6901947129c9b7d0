//! Workflow Description Language (WDL) document parsing, analysis, and
//! evaluation.
//!
//! There are four top-level modules to this crate:
//!
//! * `grammar` - used to parse WDL source into version-specific concrete
//!   syntax trees.
//! * `ast` - used to lower parsed documents into a version-independent
//!   abstract syntax tree.
//! * `analysis` - used to resolve imports and type check documents,
//!   producing the typed AST.
//! * `engine` - used to evaluate expressions and declarations and
//!   materialize command sections.
//!
//! The above are re-exports of the individual `wdl-grammar`, `wdl-ast`,
//! `wdl-analysis`, and `wdl-engine` crates, respectively.
//!
//! # Examples
//!
//! An example of loading and checking a document:
//!
//! ```rust
//! use wdl::Source;
//! use wdl::load;
//!
//! let source = Source::unnamed(
//!     "version 1.0\ntask hello {\n    command {\n        echo hello\n    }\n}",
//! );
//! let document = load(&source).expect("document should load");
//! assert!(document.tasks.contains_key("hello"));
//! ```

pub use wdl_analysis as analysis;
pub use wdl_analysis::CheckOptions;
pub use wdl_analysis::Document;
pub use wdl_analysis::SourceReader;
pub use wdl_ast as ast;
pub use wdl_engine as engine;
pub use wdl_grammar as grammar;
pub use wdl_grammar::Diagnostic;
pub use wdl_grammar::Severity;
pub use wdl_grammar::Source;

use std::sync::Arc;

use url::Url;

/// The kind of an error returned by document loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A tokenization or grammar violation; fatal for the document.
    Syntax,
    /// An unresolved or cyclic import; fatal.
    Import,
    /// An inference or coercion failure; accumulated across the document.
    Type,
    /// A runtime evaluation failure.
    Evaluation,
    /// An invariant violation within the toolkit itself.
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax error"),
            Self::Import => write!(f, "import error"),
            Self::Type => write!(f, "type error"),
            Self::Evaluation => write!(f, "evaluation error"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

/// The error envelope returned to callers of the document pipeline.
#[derive(Debug)]
pub struct Error {
    /// The kind of the error.
    pub kind: ErrorKind,
    /// The diagnostics describing the error.
    pub diagnostics: Vec<Diagnostic>,
    /// The URI of the document the error originated in.
    pub source_uri: Url,
}

impl Error {
    /// Creates a new error envelope.
    fn new(kind: ErrorKind, diagnostics: Vec<Diagnostic>, source_uri: Url) -> Self {
        Self {
            kind,
            diagnostics,
            source_uri,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{kind} in `{uri}`",
            kind = self.kind,
            uri = self.source_uri
        )?;
        if let Some(first) = self.diagnostics.first() {
            write!(f, ": {message}", message = first.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Loads a document: parse, resolve imports, and type check.
///
/// Imports are read from the local file system relative to the source URI.
pub fn load(source: &Source) -> Result<Arc<Document>, Error> {
    load_with(source, &wdl_analysis::LocalSourceReader, CheckOptions::default())
}

/// Loads a document with a custom source reader and checking options.
pub fn load_with(
    source: &Source,
    reader: &dyn SourceReader,
    options: CheckOptions,
) -> Result<Arc<Document>, Error> {
    let uri = source.uri().clone();
    let result = wdl_analysis::analyze(source, reader, options).map_err(|failure| {
        let kind = match &failure {
            wdl_analysis::Failure::Syntax(_) => ErrorKind::Syntax,
            wdl_analysis::Failure::Import(_) => ErrorKind::Import,
            wdl_analysis::Failure::Structs(_) => ErrorKind::Type,
        };
        Error::new(kind, failure.into_diagnostics(), uri.clone())
    })?;

    let errors: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.is_error())
        .cloned()
        .collect();
    if !errors.is_empty() {
        return Err(Error::new(ErrorKind::Type, errors, uri));
    }

    Ok(result.document)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn syntax_errors_are_fatal() {
        let source = Source::unnamed("version 1.0\ntask {}");
        let e = load(&source).expect_err("load should fail");
        assert_eq!(e.kind, ErrorKind::Syntax);
    }

    #[test]
    fn type_errors_accumulate_in_the_envelope() {
        let source = Source::unnamed(
            "version 1.0\nworkflow w {\n    Int x = \"a\"\n    Int y = \"b\"\n}",
        );
        let e = load(&source).expect_err("load should fail");
        assert_eq!(e.kind, ErrorKind::Type);
        assert_eq!(e.diagnostics.len(), 2);
    }

    #[test]
    fn unresolved_imports_are_import_errors() {
        let source = Source::unnamed("version 1.0\nimport \"missing.wdl\"\nworkflow w {}");
        let e = load(&source).expect_err("load should fail");
        assert_eq!(e.kind, ErrorKind::Import);
    }
}
