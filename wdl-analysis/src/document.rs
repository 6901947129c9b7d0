//! Analyzed documents.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;
use url::Url;
use wdl_ast as ast;
use wdl_ast::Diagnostic;
use wdl_ast::Source;
use wdl_ast::Span;
use wdl_ast::SupportedVersion;

use crate::CheckOptions;
use crate::diagnostics::import_cycle;
use crate::diagnostics::import_failure;
use crate::diagnostics::invalid_import;
use crate::diagnostics::name_already_defined;
use crate::diagnostics::struct_conflict;
use crate::imports::SourceReader;
use crate::infer;
use crate::typed::TypedDocument;
use crate::types::StructType;
use crate::types::Type;

/// An input of a task or workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    /// The type of the input.
    pub ty: Type,
    /// Whether the input must be supplied by the caller.
    ///
    /// Optional and defaulted inputs are not required.
    pub required: bool,
}

/// The callable symbol of a task or workflow: its name and typed
/// inputs/outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    /// The name of the task or workflow.
    pub name: String,
    /// The inputs of the callable, in definition order.
    pub inputs: IndexMap<String, Input>,
    /// The output types of the callable, in definition order.
    pub outputs: IndexMap<String, Type>,
}

/// An analyzed document.
#[derive(Debug)]
pub struct Document {
    /// The language version of the document.
    pub version: SupportedVersion,
    /// The URI identifying the document.
    pub uri: Url,
    /// The resolved struct types visible in the document.
    pub structs: IndexMap<String, Arc<StructType>>,
    /// The callable symbols of the document's tasks.
    pub tasks: IndexMap<String, Arc<Callable>>,
    /// The callable symbol of the document's workflow, if present.
    pub workflow: Option<Arc<Callable>>,
    /// The imported documents, keyed by namespace.
    pub namespaces: IndexMap<String, Arc<Document>>,
    /// The typed AST of the document.
    pub typed: TypedDocument,
}

/// The result of analyzing a document.
#[derive(Debug)]
pub struct AnalysisResult {
    /// The analyzed document.
    pub document: Arc<Document>,
    /// The accumulated type diagnostics.
    ///
    /// Inference continues past type errors; consumers must check for
    /// error-severity diagnostics before using the typed AST.
    pub diagnostics: Vec<Diagnostic>,
}

/// A fatal analysis failure.
///
/// Unlike accumulated type diagnostics, these abort analysis of the
/// document.
#[derive(Debug)]
pub enum Failure {
    /// The document failed to parse.
    Syntax(Diagnostic),
    /// One or more imports failed to resolve.
    Import(Vec<Diagnostic>),
    /// The document's struct environment failed to resolve.
    Structs(Vec<Diagnostic>),
}

impl Failure {
    /// Gets the diagnostics describing the failure.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Syntax(d) => std::slice::from_ref(d),
            Self::Import(d) | Self::Structs(d) => d,
        }
    }

    /// Consumes the failure, returning its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            Self::Syntax(d) => vec![d],
            Self::Import(d) | Self::Structs(d) => d,
        }
    }
}

/// Analyzes a document: parse, lower, resolve imports, and type check.
///
/// Fatal failures (syntax errors, import errors, unresolvable structs)
/// return `Err`; accumulated type errors are returned in the
/// [`AnalysisResult`].
pub fn analyze(
    source: &Source,
    reader: &dyn SourceReader,
    options: CheckOptions,
) -> Result<AnalysisResult, Failure> {
    let mut stack = vec![source.uri().clone()];
    let mut cache = HashMap::new();
    let (document, diagnostics) =
        analyze_document(source, reader, options, &mut stack, &mut cache)?;
    Ok(AnalysisResult {
        document,
        diagnostics,
    })
}

/// Analyzes a single document, recursing into its imports.
fn analyze_document(
    source: &Source,
    reader: &dyn SourceReader,
    options: CheckOptions,
    stack: &mut Vec<Url>,
    cache: &mut HashMap<Url, Arc<Document>>,
) -> Result<(Arc<Document>, Vec<Diagnostic>), Failure> {
    debug!(uri = %source.uri(), "analyzing document");
    let ast = ast::Document::parse(source).map_err(Failure::Syntax)?;

    let mut namespaces: IndexMap<String, Arc<Document>> = IndexMap::new();
    let mut imported_structs: IndexMap<String, (Arc<StructType>, Span)> = IndexMap::new();
    let mut fatal = Vec::new();

    for import in &ast.imports {
        match resolve_import(source, import, reader, options, stack, cache) {
            Ok(document) => {
                merge_import(
                    import,
                    document,
                    &mut namespaces,
                    &mut imported_structs,
                    &mut fatal,
                );
            }
            Err(e) => fatal.push(e),
        }
    }

    if !fatal.is_empty() {
        return Err(Failure::Import(fatal));
    }

    let mut diagnostics = Vec::new();
    let checked = infer::check(&ast, &namespaces, imported_structs, options, &mut diagnostics)
        .map_err(|()| Failure::Structs(std::mem::take(&mut diagnostics)))?;

    let document = Arc::new(Document {
        version: ast.version,
        uri: source.uri().clone(),
        structs: checked.structs,
        tasks: checked.tasks,
        workflow: checked.workflow,
        namespaces,
        typed: checked.typed,
    });

    Ok((document, diagnostics))
}

/// Resolves a single import statement to an analyzed document.
fn resolve_import(
    source: &Source,
    import: &ast::ImportStatement,
    reader: &dyn SourceReader,
    options: CheckOptions,
    stack: &mut Vec<Url>,
    cache: &mut HashMap<Url, Arc<Document>>,
) -> Result<Arc<Document>, Diagnostic> {
    let resolved = source
        .uri()
        .join(&import.uri)
        .map_err(|e| import_failure(&import.uri, &e.into(), import.uri_span))?;

    let (text, canonical) = reader
        .read(&resolved)
        .map_err(|e| import_failure(&import.uri, &e, import.uri_span))?;

    if stack.contains(&canonical) {
        return Err(import_cycle(&import.uri, import.uri_span));
    }

    if let Some(cached) = cache.get(&canonical) {
        return Ok(cached.clone());
    }

    debug!(uri = %canonical, "resolving import");
    let imported_source = Source::new(canonical.clone(), text);
    stack.push(canonical.clone());
    let result = analyze_document(&imported_source, reader, options, stack, cache);
    stack.pop();

    match result {
        Ok((document, diagnostics)) => {
            if diagnostics.iter().any(Diagnostic::is_error) {
                return Err(invalid_import(&import.uri, import.uri_span));
            }
            cache.insert(canonical, document.clone());
            Ok(document)
        }
        Err(_) => Err(invalid_import(&import.uri, import.uri_span)),
    }
}

/// Merges an imported document's namespace and structs into the importer.
fn merge_import(
    import: &ast::ImportStatement,
    document: Arc<Document>,
    namespaces: &mut IndexMap<String, Arc<Document>>,
    imported_structs: &mut IndexMap<String, (Arc<StructType>, Span)>,
    fatal: &mut Vec<Diagnostic>,
) {
    match import.effective_namespace() {
        Some(namespace) => {
            if namespaces.contains_key(&namespace) {
                fatal.push(name_already_defined(
                    &namespace,
                    import.span,
                    import.span,
                ));
            } else {
                namespaces.insert(namespace, document.clone());
            }
        }
        None => {
            fatal.push(Diagnostic::error(
                import.uri_span,
                format!(
                    "cannot derive a namespace from import URI `{uri}`",
                    uri = import.uri
                ),
            ));
        }
    }

    for (name, ty) in &document.structs {
        let (name, ty) = match import
            .aliases
            .iter()
            .find(|(source, _)| source.as_str() == name)
        {
            Some((_, target)) => (
                target.text.clone(),
                Arc::new(StructType::new(
                    target.text.clone(),
                    ty.members()
                        .iter()
                        .map(|(n, t)| (n.clone(), t.clone()))
                        .collect::<Vec<_>>(),
                )),
            ),
            None => (name.clone(), ty.clone()),
        };

        match imported_structs.get(&name) {
            Some((existing, first)) if !existing.is_identical(&ty) => {
                fatal.push(struct_conflict(&name, import.uri_span, *first));
            }
            Some(_) => {}
            None => {
                imported_structs.insert(name, (ty, import.uri_span));
            }
        }
    }
}
