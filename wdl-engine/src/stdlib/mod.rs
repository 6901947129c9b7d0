//! Implementation of the WDL standard library.
//!
//! Each function lives in its own module and registers a [`Callback`] in
//! the [`FUNCTIONS`] table; the table is keyed by the function names the
//! type checker resolved against `wdl-analysis`' signature table. All
//! implementations are synchronous and pure on values; the I/O-bearing
//! functions go through the injected [`FileSource`](crate::FileSource).

use std::collections::HashMap;
use std::sync::LazyLock;

use wdl_analysis::types::Type;
use wdl_ast::Diagnostic;
use wdl_ast::Span;

use crate::Coercible as _;
use crate::Value;
use crate::eval::EvaluationContext;
use crate::io::FileSource;

mod basename;
mod ceil;
mod cross;
mod defined;
mod flatten;
mod floor;
mod glob;
mod length;
mod prefix;
mod range;
mod read_boolean;
mod read_float;
mod read_int;
mod read_json;
mod read_lines;
mod read_map;
mod read_string;
mod read_tsv;
mod round;
mod select_all;
mod select_first;
mod sep;
mod size;
mod stderr;
mod stdout;
mod sub;
mod transpose;
mod write_json;
mod write_lines;
mod write_map;
mod write_tsv;
mod zip;

/// Represents a function call argument.
pub struct CallArgument {
    /// The value of the argument.
    value: Value,
    /// The span of the expression of the argument.
    span: Span,
}

impl CallArgument {
    /// Constructs a new call argument given its value and span.
    pub const fn new(value: Value, span: Span) -> Self {
        Self { value, span }
    }
}

/// Represents function call context.
pub struct CallContext<'a> {
    /// The evaluation context for the call.
    context: &'a dyn EvaluationContext,
    /// The call site span.
    call_site: Span,
    /// The arguments to the call.
    arguments: &'a [CallArgument],
    /// The resolved return type of the call.
    return_type: Type,
}

impl<'a> CallContext<'a> {
    /// Constructs a new call context given the call arguments.
    pub fn new(
        context: &'a dyn EvaluationContext,
        call_site: Span,
        arguments: &'a [CallArgument],
        return_type: Type,
    ) -> Self {
        Self {
            context,
            call_site,
            arguments,
            return_type,
        }
    }

    /// Gets the file source for the call.
    fn file_source(&self) -> &dyn FileSource {
        self.context.file_source()
    }

    /// Gets an argument's value.
    ///
    /// # Panics
    ///
    /// Panics if the given index is out of range.
    fn argument(&self, index: usize) -> &Value {
        &self.arguments[index].value
    }

    /// Coerces an argument to the given type.
    ///
    /// # Panics
    ///
    /// Panics if the given index is out of range or if the value fails to
    /// coerce to the given type; coercibility was established by the type
    /// checker.
    fn coerce_argument(&self, index: usize, ty: impl Into<Type>) -> Value {
        self.arguments[index]
            .value
            .coerce(&ty.into())
            .expect("value should coerce")
    }
}

/// The type of a standard library function implementation.
pub type Callback = fn(CallContext<'_>) -> Result<Value, Diagnostic>;

/// Gets the canonical string form of a primitive element value.
///
/// `None` renders as the empty string; compound values have no canonical
/// string form.
fn canonical_element(value: &Value) -> Option<String> {
    match value {
        Value::None => Some(String::new()),
        Value::Primitive(v) => Some(v.canonical_string()),
        Value::Compound(_) => None,
    }
}

/// The table of standard library function implementations.
static FUNCTIONS: LazyLock<HashMap<&'static str, Callback>> = LazyLock::new(|| {
    let mut functions: HashMap<&'static str, Callback> = HashMap::new();
    functions.insert("basename", basename::basename);
    functions.insert("ceil", ceil::ceil);
    functions.insert("cross", cross::cross);
    functions.insert("defined", defined::defined);
    functions.insert("flatten", flatten::flatten);
    functions.insert("floor", floor::floor);
    functions.insert("glob", glob::glob);
    functions.insert("length", length::length);
    functions.insert("prefix", prefix::prefix);
    functions.insert("range", range::range);
    functions.insert("read_boolean", read_boolean::read_boolean);
    functions.insert("read_float", read_float::read_float);
    functions.insert("read_int", read_int::read_int);
    functions.insert("read_json", read_json::read_json);
    functions.insert("read_lines", read_lines::read_lines);
    functions.insert("read_map", read_map::read_map);
    functions.insert("read_string", read_string::read_string);
    functions.insert("read_tsv", read_tsv::read_tsv);
    functions.insert("round", round::round);
    functions.insert("select_all", select_all::select_all);
    functions.insert("select_first", select_first::select_first);
    functions.insert("sep", sep::sep);
    functions.insert("size", size::size);
    functions.insert("stderr", stderr::stderr);
    functions.insert("stdout", stdout::stdout);
    functions.insert("sub", sub::sub);
    functions.insert("transpose", transpose::transpose);
    functions.insert("write_json", write_json::write_json);
    functions.insert("write_lines", write_lines::write_lines);
    functions.insert("write_map", write_map::write_map);
    functions.insert("write_tsv", write_tsv::write_tsv);
    functions.insert("zip", zip::zip);
    functions
});

/// Gets the implementation of a standard library function by name.
pub(crate) fn function(name: &str) -> Option<Callback> {
    FUNCTIONS.get(name).copied()
}

#[cfg(test)]
pub(crate) mod test {
    use tempfile::TempDir;
    use wdl_analysis::check_expr;
    use wdl_ast::Source;
    use wdl_ast::SupportedVersion;

    use super::*;
    use crate::Bindings;
    use crate::BindingsContext;
    use crate::ExprEvaluator;
    use crate::LocalFileSource;

    /// A test environment with a temporary file source and named values.
    pub(crate) struct TestEnv {
        /// The root directory of the file source.
        root: TempDir,
        /// The temporary directory written files go to.
        tmp: TempDir,
        /// The bound names of the environment.
        bindings: Bindings,
    }

    impl Default for TestEnv {
        fn default() -> Self {
            Self {
                root: TempDir::new().expect("failed to create temp dir"),
                tmp: TempDir::new().expect("failed to create temp dir"),
                bindings: Bindings::new(),
            }
        }
    }

    impl TestEnv {
        /// Writes a file with the given name into the environment root.
        pub(crate) fn write_file(&self, name: &str, contents: &str) {
            std::fs::write(self.root.path().join(name), contents)
                .expect("failed to write test file");
        }

        /// Binds a name to a value.
        pub(crate) fn insert_name(&mut self, name: &str, value: impl Into<Value>) {
            self.bindings
                .bind(name, value.into())
                .expect("name should not be bound");
        }

        /// Gets the file source of the environment.
        pub(crate) fn file_source(&self) -> LocalFileSource {
            LocalFileSource::new(self.root.path(), self.tmp.path())
        }

        /// Reads back a file written by a `write_*` function.
        pub(crate) fn read_back(&self, value: &Value) -> String {
            let path = value.as_file().expect("value should be a file");
            std::fs::read_to_string(path.as_ref()).expect("failed to read written file")
        }
    }

    /// Type checks and evaluates an expression in the environment.
    pub(crate) fn eval_expr(env: &TestEnv, source: &str) -> Result<Value, Diagnostic> {
        let env_types: Vec<_> = env
            .bindings
            .iter()
            .map(|(name, value)| (name.to_string(), value.ty()))
            .collect();
        let typed = check_expr(
            &Source::unnamed(source),
            SupportedVersion::V2,
            &env_types,
        )
        .unwrap_or_else(|errors| {
            panic!(
                "expression should type check: {message}",
                message = errors[0].message()
            )
        });

        let file_source = env.file_source();
        let context = BindingsContext::new(&env.bindings, &file_source);
        ExprEvaluator::new(&context).evaluate(&typed)
    }
}
