//! Implements the `stdout` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "stdout";

/// Returns the file containing the standard output of the command.
pub(crate) fn stdout(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.is_empty());

    context.file_source().stdout().ok_or_else(|| {
        function_call_failed(
            FUNCTION_NAME,
            "the command's standard output is not available in this context",
            context.call_site,
        )
    })
}
