//! Implements the `read_float` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_float";

/// Reads a file containing a single float and (optional) whitespace.
pub(crate) fn read_float(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;

    contents
        .trim()
        .parse::<f64>()
        .map(Into::into)
        .map_err(|_| {
            function_call_failed(
                FUNCTION_NAME,
                format!("file `{path}` does not contain a single float value"),
                context.call_site,
            )
        })
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_float() {
        let env = TestEnv::default();
        env.write_file("foo", "2.5\n");
        assert_relative_eq!(
            eval_expr(&env, "read_float('foo')").unwrap().unwrap_float(),
            2.5
        );
    }
}
