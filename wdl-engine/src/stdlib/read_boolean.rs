//! Implements the `read_boolean` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_boolean";

/// Reads a file containing a single `true` or `false` value.
///
/// The value is matched case-insensitively.
pub(crate) fn read_boolean(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;

    match contents.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true.into()),
        "false" => Ok(false.into()),
        _ => Err(function_call_failed(
            FUNCTION_NAME,
            format!("file `{path}` does not contain a single boolean value"),
            context.call_site,
        )),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_boolean() {
        let env = TestEnv::default();
        env.write_file("foo", "TRUE\n");
        env.write_file("bar", "maybe");
        assert_eq!(
            eval_expr(&env, "read_boolean('foo')")
                .unwrap()
                .unwrap_boolean(),
            true
        );
        assert!(eval_expr(&env, "read_boolean('bar')").is_err());
    }
}
