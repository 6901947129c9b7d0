//! Implements the `read_int` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_int";

/// Reads a file containing a single integer and (optional) whitespace.
pub(crate) fn read_int(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;

    contents
        .trim()
        .parse::<i64>()
        .map(Into::into)
        .map_err(|_| {
            function_call_failed(
                FUNCTION_NAME,
                format!("file `{path}` does not contain a single integer value"),
                context.call_site,
            )
        })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::PrimitiveValue;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_int() {
        let mut env = TestEnv::default();
        env.write_file("foo", "   \t 12345  \n");
        env.write_file("bar", "not a number");
        env.insert_name("file", PrimitiveValue::new_file("foo"));

        assert_eq!(
            eval_expr(&env, "read_int(file)").unwrap().unwrap_integer(),
            12345
        );
        assert!(eval_expr(&env, "read_int('bar')").is_err());
        assert!(eval_expr(&env, "read_int('does-not-exist')").is_err());
    }
}
