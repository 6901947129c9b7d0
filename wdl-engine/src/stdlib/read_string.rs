//! Implements the `read_string` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_string";

/// Reads an entire file as a string, with trailing line terminators
/// removed.
pub(crate) fn read_string(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;
    Ok(PrimitiveValue::new_string(contents.trim_end_matches(['\r', '\n'])).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_string() {
        let env = TestEnv::default();
        env.write_file("foo", "hello world\n");
        assert_eq!(
            eval_expr(&env, "read_string('foo')")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "hello world"
        );
    }
}
