//! Implements the `write_json` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "write_json";

/// Writes a value to a file as JSON.
pub(crate) fn write_json(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let json = context
        .argument(0)
        .to_json()
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;
    let contents = serde_json::to_string(&json).map_err(|e| {
        function_call_failed(FUNCTION_NAME, format!("failed to serialize JSON: {e}"), context.call_site)
    })?;

    let path = context
        .file_source()
        .write(FUNCTION_NAME, &contents)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;
    Ok(PrimitiveValue::new_file(path).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn write_json() {
        let env = TestEnv::default();
        let value = eval_expr(&env, "write_json(object { a: 1, b: [true] })").unwrap();
        assert_eq!(env.read_back(&value), r#"{"a":1,"b":[true]}"#);
    }
}
