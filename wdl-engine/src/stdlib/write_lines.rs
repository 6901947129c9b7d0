//! Implements the `write_lines` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_analysis::types::Type;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "write_lines";

/// Writes an array of strings to a file, one line per element.
pub(crate) fn write_lines(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let lines = context.coerce_argument(0, Type::array(PrimitiveType::String.into()));
    let lines = lines.unwrap_array();

    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.unwrap_string());
        contents.push('\n');
    }

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
    fn write_lines() {
        let env = TestEnv::default();
        let value = eval_expr(&env, "write_lines(['one', 'two'])").unwrap();
        assert_eq!(env.read_back(&value), "one\ntwo\n");

        let value = eval_expr(&env, "write_lines([])").unwrap();
        assert_eq!(env.read_back(&value), "");
    }
}
