//! Implements the `read_lines` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_lines";

/// Reads a file into an array of its lines.
pub(crate) fn read_lines(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;

    Ok(Value::new_array(
        contents
            .lines()
            .map(|l| PrimitiveValue::new_string(l).into())
            .collect::<Vec<Value>>(),
    ))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::PrimitiveValue;
    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_lines() {
        let env = TestEnv::default();
        env.write_file("foo", "one\ntwo\n");
        assert_eq!(
            eval_expr(&env, "read_lines('foo')").unwrap(),
            Value::new_array(vec![
                PrimitiveValue::new_string("one").into(),
                PrimitiveValue::new_string("two").into(),
            ])
        );
    }
}
