//! Implements the `glob` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "glob";

/// Returns the files matching a glob pattern, in sorted order.
pub(crate) fn glob(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let pattern = context.coerce_argument(0, PrimitiveType::String);
    let pattern: &str = pattern.unwrap_string();

    let paths = context
        .file_source()
        .glob(pattern)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;
    Ok(Value::new_array(
        paths
            .into_iter()
            .map(|p| PrimitiveValue::new_file(p).into())
            .collect::<Vec<Value>>(),
    ))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn glob() {
        let env = TestEnv::default();
        env.write_file("a.txt", "a");
        env.write_file("b.txt", "b");
        env.write_file("c.log", "c");

        let matched = eval_expr(&env, "glob('*.txt')").unwrap();
        let names: Vec<_> = matched
            .unwrap_array()
            .iter()
            .map(|f| {
                f.as_file()
                    .expect("element should be a file")
                    .rsplit('/')
                    .next()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }
}
