//! Implements the `read_tsv` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_tsv";

/// Reads a tab-separated file into an array of rows.
pub(crate) fn read_tsv(context: CallContext<'_>) -> Result<Value, Diagnostic> {
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
            .map(|line| {
                Value::new_array(
                    line.split('\t')
                        .map(|field| PrimitiveValue::new_string(field).into())
                        .collect::<Vec<Value>>(),
                )
            })
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
    fn read_tsv() {
        let env = TestEnv::default();
        env.write_file("foo", "a\tb\nc\td\n");
        assert_eq!(
            eval_expr(&env, "read_tsv('foo')").unwrap(),
            Value::new_array(vec![
                Value::new_array(vec![
                    PrimitiveValue::new_string("a").into(),
                    PrimitiveValue::new_string("b").into(),
                ]),
                Value::new_array(vec![
                    PrimitiveValue::new_string("c").into(),
                    PrimitiveValue::new_string("d").into(),
                ]),
            ])
        );
    }
}
