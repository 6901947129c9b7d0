//! Implements the `read_map` function from the WDL standard library.

use indexmap::IndexMap;
use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_map";

/// Reads a two-column tab-separated file into a map.
///
/// Duplicate keys are an error.
pub(crate) fn read_map(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;

    let mut entries = IndexMap::new();
    for (i, line) in contents.lines().enumerate() {
        let mut fields = line.split('\t');
        let (key, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                return Err(function_call_failed(
                    FUNCTION_NAME,
                    format!(
                        "line {line} of file `{path}` does not have exactly two columns",
                        line = i + 1
                    ),
                    context.call_site,
                ));
            }
        };

        if entries
            .insert(
                PrimitiveValue::new_string(key),
                Value::from(PrimitiveValue::new_string(value)),
            )
            .is_some()
        {
            return Err(function_call_failed(
                FUNCTION_NAME,
                format!("file `{path}` contains the key `{key}` more than once"),
                context.call_site,
            ));
        }
    }

    Ok(Value::new_map(entries))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::PrimitiveValue;
    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_map() {
        let env = TestEnv::default();
        env.write_file("foo", "a\t1\nb\t2\n");
        env.write_file("dup", "a\t1\na\t2\n");
        env.write_file("ragged", "a\t1\textra\n");

        assert_eq!(
            eval_expr(&env, "read_map('foo')").unwrap(),
            Value::new_map(vec![
                (
                    PrimitiveValue::new_string("a"),
                    PrimitiveValue::new_string("1").into()
                ),
                (
                    PrimitiveValue::new_string("b"),
                    PrimitiveValue::new_string("2").into()
                ),
            ])
        );
        assert!(eval_expr(&env, "read_map('dup')").is_err());
        assert!(eval_expr(&env, "read_map('ragged')").is_err());
    }
}
