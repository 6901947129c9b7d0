//! Implements the `read_json` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "read_json";

/// Reads a JSON file into a value.
///
/// JSON objects deserialize as `Object` values; coercion to a struct or
/// map type happens at the use site.
pub(crate) fn read_json(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let path = context.coerce_argument(0, PrimitiveType::File);
    let path: &str = path.unwrap_file();
    let contents = context
        .file_source()
        .read(path)
        .map_err(|e| function_call_failed(FUNCTION_NAME, format!("{e:#}"), context.call_site))?;

    let json: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
        function_call_failed(
            FUNCTION_NAME,
            format!("file `{path}` does not contain valid JSON: {e}"),
            context.call_site,
        )
    })?;
    Ok(Value::from_json(&json))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn read_json() {
        let env = TestEnv::default();
        env.write_file("foo", r#"{"a": 1, "b": [true, null]}"#);
        assert_eq!(
            eval_expr(&env, "read_json('foo')").unwrap(),
            Value::new_object(vec![
                ("a".to_string(), 1.into()),
                (
                    "b".to_string(),
                    Value::new_array(vec![true.into(), Value::None])
                ),
            ])
        );
        env.write_file("bad", "{");
        assert!(eval_expr(&env, "read_json('bad')").is_err());
    }
}
