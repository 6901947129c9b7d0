//! Implements the `write_map` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_analysis::types::Type;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "write_map";

/// Writes a map to a two-column tab-separated file.
pub(crate) fn write_map(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let map = context.coerce_argument(
        0,
        Type::map(PrimitiveType::String.into(), PrimitiveType::String.into()),
    );
    let map = map.as_map().expect("argument should be a map");

    let mut contents = String::new();
    for (key, value) in &map.entries {
        contents.push_str(key.as_str().expect("key should be a string"));
        contents.push('\t');
        contents.push_str(value.unwrap_string());
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
    fn write_map() {
        let env = TestEnv::default();
        let value = eval_expr(&env, "write_map({'a': 1, 'b': 2})").unwrap();
        assert_eq!(env.read_back(&value), "a\t1\nb\t2\n");
    }
}
