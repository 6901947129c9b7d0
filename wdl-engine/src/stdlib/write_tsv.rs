//! Implements the `write_tsv` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_analysis::types::Type;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "write_tsv";

/// Writes an array of rows to a tab-separated file.
pub(crate) fn write_tsv(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let rows = context.coerce_argument(
        0,
        Type::array(Type::array(PrimitiveType::String.into())),
    );
    let rows = rows.unwrap_array();

    let mut contents = String::new();
    for row in rows {
        let row = row.unwrap_array();
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                contents.push('\t');
            }
            contents.push_str(field.unwrap_string());
        }
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
    fn write_tsv() {
        let env = TestEnv::default();
        let value = eval_expr(&env, "write_tsv([['a', 'b'], ['c', 'd']])").unwrap();
        assert_eq!(env.read_back(&value), "a\tb\nc\td\n");
    }
}
