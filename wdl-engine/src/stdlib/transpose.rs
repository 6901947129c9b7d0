//! Implements the `transpose` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "transpose";

/// Transposes a two-dimensional array.
///
/// All rows must have the same length.
pub(crate) fn transpose(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let rows = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    let rows: Vec<&Vec<Value>> = rows
        .iter()
        .map(|r| r.as_array().expect("row should be an array"))
        .collect();

    let columns = rows.first().map(|r| r.len()).unwrap_or(0);
    if rows.iter().any(|r| r.len() != columns) {
        return Err(function_call_failed(
            FUNCTION_NAME,
            "the rows of the array are not the same length",
            context.call_site,
        ));
    }

    let transposed = (0..columns)
        .map(|c| Value::new_array(rows.iter().map(|r| r[c].clone()).collect::<Vec<_>>()))
        .collect::<Vec<_>>();
    Ok(Value::new_array(transposed))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn transpose() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "transpose([[1, 2, 3], [4, 5, 6]])").unwrap(),
            Value::new_array(vec![
                Value::new_array(vec![1.into(), 4.into()]),
                Value::new_array(vec![2.into(), 5.into()]),
                Value::new_array(vec![3.into(), 6.into()]),
            ])
        );
        assert!(eval_expr(&env, "transpose([[1, 2], [3]])").is_err());
    }
}
