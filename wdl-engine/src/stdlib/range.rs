//! Implements the `range` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "range";

/// Creates an array of the integers from 0 up to, but not including, the
/// given value.
pub(crate) fn range(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let n = context
        .coerce_argument(0, PrimitiveType::Integer)
        .unwrap_integer();
    if n < 0 {
        return Err(function_call_failed(
            FUNCTION_NAME,
            format!("argument must not be negative, but it is {n}"),
            context.call_site,
        ));
    }

    Ok(Value::new_array(
        (0..n).map(Value::from).collect::<Vec<_>>(),
    ))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn range() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "range(3)").unwrap(),
            Value::new_array(vec![0.into(), 1.into(), 2.into()])
        );
        assert_eq!(eval_expr(&env, "range(0)").unwrap(), Value::new_array(vec![]));
        let e = eval_expr(&env, "range(-1)").unwrap_err();
        assert_eq!(
            e.message(),
            "call to function `range` failed: argument must not be negative, but it is -1"
        );
    }
}
