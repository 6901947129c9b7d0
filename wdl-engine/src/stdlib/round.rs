//! Implements the `round` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Rounds a floating point number to the nearest integer.
pub(crate) fn round(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let value = context
        .coerce_argument(0, PrimitiveType::Float)
        .unwrap_float();
    Ok((value.round() as i64).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn round() {
        let env = TestEnv::default();
        assert_eq!(eval_expr(&env, "round(1.2)").unwrap().unwrap_integer(), 1);
        assert_eq!(eval_expr(&env, "round(1.5)").unwrap().unwrap_integer(), 2);
        assert_eq!(eval_expr(&env, "round(-1.5)").unwrap().unwrap_integer(), -2);
    }
}
