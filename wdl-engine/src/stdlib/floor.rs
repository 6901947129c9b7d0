//! Implements the `floor` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Rounds a floating point number down to the next lower integer.
pub(crate) fn floor(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let value = context
        .coerce_argument(0, PrimitiveType::Float)
        .unwrap_float();
    Ok((value.floor() as i64).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn floor() {
        let env = TestEnv::default();
        assert_eq!(eval_expr(&env, "floor(1.7)").unwrap().unwrap_integer(), 1);
        assert_eq!(eval_expr(&env, "floor(-1.2)").unwrap().unwrap_integer(), -2);
        // Int arguments coerce to Float.
        assert_eq!(eval_expr(&env, "floor(3)").unwrap().unwrap_integer(), 3);
    }
}
