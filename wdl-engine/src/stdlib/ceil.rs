//! Implements the `ceil` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Rounds a floating point number up to the next higher integer.
pub(crate) fn ceil(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let value = context
        .coerce_argument(0, PrimitiveType::Float)
        .unwrap_float();
    Ok((value.ceil() as i64).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn ceil() {
        let env = TestEnv::default();
        assert_eq!(eval_expr(&env, "ceil(1.2)").unwrap().unwrap_integer(), 2);
        assert_eq!(eval_expr(&env, "ceil(-1.7)").unwrap().unwrap_integer(), -1);
    }
}
