//! Implements the `defined` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Determines whether an optional value is defined.
pub(crate) fn defined(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    Ok((!context.argument(0).is_none()).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn defined() {
        let env = TestEnv::default();
        assert_eq!(eval_expr(&env, "defined(None)").unwrap().unwrap_boolean(), false);
        assert_eq!(eval_expr(&env, "defined(1)").unwrap().unwrap_boolean(), true);
    }
}
