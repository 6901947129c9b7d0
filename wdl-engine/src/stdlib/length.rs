//! Implements the `length` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Returns the number of elements in an array.
pub(crate) fn length(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let elements = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    Ok((elements.len() as i64).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn length() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "length([1, 2, 3])").unwrap().unwrap_integer(),
            3
        );
        assert_eq!(eval_expr(&env, "length([])").unwrap().unwrap_integer(), 0);
    }
}
