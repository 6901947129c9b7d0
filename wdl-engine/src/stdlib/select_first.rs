//! Implements the `select_first` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "select_first";

/// Returns the first defined value of an array of optional values.
pub(crate) fn select_first(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let elements = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    elements
        .iter()
        .find(|e| !e.is_none())
        .cloned()
        .ok_or_else(|| {
            function_call_failed(
                FUNCTION_NAME,
                "the array is empty or contains only `None` values",
                context.call_site,
            )
        })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn select_first() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "select_first([None, 2, 3])")
                .unwrap()
                .unwrap_integer(),
            2
        );
        assert!(eval_expr(&env, "select_first([None, None])").is_err());
    }
}
