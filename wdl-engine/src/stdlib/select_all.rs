//! Implements the `select_all` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Returns the defined values of an array of optional values, in order.
pub(crate) fn select_all(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let elements = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    Ok(Value::new_array(
        elements
            .iter()
            .filter(|e| !e.is_none())
            .cloned()
            .collect::<Vec<_>>(),
    ))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn select_all() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "select_all([None, 2, None, 3])").unwrap(),
            Value::new_array(vec![2.into(), 3.into()])
        );
    }
}
