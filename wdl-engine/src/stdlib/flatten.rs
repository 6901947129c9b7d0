//! Implements the `flatten` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Flattens an array of arrays into a single array, preserving element
/// order.
pub(crate) fn flatten(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 1);

    let rows = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    let mut elements = Vec::new();
    for row in rows.iter() {
        elements.extend(
            row.as_array()
                .expect("element should be an array")
                .iter()
                .cloned(),
        );
    }
    Ok(Value::new_array(elements))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn flatten() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "flatten([[1, 2], [], [3]])").unwrap(),
            Value::new_array(vec![1.into(), 2.into(), 3.into()])
        );
    }
}
