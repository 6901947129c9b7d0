//! Implements the `cross` function from the WDL standard library.

use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;

/// Combines two arrays into the array of all pairs of their elements, in
/// row-major order.
pub(crate) fn cross(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 2);

    let left = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    let right = context
        .argument(1)
        .as_array()
        .expect("argument should be an array");

    let mut pairs = Vec::with_capacity(left.len() * right.len());
    for l in left.iter() {
        for r in right.iter() {
            pairs.push(Value::new_pair(l.clone(), r.clone()));
        }
    }
    Ok(Value::new_array(pairs))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::PrimitiveValue;
    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn cross() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "cross([1, 2], ['a'])").unwrap(),
            Value::new_array(vec![
                Value::new_pair(1.into(), PrimitiveValue::new_string("a").into()),
                Value::new_pair(2.into(), PrimitiveValue::new_string("a").into()),
            ])
        );
    }
}
