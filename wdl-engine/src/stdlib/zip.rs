//! Implements the `zip` function from the WDL standard library.

use itertools::EitherOrBoth;
use itertools::Itertools;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::Value;
use crate::diagnostics::function_call_failed;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "zip";

/// Combines two arrays of equal length into an array of pairs.
pub(crate) fn zip(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 2);

    let left = context
        .argument(0)
        .as_array()
        .expect("argument should be an array");
    let right = context
        .argument(1)
        .as_array()
        .expect("argument should be an array");

    let mut pairs = Vec::with_capacity(left.len());
    for zipped in left.iter().zip_longest(right.iter()) {
        match zipped {
            EitherOrBoth::Both(l, r) => pairs.push(Value::new_pair(l.clone(), r.clone())),
            _ => {
                return Err(function_call_failed(
                    FUNCTION_NAME,
                    "the arrays are not the same length",
                    context.call_site,
                ));
            }
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
    fn zip() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "zip([1, 2], ['a', 'b'])").unwrap(),
            Value::new_array(vec![
                Value::new_pair(1.into(), PrimitiveValue::new_string("a").into()),
                Value::new_pair(2.into(), PrimitiveValue::new_string("b").into()),
            ])
        );
        assert!(eval_expr(&env, "zip([1], [])").is_err());
    }
}
