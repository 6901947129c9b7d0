//! Implements the `prefix` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use super::canonical_element;
use crate::PrimitiveValue;
use crate::Value;

/// Adds a prefix to each element of the input array of primitive values.
pub(crate) fn prefix(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 2);

    let prefix = context.coerce_argument(0, PrimitiveType::String);
    let prefix = prefix.unwrap_string();
    let elements = context
        .argument(1)
        .as_array()
        .expect("argument should be an array");

    Ok(Value::new_array(
        elements
            .iter()
            .map(|e| {
                let text = canonical_element(e).expect("element should be primitive");
                PrimitiveValue::new_string(format!("{prefix}{text}")).into()
            })
            .collect::<Vec<Value>>(),
    ))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::PrimitiveValue;
    use crate::Value;
    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn prefix() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "prefix('-i ', [1, 2])").unwrap(),
            Value::new_array(vec![
                PrimitiveValue::new_string("-i 1").into(),
                PrimitiveValue::new_string("-i 2").into(),
            ])
        );
    }
}
