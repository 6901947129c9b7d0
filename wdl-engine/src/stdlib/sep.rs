//! Implements the `sep` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use super::canonical_element;
use crate::PrimitiveValue;
use crate::Value;

/// Concatenates the stringified elements of an array with a separator.
pub(crate) fn sep(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 2);

    let separator = context.coerce_argument(0, PrimitiveType::String);
    let separator: &str = separator.unwrap_string();
    let elements = context
        .argument(1)
        .as_array()
        .expect("argument should be an array");

    let joined = elements
        .iter()
        .map(|e| canonical_element(e).expect("element should be primitive"))
        .collect::<Vec<_>>()
        .join(separator);
    Ok(PrimitiveValue::new_string(joined).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn sep() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "sep(', ', [1, 2, 3])")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "1, 2, 3"
        );
        assert_eq!(
            eval_expr(&env, "sep('-', ['a'])")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "a"
        );
    }
}
