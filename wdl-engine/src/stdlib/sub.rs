//! Implements the `sub` function from the WDL standard library.

use regex::Regex;
use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::invalid_regex;

/// Replaces all occurrences of a regular expression pattern in the input
/// with the replacement string.
pub(crate) fn sub(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(context.arguments.len() == 3);

    let input = context.coerce_argument(0, PrimitiveType::String);
    let input: &str = input.unwrap_string();
    let pattern = context.coerce_argument(1, PrimitiveType::String);
    let pattern: &str = pattern.unwrap_string();
    let replacement = context.coerce_argument(2, PrimitiveType::String);
    let replacement: &str = replacement.unwrap_string();

    let regex =
        Regex::new(pattern).map_err(|e| invalid_regex(&e, context.arguments[1].span))?;
    Ok(PrimitiveValue::new_string(regex.replace_all(input, replacement)).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn sub() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "sub('chr1 chr2', 'chr', 'c')")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "c1 c2"
        );
        assert_eq!(
            eval_expr(&env, "sub('aaa', 'a+', 'b')")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "b"
        );
        assert!(eval_expr(&env, "sub('x', '(', 'y')").is_err());
    }
}
