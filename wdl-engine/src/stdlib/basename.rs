//! Implements the `basename` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;

/// Returns the final component of a path, optionally removing a suffix.
pub(crate) fn basename(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(!context.arguments.is_empty() && context.arguments.len() <= 2);

    let path = context.coerce_argument(0, PrimitiveType::String);
    let path: &str = path.unwrap_string();
    let mut base = path.rsplit('/').next().unwrap_or(path);

    if context.arguments.len() == 2 {
        let suffix = context.coerce_argument(1, PrimitiveType::String);
        let suffix = suffix.unwrap_string().to_string();
        base = base.strip_suffix(suffix.as_str()).unwrap_or(base);
    }

    Ok(PrimitiveValue::new_string(base).into())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn basename() {
        let env = TestEnv::default();
        assert_eq!(
            eval_expr(&env, "basename('/path/to/file.txt')")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "file.txt"
        );
        assert_eq!(
            eval_expr(&env, "basename('/path/to/file.txt', '.txt')")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "file"
        );
        assert_eq!(
            eval_expr(&env, "basename('file.txt')")
                .unwrap()
                .unwrap_string()
                .as_ref(),
            "file.txt"
        );
    }
}
