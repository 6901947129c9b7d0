//! Implements the `size` function from the WDL standard library.

use wdl_analysis::types::PrimitiveType;
use wdl_ast::Diagnostic;
use wdl_ast::Span;

use super::CallContext;
use crate::PrimitiveValue;
use crate::Value;
use crate::diagnostics::function_call_failed;
use crate::io::FileSource;

/// The name of the function defined in this file for use in diagnostics.
const FUNCTION_NAME: &str = "size";

/// Parses a storage unit into its size in bytes.
fn unit_in_bytes(unit: &str) -> Option<f64> {
    match unit.to_ascii_uppercase().as_str() {
        "B" => Some(1.0),
        "KB" | "K" => Some(1e3),
        "MB" | "M" => Some(1e6),
        "GB" | "G" => Some(1e9),
        "TB" | "T" => Some(1e12),
        "KIB" | "KI" => Some(1024.0),
        "MIB" | "MI" => Some(1024.0 * 1024.0),
        "GIB" | "GI" => Some(1024.0 * 1024.0 * 1024.0),
        "TIB" | "TI" => Some(1024.0 * 1024.0 * 1024.0 * 1024.0),
        _ => None,
    }
}

/// Sums the sizes in bytes of the files referenced by a value.
///
/// `None` values contribute zero.
fn total_size(
    value: &Value,
    file_source: &dyn FileSource,
    call_site: Span,
) -> Result<f64, Diagnostic> {
    match value {
        Value::None => Ok(0.0),
        Value::Primitive(v) => {
            let path = v
                .as_str()
                .expect("value should be a path");
            file_source.size(path).map(|s| s as f64).map_err(|e| {
                function_call_failed(FUNCTION_NAME, format!("{e:#}"), call_site)
            })
        }
        Value::Compound(_) => {
            let elements = value
                .as_array()
                .expect("value should be an array");
            let mut total = 0.0;
            for element in elements {
                total += total_size(element, file_source, call_site)?;
            }
            Ok(total)
        }
    }
}

/// Returns the size of a file (or of all files in an array), in the given
/// storage unit.
///
/// The unit defaults to bytes.
pub(crate) fn size(context: CallContext<'_>) -> Result<Value, Diagnostic> {
    debug_assert!(!context.arguments.is_empty() && context.arguments.len() <= 2);

    let unit = if context.arguments.len() == 2 {
        let unit = context.coerce_argument(1, PrimitiveType::String);
        let unit: &str = unit.unwrap_string();
        unit_in_bytes(unit).ok_or_else(|| {
            function_call_failed(
                FUNCTION_NAME,
                format!("invalid storage unit `{unit}`"),
                context.call_site,
            )
        })?
    } else {
        1.0
    };

    let total = total_size(context.argument(0), context.file_source(), context.call_site)?;
    Ok(PrimitiveValue::from(total / unit).into())
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::stdlib::test::TestEnv;
    use crate::stdlib::test::eval_expr;

    #[test]
    fn size() {
        let mut env = TestEnv::default();
        env.write_file("foo", "0123456789");
        env.insert_name("file", crate::PrimitiveValue::new_file("foo"));

        assert_relative_eq!(eval_expr(&env, "size(file)").unwrap().unwrap_float(), 10.0);
        assert_relative_eq!(
            eval_expr(&env, "size(file, 'KB')").unwrap().unwrap_float(),
            0.01
        );
        assert_relative_eq!(
            eval_expr(&env, "size([file, file])").unwrap().unwrap_float(),
            20.0
        );
        assert_relative_eq!(eval_expr(&env, "size(None)").unwrap().unwrap_float(), 0.0);
        assert!(eval_expr(&env, "size(file, 'XB')").is_err());
    }
}
