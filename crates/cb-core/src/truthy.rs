//! JavaScript-style truthiness over JSON values.
//!
//! The form layer marks errors and flags with arbitrary JSON values
//! (`"error"`, `{ "message": .. }`, `true`). Anything that is not null,
//! false, zero, or the empty string counts as set.

use serde_json::Value;

/// Returns whether `value` would be truthy in the form layer.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
    }

    #[test]
    fn test_truthy_values() {
        for v in [json!(true), json!(1), json!(-2.5), json!("error"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }
}
