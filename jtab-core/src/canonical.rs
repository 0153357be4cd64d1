//! Canonical textual form for cell values

use serde_json::Value;

/// Produce the single deterministic string form of a cell value.
///
/// `None` stands for an absent key and renders as `undefined`; null renders
/// as `null`; objects and arrays render as pretty-printed JSON with 2-space
/// indent; every other scalar uses its default string conversion (strings
/// unquoted). The same form backs substring search, cell display, the edit
/// no-op comparison, and TSV export.
pub fn canonical_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(num)) => num.to_string(),
        Some(structured) => {
            serde_json::to_string_pretty(structured).unwrap_or_else(|_| structured.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_absent_and_null() {
        assert_eq!(canonical_text(None), "undefined");
        assert_eq!(canonical_text(Some(&Value::Null)), "null");
    }

    #[test]
    fn test_canonical_scalars() {
        assert_eq!(canonical_text(Some(&json!("plain"))), "plain");
        assert_eq!(canonical_text(Some(&json!(true))), "true");
        assert_eq!(canonical_text(Some(&json!(42))), "42");
        assert_eq!(canonical_text(Some(&json!(1.5))), "1.5");
    }

    #[test]
    fn test_canonical_object_pretty_prints_two_space() {
        let value = json!({"a": 1});
        assert_eq!(canonical_text(Some(&value)), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_canonical_array_pretty_prints() {
        let value = json!([1, 2]);
        assert_eq!(canonical_text(Some(&value)), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_canonical_string_is_unquoted() {
        assert_eq!(canonical_text(Some(&json!("with \"quotes\""))), "with \"quotes\"");
    }
}
