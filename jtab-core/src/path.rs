//! Dotted-path resolution into JSON documents

use serde_json::Value;

use crate::error::{JtabError, Result};

/// Resolve a dotted key path like `data.user.tasks` against a document.
///
/// An empty or whitespace-only path yields the document itself. Keys are
/// matched exactly and case-sensitively. There is no bracket or array-index
/// syntax: a segment applied to an array or scalar looks up nothing, so
/// array elements cannot be path-addressed.
///
/// Traversal fails with [`JtabError::PathNotFound`] naming the full
/// original path as soon as a null or absent value is reached while
/// segments remain to be applied. A missing *final* segment is not a
/// traversal failure: it resolves to `Ok(None)`, and the projection layer
/// reports the shape problem.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Result<Option<&'a Value>> {
    if path.trim().is_empty() {
        return Ok(Some(document));
    }

    let mut current = Some(document);
    for key in path.split('.') {
        match current {
            None | Some(Value::Null) => {
                return Err(JtabError::PathNotFound(path.to_string()));
            }
            Some(value) => current = value.get(key),
        }
    }

    Ok(current)
}

/// Mutable variant of [`resolve`], used when applying committed cell edits
/// back into the owning document.
pub fn resolve_mut<'a>(document: &'a mut Value, path: &str) -> Result<Option<&'a mut Value>> {
    if path.trim().is_empty() {
        return Ok(Some(document));
    }

    let mut current = Some(document);
    for key in path.split('.') {
        match current {
            None | Some(Value::Null) => {
                return Err(JtabError::PathNotFound(path.to_string()));
            }
            Some(value) => current = value.get_mut(key),
        }
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_top_level_key() {
        let doc = json!({"items": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]});
        let resolved = resolve(&doc, "items").unwrap().unwrap();
        assert_eq!(resolved, &json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]));
    }

    #[test]
    fn test_resolve_nested_path() {
        let doc = json!({"data": {"user": {"tasks": [1, 2, 3]}}});
        let resolved = resolve(&doc, "data.user.tasks").unwrap().unwrap();
        assert_eq!(resolved, &json!([1, 2, 3]));
    }

    #[test]
    fn test_resolve_empty_path_returns_document() {
        let doc = json!([{"a": 1}]);
        assert_eq!(resolve(&doc, "").unwrap(), Some(&doc));
        assert_eq!(resolve(&doc, "   ").unwrap(), Some(&doc));
    }

    #[test]
    fn test_resolve_missing_intermediate_segment() {
        let doc = json!({"items": [{"a": 1}]});
        let err = resolve(&doc, "missing.items").unwrap_err();
        match err {
            JtabError::PathNotFound(path) => assert_eq!(path, "missing.items"),
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_null_intermediate_segment() {
        let doc = json!({"data": null});
        let err = resolve(&doc, "data.items").unwrap_err();
        match err {
            JtabError::PathNotFound(path) => assert_eq!(path, "data.items"),
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_missing_final_segment_is_absent_not_error() {
        let doc = json!({"data": {"other": 1}});
        assert_eq!(resolve(&doc, "data.items").unwrap(), None);
    }

    #[test]
    fn test_resolve_null_final_segment_is_value() {
        let doc = json!({"data": {"items": null}});
        assert_eq!(resolve(&doc, "data.items").unwrap(), Some(&Value::Null));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let doc = json!({"Items": [1]});
        assert_eq!(resolve(&doc, "items").unwrap(), None);
    }

    #[test]
    fn test_resolve_does_not_index_arrays() {
        let doc = json!({"items": [10, 20, 30]});
        assert_eq!(resolve(&doc, "items.0").unwrap(), None);
    }

    #[test]
    fn test_resolve_scalar_intermediate_then_more_segments() {
        let doc = json!({"count": 5});
        let err = resolve(&doc, "count.value.deep").unwrap_err();
        match err {
            JtabError::PathNotFound(path) => assert_eq!(path, "count.value.deep"),
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_mut_allows_in_place_edit() {
        let mut doc = json!({"data": {"items": [{"a": 1}]}});
        let items = resolve_mut(&mut doc, "data.items").unwrap().unwrap();
        items[0]["a"] = json!("edited");
        assert_eq!(doc, json!({"data": {"items": [{"a": "edited"}]}}));
    }

    #[test]
    fn test_resolve_mut_mirrors_resolve_errors() {
        let mut doc = json!({"data": null});
        assert!(matches!(
            resolve_mut(&mut doc, "data.items"),
            Err(JtabError::PathNotFound(_))
        ));
        assert!(resolve_mut(&mut doc, "absent").unwrap().is_none());
    }
}
