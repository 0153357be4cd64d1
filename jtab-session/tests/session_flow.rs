//! End-to-end session flows: load, path, projection, export, edits

use jtab_core::JtabError;
use jtab_session::DocumentSession;
use serde_json::{json, Value};

fn session_with(document: Value, path: &str) -> DocumentSession {
    let mut session = DocumentSession::new();
    session.load_value(document);
    session.set_path(path);
    session
}

#[test]
fn nested_path_projects_rows_and_columns() {
    let session = session_with(
        json!({"items": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]}),
        "items",
    );
    assert_eq!(session.columns().unwrap(), vec!["a", "b"]);
    let rows = session.project().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value, json!({"a": 1, "b": "x"}));
}

#[test]
fn missing_path_names_the_full_path() {
    let session = session_with(json!({"items": []}), "missing.items");
    match session.project().unwrap_err() {
        JtabError::PathNotFound(path) => assert_eq!(path, "missing.items"),
        other => panic!("expected PathNotFound, got {:?}", other),
    }
}

#[test]
fn search_and_sort_compose_through_the_session() {
    let mut session = session_with(
        json!({"rows": [{"n": "box", "v": 2}, {"n": "fox", "v": 1}, {"n": "cat", "v": 3}]}),
        "rows",
    );
    session.set_search_term("ox");
    session.toggle_sort("v");
    let rows = session.project().unwrap();
    let names: Vec<&Value> = rows.iter().map(|row| &row.value["n"]).collect();
    assert_eq!(names, vec![&json!("fox"), &json!("box")]);
}

#[test]
fn export_tsv_uses_current_projection() {
    let mut session = session_with(
        json!({"rows": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]}),
        "rows",
    );
    session.set_search_term("y");
    assert_eq!(session.export_tsv().unwrap(), "a\tb\n2\ty");
}

#[test]
fn committed_edit_stores_raw_text() {
    let mut session = session_with(json!({"items": [{"a": 1, "b": "x"}]}), "items");
    let mut edit = session.begin_edit(0, "a").unwrap();
    assert_eq!(edit.original_text(), "1");
    edit.set_draft("not a number");
    assert!(session.commit_edit(edit).unwrap());
    assert_eq!(
        session.document().unwrap(),
        &json!({"items": [{"a": "not a number", "b": "x"}]})
    );
}

#[test]
fn edit_with_unchanged_text_is_a_structural_noop() {
    let mut session = session_with(
        json!({"items": [{"a": {"k": 1}}, {"a": 2}]}),
        "items",
    );
    let before = session.document().unwrap().clone();

    // Structured cell: the draft equals the recomputed canonical text.
    let edit = session.begin_edit(0, "a").unwrap();
    assert!(!session.commit_edit(edit).unwrap());
    assert_eq!(session.document().unwrap(), &before);

    // Scalar cell round-tripped through its textual form.
    let mut edit = session.begin_edit(1, "a").unwrap();
    edit.set_draft("2");
    assert!(!session.commit_edit(edit).unwrap());
    assert_eq!(session.document().unwrap(), &before);
}

#[test]
fn cancelled_edit_never_touches_the_document() {
    let mut session = session_with(json!({"items": [{"a": 1}]}), "items");
    let before = session.document().unwrap().clone();
    let mut edit = session.begin_edit(0, "a").unwrap();
    edit.set_draft("discarded");
    edit.cancel();
    assert_eq!(session.document().unwrap(), &before);
}

#[test]
fn edit_targets_the_projected_row_not_the_source_position() {
    let mut session = session_with(
        json!({"items": [{"a": "keep"}, {"a": "target"}, {"a": "keep too"}]}),
        "items",
    );
    session.set_search_term("target");
    let mut edit = session.begin_edit(0, "a").unwrap();
    edit.set_draft("edited");
    assert!(session.commit_edit(edit).unwrap());
    assert_eq!(
        session.document().unwrap(),
        &json!({"items": [{"a": "keep"}, {"a": "edited"}, {"a": "keep too"}]})
    );
}

#[test]
fn edit_under_active_sort_follows_the_visible_order() {
    let mut session = session_with(
        json!({"items": [{"a": 3}, {"a": 1}, {"a": 2}]}),
        "items",
    );
    session.toggle_sort("a");
    // Visible order is 1, 2, 3; editing visible row 0 must hit source row 1.
    let mut edit = session.begin_edit(0, "a").unwrap();
    edit.set_draft("lowest");
    assert!(session.commit_edit(edit).unwrap());
    assert_eq!(
        session.document().unwrap(),
        &json!({"items": [{"a": 3}, {"a": "lowest"}, {"a": 2}]})
    );
}

#[test]
fn stale_projection_index_is_a_guarded_noop() {
    let mut session = session_with(json!({"items": [{"a": "only"}]}), "items");
    let mut edit = session.begin_edit(0, "a").unwrap();
    edit.set_draft("edited");
    // The projection shrinks to nothing before the commit lands.
    session.set_search_term("no such row");
    let before = session.document().unwrap().clone();
    assert!(!session.commit_edit(edit).unwrap());
    assert_eq!(session.document().unwrap(), &before);
}

#[test]
fn edited_column_may_become_mixed_typed() {
    let mut session = session_with(
        json!({"items": [{"a": 10}, {"a": 2}]}),
        "items",
    );
    let mut edit = session.begin_edit(0, "a").unwrap();
    edit.set_draft("010");
    assert!(session.commit_edit(edit).unwrap());

    // Sorting still works over the now mixed-typed column; the numeric
    // string keeps comparing relationally.
    session.toggle_sort("a");
    let rows = session.project().unwrap();
    let order: Vec<&Value> = rows.iter().map(|row| &row.value["a"]).collect();
    assert_eq!(order, vec![&json!(2), &json!("010")]);
}

#[test]
fn malformed_text_reports_parser_message_verbatim() {
    let mut session = DocumentSession::new();
    let parser_message = match serde_json::from_str::<Value>("[1, 2,") {
        Err(err) => err.to_string(),
        Ok(_) => panic!("fixture unexpectedly parsed"),
    };
    match session.load_text("[1, 2,").unwrap_err() {
        JtabError::MalformedDocument(msg) => assert_eq!(msg, parser_message),
        other => panic!("expected MalformedDocument, got {:?}", other),
    }
}
