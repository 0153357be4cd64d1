//! Pending cell edits
//!
//! A cell is in its editing state exactly while a [`PendingEdit`] for it is
//! alive. Committing goes through
//! [`DocumentSession::commit_edit`](crate::session::DocumentSession::commit_edit);
//! cancelling (the Escape path) is simply dropping the edit, which can never
//! touch the document.

use jtab_core::canonical_text;
use jtab_engine::ProjectedRow;

/// A textual edit in progress against one cell of the current projection.
///
/// The edit is keyed by the cell's position in the projection snapshot it
/// was begun from, plus the column name. The original canonical text is
/// captured at begin time for display purposes only; the commit compares
/// against a freshly recomputed canonical text, so an edit that round-trips
/// to the same form is a no-op even if the projection moved underneath it.
#[derive(Debug, Clone)]
pub struct PendingEdit {
    pub(crate) projection_index: usize,
    pub(crate) column: String,
    pub(crate) original_text: String,
    pub(crate) draft: String,
}

impl PendingEdit {
    pub(crate) fn new(rows: &[ProjectedRow], projection_index: usize, column: &str) -> Self {
        let original_text = match rows.get(projection_index) {
            Some(row) => canonical_text(row.cell(column)),
            None => canonical_text(None),
        };
        Self {
            projection_index,
            column: column.to_string(),
            draft: original_text.clone(),
            original_text,
        }
    }

    /// The projection position this edit is keyed by.
    pub fn projection_index(&self) -> usize {
        self.projection_index
    }

    /// The column this edit is keyed by.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The cell's canonical text as captured when editing began.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Abandon the edit with no side effect. Equivalent to dropping it.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use jtab_engine::{project, SortState};
    use serde_json::json;

    #[test]
    fn test_pending_edit_snapshots_canonical_text() {
        let table = json!([{"a": {"k": 1}}]);
        let rows = project(Some(&table), "", &SortState::default()).unwrap();
        let edit = PendingEdit::new(&rows, 0, "a");
        assert_eq!(edit.original_text(), "{\n  \"k\": 1\n}");
        assert_eq!(edit.draft(), edit.original_text());
    }

    #[test]
    fn test_pending_edit_missing_cell_reads_undefined() {
        let table = json!([{"a": 1}]);
        let rows = project(Some(&table), "", &SortState::default()).unwrap();
        let edit = PendingEdit::new(&rows, 0, "b");
        assert_eq!(edit.original_text(), "undefined");
    }

    #[test]
    fn test_set_draft_replaces_text() {
        let table = json!([{"a": 1}]);
        let rows = project(Some(&table), "", &SortState::default()).unwrap();
        let mut edit = PendingEdit::new(&rows, 0, "a");
        edit.set_draft("new text");
        assert_eq!(edit.draft(), "new text");
        assert_eq!(edit.original_text(), "1");
    }
}
