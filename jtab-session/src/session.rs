//! The document session: one owner, explicit view state

use jtab_core::{canonical_text, resolve, resolve_mut, JtabError, Result};
use jtab_engine::{derive_columns, project, to_tsv, ProjectedRow, SortState};
use serde_json::Value;

use crate::edit::PendingEdit;

/// Owns the loaded document and every piece of view state derived from it.
///
/// The document is replaced wholesale on load and mutated only through
/// committed cell edits. Path, search term, and sort state are explicit
/// fields here; the projection is recomputed synchronously and fully from
/// them on every access, never cached or partially updated.
#[derive(Debug, Default)]
pub struct DocumentSession {
    document: Option<Value>,
    path: String,
    search_term: String,
    sort: SortState,
}

impl DocumentSession {
    /// Create an empty session with no document loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` as JSON and load it as the new document.
    ///
    /// On success the previous document is discarded and path, search term,
    /// and sort state reset to their defaults. On failure the session is
    /// untouched and the parser's message is carried verbatim in
    /// [`JtabError::MalformedDocument`].
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| JtabError::MalformedDocument(err.to_string()))?;
        self.load_value(value);
        Ok(())
    }

    /// Load an already-parsed document, e.g. one handed over by the relay.
    /// Resets path, search term, and sort state like [`Self::load_text`].
    pub fn load_value(&mut self, value: Value) {
        self.document = Some(value);
        self.path.clear();
        self.search_term.clear();
        self.sort = SortState::default();
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// The active dotted path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The active search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The active sort state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Point the session at a different location inside the document.
    /// Columns are re-derived on the next access.
    pub fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
    }

    /// Replace the search term. The empty string matches everything.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Apply a column-header activation to the sort state.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort.toggle(column);
    }

    /// The column set for the current document/path pairing, derived from
    /// the first row of the unfiltered resolved array.
    pub fn columns(&self) -> Result<Vec<String>> {
        Ok(derive_columns(self.resolved()?))
    }

    /// Recompute the visible row set from the current document, path,
    /// search term, and sort state.
    pub fn project(&self) -> Result<Vec<ProjectedRow>> {
        project(self.resolved()?, &self.search_term, &self.sort)
    }

    /// Serialize the current projection to tab-separated text.
    pub fn export_tsv(&self) -> Result<String> {
        let columns = self.columns()?;
        let rows = self.project()?;
        Ok(to_tsv(&rows, &columns))
    }

    /// The pretty-printed form of the whole document, for inspection and
    /// round-tripping back into a text editor.
    pub fn document_text(&self) -> Option<String> {
        self.document.as_ref().map(|document| {
            serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
        })
    }

    /// Candidate first path segments: the document's root object keys.
    /// Empty when the root is an array, a scalar, or nothing is loaded.
    pub fn path_suggestions(&self) -> Vec<String> {
        match &self.document {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Start editing the cell at `projection_index`/`column` in the current
    /// projection, snapshotting its canonical text as the draft.
    pub fn begin_edit(&self, projection_index: usize, column: &str) -> Result<PendingEdit> {
        let rows = self.project()?;
        Ok(PendingEdit::new(&rows, projection_index, column))
    }

    /// Commit a pending edit. Returns whether the document changed.
    ///
    /// The row's source position is re-resolved against a fresh projection
    /// immediately before applying, so a projection that moved since the
    /// edit began cannot misdirect the write. A draft equal to the cell's
    /// recomputed canonical text is a structural no-op, as is a projection
    /// index that no longer exists or a row that is not an object. The new
    /// value is always stored as raw text (no re-parsing), so a column may
    /// become mixed-typed afterwards; projection and sorting tolerate that.
    pub fn commit_edit(&mut self, edit: PendingEdit) -> Result<bool> {
        let rows = self.project()?;
        let (source_index, current_text) = match rows.get(edit.projection_index) {
            Some(row) => (row.source_index, canonical_text(row.cell(&edit.column))),
            None => return Ok(false),
        };
        if edit.draft == current_text {
            return Ok(false);
        }

        let document = match self.document.as_mut() {
            Some(document) => document,
            None => return Ok(false),
        };
        let target_rows = match resolve_mut(document, &self.path)? {
            Some(Value::Array(rows)) => rows,
            _ => return Ok(false),
        };
        let row = match target_rows.get_mut(source_index) {
            Some(Value::Object(map)) => map,
            _ => return Ok(false),
        };
        row.insert(edit.column, Value::String(edit.draft));
        Ok(true)
    }

    fn resolved(&self) -> Result<Option<&Value>> {
        match &self.document {
            Some(document) => resolve(document, &self.path),
            None => Ok(None),
        }
    }
}
