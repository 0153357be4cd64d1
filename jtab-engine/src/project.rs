//! Filter/sort projection over a resolved JSON array

use jtab_core::{canonical_text, JtabError, Result};
use serde_json::Value;

use crate::compare::compare_cells;
use crate::sort::{SortDirection, SortState};

/// One visible row of the projection.
///
/// Rows have no persistent identity beyond their position in the resolved
/// array, so each projected row carries that source index along with a copy
/// of the row value. Edits are applied through the source index against a
/// fresh projection, never through a stale one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    /// Position of this row in the resolved (pre-filter) array.
    pub source_index: usize,
    /// Copy of the row value at that position.
    pub value: Value,
}

impl ProjectedRow {
    /// Look up a cell by column name; `None` when the row lacks the key or
    /// is not an object.
    pub fn cell(&self, column: &str) -> Option<&Value> {
        self.value.get(column)
    }
}

/// Derive the column set from the first row of the unfiltered array.
///
/// Columns are the first row's own keys in key order and stay stable for
/// the lifetime of a document/path pairing; filtering never re-derives
/// them. A first row that is not an object (or an absent/empty/non-array
/// value) yields no columns; rows lacking a key later render as missing,
/// not as an error.
pub fn derive_columns(resolved: Option<&Value>) -> Vec<String> {
    match resolved {
        Some(Value::Array(rows)) => match rows.first() {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Project the resolved value into the visible row set.
///
/// A non-array (including an absent value) fails with
/// [`JtabError::NotAnArray`]; an array of length zero fails with
/// [`JtabError::EmptyArray`] so callers can message "nothing to show"
/// differently from "wrong shape". Filtering keeps a row iff any of its
/// values' canonical text contains `search_term` case-insensitively (the
/// empty term keeps everything), and is applied before sorting. Sorting,
/// when a key is set, is a stable copy using [`compare_cells`] with the
/// direction negation applied after the base comparison; the document and
/// the pre-filter array are never mutated.
pub fn project(
    resolved: Option<&Value>,
    search_term: &str,
    sort: &SortState,
) -> Result<Vec<ProjectedRow>> {
    let rows = match resolved {
        Some(Value::Array(rows)) => rows,
        _ => return Err(JtabError::NotAnArray),
    };
    if rows.is_empty() {
        return Err(JtabError::EmptyArray);
    }

    let mut projected: Vec<ProjectedRow> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_search(row, search_term))
        .map(|(source_index, row)| ProjectedRow {
            source_index,
            value: row.clone(),
        })
        .collect();

    if let Some(key) = sort.key.as_deref() {
        projected.sort_by(|a, b| {
            let ordering = compare_cells(a.cell(key), b.cell(key));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    Ok(projected)
}

fn matches_search(row: &Value, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    match row {
        Value::Object(map) => map
            .values()
            .any(|value| canonical_text(Some(value)).to_lowercase().contains(&needle)),
        // Non-object rows expose no values, so only the empty term keeps them.
        _ => false,
    }
}
