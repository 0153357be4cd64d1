//! Tab-separated export of a projection

use jtab_core::canonical_text;

use crate::project::ProjectedRow;

/// Serialize the projection to tab-separated text.
///
/// The header line is the columns joined by tabs; each data line joins the
/// per-column canonical cell text with tabs and newlines inside a field
/// replaced by single spaces, since both are structural delimiters. Lines
/// are newline-joined with no trailing newline.
///
/// Precondition: `rows` holds at least one row. Callers are expected not to
/// offer export for an empty projection; an empty slice degenerates to the
/// bare header line.
pub fn to_tsv(rows: &[ProjectedRow], columns: &[String]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join("\t"));

    for row in rows {
        let line = columns
            .iter()
            .map(|column| flatten_field(&canonical_text(row.cell(column))))
            .collect::<Vec<_>>()
            .join("\t");
        lines.push(line);
    }

    lines.join("\n")
}

fn flatten_field(text: &str) -> String {
    text.replace('\t', " ").replace('\n', " ")
}
