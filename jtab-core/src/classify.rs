//! Cell render-mode classification

use serde_json::Value;

/// Substrings whose presence flags a string cell as markup: heading,
/// bold/italic, code fence, HTML tag open, link bracket, inline code.
/// The list keeps its observed redundancies (`**` is covered by `*`,
/// ``` by `` ` ``) so the classification stays byte-for-byte predictable.
const MARKUP_MARKERS: [&str; 7] = ["#", "**", "*", "```", "<", "[", "`"];

/// How a cell value is rendered and how edits to it are parsed back.
///
/// Produced once by [`classify`] and consumed by a rendering function per
/// variant, instead of scattering type probes across render and edit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Non-null object or array, rendered as a fenced JSON code block.
    Structured,
    /// String containing markup markers, rendered through a markup formatter.
    MarkupText,
    /// Everything else, rendered verbatim with whitespace preserved.
    PlainText,
}

/// Classify a cell value into its render mode.
///
/// Only strings can classify as [`RenderMode::MarkupText`]; a number whose
/// textual form happens to contain a marker stays plain, and structured
/// values win regardless of their content.
pub fn classify(value: Option<&Value>) -> RenderMode {
    match value {
        Some(Value::Object(_)) | Some(Value::Array(_)) => RenderMode::Structured,
        Some(Value::String(text)) if contains_markup(text) => RenderMode::MarkupText,
        _ => RenderMode::PlainText,
    }
}

fn contains_markup(text: &str) -> bool {
    MARKUP_MARKERS.iter().any(|marker| text.contains(marker))
}
