//! Total ordering for cell values

use std::cmp::Ordering;

use jtab_core::canonical_text;
use serde_json::Value;

/// Compare two cell values without regard to sort direction.
///
/// The rules, applied in order: strictly equal values (including two absent
/// cells) are equal; a missing or null cell loses to any present value,
/// left operand checked first; two strings compare by Unicode code point;
/// anything else compares numerically where both sides coerce (numbers,
/// booleans as 0/1, numeric strings, empty string as 0), falling back to
/// canonical-text order so the comparator stays total for mixed-typed
/// columns.
///
/// Direction negation happens in the caller, *after* this function, so
/// with a descending sort the missing-loses rule inverts and null cells
/// surface first. That asymmetry is inherited behavior and pinned by tests;
/// downstream consumers may depend on it.
pub fn compare_cells(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    if left == right {
        return Ordering::Equal;
    }

    let left = match left {
        None | Some(Value::Null) => return Ordering::Greater,
        Some(value) => value,
    };
    let right = match right {
        None | Some(Value::Null) => return Ordering::Less,
        Some(value) => value,
    };

    if let (Value::String(a), Value::String(b)) = (left, right) {
        return a.cmp(b);
    }

    match (numeric(left), numeric(right)) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => canonical_text(Some(left)).cmp(&canonical_text(Some(right))),
    }
}

/// Numeric coercion for relational comparison. Objects and arrays never
/// coerce; strings must parse to a finite float, except the empty string
/// which coerces to zero.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(num) => num.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|parsed| parsed.is_finite())
            }
        }
        _ => None,
    }
}
