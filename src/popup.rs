//! Popup content formatting.
//!
//! Popups list every bound property of a feature as `key: value`, one per
//! line, in column order. Long values are truncated to keep popups compact.

use crate::results::Row;

/// Truncate a value to `limit` characters, appending an ellipsis when cut.
///
/// Values at or under the limit are returned verbatim. The limit counts
/// characters, not bytes.
pub fn truncate(value: &str, limit: usize) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Format the popup content for one row.
///
/// Columns absent from the row (unbound) are skipped.
pub fn popup_content(vars: &[String], row: &Row, limit: usize) -> String {
    let lines: Vec<String> = vars
        .iter()
        .filter_map(|name| {
            row.get(name)
                .map(|term| format!("{name}: {}", truncate(&term.value, limit)))
        })
        .collect();
    lines.join("\n")
}
