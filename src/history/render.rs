use crate::vocabulary::{canonicalize, symbol_for};

use super::types::LogEntry;

/// Render an entry as `3 + 4 = 7`.
pub fn operation_text(entry: &LogEntry) -> String {
    let separator = format!(" {} ", symbol_for(entry.operation_str()));
    let operands = entry
        .operands
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(separator.as_str());
    let result = entry.result.map_or_else(|| "?".to_string(), |r| r.to_string());
    if operands.is_empty() {
        format!("= {result}")
    } else {
        format!("{operands} = {result}")
    }
}

/// Normalized operation-type label, `unknown` when the entry has none.
pub fn operation_label(entry: &LogEntry) -> String {
    entry
        .operation
        .as_deref()
        .map_or_else(|| "unknown".to_string(), |op| canonicalize(op).to_string())
}
