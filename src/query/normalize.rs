use crate::history::LogEntry;
use crate::vocabulary::{Operation, canonicalize};

/// Canonical operation of an entry; an absent operation canonicalizes as `""`.
pub fn canonical_operation(entry: &LogEntry) -> Operation {
    canonicalize(entry.operation_str())
}

/// Two raw identifiers denote the same operation iff they canonicalize equally.
pub fn same_operation(a: &str, b: &str) -> bool {
    canonicalize(a) == canonicalize(b)
}

/// Materialized normalization: copies with the operation rewritten to its
/// canonical spelling. The query engine canonicalizes lazily instead.
pub fn normalize(entries: &[LogEntry]) -> Vec<LogEntry> {
    entries
        .iter()
        .map(|e| LogEntry {
            operation: e
                .operation
                .as_deref()
                .map(|op| canonicalize(op).as_str().to_string()),
            ..e.clone()
        })
        .collect()
}
