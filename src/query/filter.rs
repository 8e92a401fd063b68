use crate::history::LogEntry;
use crate::vocabulary::{Operation, canonicalize};

use super::normalize::canonical_operation;

/// Which operation kinds pass the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationSelector {
    #[default]
    All,
    Only(Operation),
}

impl OperationSelector {
    /// `"all"` selects everything; anything else is canonicalized.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "all" {
            Self::All
        } else {
            Self::Only(canonicalize(raw))
        }
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => canonical_operation(entry) == *selected,
        }
    }
}

/// Filter parameters held by the caller and passed fresh on every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub operation: OperationSelector,
    /// Literal, case-sensitive substring of the raw date; empty matches all.
    pub date_substring: String,
}

impl FilterSpec {
    pub fn new(operation: &str, date_substring: impl Into<String>) -> Self {
        Self {
            operation: OperationSelector::parse(operation),
            date_substring: date_substring.into(),
        }
    }

    /// True when the filter lets every entry through.
    pub fn is_identity(&self) -> bool {
        self.operation == OperationSelector::All && self.date_substring.is_empty()
    }

    fn date_matches(&self, entry: &LogEntry) -> bool {
        self.date_substring.is_empty() || entry.date_str().contains(self.date_substring.as_str())
    }
}

/// Build the combined predicate: operation axis AND date axis.
pub fn build_predicate(spec: &FilterSpec) -> impl Fn(&LogEntry) -> bool + '_ {
    move |entry| spec.operation.matches(entry) && spec.date_matches(entry)
}
