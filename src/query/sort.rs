use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::history::LogEntry;

use super::date::parse_lenient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Result,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort parameters. The default (newest first) is what "clear filters" restores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl SortDirection {
    /// Turn an ascending ordering into the ordering for this direction.
    pub const fn apply(self, ascending: Ordering) -> Ordering {
        match self {
            Self::Asc => ascending,
            Self::Desc => ascending.reverse(),
        }
    }
}

/// A sort key or direction string that matched no variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSpecError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for ParseSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}' (expected {})",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for ParseSpecError {}

impl FromStr for SortKey {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "result" => Ok(Self::Result),
            _ => Err(ParseSpecError {
                field: "sort key",
                value: s.to_string(),
                expected: "date or result",
            }),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSpecError {
                field: "sort direction",
                value: s.to_string(),
                expected: "asc or desc",
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::Result => "result",
        })
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Build the ordering for `spec`. `Less` means the first entry is shown first.
///
/// Dates go through the lenient parser, so malformed dates still order.
/// Results compare with `total_cmp`; an entry without a result sorts below
/// every numeric result.
pub fn build_comparator(spec: SortSpec) -> impl Fn(&LogEntry, &LogEntry) -> Ordering {
    move |a, b| {
        let ascending = match spec.key {
            SortKey::Date => parse_lenient(a.date_str()).cmp(&parse_lenient(b.date_str())),
            SortKey::Result => compare_results(a.result, b.result),
        };
        spec.direction.apply(ascending)
    }
}

fn compare_results(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}
