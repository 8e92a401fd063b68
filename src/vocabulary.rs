use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder glyph shown for operations the vocabulary does not recognise.
pub const UNKNOWN_SYMBOL: &str = "?";

/// The four arithmetic kinds the service performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalOperation {
    Sum,
    Subtract,
    Multiply,
    Divide,
}

impl CanonicalOperation {
    pub const ALL: [Self; 4] = [Self::Sum, Self::Subtract, Self::Multiply, Self::Divide];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Display glyph used when rendering `a + b = c` style text.
    pub fn symbol(self) -> &'static str {
        GLYPHS
            .iter()
            .find(|(op, _)| *op == self)
            .map_or(UNKNOWN_SYMBOL, |(_, glyph)| *glyph)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sum => "Sum",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }
}

impl fmt::Display for CanonicalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown operation '{}' (expected one of: sum, subtract, multiply, divide)",
            self.0
        )
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for CanonicalOperation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonicalize(s) {
            Operation::Known(op) => Ok(op),
            Operation::Unrecognized(raw) => Err(UnknownOperation(raw)),
        }
    }
}

/// Every raw spelling the service is known to emit, mapped to its canonical kind.
///
/// Covers the current English names, the endpoint and batch spellings
/// (`substract`, `sub`, `mul`, `div`) and the older Spanish records.
const ALIASES: &[(&str, CanonicalOperation)] = &[
    ("sum", CanonicalOperation::Sum),
    ("suma", CanonicalOperation::Sum),
    ("subtract", CanonicalOperation::Subtract),
    ("substract", CanonicalOperation::Subtract),
    ("sub", CanonicalOperation::Subtract),
    ("resta", CanonicalOperation::Subtract),
    ("multiply", CanonicalOperation::Multiply),
    ("multiplication", CanonicalOperation::Multiply),
    ("mul", CanonicalOperation::Multiply),
    ("multiplicacion", CanonicalOperation::Multiply),
    ("multiplicación", CanonicalOperation::Multiply),
    ("divide", CanonicalOperation::Divide),
    ("division", CanonicalOperation::Divide),
    ("div", CanonicalOperation::Divide),
    ("división", CanonicalOperation::Divide),
];

const GLYPHS: &[(CanonicalOperation, &str)] = &[
    (CanonicalOperation::Sum, "+"),
    (CanonicalOperation::Subtract, "-"),
    (CanonicalOperation::Multiply, "\u{d7}"),
    (CanonicalOperation::Divide, "\u{f7}"),
];

/// An operation identifier after canonicalization.
///
/// Unrecognized identifiers pass through untouched so that history entries
/// with unexpected spellings are still shown, just with a placeholder glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Known(CanonicalOperation),
    Unrecognized(String),
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(op) => op.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    pub const fn canonical(&self) -> Option<CanonicalOperation> {
        match self {
            Self::Known(op) => Some(*op),
            Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw identifier to its canonical operation, or pass it through.
///
/// Matching is exact after trimming surrounding whitespace.
pub fn canonicalize(raw: &str) -> Operation {
    let trimmed = raw.trim();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map_or_else(
            || Operation::Unrecognized(raw.to_string()),
            |(_, op)| Operation::Known(*op),
        )
}

/// Display glyph for any raw identifier; `?` when it is not recognised.
pub fn symbol_for(identifier: &str) -> &'static str {
    canonicalize(identifier)
        .canonical()
        .map_or(UNKNOWN_SYMBOL, CanonicalOperation::symbol)
}

/// All raw spellings that canonicalize to `op`, canonical spelling first.
pub fn aliases_for(op: CanonicalOperation) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|(_, target)| *target == op)
        .map(|(alias, _)| *alias)
        .collect()
}

/// Check the alias and glyph tables for gaps.
///
/// Every canonical operation must map to itself and own a glyph, and no alias
/// may be listed twice.
///
/// # Errors
///
/// Returns an error naming the first inconsistency found.
pub fn validate_tables() -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for (alias, _) in ALIASES {
        if !seen.insert(*alias) {
            anyhow::bail!("alias '{alias}' is listed more than once");
        }
    }
    for op in CanonicalOperation::ALL {
        if canonicalize(op.as_str()) != Operation::Known(op) {
            anyhow::bail!("canonical name '{op}' does not map to itself");
        }
        if !GLYPHS.iter().any(|(g, _)| *g == op) {
            anyhow::bail!("no display glyph for '{op}'");
        }
    }
    Ok(())
}
