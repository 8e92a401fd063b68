use serde::{Deserialize, Serialize};

/// One operation record as received from the history service.
///
/// Every field is optional because the upstream format is not versioned.
/// Legacy operand shapes are folded into `operands` during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub operation: Option<String>,
    #[serde(rename = "numbers", default)]
    pub operands: Vec<f64>,
    pub result: Option<f64>,
    pub date: Option<String>,
}

impl LogEntry {
    /// Raw operation identifier, empty when absent.
    pub fn operation_str(&self) -> &str {
        self.operation.as_deref().unwrap_or_default()
    }

    /// Raw date string, empty when absent.
    pub fn date_str(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }
}
