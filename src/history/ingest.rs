use anyhow::Context as _;
use serde_json::{Map, Value};

use super::types::LogEntry;

/// Parse the body of the history endpoint into log entries.
///
/// Accepts `{"history": [...]}` or a bare array. Individual entries are never
/// rejected: unknown or mistyped fields are simply left absent.
///
/// # Errors
///
/// Returns an error if the body is not JSON or has neither shape.
pub fn parse_history_payload(body: &str) -> anyhow::Result<Vec<LogEntry>> {
    let value: Value = serde_json::from_str(body).context("history payload is not valid JSON")?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("history")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow::anyhow!("history payload has no 'history' array"))?,
        _ => anyhow::bail!("history payload must be an object or an array"),
    };

    let entries: Vec<LogEntry> = items
        .iter()
        .filter_map(Value::as_object)
        .map(entry_from_object)
        .collect();
    if entries.len() != items.len() {
        tracing::debug!(
            skipped = items.len() - entries.len(),
            "ignored non-object history items"
        );
    }
    Ok(entries)
}

/// Shape one raw record, following the service's field-name fallbacks.
pub fn entry_from_object(obj: &Map<String, Value>) -> LogEntry {
    LogEntry {
        operation: first_present(obj, &["operation", "operacion"]).and_then(scalar_string),
        operands: operands_from(obj),
        result: first_present(obj, &["result", "resultado"]).and_then(result_value),
        date: obj.get("date").and_then(scalar_string),
    }
}

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn operands_from(obj: &Map<String, Value>) -> Vec<f64> {
    if let Some(list) = first_present(obj, &["numbers", "numeros", "operandos"]) {
        return list
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();
    }
    ["a", "b"]
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_f64))
        .collect()
}

// Batch records were stored with the whole `{operation, result}` reply as
// their result, so look one level down for the number.
fn result_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::Object(inner) => inner.get("result").and_then(Value::as_f64),
        _ => None,
    }
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
