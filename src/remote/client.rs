use serde::{Deserialize, Serialize};

use crate::history::{LogEntry, parse_history_payload};
use crate::vocabulary::CanonicalOperation;

use super::require_success;

/// Reply of a single calculator endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComputeResponse {
    #[serde(default)]
    pub numbers: Vec<f64>,
    pub result: f64,
}

/// One operation inside a batch request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub operation: CanonicalOperation,
    pub numbers: Vec<f64>,
}

#[derive(Serialize)]
struct BatchWireItem<'a> {
    operation: &'static str,
    numbers: &'a [f64],
}

/// Per-operation outcome of a batch call; failures do not abort the batch.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Failed {
        operation: String,
        error: String,
        #[serde(default)]
        operands: Vec<f64>,
    },
    Ok {
        operation: String,
        result: f64,
    },
}

/// Path segment of the single-operation endpoint. The service spells
/// subtraction `substract` in its routes.
pub const fn endpoint_path(op: CanonicalOperation) -> &'static str {
    match op {
        CanonicalOperation::Sum => "sum",
        CanonicalOperation::Subtract => "substract",
        CanonicalOperation::Multiply => "multiply",
        CanonicalOperation::Divide => "divide",
    }
}

/// Identifier the batch endpoint expects for each operation.
pub const fn batch_id(op: CanonicalOperation) -> &'static str {
    match op {
        CanonicalOperation::Sum => "sum",
        CanonicalOperation::Subtract => "sub",
        CanonicalOperation::Multiply => "mul",
        CanonicalOperation::Divide => "div",
    }
}

/// Fetch the full history snapshot via `GET /calculator/history`.
///
/// # Errors
///
/// Returns an error if the server is unreachable, returns a non-success
/// status, or the body is not a recognisable history payload.
pub fn fetch_history(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> anyhow::Result<Vec<LogEntry>> {
    let url = format!("{base_url}/calculator/history");
    let resp = client
        .get(&url)
        .send()
        .map_err(|e| anyhow::anyhow!("could not reach {url}: {e}"))?;
    let resp = require_success(resp)?;
    let body = resp
        .text()
        .map_err(|e| anyhow::anyhow!("could not read history response: {e}"))?;
    let entries = parse_history_payload(&body)?;
    tracing::debug!(count = entries.len(), %url, "fetched history snapshot");
    Ok(entries)
}

/// Ask the service to compute `op` over `operands`.
///
/// Operands are sent verbatim as repeated `numbers` query parameters.
///
/// # Errors
///
/// Returns a [`super::ServiceError`] when the service rejects the operands
/// (negative numbers, division by zero, too few numbers), or an error if the
/// server is unreachable or replies with an unexpected body.
pub fn compute(
    client: &reqwest::blocking::Client,
    base_url: &str,
    op: CanonicalOperation,
    operands: &[String],
) -> anyhow::Result<ComputeResponse> {
    let url = format!("{base_url}/calculator/{}", endpoint_path(op));
    let params: Vec<(&str, &str)> = operands.iter().map(|v| ("numbers", v.as_str())).collect();
    let resp = client
        .get(&url)
        .query(&params)
        .send()
        .map_err(|e| anyhow::anyhow!("could not reach {url}: {e}"))?;
    let resp = require_success(resp)?;
    let body = resp
        .json::<ComputeResponse>()
        .map_err(|e| anyhow::anyhow!("invalid response from server: {e}"))?;
    tracing::debug!(operation = %op, result = body.result, "computed");
    Ok(body)
}

/// Run several two-operand operations in one `POST /calculator/batch` call.
///
/// # Errors
///
/// Returns an error if the server is unreachable, returns a non-success
/// status, or the response body cannot be deserialized.
pub fn compute_batch(
    client: &reqwest::blocking::Client,
    base_url: &str,
    requests: &[BatchRequest],
) -> anyhow::Result<Vec<BatchOutcome>> {
    let url = format!("{base_url}/calculator/batch");
    let payload: Vec<BatchWireItem<'_>> = requests
        .iter()
        .map(|r| BatchWireItem {
            operation: batch_id(r.operation),
            numbers: &r.numbers,
        })
        .collect();
    let resp = client
        .post(&url)
        .json(&payload)
        .send()
        .map_err(|e| anyhow::anyhow!("could not reach {url}: {e}"))?;
    let resp = require_success(resp)?;
    resp.json::<Vec<BatchOutcome>>()
        .map_err(|e| anyhow::anyhow!("invalid response from server: {e}"))
}
