pub mod client;
pub mod http;

/// Fallback message when the service rejects a request without saying why.
pub const GENERIC_SERVICE_ERROR: &str = "Error in operation";

/// A non-2xx reply from the calculator service, with the reason it gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub status: u16,
    pub message: String,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {})", self.message, self.status)
    }
}

impl std::error::Error for ServiceError {}

/// Consume a response and return it if the status is successful.
///
/// Error bodies carry the reason as `error` (calculator validation) or
/// `detail` (framework-level rejections); either becomes the
/// [`ServiceError`] message.
///
/// # Errors
///
/// Returns a [`ServiceError`] for any non-2xx status code.
pub(crate) fn require_success(
    resp: reqwest::blocking::Response,
) -> anyhow::Result<reqwest::blocking::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp
        .text()
        .map_err(|e| anyhow::anyhow!("could not read response body: {e}"))?;
    Err(ServiceError {
        status: status.as_u16(),
        message: error_message(&text),
    }
    .into())
}

fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return GENERIC_SERVICE_ERROR.to_string();
    };
    ["error", "detail"]
        .iter()
        .find_map(|k| value.get(*k).and_then(serde_json::Value::as_str))
        .map_or_else(|| GENERIC_SERVICE_ERROR.to_string(), ToString::to_string)
}
