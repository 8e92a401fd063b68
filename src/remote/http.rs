/// Default request timeout for calculator and history calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Build a blocking HTTP client with the given request timeout.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed (e.g., invalid TLS config).
pub fn build_client(timeout_secs: u64) -> anyhow::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(format!("calc-history/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow::anyhow!("could not build HTTP client: {e}"))
}
