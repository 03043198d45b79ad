//! Provider shared helpers

use std::time::Duration;

use reqwest::Client;

use crate::error::{GeoProviderError, Result};

// ============ HTTP Client ============

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build the HTTP client shared by every provider of a chain.
///
/// Only the connect phase is bounded here; the per-attempt budget is enforced
/// by the resolver around the whole lookup.
pub fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .user_agent(concat!("dnx/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GeoProviderError::NetworkError {
            provider: "http_client".to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ URL helpers ============

/// Join a base URL and a path, tolerating a trailing slash on the base.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode an IP (or any caller string) for use as a path segment.
pub(crate) fn encode_segment(ip: &str) -> String {
    urlencoding::encode(ip).into_owned()
}
