//! Shared HTTP plumbing for providers
//!
//! Every provider builds its own `RequestBuilder` (URL shapes differ too much to
//! unify) and hands it to [`HttpUtils::execute_request`] for sending, logging
//! and body reading. Success predicates stay in each provider.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::GeoProviderError;
use crate::utils::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and body text.
    ///
    /// Transport failures map to `NetworkError` / `Timeout`, HTTP 429 maps to
    /// `RateLimited`. Every other status is returned to the caller, which decides
    /// what counts as success.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), GeoProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GeoProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                GeoProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(GeoProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body).filter(|b| !b.is_empty()),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| GeoProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, GeoProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::debug!("[{provider_name}] JSON parse failed: {e}");
            log::debug!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            GeoProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Whether an HTTP status code is in the 2xx range.
pub(crate) fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
