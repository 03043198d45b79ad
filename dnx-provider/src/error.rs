use serde::{Deserialize, Serialize};

/// Unified error type for all geolocation provider lookups.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// A provider error never reaches the end user on its own: the resolver treats every
/// variant as "this provider failed, try the next one".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum GeoProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, relay down, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provider throttled the request (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if the provider sent `Retry-After`.
        retry_after: Option<u64>,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// The provider answered with a non-success HTTP status.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, if any.
        raw_message: Option<String>,
    },

    /// The body parsed, but carried the provider's failure indicator
    /// (`error` field, `status: "fail"`, ...).
    LookupFailed {
        /// Provider that produced the error.
        provider: String,
        /// Reason reported by the provider, if any.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's response body.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl GeoProviderError {
    /// Provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::HttpStatus { provider, .. }
            | Self::LookupFailed { provider, .. }
            | Self::ParseError { provider, .. } => provider,
        }
    }

    /// Whether this is an expected failure (reserved range, quota, unknown IP),
    /// used to pick the log level.
    ///
    /// Returns `true` for `warn`-level failures, `false` for `error`-level ones.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::HttpStatus { .. } | Self::LookupFailed { .. }
        )
    }
}

impl std::fmt::Display for GeoProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::HttpStatus {
                provider,
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] HTTP {status}: {msg}")
                } else {
                    write!(f, "[{provider}] HTTP {status}")
                }
            }
            Self::LookupFailed {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Lookup failed: {msg}")
                } else {
                    write!(f, "[{provider}] Lookup failed")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for GeoProviderError {}

/// Convenience type alias for `Result<T, GeoProviderError>`.
pub type Result<T> = std::result::Result<T, GeoProviderError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = GeoProviderError::NetworkError {
            provider: "ipapi_co".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[ipapi_co] Network error: connection refused");
    }

    #[test]
    fn display_http_status_with_message() {
        let e = GeoProviderError::HttpStatus {
            provider: "ipinfo".to_string(),
            status: 403,
            raw_message: Some("Forbidden".to_string()),
        };
        assert_eq!(e.to_string(), "[ipinfo] HTTP 403: Forbidden");
    }

    #[test]
    fn display_lookup_failed_without_message() {
        let e = GeoProviderError::LookupFailed {
            provider: "ip_api".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[ip_api] Lookup failed");
    }

    #[test]
    fn display_rate_limited_with_retry_after() {
        let e = GeoProviderError::RateLimited {
            provider: "ipapi_co".to_string(),
            retry_after: Some(60),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[ipapi_co] Rate limited (retry after 60s)");
    }

    #[test]
    fn provider_accessor() {
        let e = GeoProviderError::ParseError {
            provider: "ipinfo".to_string(),
            detail: "eof".to_string(),
        };
        assert_eq!(e.provider(), "ipinfo");
    }

    #[test]
    fn expected_classification() {
        let expected = GeoProviderError::LookupFailed {
            provider: "ip_api".to_string(),
            raw_message: Some("reserved range".to_string()),
        };
        let unexpected = GeoProviderError::Timeout {
            provider: "ip_api".to_string(),
            detail: "10s".to_string(),
        };
        assert!(expected.is_expected());
        assert!(!unexpected.is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = GeoProviderError::Timeout {
            provider: "ipinfo".to_string(),
            detail: "elapsed".to_string(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["provider"], "ipinfo");
    }
}
