use async_trait::async_trait;

use crate::error::{GeoProviderError, Result};
use crate::types::{GeoLocation, ProviderMetadata};

/// Error construction shortcuts (internal).
///
/// Each provider implements this so its errors carry a consistent `provider` tag.
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier.
    fn provider_name(&self) -> &'static str;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> GeoProviderError {
        GeoProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: the body reported a failed lookup.
    fn lookup_failed(&self, raw_message: Option<String>) -> GeoProviderError {
        GeoProviderError::LookupFailed {
            provider: self.provider_name().to_string(),
            raw_message,
        }
    }

    /// Shortcut: non-success HTTP status.
    fn http_status(&self, status: u16, raw_message: Option<String>) -> GeoProviderError {
        GeoProviderError::HttpStatus {
            provider: self.provider_name().to_string(),
            status,
            raw_message,
        }
    }
}

/// IP geolocation provider trait.
///
/// One lookup is one HTTP exchange: implementations never retry and never
/// fall back on their own. Fallback across providers is the caller's job.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Provider metadata (type-level, no instance needed).
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Look up the location of `ip`.
    ///
    /// `ip` is passed through as-is; providers do not validate its format.
    async fn lookup(&self, ip: &str) -> Result<GeoLocation>;
}
