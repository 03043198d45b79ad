//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dnx_provider::GeoProviderError;

/// Fallback message when a failed analysis response carries no `error` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";
/// Message stored when the analysis API cannot be reached or answers garbage.
pub const CONNECT_FAILED: &str = "Failed to connect to API";
/// Message stored in a location slot when every provider failed.
pub const LOCATION_UNAVAILABLE: &str = "Location data not available";
/// Message stored in a location slot when the resolution itself broke down.
pub const LOCATION_FETCH_FAILED: &str = "Failed to fetch location data";
/// Validation message for input without an extension.
pub const MISSING_EXTENSION: &str =
    "Please enter a full domain name, including the extension (e.g., example.com, example.tn).";

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Input rejected before any network call
    #[error("{0}")]
    ValidationError(String),

    /// The analysis API answered with a non-success status
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// The analysis API could not be reached, or its answer could not be read
    #[error("{0}")]
    TransportError(String),

    /// Every geolocation provider of the chain failed
    #[error("Location data not available")]
    AllProvidersFailed,

    /// The resolution task ended without producing an outcome (panic, abort)
    #[error("Failed to fetch location data")]
    ResolutionAborted(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] GeoProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, remote service refusing), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::ServerError { .. } | Self::AllProvidersFailed => true,
            Self::Provider(e) => e.is_expected(),
            Self::TransportError(_) | Self::ResolutionAborted(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
