//! Per-IP geolocation cache slot

use serde::{Deserialize, Serialize};

use dnx_provider::GeoLocation;

/// State of one IP's location lookup.
///
/// Starts as [`loading`](Self::loading), then settles exactly once into either a
/// [`resolved`](Self::resolved) or a [`failed`](Self::failed) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocationEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// A provider chain is running for this IP
    pub loading: bool,
    /// Set when the chain settled without a location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Id of the provider that answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl GeoLocationEntry {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn resolved(provider: &str, location: GeoLocation) -> Self {
        Self {
            continent: location.continent,
            country: location.country,
            city: location.city,
            isp: location.isp,
            org: location.org,
            loading: false,
            error: None,
            provider: Some(provider.to_string()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// No chain is running anymore.
    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    pub fn is_failed(&self) -> bool {
        !self.loading && self.error.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        !self.loading && self.error.is_none()
    }

    /// Location fields only.
    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            continent: self.continent.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            isp: self.isp.clone(),
            org: self.org.clone(),
        }
    }
}
