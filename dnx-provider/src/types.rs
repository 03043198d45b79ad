//! Public types shared by all geolocation providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which geolocation provider implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// ipapi.co (`/<ip>/json/`).
    IpapiCo,
    /// ip-api.com (`/json/<ip>`), reached through a CORS relay by default.
    IpApi,
    /// ipinfo.io (`/<ip>/json`).
    Ipinfo,
}

impl ProviderType {
    /// Default fallback order: ipapi.co, then ip-api.com, then ipinfo.io.
    pub const DEFAULT_CHAIN: [Self; 3] = [Self::IpapiCo, Self::IpApi, Self::Ipinfo];

    /// Stable identifier, also used as the `provider` field of errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IpapiCo => "ipapi_co",
            Self::IpApi => "ip_api",
            Self::Ipinfo => "ipinfo",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '.'], "_").as_str() {
            "ipapi_co" | "ipapi" => Ok(Self::IpapiCo),
            "ip_api" | "ip_api_com" => Ok(Self::IpApi),
            "ipinfo" | "ipinfo_io" => Ok(Self::Ipinfo),
            other => Err(format!("Unknown geolocation provider: {other}")),
        }
    }
}

// ============ Location Types ============

/// Location data normalized from any provider's response.
///
/// Every provider maps its own body shape into this struct; fields the
/// provider does not report stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Continent name or code, as reported.
    pub continent: Option<String>,
    /// Country name or code, as reported.
    pub country: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Internet service provider.
    pub isp: Option<String>,
    /// Organisation owning the address block.
    pub org: Option<String>,
}

impl GeoLocation {
    /// Whether no location field is populated.
    pub fn is_empty(&self) -> bool {
        self.continent.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.isp.is_none()
            && self.org.is_none()
    }
}

// ============ Metadata / Settings ============

/// Static information about a provider.
///
/// Obtain via [`GeoProvider::metadata()`](crate::GeoProvider::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Base URL used when none is configured.
    pub default_base_url: String,
    /// Relay prefix used when none is configured, `None` for direct providers.
    pub default_relay_url: Option<String>,
}

/// Per-provider settings used by [`create_provider`](crate::create_provider).
///
/// `base_url` and `relay_url` fall back to the provider defaults when `None`.
/// An empty `relay_url` disables the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Which provider to build.
    pub kind: ProviderType,
    /// Override of the API base URL (no trailing slash needed).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Override of the relay prefix (ip-api.com only).
    #[serde(default)]
    pub relay_url: Option<String>,
}

impl ProviderSettings {
    /// Settings with every value left at the provider default.
    pub fn new(kind: ProviderType) -> Self {
        Self {
            kind,
            base_url: None,
            relay_url: None,
        }
    }

    /// Default chain settings, in fallback order.
    pub fn default_chain() -> Vec<Self> {
        ProviderType::DEFAULT_CHAIN
            .iter()
            .map(|kind| Self::new(*kind))
            .collect()
    }
}
