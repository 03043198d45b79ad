//! ip-api.com provider (reached through a CORS relay by default)

mod provider;
mod types;

use reqwest::Client;

pub(crate) use types::IpApiResponse;

pub(crate) const IP_API_BASE: &str = "http://ip-api.com";
/// Public relay prefix the target URL is appended to. It is rate limited and
/// may refuse requests; the chain falls through to the next provider when it does.
pub(crate) const DEFAULT_RELAY: &str = "https://cors-anywhere.herokuapp.com/";
/// Fields requested from ip-api.com (`status`/`message` carry the success marker).
pub(crate) const IP_API_FIELDS: &str = "status,message,continent,country,city,isp,org,query";

/// ip-api.com geolocation provider (`GET /json/<ip>?fields=...`)
pub struct IpApiProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    /// Relay prefix, `None` when requests go straight to `base_url`.
    pub(crate) relay_url: Option<String>,
}

impl IpApiProvider {
    pub fn new(client: Client) -> Self {
        Self::with_urls(client, IP_API_BASE, Some(DEFAULT_RELAY.to_string()))
    }

    /// Custom base and relay. An empty relay string disables the relay.
    pub fn with_urls(
        client: Client,
        base_url: impl Into<String>,
        relay_url: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            relay_url: relay_url.filter(|r| !r.trim().is_empty()),
        }
    }

    /// Build from optional overrides: `None` keeps the default base/relay,
    /// an empty relay disables it.
    pub fn from_settings(
        client: Client,
        base_url: Option<String>,
        relay_url: Option<String>,
    ) -> Self {
        Self::with_urls(
            client,
            base_url.unwrap_or_else(|| IP_API_BASE.to_string()),
            Some(relay_url.unwrap_or_else(|| DEFAULT_RELAY.to_string())),
        )
    }
}
