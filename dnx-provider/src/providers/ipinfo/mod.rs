//! ipinfo.io provider

mod provider;
mod types;

use reqwest::Client;

pub(crate) use types::IpinfoResponse;

pub(crate) const IPINFO_BASE: &str = "https://ipinfo.io";

/// ipinfo.io geolocation provider (`GET /<ip>/json`)
pub struct IpinfoProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl IpinfoProvider {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, IPINFO_BASE)
    }

    /// Point the provider at another host (mirrors, tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}
