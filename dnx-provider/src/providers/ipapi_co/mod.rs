//! ipapi.co provider

mod provider;
mod types;

use reqwest::Client;

pub(crate) use types::IpapiCoResponse;

pub(crate) const IPAPI_CO_BASE: &str = "https://ipapi.co";

/// ipapi.co geolocation provider (`GET /<ip>/json/`)
pub struct IpapiCoProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl IpapiCoProvider {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, IPAPI_CO_BASE)
    }

    /// Point the provider at another host (mirrors, tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}
