//! ip-api.com `GeoProvider` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{encode_segment, join_url};
use crate::traits::{GeoProvider, ProviderErrorMapper};
use crate::types::{GeoLocation, ProviderMetadata, ProviderType};

use super::{DEFAULT_RELAY, IP_API_BASE, IP_API_FIELDS, IpApiProvider, IpApiResponse};

impl ProviderErrorMapper for IpApiProvider {
    fn provider_name(&self) -> &'static str {
        ProviderType::IpApi.as_str()
    }
}

impl IpApiProvider {
    /// Full request URL, relay prefix included.
    pub(crate) fn request_url(&self, ip: &str) -> String {
        let target = format!(
            "{}?fields={IP_API_FIELDS}",
            join_url(&self.base_url, &format!("json/{}", encode_segment(ip)))
        );
        match &self.relay_url {
            Some(relay) => format!("{}/{target}", relay.trim_end_matches('/')),
            None => target,
        }
    }

    pub(crate) fn to_location(resp: IpApiResponse) -> GeoLocation {
        GeoLocation {
            continent: resp.continent,
            country: resp.country,
            city: resp.city,
            isp: resp.isp,
            org: resp.org,
        }
    }
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    fn id(&self) -> &'static str {
        ProviderType::IpApi.as_str()
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::IpApi,
            name: "ip-api.com".to_string(),
            description: "IP geolocation with explicit success status and separate ISP/organisation fields".to_string(),
            default_base_url: IP_API_BASE.to_string(),
            default_relay_url: Some(DEFAULT_RELAY.to_string()),
        }
    }

    /// Success is decided by the body's `status` alone; the HTTP status of the
    /// relay is not consulted.
    async fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        let url = self.request_url(ip);
        let (_status, body) = HttpUtils::execute_request(
            self.client.get(&url),
            self.provider_name(),
            "GET",
            &url,
        )
        .await?;

        let resp: IpApiResponse = HttpUtils::parse_json(&body, self.provider_name())?;
        if !resp.is_success() {
            return Err(self.lookup_failed(resp.message));
        }

        Ok(Self::to_location(resp))
    }
}
