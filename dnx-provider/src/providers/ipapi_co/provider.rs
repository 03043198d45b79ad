//! ipapi.co `GeoProvider` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success_status};
use crate::providers::common::{encode_segment, join_url};
use crate::traits::{GeoProvider, ProviderErrorMapper};
use crate::types::{GeoLocation, ProviderMetadata, ProviderType};
use crate::utils::{error_message, is_truthy};

use super::{IPAPI_CO_BASE, IpapiCoProvider, IpapiCoResponse};

impl ProviderErrorMapper for IpapiCoProvider {
    fn provider_name(&self) -> &'static str {
        ProviderType::IpapiCo.as_str()
    }
}

impl IpapiCoProvider {
    /// Map an ipapi.co body into a `GeoLocation`.
    ///
    /// ipapi.co has no separate ISP field; `org` fills both `isp` and `org`.
    pub(crate) fn to_location(resp: IpapiCoResponse) -> GeoLocation {
        GeoLocation {
            continent: resp.continent_code,
            country: resp.country_name,
            city: resp.city,
            isp: resp.org.clone(),
            org: resp.org,
        }
    }
}

#[async_trait]
impl GeoProvider for IpapiCoProvider {
    fn id(&self) -> &'static str {
        ProviderType::IpapiCo.as_str()
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::IpapiCo,
            name: "ipapi.co".to_string(),
            description: "Free-tier IP geolocation API returning continent code, country, city and organisation".to_string(),
            default_base_url: IPAPI_CO_BASE.to_string(),
            default_relay_url: None,
        }
    }

    async fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        let url = join_url(&self.base_url, &format!("{}/json/", encode_segment(ip)));
        let (status, body) = HttpUtils::execute_request(
            self.client.get(&url),
            self.provider_name(),
            "GET",
            &url,
        )
        .await?;

        if !is_success_status(status) {
            let message = serde_json::from_str(&body)
                .ok()
                .and_then(|value| error_message(&value));
            return Err(self.http_status(status, message));
        }

        let resp: IpapiCoResponse = HttpUtils::parse_json(&body, self.provider_name())?;
        if resp.error.as_ref().is_some_and(is_truthy) {
            return Err(self.lookup_failed(resp.reason));
        }

        Ok(Self::to_location(resp))
    }
}
