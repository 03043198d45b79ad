//! ipinfo.io `GeoProvider` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success_status};
use crate::providers::common::{encode_segment, join_url};
use crate::traits::{GeoProvider, ProviderErrorMapper};
use crate::types::{GeoLocation, ProviderMetadata, ProviderType};
use crate::utils::{error_message, is_truthy, label_from_value};

use super::{IPINFO_BASE, IpinfoProvider, IpinfoResponse};

impl ProviderErrorMapper for IpinfoProvider {
    fn provider_name(&self) -> &'static str {
        ProviderType::Ipinfo.as_str()
    }
}

impl IpinfoProvider {
    /// `org` mirrors into `isp`, same convention as ipapi.co.
    pub(crate) fn to_location(resp: IpinfoResponse) -> GeoLocation {
        GeoLocation {
            continent: label_from_value(resp.continent.as_ref()),
            country: resp.country,
            city: resp.city,
            isp: resp.org.clone(),
            org: resp.org,
        }
    }
}

#[async_trait]
impl GeoProvider for IpinfoProvider {
    fn id(&self) -> &'static str {
        ProviderType::Ipinfo.as_str()
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Ipinfo,
            name: "ipinfo.io".to_string(),
            description: "IP geolocation returning country code, city and AS organisation".to_string(),
            default_base_url: IPINFO_BASE.to_string(),
            default_relay_url: None,
        }
    }

    async fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        let url = join_url(&self.base_url, &format!("{}/json", encode_segment(ip)));
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

        let value: serde_json::Value = HttpUtils::parse_json(&body, self.provider_name())?;
        if value.get("error").is_some_and(is_truthy) {
            return Err(self.lookup_failed(error_message(&value)));
        }

        let resp: IpinfoResponse =
            serde_json::from_value(value).map_err(|e| self.parse_error(e))?;
        Ok(Self::to_location(resp))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn maps_free_tier_body() {
        let resp: IpinfoResponse = serde_json::from_str(
            r#"{"ip":"8.8.8.8","hostname":"dns.google","city":"Mountain View","region":"California","country":"US","org":"AS15169 Google LLC"}"#,
        )
        .unwrap();
        let loc = IpinfoProvider::to_location(resp);
        assert_eq!(loc.continent, None);
        assert_eq!(loc.country.as_deref(), Some("US"));
        assert_eq!(loc.city.as_deref(), Some("Mountain View"));
        assert_eq!(loc.isp.as_deref(), Some("AS15169 Google LLC"));
        assert_eq!(loc.org.as_deref(), Some("AS15169 Google LLC"));
    }

    #[test]
    fn maps_object_continent() {
        let resp: IpinfoResponse = serde_json::from_str(
            r#"{"country":"TN","continent":{"code":"AF","name":"Africa"}}"#,
        )
        .unwrap();
        let loc = IpinfoProvider::to_location(resp);
        assert_eq!(loc.continent.as_deref(), Some("Africa"));
    }
}
