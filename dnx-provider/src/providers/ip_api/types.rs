//! ip-api.com response types

use serde::Deserialize;

/// `/json/<ip>` body.
///
/// `status` is `"success"` or `"fail"`; on failure `message` says why
/// (`"reserved range"`, `"invalid query"`, ...).
#[derive(Debug, Deserialize)]
pub struct IpApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
}

impl IpApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}
