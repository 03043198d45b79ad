//! ipinfo.io response types

use serde::Deserialize;
use serde_json::Value;

/// `/<ip>/json` body.
///
/// `country` is an ISO code on the free tier. `continent` only appears on some
/// plans and may be a string or a `{code, name}` object, hence the loose type.
/// Errors look like `{"status": 404, "error": {"title": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct IpinfoResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub continent: Option<Value>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
}
