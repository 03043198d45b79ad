//! ipapi.co response types

use serde::Deserialize;
use serde_json::Value;

/// `/<ip>/json/` body.
///
/// Failures come back as `{"ip": "...", "error": true, "reason": "..."}`,
/// sometimes with HTTP 200.
#[derive(Debug, Deserialize)]
pub struct IpapiCoResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub continent_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
}
