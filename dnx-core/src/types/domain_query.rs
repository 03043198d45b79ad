//! Domain analysis result as returned by the remote API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::status::{DomainStatusKind, SslStatusKind};

/// Result of one domain analysis.
///
/// Wraps the API body exactly as received: nothing is renamed, dropped or
/// added, explicit `null`s included. Typed access goes through lenient
/// accessors, so a field with an unexpected type reads as absent (or as its
/// JSON text) instead of failing the whole result.
///
/// Known keys: `domain`, `status`, `ip_address`, `domain_status`, `A`, `MX`,
/// `SPF`, `DKIM`, `DMARC`, `reverse_dns`, `registration_date`,
/// `registrar_name`, `nameservers`, `registrant`, `admin_contact`, `ssl`,
/// `error`. When `error` is set the other fields are not meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainQueryResult {
    body: Map<String, Value>,
}

/// Certificate details read from the nested `ssl` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SslInfo {
    pub status: String,
    pub issuer: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub days_until_expiry: Option<f64>,
    pub error: Option<String>,
}

impl SslInfo {
    fn from_object(ssl: &Map<String, Value>) -> Self {
        Self {
            status: text(ssl.get("status")).unwrap_or_default(),
            issuer: text(ssl.get("issuer")),
            valid_from: text(ssl.get("valid_from")),
            valid_until: text(ssl.get("valid_until")),
            days_until_expiry: ssl.get("days_until_expiry").and_then(number),
            error: text(ssl.get("error")),
        }
    }

    pub fn status_kind(&self) -> SslStatusKind {
        SslStatusKind::parse(&self.status)
    }
}

/// Display text of a scalar-ish field: strings as-is, numbers and booleans
/// formatted, objects and arrays as compact JSON. `null` and `""` are absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A record list: arrays element-wise, a lone string as a one-item list.
fn list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|item| text(Some(item))).collect(),
        Some(single) => text(Some(single)).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Numeric field, also accepting numeric strings.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl DomainQueryResult {
    /// Wrap a parsed API body unchanged.
    #[must_use]
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self { body }
    }

    /// Error-shaped result: only `domain`, `status = "Error"` and `error` are set.
    pub fn failure(domain: impl Into<String>, error: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert("domain".to_string(), Value::String(domain.into()));
        body.insert("status".to_string(), Value::String("Error".to_string()));
        body.insert("error".to_string(), Value::String(error.into()));
        Self { body }
    }

    /// The body as received.
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Any member, raw.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// Text of a member (see the type docs for the leniency rules).
    pub fn text(&self, key: &str) -> Option<String> {
        text(self.body.get(key))
    }

    /// Record list of a member; empty when absent or `null`.
    pub fn records(&self, key: &str) -> Vec<String> {
        list(self.body.get(key))
    }

    /// Queried domain; empty when the API did not echo it.
    pub fn domain(&self) -> String {
        self.text("domain").unwrap_or_default()
    }

    pub fn status(&self) -> String {
        self.text("status").unwrap_or_default()
    }

    pub fn error(&self) -> Option<String> {
        self.text("error")
    }

    pub fn ip_address(&self) -> Option<String> {
        self.text("ip_address")
    }

    pub fn a_records(&self) -> Vec<String> {
        self.records("A")
    }

    pub fn ssl(&self) -> Option<SslInfo> {
        self.body
            .get("ssl")
            .and_then(Value::as_object)
            .map(SslInfo::from_object)
    }

    pub fn status_kind(&self) -> DomainStatusKind {
        DomainStatusKind::parse(&self.status())
    }

    /// Whether this result reports a failure (explicit `error` or an error status).
    pub fn is_error(&self) -> bool {
        self.error().is_some() || self.status_kind() == DomainStatusKind::Error
    }

    /// Whether DNS/SSL sections apply: not for errors and not for available domains.
    pub fn shows_infrastructure(&self) -> bool {
        !self.is_error() && self.status_kind() != DomainStatusKind::Available
    }

    /// Every IP present in the result: `ip_address` first, then `A` records.
    ///
    /// Duplicates and empty strings are dropped; order is preserved.
    pub fn ip_addresses(&self) -> Vec<String> {
        if self.is_error() {
            return Vec::new();
        }
        let mut ips: Vec<String> = Vec::new();
        for ip in self.ip_address().into_iter().chain(self.a_records()) {
            let ip = ip.trim();
            if !ip.is_empty() && !ips.iter().any(|known| known == ip) {
                ips.push(ip.to_string());
            }
        }
        ips
    }

    /// Whether any of SPF, DKIM or DMARC carries a record.
    pub fn has_email_auth_records(&self) -> bool {
        ["SPF", "DKIM", "DMARC"]
            .into_iter()
            .any(|key| !self.records(key).is_empty())
    }

    /// `domain_status` tokens with known values relabelled.
    pub fn formatted_domain_status(&self) -> Vec<String> {
        self.records("domain_status")
            .iter()
            .map(|token| DomainStatusKind::parse(token).label().to_string())
            .collect()
    }
}
