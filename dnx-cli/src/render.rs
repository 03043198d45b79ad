//! Terminal and JSON rendering of results

use std::collections::BTreeMap;

use dnx_core::types::{
    DomainQueryResult, DomainStatusKind, ExpiryUrgency, GeoLocationEntry, ProviderMetadata,
    ProviderSettings, SslInfo,
};
use serde::Serialize;

/// `--json` output of `dnx analyze`
#[derive(Serialize)]
pub struct AnalyzeOutput<'a> {
    pub result: &'a DomainQueryResult,
    pub locations: BTreeMap<&'a str, &'a GeoLocationEntry>,
}

impl<'a> AnalyzeOutput<'a> {
    pub fn new(result: &'a DomainQueryResult, located: &'a [(String, GeoLocationEntry)]) -> Self {
        Self {
            result,
            locations: located
                .iter()
                .map(|(ip, entry)| (ip.as_str(), entry))
                .collect(),
        }
    }
}

/// One provider of the effective chain, for `dnx providers`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    pub position: usize,
    #[serde(flatten)]
    pub metadata: ProviderMetadata,
    pub base_url: String,
    pub relay_url: Option<String>,
}

/// Pair each configured provider with its metadata and effective URLs.
pub fn chain_entries(chain: &[ProviderSettings], all: &[ProviderMetadata]) -> Vec<ChainEntry> {
    chain
        .iter()
        .enumerate()
        .filter_map(|(index, settings)| {
            let metadata = all.iter().find(|m| m.id == settings.kind)?.clone();
            let base_url = settings
                .base_url
                .clone()
                .unwrap_or_else(|| metadata.default_base_url.clone());
            let relay_url = match &settings.relay_url {
                Some(relay) if relay.trim().is_empty() => None,
                Some(relay) => Some(relay.clone()),
                None => metadata.default_relay_url.clone(),
            };
            Some(ChainEntry {
                position: index + 1,
                metadata,
                base_url,
                relay_url,
            })
        })
        .collect()
}

pub fn render_chain(entries: &[ChainEntry]) -> String {
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!(
            "{}. {} ({})",
            entry.position, entry.metadata.name, entry.metadata.id
        ));
        lines.push(format!("   {}", entry.metadata.description));
        lines.push(format!("   base:  {}", entry.base_url));
        if let Some(relay) = &entry.relay_url {
            lines.push(format!("   relay: {relay}"));
        }
    }
    lines.join("\n")
}

/// Sectioned text report of an analysis
pub fn render_report(result: &DomainQueryResult, located: &[(String, GeoLocationEntry)]) -> String {
    let mut lines = vec![format!("{}  [{}]", result.domain(), result.status_kind())];

    if let Some(error) = result.error() {
        lines.push(format!("Error: {error}"));
        return lines.join("\n");
    }

    section(&mut lines, "Overview");
    field(&mut lines, "IP address", result.ip_address().as_deref());
    field(&mut lines, "Reverse DNS", result.text("reverse_dns").as_deref());
    let statuses = result.formatted_domain_status();
    if !statuses.is_empty() {
        field(&mut lines, "Domain status", Some(&statuses.join(", ")));
    }

    let registration = [
        ("Registrar", "registrar_name"),
        ("Registered", "registration_date"),
        ("Registrant", "registrant"),
        ("Admin contact", "admin_contact"),
    ]
    .map(|(label, key)| (label, result.text(key)));
    if registration.iter().any(|(_, value)| value.is_some()) {
        section(&mut lines, "Registration");
        for (label, value) in &registration {
            field(&mut lines, label, value.as_deref());
        }
    }

    if !result.shows_infrastructure() {
        if result.status_kind() == DomainStatusKind::Available {
            lines.push(String::new());
            lines.push("This domain is available for registration.".to_string());
        }
        return lines.join("\n");
    }

    if let Some(ssl) = result.ssl() {
        render_ssl(&mut lines, &ssl);
    }

    section(&mut lines, "DNS");
    records(&mut lines, "A", &result.a_records());
    records(&mut lines, "MX", &result.records("MX"));
    records(&mut lines, "Nameservers", &result.records("nameservers"));

    if result.has_email_auth_records() {
        section(&mut lines, "Email authentication");
        for key in ["SPF", "DKIM", "DMARC"] {
            records(&mut lines, key, &result.records(key));
        }
    }

    if !located.is_empty() {
        section(&mut lines, "IP locations");
        for (ip, entry) in located {
            lines.push(render_location(ip, entry));
        }
    }

    lines.join("\n")
}

fn render_ssl(lines: &mut Vec<String>, ssl: &SslInfo) {
    section(lines, "SSL certificate");
    let kind = ssl.status_kind();
    let marker = if kind.is_problem() { " (!)" } else { "" };
    lines.push(format!("  {:<14} {}{marker}", "Status", kind.label()));
    field(lines, "Issuer", ssl.issuer.as_deref());
    field(lines, "Valid from", ssl.valid_from.as_deref());
    field(lines, "Valid until", ssl.valid_until.as_deref());
    if let Some(days) = ssl.days_until_expiry {
        let urgency = match ExpiryUrgency::from_days(days) {
            ExpiryUrgency::Critical => "critical",
            ExpiryUrgency::Warning => "renew soon",
            ExpiryUrgency::Healthy => "ok",
        };
        lines.push(format!("  {:<14} {days} days ({urgency})", "Expires in"));
    }
    field(lines, "Error", ssl.error.as_deref());
}

/// One line per IP: location fields, loading marker or error.
pub fn render_location(ip: &str, entry: &GeoLocationEntry) -> String {
    if entry.loading {
        return format!("  {ip}: loading...");
    }
    if let Some(error) = &entry.error {
        return format!("  {ip}: {error}");
    }
    let parts: Vec<String> = [
        ("continent", &entry.continent),
        ("country", &entry.country),
        ("city", &entry.city),
        ("isp", &entry.isp),
        ("org", &entry.org),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
    .collect();
    let via = entry
        .provider
        .as_deref()
        .map(|p| format!(" [{p}]"))
        .unwrap_or_default();
    if parts.is_empty() {
        format!("  {ip}: no details{via}")
    } else {
        format!("  {ip}: {}{via}", parts.join(", "))
    }
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
}

fn field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        lines.push(format!("  {label:<14} {value}"));
    }
}

fn records(lines: &mut Vec<String>, label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    lines.push(format!("  {label}"));
    for value in values {
        lines.push(format!("    {value}"));
    }
}
