//! Classification of the loosely typed status strings returned by the analysis API.

use std::fmt;

use serde::Serialize;

/// Domain status as reported in `status` or in each `domain_status` token.
///
/// Matching is case-insensitive; unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatusKind {
    Registered,
    Available,
    Error,
    Other(String),
}

impl DomainStatusKind {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "registered" => Self::Registered,
            "available" => Self::Available,
            "error" => Self::Error,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Display label: canonical capitalisation for known values, raw otherwise.
    pub fn label(&self) -> &str {
        match self {
            Self::Registered => "Registered",
            Self::Available => "Available",
            Self::Error => "Error",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for DomainStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Certificate status from the `ssl.status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SslStatusKind {
    Valid,
    Expired,
    Invalid,
    /// `"unknown"` and anything unrecognised
    Unknown,
}

impl SslStatusKind {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "valid" => Self::Valid,
            "expired" => Self::Expired,
            "invalid" => Self::Invalid,
            _ => Self::Unknown,
        }
    }

    /// Whether the status should be shown as a problem.
    pub fn is_problem(self) -> bool {
        matches!(self, Self::Expired | Self::Invalid)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Expired => "Expired",
            Self::Invalid => "Invalid",
            Self::Unknown => "Unknown",
        }
    }
}

/// How close a certificate is to expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryUrgency {
    /// Fewer than 30 days left (or already past)
    Critical,
    /// Fewer than 90 days left
    Warning,
    Healthy,
}

impl ExpiryUrgency {
    pub const CRITICAL_DAYS: f64 = 30.0;
    pub const WARNING_DAYS: f64 = 90.0;

    pub fn from_days(days_until_expiry: f64) -> Self {
        if days_until_expiry < Self::CRITICAL_DAYS {
            Self::Critical
        } else if days_until_expiry < Self::WARNING_DAYS {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}
