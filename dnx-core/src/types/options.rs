//! Runtime options for the analysis client and the geolocation resolver.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default domain analysis endpoint
pub const DEFAULT_ENDPOINT: &str = "https://dn-xapi.vercel.app/api/check-domain";

/// Default per-provider attempt budget (seconds)
const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 10;

/// Domain analysis client options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// URL the `{"domain": ...}` body is POSTed to
    pub endpoint: String,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

/// What a new trigger does for an IP whose lookup already failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailedEntryPolicy {
    /// Failed entries stay failed for the whole session
    #[default]
    Sticky,
    /// A new trigger re-runs the chain for a failed entry
    Retry,
}

/// Geolocation resolver options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Budget for one provider attempt; `0` disables the bound
    pub attempt_timeout_secs: u64,
    pub failed_entries: FailedEntryPolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            attempt_timeout_secs: DEFAULT_ATTEMPT_TIMEOUT_SECS,
            failed_entries: FailedEntryPolicy::default(),
        }
    }
}

impl ResolverOptions {
    pub fn attempt_timeout(&self) -> Option<Duration> {
        (self.attempt_timeout_secs > 0).then(|| Duration::from_secs(self.attempt_timeout_secs))
    }
}
