//! TOML configuration
//!
//! ```toml
//! [analysis]
//! endpoint = "https://dn-xapi.vercel.app/api/check-domain"
//! timeout_secs = 30
//!
//! [geolocation]
//! attempt_timeout_secs = 10
//! failed_entries = "sticky"   # or "retry"
//!
//! # Chain order; omit to use ipapi.co, ip-api.com, ipinfo.io
//! [[geolocation.providers]]
//! kind = "ip_api"
//! relay_url = ""              # empty disables the relay
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dnx_core::types::{AnalysisOptions, ProviderSettings, ResolverOptions};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisOptions,
    pub geolocation: GeolocationConfig,
}

/// `[geolocation]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    #[serde(flatten)]
    pub resolver: ResolverOptions,
    /// Provider chain, in fallback order
    pub providers: Vec<ProviderSettings>,
}

/// `<config dir>/dnx/config.toml`
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dnx").join("config.toml"))
}

impl Config {
    /// Load from `path`, or from the default location when present.
    ///
    /// An explicit path must exist and parse. A broken file at the default
    /// location is reported and ignored.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path).or_else(|e| {
                tracing::warn!("Ignoring config file {}: {e:#}", path.display());
                Ok(Self::default())
            }),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn override_endpoint(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint {
            self.analysis.endpoint = endpoint;
        }
    }

    /// Configured chain, or the default one when none is configured
    pub fn provider_chain(&self) -> Vec<ProviderSettings> {
        if self.geolocation.providers.is_empty() {
            ProviderSettings::default_chain()
        } else {
            self.geolocation.providers.clone()
        }
    }
}
