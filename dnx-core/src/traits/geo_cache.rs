//! Per-IP geolocation cache Trait

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{FailedEntryPolicy, GeoLocationEntry};

/// Geolocation Cache Trait
///
/// Holds one [`GeoLocationEntry`] per IP for the lifetime of a session.
/// Provides a default memory implementation of `InMemoryGeoLocationCache`.
#[async_trait]
pub trait GeoLocationCache: Send + Sync {
    /// Get the slot of an IP
    async fn get(&self, ip: &str) -> Option<GeoLocationEntry>;

    /// Claim an IP for a new provider chain.
    ///
    /// Check and mark happen as one step: returns `true` and stores a loading
    /// entry when the IP has no slot (or a failed slot that `policy` allows to
    /// retry). Returns `false` and leaves the slot untouched otherwise.
    async fn try_begin(&self, ip: &str, policy: FailedEntryPolicy) -> bool;

    /// Store the settled outcome of a chain
    async fn settle(&self, ip: &str, entry: GeoLocationEntry);

    /// All slots, ordered by IP
    async fn snapshot(&self) -> BTreeMap<String, GeoLocationEntry>;
}

/// In-memory geolocation cache
///
/// Default implementation; cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryGeoLocationCache {
    entries: Arc<RwLock<HashMap<String, GeoLocationEntry>>>,
}

impl InMemoryGeoLocationCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GeoLocationCache for InMemoryGeoLocationCache {
    async fn get(&self, ip: &str) -> Option<GeoLocationEntry> {
        self.entries.read().await.get(ip).cloned()
    }

    async fn try_begin(&self, ip: &str, policy: FailedEntryPolicy) -> bool {
        let mut entries = self.entries.write().await;
        let claim = match entries.get(ip) {
            None => true,
            Some(entry) if entry.is_failed() => policy == FailedEntryPolicy::Retry,
            Some(_) => false,
        };
        if claim {
            entries.insert(ip.to_string(), GeoLocationEntry::loading());
        }
        claim
    }

    async fn settle(&self, ip: &str, entry: GeoLocationEntry) {
        self.entries.write().await.insert(ip.to_string(), entry);
    }

    async fn snapshot(&self) -> BTreeMap<String, GeoLocationEntry> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(ip, entry)| (ip.clone(), entry.clone()))
            .collect()
    }
}
