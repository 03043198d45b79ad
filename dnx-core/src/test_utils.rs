//! Test helpers
//!
//! Scripted geolocation providers and convenience constructors.

use std::sync::Arc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dnx_provider::{GeoLocation, GeoProvider, GeoProviderError, ProviderMetadata, ProviderType};
use tokio::sync::Notify;

use crate::services::GeolocationService;
use crate::traits::{GeoLocationCache, InMemoryGeoLocationCache};
use crate::types::{FailedEntryPolicy, GeoLocationEntry, ResolverOptions};

// ===== MockGeoProvider =====

/// What a [`MockGeoProvider`] does on every lookup.
#[derive(Clone)]
pub enum MockBehavior {
    Succeed(GeoLocation),
    Fail,
    Panic,
    /// Sleep for the given duration, then succeed with an empty location
    Stall(Duration),
}

pub struct MockGeoProvider {
    id: &'static str,
    behavior: MockBehavior,
    calls: Arc<AtomicUsize>,
    /// If Some, every lookup waits for a notification first
    gate: Option<Arc<Notify>>,
}

impl MockGeoProvider {
    pub fn new(id: &'static str, behavior: MockBehavior) -> Self {
        Self {
            id,
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    pub fn succeeding(id: &'static str, location: GeoLocation) -> Self {
        Self::new(id, MockBehavior::Succeed(location))
    }

    pub fn failing(id: &'static str) -> Self {
        Self::new(id, MockBehavior::Fail)
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Shared call counter, readable after the provider moved into a service.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl GeoProvider for MockGeoProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::IpapiCo,
            name: "mock".to_string(),
            description: "scripted test provider".to_string(),
            default_base_url: "http://mock.invalid".to_string(),
            default_relay_url: None,
        }
    }

    #[allow(clippy::panic)]
    async fn lookup(&self, _ip: &str) -> dnx_provider::Result<GeoLocation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.behavior {
            MockBehavior::Succeed(location) => Ok(location.clone()),
            MockBehavior::Fail => Err(GeoProviderError::NetworkError {
                provider: self.id.to_string(),
                detail: "scripted failure".to_string(),
            }),
            MockBehavior::Panic => panic!("scripted panic in {}", self.id),
            MockBehavior::Stall(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(GeoLocation::default())
            }
        }
    }
}

// ===== PanickingSettleCache =====

/// In-memory cache whose first `settle` panics, killing the resolution task.
#[derive(Default)]
pub struct PanickingSettleCache {
    inner: InMemoryGeoLocationCache,
    panicked: AtomicBool,
}

#[async_trait]
impl GeoLocationCache for PanickingSettleCache {
    async fn get(&self, ip: &str) -> Option<GeoLocationEntry> {
        self.inner.get(ip).await
    }

    async fn try_begin(&self, ip: &str, policy: FailedEntryPolicy) -> bool {
        self.inner.try_begin(ip, policy).await
    }

    #[allow(clippy::panic)]
    async fn settle(&self, ip: &str, entry: GeoLocationEntry) {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("scripted panic settling {ip}");
        }
        self.inner.settle(ip, entry).await;
    }

    async fn snapshot(&self) -> BTreeMap<String, GeoLocationEntry> {
        self.inner.snapshot().await
    }
}

// ===== Factories =====

pub fn tunis() -> GeoLocation {
    GeoLocation {
        continent: None,
        country: Some("Tunisia".to_string()),
        city: Some("Tunis".to_string()),
        isp: Some("X".to_string()),
        org: None,
    }
}

/// Resolver over the given providers with a fresh in-memory cache.
pub fn resolver(providers: Vec<MockGeoProvider>, options: ResolverOptions) -> GeolocationService {
    let chain: Vec<Arc<dyn GeoProvider>> = providers
        .into_iter()
        .map(|p| Arc::new(p) as Arc<dyn GeoProvider>)
        .collect();
    GeolocationService::new(chain, Arc::new(InMemoryGeoLocationCache::new()), options)
}
