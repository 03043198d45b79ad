//! IP geolocation resolver: provider fallback chain plus per-IP session cache

use std::any::Any;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use dnx_provider::{
    GeoLocation, GeoProvider, GeoProviderError, ProviderSettings, create_chain, create_http_client,
};
use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::error::{CoreError, CoreResult, LOCATION_FETCH_FAILED};
use crate::traits::{GeoLocationCache, InMemoryGeoLocationCache};
use crate::types::{GeoLocationEntry, ResolverOptions};

/// Geolocation resolver
///
/// Providers are tried strictly in order; the first success settles the IP's
/// slot. Each resolution runs on its own task, so a caller dropping its future
/// never leaves a slot stuck in `loading`.
pub struct GeolocationService {
    providers: Arc<[Arc<dyn GeoProvider>]>,
    cache: Arc<dyn GeoLocationCache>,
    options: ResolverOptions,
}

impl GeolocationService {
    /// Create a resolver over an ordered provider chain
    #[must_use]
    pub fn new(
        providers: Vec<Arc<dyn GeoProvider>>,
        cache: Arc<dyn GeoLocationCache>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            providers: providers.into(),
            cache,
            options,
        }
    }

    /// Build the chain from provider settings, sharing one HTTP client, with an in-memory cache.
    pub fn from_settings(settings: &[ProviderSettings], options: ResolverOptions) -> CoreResult<Self> {
        let client = create_http_client()?;
        Ok(Self::new(
            create_chain(settings, &client),
            Arc::new(InMemoryGeoLocationCache::new()),
            options,
        ))
    }

    /// Providers in chain order
    pub fn providers(&self) -> &[Arc<dyn GeoProvider>] {
        &self.providers
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve the location of `ip` and return its slot state afterwards.
    ///
    /// Never fails: an IP that is already loading or settled is left alone and
    /// its current slot is returned, every failure ends up in the slot's `error`.
    pub async fn resolve_location(&self, ip: &str) -> GeoLocationEntry {
        if ip.is_empty() {
            return GeoLocationEntry::failed("IP address is required");
        }

        match tokio::spawn(self.resolution(ip.to_string())).await {
            Ok(entry) => entry,
            Err(e) => {
                // The task was cancelled or its settle step panicked
                log::error!("Resolution task for {ip} ended abnormally: {e}");
                let entry = GeoLocationEntry::failed(LOCATION_FETCH_FAILED);
                if self.cache.get(ip).await.is_some_and(|slot| slot.loading) {
                    self.cache.settle(ip, entry.clone()).await;
                }
                entry
            }
        }
    }

    /// Fire-and-forget variant of [`resolve_location`](Self::resolve_location).
    pub fn spawn_resolve(&self, ip: &str) -> JoinHandle<GeoLocationEntry> {
        if ip.is_empty() {
            return tokio::spawn(async { GeoLocationEntry::failed("IP address is required") });
        }
        tokio::spawn(self.resolution(ip.to_string()))
    }

    /// Current slot of an IP
    pub async fn entry(&self, ip: &str) -> Option<GeoLocationEntry> {
        self.cache.get(ip).await
    }

    /// Snapshot of every slot, ordered by IP
    pub async fn entries(&self) -> BTreeMap<String, GeoLocationEntry> {
        self.cache.snapshot().await
    }

    /// Claim, run the chain and settle, as one `'static` future.
    fn resolution(&self, ip: String) -> impl Future<Output = GeoLocationEntry> + Send + use<> {
        let providers = Arc::clone(&self.providers);
        let cache = Arc::clone(&self.cache);
        let policy = self.options.failed_entries;
        let attempt_timeout = self.options.attempt_timeout();

        async move {
            if !cache.try_begin(&ip, policy).await {
                log::debug!("Location of {ip} already requested, skipping");
                return cache.get(&ip).await.unwrap_or_else(GeoLocationEntry::loading);
            }

            let outcome = AssertUnwindSafe(run_chain(&providers, &ip, attempt_timeout))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    Err(CoreError::ResolutionAborted(panic_message(payload.as_ref())))
                });

            let entry = match outcome {
                Ok((provider, location)) => GeoLocationEntry::resolved(provider, location),
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("Location of {ip}: {e}");
                    } else {
                        log::error!("Location of {ip}: {e}");
                    }
                    GeoLocationEntry::failed(e.to_string())
                }
            };
            cache.settle(&ip, entry.clone()).await;
            entry
        }
    }
}

/// Try each provider in order until one answers.
///
/// A provider that panics counts as that provider failing; the chain moves on.
async fn run_chain(
    providers: &[Arc<dyn GeoProvider>],
    ip: &str,
    attempt_timeout: Option<Duration>,
) -> CoreResult<(&'static str, GeoLocation)> {
    for provider in providers {
        let attempt = async {
            match attempt_timeout {
                Some(limit) => tokio::time::timeout(limit, provider.lookup(ip))
                    .await
                    .unwrap_or_else(|_| {
                        Err(GeoProviderError::Timeout {
                            provider: provider.id().to_string(),
                            detail: format!("no answer within {}s", limit.as_secs()),
                        })
                    }),
                None => provider.lookup(ip).await,
            }
        };

        let outcome = match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                log::error!(
                    "[{}] panicked looking up {ip}: {}, trying next provider",
                    provider.id(),
                    panic_message(payload.as_ref())
                );
                continue;
            }
        };

        match outcome {
            Ok(location) => {
                log::debug!("[{}] located {ip}", provider.id());
                return Ok((provider.id(), location));
            }
            Err(e) if e.is_expected() => log::debug!("{e}, trying next provider"),
            Err(e) => log::warn!("{e}, trying next provider"),
        }
    }
    Err(CoreError::AllProvidersFailed)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "provider panicked".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::Ordering;

    use tokio::sync::Notify;

    use super::*;
    use crate::error::LOCATION_UNAVAILABLE;
    use crate::test_utils::{MockBehavior, MockGeoProvider, PanickingSettleCache, resolver, tunis};
    use crate::types::FailedEntryPolicy;

    const IP: &str = "197.0.0.1";

    #[tokio::test]
    async fn first_failure_falls_through_to_next_provider() {
        let a = MockGeoProvider::failing("a");
        let b = MockGeoProvider::succeeding("b", tunis());
        let c = MockGeoProvider::failing("c");
        let c_calls = c.calls();
        let service = resolver(vec![a, b, c], ResolverOptions::default());

        let entry = service.resolve_location(IP).await;

        assert_eq!(entry.country.as_deref(), Some("Tunisia"));
        assert_eq!(entry.city.as_deref(), Some("Tunis"));
        assert_eq!(entry.isp.as_deref(), Some("X"));
        assert!(!entry.loading);
        assert!(entry.error.is_none());
        assert_eq!(entry.provider.as_deref(), Some("b"));
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.entry(IP).await, Some(entry));
    }

    #[tokio::test]
    async fn all_providers_failing_sets_error() {
        let service = resolver(
            vec![
                MockGeoProvider::failing("a"),
                MockGeoProvider::failing("b"),
                MockGeoProvider::failing("c"),
            ],
            ResolverOptions::default(),
        );

        let entry = service.resolve_location(IP).await;

        assert!(!entry.loading);
        assert_eq!(entry.error.as_deref(), Some(LOCATION_UNAVAILABLE));
        assert!(entry.location().is_empty());
    }

    #[tokio::test]
    async fn settled_success_is_not_refetched() {
        let a = MockGeoProvider::succeeding("a", tunis());
        let calls = a.calls();
        let service = resolver(vec![a], ResolverOptions::default());

        let first = service.resolve_location(IP).await;
        let second = service.resolve_location(IP).await;
        let third = service.spawn_resolve(IP).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn trigger_while_loading_is_a_no_op() {
        let gate = Arc::new(Notify::new());
        let a = MockGeoProvider::succeeding("a", tunis()).gated(Arc::clone(&gate));
        let calls = a.calls();
        let service = resolver(vec![a], ResolverOptions::default());

        let first = service.spawn_resolve(IP);
        tokio::time::timeout(Duration::from_secs(5), async {
            while calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        let second = service.resolve_location(IP).await;
        assert!(second.loading);

        gate.notify_one();
        let first = first.await.unwrap();
        assert!(first.is_resolved());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_triggers_run_one_chain() {
        let a = MockGeoProvider::new("a", MockBehavior::Stall(Duration::from_millis(50)));
        let calls = a.calls();
        let service = resolver(vec![a], ResolverOptions::default());

        let (x, y) = tokio::join!(service.resolve_location(IP), service.resolve_location(IP));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(x.is_resolved() || y.is_resolved());
        assert!(service.entry(IP).await.unwrap().is_resolved());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_provider_is_skipped_after_timeout() {
        let service = resolver(
            vec![
                MockGeoProvider::new("slow", MockBehavior::Stall(Duration::from_secs(3600))),
                MockGeoProvider::succeeding("b", tunis()),
            ],
            ResolverOptions {
                attempt_timeout_secs: 2,
                ..ResolverOptions::default()
            },
        );

        let entry = service.resolve_location(IP).await;

        assert_eq!(entry.provider.as_deref(), Some("b"));
        assert_eq!(entry.country.as_deref(), Some("Tunisia"));
    }

    #[tokio::test]
    async fn panicking_provider_falls_through_to_next() {
        let service = resolver(
            vec![
                MockGeoProvider::new("a", MockBehavior::Panic),
                MockGeoProvider::succeeding("b", tunis()),
            ],
            ResolverOptions::default(),
        );

        let entry = service.resolve_location(IP).await;

        assert!(entry.is_resolved());
        assert_eq!(entry.provider.as_deref(), Some("b"));
        assert_eq!(entry.country.as_deref(), Some("Tunisia"));
        assert_eq!(service.entry(IP).await, Some(entry));
    }

    #[tokio::test]
    async fn every_provider_panicking_is_unavailable() {
        let service = resolver(
            vec![
                MockGeoProvider::new("a", MockBehavior::Panic),
                MockGeoProvider::new("b", MockBehavior::Panic),
            ],
            ResolverOptions::default(),
        );

        let entry = service.resolve_location(IP).await;

        assert!(!entry.loading);
        assert_eq!(entry.error.as_deref(), Some(LOCATION_UNAVAILABLE));
    }

    #[tokio::test]
    async fn aborted_task_settles_fetch_failure() {
        let service = GeolocationService::new(
            vec![Arc::new(MockGeoProvider::succeeding("a", tunis())) as Arc<dyn GeoProvider>],
            Arc::new(PanickingSettleCache::default()),
            ResolverOptions::default(),
        );

        let entry = service.resolve_location(IP).await;

        assert!(!entry.loading);
        assert_eq!(entry.error.as_deref(), Some(LOCATION_FETCH_FAILED));
        assert!(entry.location().is_empty());
        assert_eq!(service.entry(IP).await, Some(entry));
    }

    #[tokio::test]
    async fn failed_entry_sticks_by_default() {
        let a = MockGeoProvider::failing("a");
        let calls = a.calls();
        let service = resolver(vec![a], ResolverOptions::default());

        service.resolve_location(IP).await;
        let again = service.resolve_location(IP).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(again.error.as_deref(), Some(LOCATION_UNAVAILABLE));
    }

    #[tokio::test]
    async fn failed_entry_retries_under_retry_policy() {
        let a = MockGeoProvider::failing("a");
        let calls = a.calls();
        let service = resolver(
            vec![a],
            ResolverOptions {
                failed_entries: FailedEntryPolicy::Retry,
                ..ResolverOptions::default()
            },
        );

        service.resolve_location(IP).await;
        service.resolve_location(IP).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_ip_is_not_cached() {
        let a = MockGeoProvider::succeeding("a", tunis());
        let calls = a.calls();
        let service = resolver(vec![a], ResolverOptions::default());

        let entry = service.resolve_location("").await;

        assert!(entry.is_failed());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(service.entries().await.is_empty());
    }

    #[tokio::test]
    async fn empty_chain_reports_unavailable() {
        let service = resolver(vec![], ResolverOptions::default());
        let entry = service.resolve_location(IP).await;
        assert_eq!(entry.error.as_deref(), Some(LOCATION_UNAVAILABLE));
    }

    #[test]
    fn panic_message_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(payload.as_ref()), "owned boom");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "provider panicked");
    }
}
