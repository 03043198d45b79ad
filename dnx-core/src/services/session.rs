//! Session: the coordinating owner of query results and location slots

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::services::{AnalysisService, GeolocationService};
use crate::types::{DomainQueryResult, GeoLocationEntry};

/// Session state shared by every operation of one run.
///
/// Holds at most one query result (the latest to complete) and delegates
/// location lookups to the resolver, whose cache lives as long as the session.
pub struct Session {
    analysis: AnalysisService,
    geolocation: Arc<GeolocationService>,
    results: RwLock<Vec<DomainQueryResult>>,
}

impl Session {
    #[must_use]
    pub fn new(analysis: AnalysisService, geolocation: Arc<GeolocationService>) -> Self {
        Self {
            analysis,
            geolocation,
            results: RwLock::new(Vec::new()),
        }
    }

    pub fn analysis(&self) -> &AnalysisService {
        &self.analysis
    }

    pub fn geolocation(&self) -> &Arc<GeolocationService> {
        &self.geolocation
    }

    /// Analyze a domain and store the result in place of the previous one.
    ///
    /// Validation errors are returned and leave the stored results untouched.
    pub async fn submit(&self, input: &str) -> CoreResult<DomainQueryResult> {
        let result = self.analysis.analyze(input).await?;
        *self.results.write().await = vec![result.clone()];
        Ok(result)
    }

    pub async fn latest(&self) -> Option<DomainQueryResult> {
        self.results.read().await.last().cloned()
    }

    pub async fn results(&self) -> Vec<DomainQueryResult> {
        self.results.read().await.clone()
    }

    pub async fn locate(&self, ip: &str) -> GeoLocationEntry {
        self.geolocation.resolve_location(ip).await
    }

    /// Resolve every IP of a result concurrently, returned in result order.
    pub async fn locate_result_ips(
        &self,
        result: &DomainQueryResult,
    ) -> Vec<(String, GeoLocationEntry)> {
        let ips = result.ip_addresses();
        let entries = join_all(ips.iter().map(|ip| self.geolocation.resolve_location(ip))).await;
        ips.into_iter().zip(entries).collect()
    }

    pub async fn locations(&self) -> BTreeMap<String, GeoLocationEntry> {
        self.geolocation.entries().await
    }
}
