//! Provider factory functions and metadata.

use std::sync::Arc;

use reqwest::Client;

use crate::providers::{IpApiProvider, IpapiCoProvider, IpinfoProvider};
use crate::traits::GeoProvider;
use crate::types::{ProviderMetadata, ProviderSettings, ProviderType};

/// Creates a [`GeoProvider`] instance from its settings.
///
/// The returned provider is wrapped in `Arc<dyn GeoProvider>` so a chain can be
/// shared across async tasks. All providers of a chain should share one `client`.
///
/// # Examples
///
/// ```rust,no_run
/// use dnx_provider::{
///     create_http_client, create_provider, GeoProvider, ProviderSettings, ProviderType,
/// };
///
/// let client = create_http_client().unwrap();
/// let provider = create_provider(&ProviderSettings::new(ProviderType::Ipinfo), client);
/// assert_eq!(provider.id(), "ipinfo");
/// ```
pub fn create_provider(settings: &ProviderSettings, client: Client) -> Arc<dyn GeoProvider> {
    match settings.kind {
        ProviderType::IpapiCo => match &settings.base_url {
            Some(base) => Arc::new(IpapiCoProvider::with_base_url(client, base.clone())),
            None => Arc::new(IpapiCoProvider::new(client)),
        },
        ProviderType::IpApi => Arc::new(IpApiProvider::from_settings(
            client,
            settings.base_url.clone(),
            settings.relay_url.clone(),
        )),
        ProviderType::Ipinfo => match &settings.base_url {
            Some(base) => Arc::new(IpinfoProvider::with_base_url(client, base.clone())),
            None => Arc::new(IpinfoProvider::new(client)),
        },
    }
}

/// Builds the providers of a chain, preserving the given order.
pub fn create_chain(settings: &[ProviderSettings], client: &Client) -> Vec<Arc<dyn GeoProvider>> {
    settings
        .iter()
        .map(|s| create_provider(s, client.clone()))
        .collect()
}

/// Returns metadata for all providers, in default chain order.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        IpapiCoProvider::metadata(),
        IpApiProvider::metadata(),
        IpinfoProvider::metadata(),
    ]
}
