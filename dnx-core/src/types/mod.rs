//! Type definitions

mod domain_query;
mod geo;
mod options;
mod status;

pub use domain_query::{DomainQueryResult, SslInfo};
pub use geo::GeoLocationEntry;
pub use options::{AnalysisOptions, DEFAULT_ENDPOINT, FailedEntryPolicy, ResolverOptions};
pub use status::{DomainStatusKind, ExpiryUrgency, SslStatusKind};

// Re-export provider-layer types used in core signatures
pub use dnx_provider::{GeoLocation, ProviderMetadata, ProviderSettings, ProviderType};
