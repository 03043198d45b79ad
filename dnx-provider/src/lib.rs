//! # dnx-provider
//!
//! A uniform abstraction over public IP geolocation services.
//!
//! ## Supported Providers
//!
//! | Provider | Endpoint | Success marker |
//! |----------|----------|----------------|
//! | [ipapi.co](https://ipapi.co/) | `GET /<ip>/json/` | HTTP ok, no truthy `error` |
//! | [ip-api.com](https://ip-api.com/) | `GET /json/<ip>?fields=...` via relay | `status == "success"` |
//! | [ipinfo.io](https://ipinfo.io/) | `GET /<ip>/json` | HTTP ok, no truthy `error` |
//!
//! Every provider maps its own body into a [`GeoLocation`]. A lookup is a single
//! HTTP exchange: no retries, no fallback. Chaining providers is left to the caller
//! (see `dnx-core`'s `GeolocationService`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnx_provider::{create_chain, create_http_client, GeoProvider, ProviderSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_http_client()?;
//!     let chain = create_chain(&ProviderSettings::default_chain(), &client);
//!
//!     for provider in &chain {
//!         match provider.lookup("93.184.216.34").await {
//!             Ok(location) => {
//!                 println!("{} -> {:?}", provider.id(), location.country);
//!                 break;
//!             }
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All lookups return [`Result<T, GeoProviderError>`](GeoProviderError):
//!
//! - [`GeoProviderError::NetworkError`] / [`GeoProviderError::Timeout`]: transport failure
//! - [`GeoProviderError::HttpStatus`]: non-success HTTP status
//! - [`GeoProviderError::LookupFailed`]: the body carried the provider's failure marker
//! - [`GeoProviderError::ParseError`]: the body was not the expected JSON

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{GeoProviderError, Result};

// Re-export factory functions
pub use factory::{create_chain, create_provider, get_all_provider_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::GeoProvider;

// Re-export types
pub use types::{GeoLocation, ProviderMetadata, ProviderSettings, ProviderType};

// Re-export concrete providers
pub use providers::common::create_http_client;
pub use providers::{IpApiProvider, IpapiCoProvider, IpinfoProvider};
